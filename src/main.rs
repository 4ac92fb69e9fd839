use clap::{Parser, Subcommand};
use resize_image::config::{self, Overrides, ResizeConfig};
use resize_image::imaging::RustBackend;
use resize_image::{report, resize};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "resize-image")]
#[command(about = "Resize an image to a fixed width and save it as an optimized PNG")]
#[command(long_about = "\
Resize an image to a fixed width and save it as an optimized PNG

The height follows the source aspect ratio and is rounded down:

  height = target_width * source_height / source_width

With no arguments, reads assets/images/app_image.png, writes
assets/images/app_image_resized.png at 1920px wide, and prints:

  Original size: (4000, 3000)
  New size: 1920x1440
  Original file size: 7.3 MB
  New file size: 2.1 MB
  Size reduction: 71.2%

Settings come from resize.toml in the working directory when present.
Flags override the file. Run 'resize-image gen-config' for a documented
template. Set RUST_LOG=debug for diagnostics on stderr.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ./resize.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Image to read
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// PNG file to write (replaced if it exists)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Use default PNG compression instead of the strongest
    #[arg(long, global = true)]
    no_optimize: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resize the source and report file sizes (default)
    Resize,
    /// Print the source and target dimensions without writing anything
    Plan,
    /// Print a stock resize.toml with all options documented
    GenConfig,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            source: self.source.clone(),
            output: self.output.clone(),
            target_width: self.width,
            no_optimize: self.no_optimize,
        }
    }

    fn resolve_config(&self) -> Result<ResizeConfig, config::ConfigError> {
        let config = config::load_config(self.config.as_deref())?.with_overrides(self.overrides());
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let backend = RustBackend::new();

    match cli.command.as_ref().unwrap_or(&Command::Resize) {
        Command::Resize => {
            let config = cli.resolve_config()?;
            let (original, params) = resize::plan(&backend, &config).inspect_err(log_failure)?;
            report::print_dimensions(original, (params.width, params.height).into());
            let summary = resize::execute(&backend, original, &params).inspect_err(log_failure)?;
            report::print_file_sizes(&summary.sizes);
        }
        Command::Plan => {
            let config = cli.resolve_config()?;
            let (original, params) = resize::plan(&backend, &config).inspect_err(log_failure)?;
            report::print_dimensions(original, (params.width, params.height).into());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn log_failure(err: &resize::ResizeError) {
    log::error!("{}: {}", err.class(), err);
}
