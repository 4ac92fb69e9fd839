//! Resize configuration module.
//!
//! Handles loading and validating `resize.toml`. Stock defaults reproduce the
//! classic behavior: shrink `assets/images/app_image.png` to 1920px wide and
//! write an optimized PNG next to it.
//!
//! ## Config File Location
//!
//! `resize.toml` is read from the working directory when present. A different
//! file can be named with `--config`; in that case the file must exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//! source = "assets/images/app_image.png"
//! output = "assets/images/app_image_resized.png"
//! target_width = 1920
//! optimize = true
//! ```
//!
//! Command-line flags override file values. Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "resize.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resize configuration loaded from `resize.toml`.
///
/// All fields have defaults. Config files need only specify the values they
/// want to override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Image to read. Never modified.
    pub source: PathBuf,
    /// PNG to write. Replaced unconditionally on every run.
    pub output: PathBuf,
    /// Output width in pixels; height follows the source aspect ratio.
    pub target_width: u32,
    /// Spend extra encode time for a smaller PNG.
    pub optimize: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets/images/app_image.png"),
            output: PathBuf::from("assets/images/app_image_resized.png"),
            target_width: 1920,
            optimize: true,
        }
    }
}

/// Per-run overrides, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub target_width: Option<u32>,
    pub no_optimize: bool,
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_width == 0 {
            return Err(ConfigError::Validation(
                "target_width must be greater than 0".into(),
            ));
        }
        if refers_to_same_file(&self.source, &self.output) {
            return Err(ConfigError::Validation(format!(
                "output must differ from source ({})",
                self.source.display()
            )));
        }
        Ok(())
    }

    /// Apply overrides on top of file values.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(source) = overrides.source {
            self.source = source;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(width) = overrides.target_width {
            self.target_width = width;
        }
        if overrides.no_optimize {
            self.optimize = false;
        }
        self
    }
}

/// Whether writing `output` would replace `source`.
///
/// Catches aliases as well as equal paths: `..` segments, `./` prefixes and
/// symlinks in either direction. When the source does not exist yet only the
/// literal comparison applies; the run fails on the missing source anyway.
fn refers_to_same_file(source: &Path, output: &Path) -> bool {
    if source == output {
        return true;
    }
    let Ok(source) = fs::canonicalize(source) else {
        return false;
    };
    // An existing output may be a symlink whose target is the source.
    if let Ok(existing) = fs::canonicalize(output) {
        return existing == source;
    }
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), output.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name) == source,
        _ => false,
    }
}

/// Parse a TOML document into a config. Missing keys take stock defaults.
pub fn parse_config(content: &str) -> Result<ResizeConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load the config file, if any.
///
/// - `Some(path)`: the file must exist.
/// - `None`: [`DEFAULT_CONFIG_FILE`] in the working directory is used when
///   present, otherwise stock defaults.
///
/// The result is not validated; call [`ResizeConfig::validate`] after
/// applying overrides.
pub fn load_config(path: Option<&Path>) -> Result<ResizeConfig, ConfigError> {
    let path = match path {
        Some(p) => p,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                log::debug!("no {DEFAULT_CONFIG_FILE} found, using stock defaults");
                return Ok(ResizeConfig::default());
            }
            default
        }
    };
    log::debug!("loading config from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `resize.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# resize-image configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
# Unknown keys will cause an error.

# Image to read. Any PNG, JPEG, TIFF or WebP file. Never modified.
source = "assets/images/app_image.png"

# Where to write the resized image. Always PNG, replaced on every run.
output = "assets/images/app_image_resized.png"

# Output width in pixels. The height is derived from the source aspect
# ratio and rounded down: height = target_width * source_height / source_width.
target_width = 1920

# Use the strongest PNG compression. Slower to encode, smaller file.
optimize = true
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reproduces_classic_run() {
        let config = ResizeConfig::default();
        assert_eq!(config.source, Path::new("assets/images/app_image.png"));
        assert_eq!(
            config.output,
            Path::new("assets/images/app_image_resized.png")
        );
        assert_eq!(config.target_width, 1920);
        assert!(config.optimize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = parse_config("target_width = 1280").unwrap();
        assert_eq!(config.target_width, 1280);
        assert_eq!(config.source, ResizeConfig::default().source);
        assert!(config.optimize);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = parse_config("target_widht = 1280");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = parse_config("target_width = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_width_fails_validation() {
        let config = ResizeConfig {
            target_width: 0,
            ..ResizeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn output_equal_to_source_fails_validation() {
        let config = ResizeConfig {
            output: PathBuf::from("assets/images/app_image.png"),
            ..ResizeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn output_aliasing_source_through_dotdot_fails_validation() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let source = tmp.path().join("src.png");
        fs::write(&source, b"png bytes").unwrap();

        let config = ResizeConfig {
            source: source.clone(),
            output: tmp.path().join("sub").join("..").join("src.png"),
            ..ResizeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn output_with_dot_prefix_fails_validation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("src.png");
        fs::write(&source, b"png bytes").unwrap();

        let config = ResizeConfig {
            source: source.clone(),
            output: tmp.path().join(".").join("src.png"),
            ..ResizeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[cfg(unix)]
    #[test]
    fn output_symlinked_to_source_fails_validation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("src.png");
        let link = tmp.path().join("link.png");
        fs::write(&source, b"png bytes").unwrap();
        std::os::unix::fs::symlink(&source, &link).unwrap();

        let config = ResizeConfig {
            source: source.clone(),
            output: link.clone(),
            ..ResizeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        // Symlinked source pointing at the output file
        let config = ResizeConfig {
            source: link,
            output: source,
            ..ResizeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn distinct_output_in_same_directory_passes_validation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("src.png");
        fs::write(&source, b"png bytes").unwrap();

        let config = ResizeConfig {
            source,
            output: tmp.path().join("sub").join("..").join("out.png"),
            ..ResizeConfig::default()
        };
        // Parent `sub/..` does not exist, so only the literal check applies
        assert!(config.validate().is_ok());

        let config = ResizeConfig {
            output: tmp.path().join("out.png"),
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = parse_config("target_width = 800\noptimize = true").unwrap();
        let config = config.with_overrides(Overrides {
            source: Some(PathBuf::from("in.jpg")),
            output: None,
            target_width: Some(640),
            no_optimize: true,
        });
        assert_eq!(config.source, Path::new("in.jpg"));
        assert_eq!(config.output, ResizeConfig::default().output);
        assert_eq!(config.target_width, 640);
        assert!(!config.optimize);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let config = ResizeConfig::default().with_overrides(Overrides::default());
        assert_eq!(config, ResizeConfig::default());
    }

    #[test]
    fn load_explicit_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "source = \"a.png\"\noutput = \"b.png\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.source, Path::new("a.png"));
        assert_eq!(config.output, Path::new("b.png"));
    }

    #[test]
    fn load_explicit_missing_file_errors() {
        let result = load_config(Some(Path::new("/nonexistent/resize.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config = parse_config(stock_config_toml()).unwrap();
        assert_eq!(config, ResizeConfig::default());
    }

    #[test]
    fn stock_config_toml_mentions_every_key() {
        let content = stock_config_toml();
        for key in ["source", "output", "target_width", "optimize"] {
            assert!(content.contains(&format!("{key} = ")), "missing {key}");
        }
    }
}
