//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (PNG, JPEG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{PngCompression, ResizeParams};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageError, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a decode-side `ImageError` onto the backend taxonomy.
fn decode_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(e) => BackendError::Io(e),
        ImageError::Unsupported(e) => {
            BackendError::Unsupported(format!("{}: {}", path.display(), e))
        }
        other => BackendError::Decode {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    // Sniff the magic bytes so a mislabelled extension still decodes.
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?
        .decode()
        .map_err(|e| decode_error(path, e))
}

/// PNG has no float sample types; widen those to 16-bit before encoding.
fn png_compatible(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::Rgb32F => DynamicImage::ImageRgb16(img.to_rgb16()),
        ColorType::Rgba32F => DynamicImage::ImageRgba16(img.to_rgba16()),
        _ => img,
    }
}

/// Deflate level and row filter for each compression setting.
///
/// `Standard` is exactly what `PngEncoder::new` would pick.
fn encoder_settings(compression: PngCompression) -> (CompressionType, PngFilter) {
    match compression {
        PngCompression::Optimized => (CompressionType::Best, PngFilter::Adaptive),
        PngCompression::Standard => (CompressionType::default(), PngFilter::default()),
    }
}

/// Encode `img` as PNG in memory.
///
/// Encoding completes before the output file is touched, so an encoder
/// failure never leaves a truncated file behind.
fn encode_png(img: &DynamicImage, compression: PngCompression) -> Result<Vec<u8>, BackendError> {
    let (level, filter) = encoder_settings(compression);
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, level, filter);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))?;
    Ok(buf)
}

/// Encode and write a PNG, replacing any existing file at `path`.
fn save_png(
    img: &DynamicImage,
    path: &Path,
    compression: PngCompression,
) -> Result<(), BackendError> {
    let bytes = encode_png(img, compression)?;
    std::fs::write(path, &bytes).map_err(|source| BackendError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Cannot resize to empty raster {}x{}",
                params.width, params.height
            )));
        }
        let img = load_image(&params.source)?;
        log::debug!(
            "decoded {} as {:?} {}x{}",
            params.source.display(),
            img.color(),
            img.width(),
            img.height()
        );
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_png(&png_compatible(resized), &params.output, params.compression)
    }
}
