//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_scaled_height;
use super::params::{PngCompression, ResizeParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// Plan a width-targeted resize without executing it.
///
/// The height follows [`calculate_scaled_height`]. Returns `None` when the
/// original width is zero or the scaled height overflows.
pub fn plan_resize(
    source: &Path,
    output: &Path,
    original: Dimensions,
    target_width: u32,
    compression: PngCompression,
) -> Option<ResizeParams> {
    let height = calculate_scaled_height((original.width, original.height), target_width)?;
    Some(ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: target_width,
        height,
        compression,
    })
}

/// Execute a planned resize and return the dimensions that were written.
pub fn resize_to_width(backend: &impl ImageBackend, params: &ResizeParams) -> Result<Dimensions> {
    backend.resize(params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1920,
            height: 1080,
        }]);

        let dims = get_dimensions(&backend, Path::new("/test.png")).unwrap();
        assert_eq!(dims, Dimensions::from((1920, 1080)));
    }

    #[test]
    fn plan_resize_keeps_target_width_and_scales_height() {
        let params = plan_resize(
            Path::new("/source.png"),
            Path::new("/out.png"),
            Dimensions::from((4000, 3000)),
            1920,
            PngCompression::Optimized,
        )
        .unwrap();

        assert_eq!(params.width, 1920);
        assert_eq!(params.height, 1440);
        assert_eq!(params.output, Path::new("/out.png"));
    }

    #[test]
    fn plan_resize_zero_width_source_is_none() {
        let params = plan_resize(
            Path::new("/source.png"),
            Path::new("/out.png"),
            Dimensions::from((0, 3000)),
            1920,
            PngCompression::Optimized,
        );
        assert!(params.is_none());
    }

    #[test]
    fn resize_to_width_uses_backend() {
        let backend = MockBackend::new();
        let params = plan_resize(
            Path::new("/source.png"),
            Path::new("/out.png"),
            Dimensions::from((1920, 1080)),
            1920,
            PngCompression::Standard,
        )
        .unwrap();

        let written = resize_to_width(&backend, &params).unwrap();
        assert_eq!(written, Dimensions::from((1920, 1080)));

        let ops = backend.get_operations();
        assert_eq!(
            ops,
            vec![RecordedOp::Resize {
                source: "/source.png".to_string(),
                output: "/out.png".to_string(),
                width: 1920,
                height: 1080,
                compression: PngCompression::Standard,
            }]
        );
    }
}
