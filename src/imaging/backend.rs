//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the in-module `MockBackend`, which records calls instead
//! of touching pixels.

use super::params::ResizeParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Unsupported image format: {0}")]
    Unsupported(String),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source, resample it to exactly the requested size and
    /// encode it as PNG at the output path.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
