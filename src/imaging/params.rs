//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides the output dimensions) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`PngCompression`]: how hard the PNG encoder works on file size.
//! - [`ResizeParams`]: full specification for a resize: source, output path, exact target dimensions, compression.

use std::path::PathBuf;

/// PNG encoder effort.
///
/// `Optimized` trades encode time for a smaller file: best deflate level plus
/// adaptive per-row filtering. `Standard` uses the encoder's default deflate
/// level and row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    #[default]
    Optimized,
    Standard,
}

impl PngCompression {
    pub fn from_optimize(optimize: bool) -> Self {
        if optimize {
            Self::Optimized
        } else {
            Self::Standard
        }
    }
}

/// Parameters for an exact resize: the output is always `width` x `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub compression: PngCompression,
}
