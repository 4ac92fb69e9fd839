//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Resize → PNG** | Lanczos3 + `PngEncoder` (best compression, adaptive filter) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_scaled_height, preserves_aspect_ratio};
pub use operations::{get_dimensions, plan_resize, resize_to_width};
pub use params::{PngCompression, ResizeParams};
pub use rust_backend::RustBackend;
