//! # resize-image
//!
//! Shrink (or grow) one image to a fixed width, keep its aspect ratio, and
//! write the result as an optimized PNG.
//!
//! ```text
//! assets/images/app_image.png  ──identify──▶  (W, H)
//!                               ──plan─────▶  1920 x floor(1920·H/W)
//!                               ──resize───▶  Lanczos3
//!                               ──encode───▶  assets/images/app_image_resized.png
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Dimension math, backend trait, `image`-crate backend |
//! | [`resize`] | One run end to end, with input/processing/output error classes |
//! | [`report`] | Console output: dimensions, file sizes, reduction |
//! | [`config`] | `resize.toml` loading, validation, and CLI overrides |
//!
//! # Design Decisions
//!
//! ## Truncating Height
//!
//! The output height is `target_width * height / width` in integer
//! arithmetic, truncated toward zero. Any other rounding would produce
//! different output dimensions for the same input, so the calculation lives
//! in one pure function ([`imaging::calculate_scaled_height`]) with its own
//! tests.
//!
//! ## Lanczos3 Always
//!
//! There is no filter option. The tool runs once per asset, so paying for
//! the sharpest common filter is fine.
//!
//! ## Encode, Then Write
//!
//! The PNG is encoded into memory and written in one call. An encoder error
//! leaves an existing output untouched; an interrupted write can still leave
//! a partial file, which the next run replaces.

pub mod config;
pub mod imaging;
pub mod report;
pub mod resize;
