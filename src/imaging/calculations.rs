//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output height that keeps the source aspect ratio at a fixed width.
///
/// The result is `floor(target_width * height / width)`, computed in 64-bit
/// integers so the intermediate product cannot overflow. Division truncates
/// toward zero; no rounding is applied.
///
/// Returns `None` when the source width is zero or the height does not fit
/// in a `u32`.
///
/// # Examples
/// ```
/// # use resize_image::imaging::calculate_scaled_height;
/// // 4000x3000 (4:3) at 1920 wide → 1440 tall
/// assert_eq!(calculate_scaled_height((4000, 3000), 1920), Some(1440));
///
/// // Truncates: 1920 * 1000 / 3000 = 640.0, 1920 * 1001 / 3000 = 640.64 → 640
/// assert_eq!(calculate_scaled_height((3000, 1001), 1920), Some(640));
/// ```
pub fn calculate_scaled_height(original: (u32, u32), target_width: u32) -> Option<u32> {
    let (orig_w, orig_h) = original;
    if orig_w == 0 {
        return None;
    }
    let height = u64::from(target_width) * u64::from(orig_h) / u64::from(orig_w);
    u32::try_from(height).ok()
}

/// Check that `scaled` keeps the aspect ratio of `original` within integer
/// truncation error: `|sh/sw - oh/ow| < 1/sw`.
///
/// Cross-multiplied to stay in integer arithmetic:
/// `|sh*ow - oh*sw| < ow`.
pub fn preserves_aspect_ratio(original: (u32, u32), scaled: (u32, u32)) -> bool {
    let (orig_w, orig_h) = (u64::from(original.0), u64::from(original.1));
    let (new_w, new_h) = (u64::from(scaled.0), u64::from(scaled.1));
    if orig_w == 0 || new_w == 0 {
        return false;
    }
    (new_h * orig_w).abs_diff(orig_h * new_w) < orig_w
}
