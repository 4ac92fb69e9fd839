//! Console output for a resize run.
//!
//! # Output Format
//!
//! ```text
//! Original size: (4000, 3000)
//! New size: 1920x1440
//! Original file size: 7.3 MB
//! New file size: 2.1 MB
//! Size reduction: 71.2%
//! ```
//!
//! The first two lines are available as soon as the source is identified (and
//! are all that `plan` prints); the last three need both files on disk.
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure and do no I/O.

use crate::imaging::Dimensions;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Before/after file sizes of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizes {
    pub original_bytes: u64,
    pub new_bytes: u64,
}

impl FileSizes {
    /// Percentage saved relative to the original. Negative when the output
    /// grew; `0.0` for an empty original.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        let original = self.original_bytes as f64;
        (original - self.new_bytes as f64) / original * 100.0
    }
}

/// Everything printed after a successful run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeReport {
    pub original: Dimensions,
    pub resized: Dimensions,
    pub sizes: FileSizes,
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Format the dimension lines.
pub fn format_dimensions(original: Dimensions, resized: Dimensions) -> Vec<String> {
    vec![
        format!("Original size: ({}, {})", original.width, original.height),
        format!("New size: {}x{}", resized.width, resized.height),
    ]
}

/// Format the file size comparison lines.
pub fn format_file_sizes(sizes: &FileSizes) -> Vec<String> {
    vec![
        format!("Original file size: {:.1} MB", megabytes(sizes.original_bytes)),
        format!("New file size: {:.1} MB", megabytes(sizes.new_bytes)),
        format!("Size reduction: {:.1}%", sizes.reduction_percent()),
    ]
}

/// Format the full five-line report.
pub fn format_report(report: &SizeReport) -> Vec<String> {
    let mut lines = format_dimensions(report.original, report.resized);
    lines.extend(format_file_sizes(&report.sizes));
    lines
}

/// Print the dimension lines to stdout.
pub fn print_dimensions(original: Dimensions, resized: Dimensions) {
    for line in format_dimensions(original, resized) {
        println!("{}", line);
    }
}

/// Print the file size comparison lines to stdout.
pub fn print_file_sizes(sizes: &FileSizes) {
    for line in format_file_sizes(sizes) {
        println!("{}", line);
    }
}
