//! Numeric conversion utilities for specmap-gui.
//!
//! These functions handle conversions between numeric types with explicit
//! handling of precision loss and bounds checking.

/// Convert usize to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Convert f64 to f32 with allowed precision loss.
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_f32(value: f64) -> f32 {
    value as f32
}

/// Convert f32 to u8 with clamping to [0, 255].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f32_to_u8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 255.0);
    clamped.round() as u8
}

/// Format a path's file name for compact display.
#[must_use]
pub fn file_label(path: Option<&std::path::Path>) -> String {
    path.and_then(std::path::Path::file_name)
        .map_or_else(|| "-".to_string(), |n| n.to_string_lossy().into_owned())
}
