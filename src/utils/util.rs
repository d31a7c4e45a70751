//! # Utility Module
//!
//! Small numeric helpers shared by the spec boundary and the generator.
//!
//! `clamp` restricts a normalized coordinate to a range; `clamp_i32` does the
//! same for grid coordinates and tolerates an inverted range by preferring the
//! lower bound, which the placer relies on when a shape is wider than the
//! margin-reduced grid.

/// Clamps a value between a minimum and maximum.
///
/// # Arguments
///
/// * `value` - The input value to be clamped.
/// * `min` - The minimum allowable value.
/// * `max` - The maximum allowable value.
///
/// # Examples
///
/// ```
/// use sightgrid::utils::util::clamp;
///
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(15.0, 0.0, 1.0), 1.0);
/// ```
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Integer clamp. When `min > max` the result is `min`.
pub fn clamp_i32(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}

/// Converts a normalized `[0, 1]` coordinate to a cell index along an axis of
/// length `extent`, truncating toward zero.
pub fn to_grid_axis(normalized: f64, extent: i32) -> i32 {
    (clamp(normalized, 0.0, 1.0) * extent as f64) as i32
}
