pub mod interval;
pub mod search;

pub use interval::{Interval, IntervalList};
pub use search::{lower_bound, upper_bound};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Tolerant equality for coordinates derived from length-unit conversions.
///
/// Relative for large magnitudes, absolute near zero.
#[must_use]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * f64::max(1.0, f64::max(a.abs(), b.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_close_absolute_near_zero() {
        assert!(is_close(0.0, TOLERANCE / 2.0));
        assert!(!is_close(0.0, 1e-3));
    }

    #[test]
    fn is_close_relative_for_large_magnitudes() {
        // Nanometre-scale fixed-point units produce values around 1e8.
        assert!(is_close(1e8, 1e8 + 1e-2));
        assert!(!is_close(1e8, 1e8 + 1.0));
    }
}
