//! # Angle Utilities
//!
//! Normalization helpers shared by the sidereal-time and horizontal
//! conversions, plus compass naming for headings.
//!
//! Conversions between degrees and radians use the standard `f64::to_radians`
//! and `f64::to_degrees`; the helpers here only deal with wrapping values into
//! a canonical range.
//!
//! ## Examples
//!
//! ```rust
//! use starmap::coordinates::angle::{normalize_degrees, cardinal_direction_name};
//!
//! assert_eq!(normalize_degrees(-90.0), 270.0);
//! assert_eq!(cardinal_direction_name(95.0), "E");
//! ```

use crate::constants::TAU;

/// Compass points in clockwise order starting at north
pub const CARDINAL_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Wraps an angle in degrees into `[0, 360)`
///
/// # Examples
///
/// ```rust
/// use starmap::coordinates::angle::normalize_degrees;
///
/// assert_eq!(normalize_degrees(725.0), 5.0);
/// assert_eq!(normalize_degrees(360.0), 0.0);
/// ```
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Wraps an angle in radians into `[0, 2π)`
pub fn normalize_radians(radians: f64) -> f64 {
    let normalized = radians.rem_euclid(TAU);
    if normalized >= TAU {
        0.0
    } else {
        normalized
    }
}

/// Returns the 8-point compass name for a heading in degrees
///
/// Each name covers a 45° sector centered on its direction, so 22.4° is
/// still "N" and 22.5° is "NE".
pub fn cardinal_direction_name(heading_deg: f64) -> &'static str {
    let normalized = normalize_degrees(heading_deg);
    let index = ((normalized + 22.5) / 45.0) as usize % CARDINAL_DIRECTIONS.len();
    CARDINAL_DIRECTIONS[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::PI;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(359.5, 359.5)]
    #[case(360.0, 0.0)]
    #[case(-30.0, 330.0)]
    #[case(1080.0 + 12.5, 12.5)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        assert_relative_eq!(normalize_degrees(input), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_degrees_tiny_negative_stays_in_range() {
        let value = normalize_degrees(-1e-15);
        assert!((0.0..360.0).contains(&value));
    }

    #[test]
    fn test_normalize_radians() {
        assert_relative_eq!(normalize_radians(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_radians(5.0 * PI), PI, epsilon = 1e-12);
        let tiny = normalize_radians(-1e-17);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[rstest]
    #[case(0.0, "N")]
    #[case(22.4, "N")]
    #[case(22.5, "NE")]
    #[case(90.0, "E")]
    #[case(180.0, "S")]
    #[case(250.0, "W")]
    #[case(337.5, "N")]
    #[case(-45.0, "NW")]
    fn test_cardinal_direction_name(#[case] heading: f64, #[case] expected: &str) {
        assert_eq!(cardinal_direction_name(heading), expected);
    }
}
