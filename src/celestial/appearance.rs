//! # Visual Attributes from Photometry
//!
//! Derives render size, brightness and color for catalog objects from their
//! apparent magnitude and B-V color index.
//!
//! ## B-V Color Bands
//!
//! B-V is clamped to `[-0.4, 2.0]`, the range the empirical color relations
//! are valid for, then linearly interpolated inside fixed temperature bands:
//!
//! | Stars          | Blend                    |
//! |----------------|--------------------------|
//! | `< 0.0`        | blue-white toward white  |
//! | `[0.0, 0.5)`   | white                    |
//! | `[0.5, 1.0)`   | white toward yellow      |
//! | `[1.0, 1.5)`   | yellow toward orange     |
//! | `≥ 1.5`        | orange toward red        |
//!
//! Star colors are continuous at 0.5, 1.0 and 1.5. The blue band ends at pure
//! white while the next band starts at (0.9, 0.9, 1.0), so there is a small
//! step at B-V = 0. Nebulae use a four-band variant with the same kind of step
//! at 0.

use serde::{Deserialize, Serialize};

/// Faintest magnitude the star scales are normalized to
pub const STAR_MAGNITUDE_SCALE: f64 = 6.5;

const BV_MIN: f64 = -0.4;
const BV_MAX: f64 = 2.0;

/// RGBA color, each channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Opaque color
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Largest per-channel difference, ignoring alpha
    pub fn max_channel_difference(&self, other: &Rgba) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

/// Default color for stars without a B-V index
pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

/// Default color for nebulae without a B-V index
pub const PALE_BLUE: Rgba = Rgba::rgb(0.8, 0.8, 1.0);

/// Star brightness (opacity) in `[0.1, 1]`
pub fn star_brightness(magnitude: f64) -> f64 {
    (1.0 - magnitude / STAR_MAGNITUDE_SCALE).max(0.1)
}

/// Star base size in points, in `[1.5, 8]`
pub fn star_size(magnitude: f64) -> f64 {
    let normalized = magnitude.clamp(0.0, STAR_MAGNITUDE_SCALE);
    (8.0 - normalized).max(1.5)
}

/// Nebula base size in points, in `[8, 14]`
pub fn nebula_size(magnitude: f64) -> f64 {
    let normalized = magnitude.clamp(1.0, 10.0);
    (15.0 - normalized).max(8.0)
}

/// Star color from its B-V index
pub fn star_color(b_v: Option<f64>) -> Rgba {
    let Some(b_v) = b_v else {
        return WHITE;
    };
    let bv = b_v.clamp(BV_MIN, BV_MAX);

    if bv < 0.0 {
        let t = (bv + 0.4) / 0.4;
        Rgba::rgb(0.6 + 0.4 * t, 0.7 + 0.3 * t, 1.0)
    } else if bv < 0.5 {
        let t = bv / 0.5;
        Rgba::rgb(0.9 + 0.1 * t, 0.9 + 0.1 * t, 1.0 - 0.2 * t)
    } else if bv < 1.0 {
        let t = (bv - 0.5) / 0.5;
        Rgba::rgb(1.0, 1.0 - 0.2 * t, 0.8 - 0.3 * t)
    } else if bv < 1.5 {
        let t = (bv - 1.0) / 0.5;
        Rgba::rgb(1.0, 0.8 - 0.3 * t, 0.5 - 0.3 * t)
    } else {
        let t = ((bv - 1.5) / 0.5).min(1.0);
        Rgba::rgb(1.0, 0.5 - 0.3 * t, 0.2 - 0.2 * t)
    }
}

/// Nebula color from its B-V index
pub fn nebula_color(b_v: Option<f64>) -> Rgba {
    let Some(b_v) = b_v else {
        return PALE_BLUE;
    };
    let bv = b_v.clamp(BV_MIN, BV_MAX);

    if bv < 0.0 {
        let t = (bv + 0.4) / 0.4;
        Rgba::rgb(0.6 * t, 0.7 * t + 0.3, 1.0)
    } else if bv < 0.5 {
        let t = bv / 0.5;
        Rgba::rgb(0.6 + 0.4 * t, 0.7 + 0.3 * t, 1.0 - 0.2 * t)
    } else if bv < 1.0 {
        let t = (bv - 0.5) / 0.5;
        Rgba::rgb(1.0, 1.0 - 0.2 * t, 0.8 - 0.4 * t)
    } else {
        let t = (bv - 1.0).min(1.0);
        Rgba::rgb(1.0, 0.8 - 0.4 * t, 0.4 - 0.3 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_brightness_bounds() {
        assert_eq!(star_brightness(0.0), 1.0);
        assert_relative_eq!(star_brightness(3.25), 0.5, epsilon = 1e-12);
        assert_eq!(star_brightness(6.5), 0.1);
        assert_eq!(star_brightness(12.0), 0.1);
    }

    #[test]
    fn test_size_bounds() {
        assert_eq!(star_size(-1.46), 8.0);
        assert_eq!(star_size(2.0), 6.0);
        assert_eq!(star_size(6.5), 1.5);
        assert_eq!(nebula_size(-3.0), 14.0);
        assert_eq!(nebula_size(4.0), 11.0);
        assert_eq!(nebula_size(12.0), 8.0);
    }

    #[test]
    fn test_monotonic_in_magnitude() {
        let mut previous = (f64::INFINITY, f64::INFINITY, f64::INFINITY);
        for step in 0..=200 {
            let magnitude = -2.0 + step as f64 * 0.075;
            let current = (
                star_brightness(magnitude),
                star_size(magnitude),
                nebula_size(magnitude),
            );
            assert!(current.0 <= previous.0, "brightness rose at {}", magnitude);
            assert!(current.1 <= previous.1, "size rose at {}", magnitude);
            assert!(current.2 <= previous.2, "nebula size rose at {}", magnitude);
            previous = current;
        }
    }

    #[rstest]
    #[case(0.5)]
    #[case(1.0)]
    #[case(1.5)]
    fn test_star_color_continuous_at_band_edges(#[case] edge: f64) {
        let below = star_color(Some(edge - 1e-4));
        let above = star_color(Some(edge + 1e-4));
        assert!(below.max_channel_difference(&above) < 1e-3);
    }

    #[rstest]
    #[case(0.5)]
    #[case(1.0)]
    fn test_nebula_color_continuous_at_band_edges(#[case] edge: f64) {
        let below = nebula_color(Some(edge - 1e-4));
        let above = nebula_color(Some(edge + 1e-4));
        assert!(below.max_channel_difference(&above) < 1e-3);
    }

    #[test]
    fn test_star_color_reference_values() {
        assert_eq!(star_color(None), WHITE);
        assert_eq!(star_color(Some(-1.0)), Rgba::rgb(0.6, 0.7, 1.0));
        assert_eq!(star_color(Some(0.0)), Rgba::rgb(0.9, 0.9, 1.0));

        let sun_like = star_color(Some(0.65));
        assert_relative_eq!(sun_like.g, 0.94, epsilon = 1e-12);
        assert_relative_eq!(sun_like.b, 0.71, epsilon = 1e-12);

        let deep_red = star_color(Some(5.0));
        assert_relative_eq!(deep_red.g, 0.2, epsilon = 1e-12);
        assert_relative_eq!(deep_red.b, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_star_color_step_at_zero() {
        let blue_side = star_color(Some(-1e-9));
        let white_side = star_color(Some(0.0));
        assert_relative_eq!(blue_side.max_channel_difference(&white_side), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_nebula_color_reference_values() {
        assert_eq!(nebula_color(None), PALE_BLUE);
        assert_eq!(nebula_color(Some(-0.4)), Rgba::rgb(0.0, 0.3, 1.0));

        let red = nebula_color(Some(2.0));
        assert_relative_eq!(red.g, 0.4, epsilon = 1e-12);
        assert_relative_eq!(red.b, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_channels_stay_in_unit_range() {
        for step in 0..=300 {
            let bv = -1.0 + step as f64 * 0.01;
            for color in [star_color(Some(bv)), nebula_color(Some(bv))] {
                for channel in [color.r, color.g, color.b] {
                    assert!((0.0..=1.0).contains(&channel), "{} at {}", channel, bv);
                }
            }
        }
    }
}
