//! # Horizontal Coordinates and the Render-Frame Mapping
//!
//! Converts equatorial positions to azimuth/altitude for an observer and
//! maps azimuth/altitude onto the fixed rendering frame.
//!
//! [`to_cartesian`] is the single place the rendering axis convention is
//! defined. Stars, nebulae, planets, synthetic stars, horizon samples and
//! cardinal markers all go through it.
//!
//! ## Pipeline
//!
//! ```text
//! (RA, Dec) --to_horizontal(observer)--> (Az, Alt) --to_cartesian--> Direction
//! ```
//!
//! ## Degenerate Geometry
//!
//! At the zenith or nadir (`cos(alt) → 0`) and for an observer standing on a
//! pole (`cos(lat) → 0`) azimuth is undefined. Rather than dividing by a
//! vanishing cosine the conversion returns an azimuth of `0`; the Cartesian
//! mapping makes any azimuth equivalent there anyway.

use serde::{Deserialize, Serialize};

use super::angle::normalize_radians;
use super::cartesian::Direction;
use super::equatorial::EquatorialPosition;
use crate::constants::DEGENERATE_COSINE;
use crate::observer::Observer;
use crate::time::local_sidereal_time;

/// Observer-relative sky position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    /// Azimuth in radians, north = 0, east = π/2, in `[0, 2π)`
    pub azimuth: f64,
    /// Altitude above the horizon in radians, in `[-π/2, π/2]`
    pub altitude: f64,
}

impl HorizontalPosition {
    /// Create a horizontal position, wrapping azimuth into `[0, 2π)`
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Self {
            azimuth: normalize_radians(azimuth),
            altitude,
        }
    }

    /// Whether the position is above the geometric horizon
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// Converts an equatorial position to azimuth/altitude for an observer
///
/// Sidereal time is derived from the observer's timestamp, so the same
/// `(RA, Dec)` maps to different horizontal positions as time advances.
///
/// # Mathematical Conversion
///
/// ```text
/// H   = LST − RA
/// alt = asin(sin(δ)·sin(φ) + cos(δ)·cos(φ)·cos(H))
/// az  = atan2(−cos(δ)·sin(H)/cos(alt), (sin(δ) − sin(alt)·sin(φ))/(cos(alt)·cos(φ)))
/// ```
pub fn to_horizontal(eq: &EquatorialPosition, observer: &Observer) -> HorizontalPosition {
    let latitude = observer.latitude.to_radians();
    let lst = local_sidereal_time(observer.julian_day(), observer.longitude).to_radians();

    let ra = eq.ra_radians();
    let dec = eq.dec_radians();
    let hour_angle = lst - ra;

    let sin_altitude =
        dec.sin() * latitude.sin() + dec.cos() * latitude.cos() * hour_angle.cos();
    // Rounding can push the sine a hair past ±1 right at the poles
    let altitude = sin_altitude.clamp(-1.0, 1.0).asin();

    let cos_altitude = altitude.cos();
    let cos_latitude = latitude.cos();
    if cos_altitude.abs() < DEGENERATE_COSINE || cos_latitude.abs() < DEGENERATE_COSINE {
        return HorizontalPosition {
            azimuth: 0.0,
            altitude,
        };
    }

    let sin_azimuth = -dec.cos() * hour_angle.sin() / cos_altitude;
    let cos_azimuth = (dec.sin() - altitude.sin() * latitude.sin()) / (cos_altitude * cos_latitude);

    HorizontalPosition::new(sin_azimuth.atan2(cos_azimuth), altitude)
}

/// Maps azimuth/altitude onto the rendering frame
///
/// # Axis Convention
///
/// - `y = sin(alt)` (zenith up)
/// - `x = −cos(alt)·sin(az)` (east toward −X)
/// - `z = −cos(alt)·cos(az)` (north toward −Z)
///
/// # Examples
///
/// ```rust
/// use starmap::coordinates::horizontal::{to_cartesian, HorizontalPosition};
///
/// let north = to_cartesian(&HorizontalPosition::new(0.0, 0.0));
/// assert_eq!((north.x, north.y, north.z), (-0.0, 0.0, -1.0));
/// ```
pub fn to_cartesian(h: &HorizontalPosition) -> Direction {
    let y = h.altitude.sin();
    let r = h.altitude.cos();
    let x = -r * h.azimuth.sin();
    let z = -r * h.azimuth.cos();

    Direction::new(x, y, z)
}

/// Equatorial position straight to the rendering frame for an observer
pub fn equatorial_to_direction(eq: &EquatorialPosition, observer: &Observer) -> Direction {
    to_cartesian(&to_horizontal(eq, observer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TAU;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn rome_evening() -> Observer {
        Observer::new(
            41.9,
            12.5,
            Utc.with_ymd_and_hms(2025, 8, 10, 21, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_zenith_maps_to_plus_y() {
        let d = to_cartesian(&HorizontalPosition::new(0.0, FRAC_PI_2));
        assert_abs_diff_eq!(d.x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.y, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(d.z, 0.0, epsilon = 1e-15);
    }

    #[rstest]
    #[case(0.0, (0.0, 0.0, -1.0))] // north
    #[case(FRAC_PI_2, (-1.0, 0.0, 0.0))] // east
    #[case(PI, (0.0, 0.0, 1.0))] // south
    #[case(1.5 * PI, (1.0, 0.0, 0.0))] // west
    fn test_cardinal_azimuths_on_horizon(#[case] azimuth: f64, #[case] expected: (f64, f64, f64)) {
        let d = to_cartesian(&HorizontalPosition::new(azimuth, 0.0));
        assert_abs_diff_eq!(d.x, expected.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.y, expected.1, epsilon = 1e-12);
        assert_abs_diff_eq!(d.z, expected.2, epsilon = 1e-12);
    }

    #[test]
    fn test_directions_lie_on_unit_sphere() {
        let observer = rome_evening();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let eq = EquatorialPosition::new(rng.gen_range(0.0..360.0), rng.gen_range(-90.0..=90.0));
            let d = equatorial_to_direction(&eq, &observer);
            assert_abs_diff_eq!(d.magnitude(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_y_equals_sin_altitude() {
        let observer = rome_evening();
        let vega = EquatorialPosition::new(279.23, 38.78);
        let h = to_horizontal(&vega, &observer);
        let d = to_cartesian(&h);
        assert_eq!(d.y, h.altitude.sin());
    }

    #[test]
    fn test_azimuth_always_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        for _ in 0..1000 {
            let observer = Observer::new(
                rng.gen_range(-89.0..89.0),
                rng.gen_range(-180.0..180.0),
                base + chrono::Duration::minutes(rng.gen_range(0..525_600)),
            );
            let eq = EquatorialPosition::new(rng.gen_range(0.0..360.0), rng.gen_range(-90.0..=90.0));
            let h = to_horizontal(&eq, &observer);
            assert!(
                (0.0..TAU).contains(&h.azimuth),
                "azimuth out of range: {}",
                h.azimuth
            );
            assert!(h.altitude.abs() <= FRAC_PI_2);
        }
    }

    #[test]
    fn test_celestial_pole_altitude_equals_latitude() {
        let observer = rome_evening();
        let pole = EquatorialPosition::new(0.0, 90.0);
        let h = to_horizontal(&pole, &observer);

        assert_abs_diff_eq!(h.altitude.to_degrees(), 41.9, epsilon = 1e-9);
        // Due north, allowing for the 0/2π wrap
        let from_north = h.azimuth.min(TAU - h.azimuth);
        assert_abs_diff_eq!(from_north, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zenith_object_has_stable_azimuth() {
        // An object whose declination equals the latitude and whose hour angle
        // is zero sits exactly at the zenith.
        let observer = rome_evening();
        let lst = local_sidereal_time(observer.julian_day(), observer.longitude);
        let overhead = EquatorialPosition::new(lst, observer.latitude);

        let h = to_horizontal(&overhead, &observer);
        assert!(h.azimuth.is_finite());
        assert!(h.altitude.is_finite());
        assert_abs_diff_eq!(h.altitude, FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_observer_on_pole_is_not_nan() {
        let observer = Observer::new(90.0, 0.0, rome_evening().timestamp);
        let eq = EquatorialPosition::new(120.0, 30.0);
        let h = to_horizontal(&eq, &observer);

        assert_eq!(h.azimuth, 0.0);
        assert_abs_diff_eq!(h.altitude.to_degrees(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_object_on_meridian_south_of_zenith() {
        // Hour angle 0 and declination below the latitude: due south
        let observer = rome_evening();
        let lst = local_sidereal_time(observer.julian_day(), observer.longitude);
        let transiting = EquatorialPosition::new(lst, 0.0);

        let h = to_horizontal(&transiting, &observer);
        assert_abs_diff_eq!(h.azimuth, PI, epsilon = 1e-9);
        assert_abs_diff_eq!(h.altitude.to_degrees(), 90.0 - 41.9, epsilon = 1e-9);
    }
}
