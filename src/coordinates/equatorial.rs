//! Equatorial (RA/Dec) positions, kept in degrees as catalogs and
//! ephemerides supply them.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::angle::normalize_degrees;

/// Sky position fixed to the celestial sphere
///
/// Right ascension is normalized into `[0, 360)` on construction; declination
/// is stored as given and expected in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPosition {
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
}

impl EquatorialPosition {
    /// Create a position from RA/Dec in degrees
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            ra: normalize_degrees(ra_deg),
            dec: dec_deg,
        }
    }

    /// Right ascension in radians
    pub fn ra_radians(&self) -> f64 {
        self.ra.to_radians()
    }

    /// Declination in radians
    pub fn dec_radians(&self) -> f64 {
        self.dec.to_radians()
    }

    /// Unit vector in the celestial (ICRS-like) frame
    ///
    /// X points at the vernal equinox, Z at the north celestial pole. This is
    /// not the rendering frame; sky objects are placed through
    /// [`crate::coordinates::horizontal`] instead.
    pub fn unit_vector(&self) -> Vector3<f64> {
        let ra_rad = self.ra_radians();
        let dec_rad = self.dec_radians();

        Vector3::new(
            dec_rad.cos() * ra_rad.cos(),
            dec_rad.cos() * ra_rad.sin(),
            dec_rad.sin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ra_is_normalized() {
        let pos = EquatorialPosition::new(-10.0, 5.0);
        assert_abs_diff_eq!(pos.ra, 350.0, epsilon = 1e-12);
        assert_eq!(pos.dec, 5.0);

        let wrapped = EquatorialPosition::new(370.0, 0.0);
        assert_abs_diff_eq!(wrapped.ra, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polaris_unit_vector() {
        let polaris = EquatorialPosition::new(37.95, 89.26);
        let v = polaris.unit_vector();

        assert_abs_diff_eq!(v.x, 0.0103, epsilon = 5e-4);
        assert_abs_diff_eq!(v.y, 0.0080, epsilon = 5e-4);
        assert_abs_diff_eq!(v.z, 0.99988, epsilon = 5e-4);
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-12);
    }
}
