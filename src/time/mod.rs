//! Time module for sidereal time calculations
//!
//! Converts UTC timestamps to Julian Days and derives Greenwich and local
//! mean sidereal time from them. Everything here works in UT; the ~1 minute
//! difference to TT is far below what a hand-held star map can show.

use crate::constants::{
    DAYS_PER_JULIAN_CENTURY, DAY_S, GMST_AT_J2000_DEG, GMST_RATE_DEG_PER_DAY, GMST_T2_COEFF,
    GMST_T3_DIVISOR, J2000, UNIX_EPOCH_JD,
};
use crate::coordinates::angle::normalize_degrees;
use chrono::{DateTime, Utc};

/// Julian Day (UT) for a UTC instant
///
/// Sub-second precision is kept from the timestamp's nanoseconds.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use starmap::time::julian_day;
///
/// let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(julian_day(&j2000), 2_451_545.0);
/// ```
pub fn julian_day(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    seconds / DAY_S + UNIX_EPOCH_JD
}

/// Julian centuries elapsed since J2000.0
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Greenwich Mean Sidereal Time in degrees, normalized to `[0, 360)`
///
/// Uses the IAU 1982 polynomial expressed in days since J2000.0:
///
/// ```text
/// GMST = 280.46061837 + 360.98564736629·(JD − 2451545.0) + 0.000387933·T² − T³/38710000
/// ```
pub fn greenwich_mean_sidereal_time(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let gmst = GMST_AT_J2000_DEG + GMST_RATE_DEG_PER_DAY * (jd - J2000) + GMST_T2_COEFF * t * t
        - t * t * t / GMST_T3_DIVISOR;
    normalize_degrees(gmst)
}

/// Local Mean Sidereal Time in degrees for an east-positive longitude
///
/// The result is GMST plus longitude and is intentionally left unnormalized;
/// it only ever feeds trigonometric functions.
pub fn local_sidereal_time(jd: f64, longitude_deg: f64) -> f64 {
    greenwich_mean_sidereal_time(jd) + longitude_deg
}
