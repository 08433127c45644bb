//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Julian date of the Unix epoch (1970-01-01T00:00:00 UTC)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

// Greenwich Mean Sidereal Time polynomial (degrees)
/// GMST at J2000.0
pub const GMST_AT_J2000_DEG: f64 = 280.460_618_37;
/// GMST advance per day since J2000.0
pub const GMST_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;
/// Coefficient of T² (T in Julian centuries)
pub const GMST_T2_COEFF: f64 = 0.000_387_933;
/// Divisor of T³
pub const GMST_T3_DIVISOR: f64 = 38_710_000.0;

// Angles
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

/// Below this, a cosine is treated as zero in the horizontal conversion
pub const DEGENERATE_COSINE: f64 = 1e-12;
