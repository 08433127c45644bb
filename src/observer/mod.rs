//! Observer location and time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::julian_day;

/// Where and when the sky is observed from
///
/// An observer is immutable; a new location fix or clock tick produces a new
/// value that replaces the old one wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
    /// Instant of observation
    pub timestamp: DateTime<Utc>,
}

impl Observer {
    /// Create a new observer
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Same location at a different instant
    pub fn at(&self, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, ..*self }
    }

    /// Latitude within ±90° and a finite longitude
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && self.longitude.is_finite()
    }

    /// Julian Day (UT) of the observation instant
    pub fn julian_day(&self) -> f64 {
        julian_day(&self.timestamp)
    }
}
