//! Tabulated ephemeris
//!
//! Serves positions from precomputed samples, interpolating linearly between
//! the two samples that bracket the requested time. A table exported once a
//! day from any ephemeris tool is plenty for naked-eye positions of the
//! planets; the Moon moves about 13° a day, so give it hourly samples.
//!
//! # File format
//!
//! A JSON array of samples, optionally gzip-compressed (`.gz`):
//!
//! ```json
//! [
//!   {"body": "Mars", "jd": 2460736.5, "ra": 112.41, "dec": 25.87, "distance_au": 0.79},
//!   {"body": "Mars", "jd": 2460737.5, "ra": 112.30, "dec": 25.91, "distance_au": 0.80}
//! ]
//! ```
//!
//! `body` accepts anything [`super::names::body_from_name`] understands.

use flate2::read::GzDecoder;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{names, Body, EphemerisProvider, PlanetError};
use crate::coordinates::equatorial::EquatorialPosition;

/// One tabulated position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSample {
    pub body: String,
    /// Julian Day (UT)
    pub jd: f64,
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
    #[serde(default)]
    pub distance_au: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    jd: f64,
    ra: f64,
    dec: f64,
    distance_au: Option<f64>,
}

/// Ephemeris backed by per-body sample tables
#[derive(Debug, Clone, Default)]
pub struct TableEphemeris {
    tables: HashMap<Body, Vec<Entry>>,
}

impl TableEphemeris {
    /// Build a table from samples; they may arrive in any order
    pub fn from_samples(samples: Vec<EphemerisSample>) -> Result<Self, PlanetError> {
        let mut tables: HashMap<Body, Vec<Entry>> = HashMap::new();

        for sample in samples {
            let body = names::body_from_name(&sample.body).ok_or_else(|| {
                PlanetError::DataError(format!("Unknown body in ephemeris table: {}", sample.body))
            })?;
            if !(sample.jd.is_finite() && sample.ra.is_finite() && sample.dec.is_finite()) {
                return Err(PlanetError::DataError(format!(
                    "Non-finite sample for {} at JD {}",
                    body, sample.jd
                )));
            }
            tables.entry(body).or_default().push(Entry {
                jd: sample.jd,
                ra: sample.ra,
                dec: sample.dec,
                distance_au: sample.distance_au,
            });
        }

        for entries in tables.values_mut() {
            entries.sort_by(|a, b| a.jd.total_cmp(&b.jd));
        }

        Ok(Self { tables })
    }

    /// Parse a JSON sample array
    pub fn from_json_str(json: &str) -> Result<Self, PlanetError> {
        let samples: Vec<EphemerisSample> = serde_json::from_str(json)
            .map_err(|e| PlanetError::DataError(format!("Invalid ephemeris table: {}", e)))?;
        Self::from_samples(samples)
    }

    /// Load a JSON sample array from disk, gunzipping `.gz` files
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlanetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PlanetError::DataError(format!("Cannot open {}: {}", path.display(), e))
        })?;

        let mut reader: Box<dyn Read> = if path.to_string_lossy().ends_with(".gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(BufReader::new(file))
        };

        let mut json = String::new();
        reader.read_to_string(&mut json).map_err(|e| {
            PlanetError::DataError(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let table = Self::from_json_str(&json)?;
        debug!(
            "Loaded ephemeris table {} covering {} bodies",
            path.display(),
            table.tables.len()
        );
        Ok(table)
    }

    /// Bodies with at least one sample
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies: Vec<Body> = self.tables.keys().copied().collect();
        bodies.sort();
        bodies
    }

    /// Julian Day span covered for a body
    pub fn coverage(&self, body: Body) -> Option<(f64, f64)> {
        let entries = self.tables.get(&body)?;
        Some((entries.first()?.jd, entries.last()?.jd))
    }

    /// The two samples around `jd` and the interpolation weight of the second
    fn bracket(&self, body: Body, jd: f64) -> Result<(Entry, Entry, f64), PlanetError> {
        let entries = self
            .tables
            .get(&body)
            .filter(|entries| !entries.is_empty())
            .ok_or_else(|| PlanetError::NotFound(body.name().to_string()))?;

        let start = entries[0].jd;
        let end = entries[entries.len() - 1].jd;
        if !(start..=end).contains(&jd) {
            return Err(PlanetError::OutOfRange { jd, start, end });
        }

        // First sample strictly after jd; the range check keeps it in 1..=len
        let upper = entries.partition_point(|e| e.jd <= jd);
        if upper == entries.len() {
            let last = entries[entries.len() - 1];
            return Ok((last, last, 0.0));
        }

        let before = entries[upper - 1];
        let after = entries[upper];
        let weight = (jd - before.jd) / (after.jd - before.jd);
        Ok((before, after, weight))
    }
}

/// Interpolate RA along the shorter way round the circle
fn interpolate_ra(ra0: f64, ra1: f64, weight: f64) -> f64 {
    let delta = (ra1 - ra0 + 180.0).rem_euclid(360.0) - 180.0;
    ra0 + delta * weight
}

impl EphemerisProvider for TableEphemeris {
    fn position_at(&self, body: Body, jd: f64) -> Result<EquatorialPosition, PlanetError> {
        let (before, after, weight) = self.bracket(body, jd)?;

        let ra = interpolate_ra(before.ra, after.ra, weight);
        let dec = before.dec + (after.dec - before.dec) * weight;
        Ok(EquatorialPosition::new(ra, dec))
    }

    fn distance_au(&self, body: Body, jd: f64) -> Result<f64, PlanetError> {
        let (before, after, weight) = self.bracket(body, jd)?;

        match (before.distance_au, after.distance_au) {
            (Some(d0), Some(d1)) => Ok(d0 + (d1 - d0) * weight),
            _ => Err(PlanetError::DataError(format!(
                "No distance tabulated for {} near JD {}",
                body, jd
            ))),
        }
    }
}
