//! Star catalog records
//!
//! Records follow the compact JSON layout of `stars_compact.json`:
//!
//! ```json
//! {"id": "32349", "ra": 101.287, "dec": -16.716, "mag": -1.46, "name": "Sirius", "bv": 0.0, "sp": "A1V"}
//! ```
//!
//! Only `id` and `mag` are required. Records without a position are dropped
//! at load time, as are records fainter than the magnitude limit.

use serde::{Deserialize, Deserializer, Serialize};

use crate::celestial::appearance::{star_brightness, star_color, star_size};
use crate::celestial::Star;
use crate::coordinates::equatorial::EquatorialPosition;
use crate::coordinates::horizontal::equatorial_to_direction;
use crate::observer::Observer;

/// One entry of the star catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Catalog identifier (HIP number or similar)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Right ascension in degrees
    #[serde(default)]
    pub ra: Option<f64>,
    /// Declination in degrees
    #[serde(default)]
    pub dec: Option<f64>,
    /// Apparent visual magnitude
    pub mag: f64,
    #[serde(default)]
    pub name: Option<String>,
    /// B-V color index
    #[serde(default)]
    pub bv: Option<f64>,
    /// Spectral type
    #[serde(default)]
    pub sp: Option<String>,
}

impl StarRecord {
    /// Equatorial position, if the record has one
    pub fn equatorial(&self) -> Option<EquatorialPosition> {
        Some(EquatorialPosition::new(self.ra?, self.dec?))
    }

    /// Display name, falling back to `"Star <id>"`
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Star {}", self.id))
    }

    /// Place the star for an observer, deriving its visual attributes
    pub fn place(&self, observer: &Observer) -> Option<Star> {
        let equatorial = self.equatorial()?;
        Some(Star {
            id: self.id.clone(),
            name: self.display_name(),
            equatorial,
            direction: equatorial_to_direction(&equatorial, observer),
            magnitude: self.mag,
            b_v: self.bv,
            brightness: star_brightness(self.mag),
            size: star_size(self.mag),
            color: star_color(self.bv),
            spectral_class: self.sp.clone().unwrap_or_else(|| "Unknown".to_string()),
        })
    }
}

/// Keep records that have a position and are no fainter than `magnitude_limit`
pub fn filter_records(records: Vec<StarRecord>, magnitude_limit: f64) -> Vec<StarRecord> {
    records
        .into_iter()
        .filter(|r| r.mag <= magnitude_limit && r.ra.is_some() && r.dec.is_some())
        .collect()
}

/// Parse and filter a JSON star array
pub fn parse_records(json: &str, magnitude_limit: f64) -> Result<Vec<StarRecord>, serde_json::Error> {
    let records: Vec<StarRecord> = serde_json::from_str(json)?;
    Ok(filter_records(records, magnitude_limit))
}

/// Catalog exports disagree on whether identifiers are strings or numbers
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Integer(number) => number.to_string(),
        Id::Float(number) => number.to_string(),
    })
}
