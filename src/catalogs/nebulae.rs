//! Deep-sky object records (`nebulae.json`)

use serde::{Deserialize, Serialize};

use super::stars::string_or_number;
use crate::celestial::appearance::{nebula_color, nebula_size};
use crate::celestial::Nebula;
use crate::coordinates::equatorial::EquatorialPosition;
use crate::coordinates::horizontal::equatorial_to_direction;
use crate::observer::Observer;

/// One entry of the deep-sky catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NebulaRecord {
    /// Catalog designation, e.g. `M42`
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
    /// Integrated visual magnitude
    pub mag: f64,
    pub name: String,
    #[serde(default)]
    pub bv: Option<f64>,
    /// Object type or spectral description
    #[serde(default)]
    pub sp: Option<String>,
}

impl NebulaRecord {
    pub fn equatorial(&self) -> EquatorialPosition {
        EquatorialPosition::new(self.ra, self.dec)
    }

    /// Place the object for an observer, deriving its visual attributes
    pub fn place(&self, observer: &Observer) -> Nebula {
        let equatorial = self.equatorial();
        Nebula {
            catalog_id: self.id.clone(),
            name: self.name.clone(),
            equatorial,
            direction: equatorial_to_direction(&equatorial, observer),
            magnitude: self.mag,
            b_v: self.bv,
            size: nebula_size(self.mag),
            color: nebula_color(self.bv),
            spectral_class: self.sp.clone().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Parse a JSON deep-sky array; no magnitude filtering is applied
pub fn parse_records(json: &str) -> Result<Vec<NebulaRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_and_place() {
        let json = r#"[
            {"id": "M42", "ra": 83.822, "dec": -5.391, "mag": 4.0, "name": "Orion Nebula", "sp": "Emission"},
            {"id": "M57", "ra": 283.396, "dec": 33.029, "mag": 8.8, "name": "Ring Nebula", "bv": 0.2}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 2);

        let observer = Observer::new(
            51.5,
            0.0,
            Utc.with_ymd_and_hms(2025, 12, 1, 23, 0, 0).unwrap(),
        );
        let orion = records[0].place(&observer);
        assert_eq!(orion.size, 11.0);
        assert_eq!(orion.spectral_class, "Emission");
        assert_eq!(orion.color, nebula_color(None));

        let ring = records[1].place(&observer);
        assert_eq!(ring.spectral_class, "Unknown");
        assert!((ring.size - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_position_is_required() {
        let json = r#"[{"id": "M1", "dec": 22.0, "mag": 8.4, "name": "Crab Nebula"}]"#;
        assert!(parse_records(json).is_err());
    }
}
