//! Tuning parameters for a sky session
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! { "selection_radius_px": 35.0, "planet_refresh_secs": 30 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scheduler::interval_from_secs;
use crate::{Result, StarMapError};

/// Field of view, selection, rendering and refresh settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Horizontal field of view at startup, and the reference for size scaling (degrees)
    pub default_fov_deg: f64,
    /// Narrowest zoom (degrees)
    pub min_fov_deg: f64,
    /// Widest zoom (degrees)
    pub max_fov_deg: f64,
    /// Tap tolerance for selecting an object (pixels)
    pub selection_radius_px: f64,
    /// Objects this far outside the viewport are still drawn (pixels)
    pub render_buffer_px: f64,
    /// Stars with a base size above this get a glow
    pub glow_size_threshold: f64,
    /// Drawn stars at least this large get the multi-layer glow (pixels)
    pub detailed_star_size_px: f64,
    /// Drawn stars at least this large get the simple glow (pixels)
    pub simple_star_size_px: f64,
    /// Manual rotation per dragged pixel (radians)
    pub drag_sensitivity: f64,
    /// Minimum time between planet refreshes (seconds)
    pub planet_refresh_secs: u64,
    /// Faintest star magnitude loaded from the catalog
    pub star_magnitude_limit: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            default_fov_deg: 60.0,
            min_fov_deg: 10.0,
            max_fov_deg: 60.0,
            selection_radius_px: 50.0,
            render_buffer_px: 50.0,
            glow_size_threshold: 3.0,
            detailed_star_size_px: 2.0,
            simple_star_size_px: 1.0,
            drag_sensitivity: 0.01,
            planet_refresh_secs: 60,
            star_magnitude_limit: 6.5,
        }
    }
}

impl SkyConfig {
    /// Load from a JSON file and validate
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: SkyConfig = serde_json::from_str(&json)
            .map_err(|e| StarMapError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and the ordering of the field-of-view limits
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("default_fov_deg", self.default_fov_deg),
            ("min_fov_deg", self.min_fov_deg),
            ("max_fov_deg", self.max_fov_deg),
            ("selection_radius_px", self.selection_radius_px),
            ("drag_sensitivity", self.drag_sensitivity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(StarMapError::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("render_buffer_px", self.render_buffer_px),
            ("glow_size_threshold", self.glow_size_threshold),
            ("detailed_star_size_px", self.detailed_star_size_px),
            ("simple_star_size_px", self.simple_star_size_px),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(StarMapError::Config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if self.max_fov_deg >= 180.0 {
            return Err(StarMapError::Config(format!(
                "max_fov_deg must be below 180, got {}",
                self.max_fov_deg
            )));
        }
        if !(self.min_fov_deg <= self.default_fov_deg && self.default_fov_deg <= self.max_fov_deg) {
            return Err(StarMapError::Config(format!(
                "field of view limits out of order: {} <= {} <= {} does not hold",
                self.min_fov_deg, self.default_fov_deg, self.max_fov_deg
            )));
        }
        if self.simple_star_size_px > self.detailed_star_size_px {
            return Err(StarMapError::Config(
                "simple_star_size_px must not exceed detailed_star_size_px".to_string(),
            ));
        }
        if interval_from_secs(self.planet_refresh_secs).is_none() {
            return Err(StarMapError::Config(format!(
                "planet_refresh_secs is out of range, got {}",
                self.planet_refresh_secs
            )));
        }
        if self.star_magnitude_limit.is_nan() {
            return Err(StarMapError::Config(
                "star_magnitude_limit must be a number".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SkyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"selection_radius_px": 35.0, "planet_refresh_secs": 30}"#,
        )
        .unwrap();

        let config = SkyConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.selection_radius_px, 35.0);
        assert_eq!(config.planet_refresh_secs, 30);
        assert_eq!(config.default_fov_deg, 60.0);
        assert_eq!(config.star_magnitude_limit, 6.5);
    }

    #[test]
    fn test_rejects_out_of_order_fov() {
        let config = SkyConfig {
            min_fov_deg: 70.0,
            ..SkyConfig::default()
        };
        assert!(matches!(config.validate(), Err(StarMapError::Config(_))));
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let config = SkyConfig {
            drag_sensitivity: 0.0,
            ..SkyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_refresh_interval() {
        let config = SkyConfig {
            planet_refresh_secs: 10_000_000_000_000_000,
            ..SkyConfig::default()
        };
        assert!(matches!(config.validate(), Err(StarMapError::Config(_))));

        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"planet_refresh_secs": 18446744073709551615}"#).unwrap();
        assert!(matches!(
            SkyConfig::load_from_file(file.path()),
            Err(StarMapError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ nope").unwrap();
        assert!(matches!(
            SkyConfig::load_from_file(file.path()),
            Err(StarMapError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SkyConfig::load_from_file(Path::new("/nonexistent/sky.json"));
        assert!(matches!(result, Err(StarMapError::IoError(_))));
    }
}
