//! Solar-system bodies and their apparent positions
//!
//! Ephemeris computation itself lives outside this crate. Anything that can
//! answer "where is this body at this Julian Day" implements
//! [`EphemerisProvider`]; [`position_planets`] turns those answers into
//! placed [`CelestialObject`]s for an observer.

pub mod names;
pub mod table;

pub use table::TableEphemeris;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::celestial::{CelestialObject, Planet, Rgba};
use crate::coordinates::equatorial::EquatorialPosition;
use crate::coordinates::horizontal::equatorial_to_direction;
use crate::observer::Observer;

/// Error type for ephemeris queries
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanetError {
    #[error("Planet not found: {0}")]
    NotFound(String),

    #[error("Date {jd} is outside ephemeris range ({start}..{end})")]
    OutOfRange {
        /// The Julian Day that was requested
        jd: f64,
        /// First covered Julian Day
        start: f64,
        /// Last covered Julian Day
        end: f64,
    },

    #[error("Data error: {0}")]
    DataError(String),
}

/// The solar-system bodies drawn on the sky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Every body, in drawing order
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    /// NAIF integer code of the body itself (not its barycenter)
    pub fn naif_id(&self) -> i32 {
        match self {
            Body::Sun => names::targets::SUN,
            Body::Moon => names::targets::MOON,
            Body::Mercury => names::targets::MERCURY,
            Body::Venus => names::targets::VENUS,
            Body::Mars => names::targets::MARS,
            Body::Jupiter => names::targets::JUPITER,
            Body::Saturn => names::targets::SATURN,
            Body::Uranus => names::targets::URANUS,
            Body::Neptune => names::targets::NEPTUNE,
        }
    }

    /// Display color
    pub fn color(&self) -> Rgba {
        match self {
            Body::Sun => Rgba::rgb(1.0, 0.8, 0.0),
            Body::Moon => Rgba::rgb(0.56, 0.56, 0.58),
            Body::Mercury => Rgba::rgb(0.7, 0.7, 0.7),
            Body::Venus => Rgba::rgb(1.0, 0.8, 0.0).with_alpha(0.8),
            Body::Mars => Rgba::rgb(1.0, 0.23, 0.19),
            Body::Jupiter => Rgba::rgb(1.0, 0.58, 0.0),
            Body::Saturn => Rgba::rgb(1.0, 0.8, 0.0).with_alpha(0.6),
            Body::Uranus => Rgba::rgb(0.2, 0.68, 0.9).with_alpha(0.7),
            Body::Neptune => Rgba::rgb(0.0, 0.48, 1.0),
        }
    }

    /// Base render size before depth and zoom scaling
    pub fn render_size(&self) -> f64 {
        match self {
            Body::Sun => 12.0,
            Body::Moon => 10.0,
            Body::Mercury => 5.0,
            Body::Venus => 7.0,
            Body::Mars => 6.0,
            Body::Jupiter => 10.0,
            Body::Saturn => 9.0,
            Body::Uranus => 8.0,
            Body::Neptune => 8.0,
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Body {
    type Err = PlanetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        names::body_from_name(s).ok_or_else(|| PlanetError::NotFound(s.to_string()))
    }
}

/// Source of apparent geocentric positions
///
/// Implementations may be slow (a native ephemeris, a network service); they
/// are only queried on the refresh cadence and when a planet is selected.
pub trait EphemerisProvider: Send + Sync {
    /// Apparent RA/Dec (degrees) of `body` at Julian Day `jd` (UT)
    fn position_at(&self, body: Body, jd: f64) -> Result<EquatorialPosition, PlanetError>;

    /// Distance from Earth in AU at Julian Day `jd`
    fn distance_au(&self, body: Body, _jd: f64) -> Result<f64, PlanetError> {
        Err(PlanetError::DataError(format!(
            "No distance available for {}",
            body
        )))
    }
}

impl<F> EphemerisProvider for F
where
    F: Fn(Body, f64) -> Result<EquatorialPosition, PlanetError> + Send + Sync,
{
    fn position_at(&self, body: Body, jd: f64) -> Result<EquatorialPosition, PlanetError> {
        self(body, jd)
    }
}

/// Queries every body and places it for the observer
///
/// Bodies whose query fails are logged and left out; the others are still
/// returned. The result holds no borrowed state, so a host may compute it on
/// a worker thread and publish it later.
pub fn position_planets(provider: &dyn EphemerisProvider, observer: &Observer) -> Vec<CelestialObject> {
    let jd = observer.julian_day();

    let planets: Vec<CelestialObject> = Body::ALL
        .iter()
        .filter_map(|&body| match provider.position_at(body, jd) {
            Ok(equatorial) => Some(CelestialObject::Planet(Planet {
                body,
                equatorial,
                direction: equatorial_to_direction(&equatorial, observer),
                distance_au: None,
            })),
            Err(err) => {
                warn!("Skipping {} at JD {:.5}: {}", body, jd, err);
                None
            }
        })
        .collect();

    debug!("Positioned {} of {} bodies", planets.len(), Body::ALL.len());
    planets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celestial::ObjectKind;
    use chrono::{TimeZone, Utc};

    fn observer() -> Observer {
        Observer::new(
            45.0,
            9.0,
            Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_body_table() {
        let sizes: Vec<f64> = Body::ALL.iter().map(|b| b.render_size()).collect();
        assert_eq!(sizes, vec![12.0, 10.0, 5.0, 7.0, 6.0, 10.0, 9.0, 8.0, 8.0]);
        assert_eq!(Body::Jupiter.naif_id(), 599);
        assert_eq!(Body::Moon.to_string(), "Moon");
    }

    #[test]
    fn test_body_from_str() {
        assert_eq!("saturn".parse::<Body>(), Ok(Body::Saturn));
        assert_eq!(
            "Pluto".parse::<Body>(),
            Err(PlanetError::NotFound("Pluto".to_string()))
        );
    }

    #[test]
    fn test_closure_provider() {
        let provider = |_body: Body, _jd: f64| -> Result<EquatorialPosition, PlanetError> {
            Ok(EquatorialPosition::new(10.0, 20.0))
        };
        let position = provider.position_at(Body::Venus, 2_460_000.5).unwrap();
        assert_eq!(position, EquatorialPosition::new(10.0, 20.0));
        assert!(provider.distance_au(Body::Venus, 2_460_000.5).is_err());
    }

    #[test]
    fn test_failures_skip_only_that_body() {
        let provider = |body: Body, _jd: f64| -> Result<EquatorialPosition, PlanetError> {
            match body {
                Body::Mars => Err(PlanetError::DataError("no data".to_string())),
                _ => Ok(EquatorialPosition::new(120.0, -10.0)),
            }
        };

        let planets = position_planets(&provider, &observer());
        assert_eq!(planets.len(), 8);
        assert!(planets.iter().all(|p| p.kind() == ObjectKind::Planet));
        assert!(planets.iter().all(|p| p.name() != "Mars"));
    }

    #[test]
    fn test_planets_use_canonical_transform() {
        let observer = observer();
        let provider = |_body: Body, _jd: f64| -> Result<EquatorialPosition, PlanetError> {
            Ok(EquatorialPosition::new(250.0, 30.0))
        };
        let planets = position_planets(&provider, &observer);

        let expected = equatorial_to_direction(&EquatorialPosition::new(250.0, 30.0), &observer);
        match &planets[0] {
            CelestialObject::Planet(planet) => {
                assert_eq!(planet.body, Body::Sun);
                assert_eq!(planet.direction, expected);
            }
            other => panic!("expected a planet, got {:?}", other),
        }
    }
}
