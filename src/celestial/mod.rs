//! Celestial object definitions
//!
//! Every drawable sky object is one variant of the closed [`CelestialObject`]
//! enum. Each variant keeps its source equatorial position next to the
//! frame-fixed [`Direction`] it was placed at, so a session can re-place
//! objects for a new observer without going back to the catalog.

pub mod appearance;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::coordinates::cartesian::Direction;
use crate::coordinates::equatorial::EquatorialPosition;
use crate::planetlib::Body;
use crate::projection::Positioned;
pub use appearance::Rgba;

/// Which class of object a value is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Star,
    Planet,
    Nebula,
}

impl ObjectKind {
    /// Human readable class name
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Star => "Star",
            ObjectKind::Planet => "Planet",
            ObjectKind::Nebula => "Nebula",
        }
    }
}

/// Which object classes are drawn and selectable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectFilter {
    #[default]
    All,
    Stars,
    Planets,
    Nebulae,
}

impl ObjectFilter {
    /// Whether objects of `kind` pass this filter
    pub fn includes(&self, kind: ObjectKind) -> bool {
        matches!(
            (self, kind),
            (ObjectFilter::All, _)
                | (ObjectFilter::Stars, ObjectKind::Star)
                | (ObjectFilter::Planets, ObjectKind::Planet)
                | (ObjectFilter::Nebulae, ObjectKind::Nebula)
        )
    }
}

impl std::str::FromStr for ObjectFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ObjectFilter::All),
            "stars" => Ok(ObjectFilter::Stars),
            "planets" => Ok(ObjectFilter::Planets),
            "nebulae" => Ok(ObjectFilter::Nebulae),
            other => Err(format!("unknown object filter: {}", other)),
        }
    }
}

/// A catalog star placed for an observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Catalog identifier
    pub id: String,
    /// Proper name, or `"Star <id>"`
    pub name: String,
    pub equatorial: EquatorialPosition,
    pub direction: Direction,
    /// Apparent visual magnitude
    pub magnitude: f64,
    /// B-V color index, if known
    pub b_v: Option<f64>,
    /// Opacity in `[0.1, 1]`
    pub brightness: f64,
    pub size: f64,
    pub color: Rgba,
    /// Spectral class, or `"Unknown"`
    pub spectral_class: String,
}

/// A solar-system body placed for an observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub body: Body,
    pub equatorial: EquatorialPosition,
    pub direction: Direction,
    /// Distance from Earth in AU; only filled in when the planet is selected
    pub distance_au: Option<f64>,
}

/// A deep-sky object (nebula, galaxy or cluster) placed for an observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nebula {
    /// Catalog designation such as `M42`
    pub catalog_id: String,
    pub name: String,
    pub equatorial: EquatorialPosition,
    pub direction: Direction,
    pub magnitude: f64,
    pub b_v: Option<f64>,
    pub size: f64,
    pub color: Rgba,
    pub spectral_class: String,
}

/// Any object drawn on the sky
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CelestialObject {
    Star(Star),
    Planet(Planet),
    Nebula(Nebula),
}

impl CelestialObject {
    /// Identifier, unique within the object's class
    pub fn id(&self) -> &str {
        match self {
            CelestialObject::Star(star) => &star.id,
            CelestialObject::Planet(planet) => planet.body.name(),
            CelestialObject::Nebula(nebula) => &nebula.catalog_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CelestialObject::Star(star) => &star.name,
            CelestialObject::Planet(planet) => planet.body.name(),
            CelestialObject::Nebula(nebula) => &nebula.name,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            CelestialObject::Star(_) => ObjectKind::Star,
            CelestialObject::Planet(_) => ObjectKind::Planet,
            CelestialObject::Nebula(_) => ObjectKind::Nebula,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn equatorial(&self) -> &EquatorialPosition {
        match self {
            CelestialObject::Star(star) => &star.equatorial,
            CelestialObject::Planet(planet) => &planet.equatorial,
            CelestialObject::Nebula(nebula) => &nebula.equatorial,
        }
    }

    pub fn color(&self) -> Rgba {
        match self {
            CelestialObject::Star(star) => star.color,
            CelestialObject::Planet(planet) => planet.body.color(),
            CelestialObject::Nebula(nebula) => nebula.color,
        }
    }

    /// Base render size before depth and zoom scaling
    pub fn size(&self) -> f64 {
        match self {
            CelestialObject::Star(star) => star.size,
            CelestialObject::Planet(planet) => planet.body.render_size(),
            CelestialObject::Nebula(nebula) => nebula.size,
        }
    }

    /// Label → value rows shown when the object is selected
    pub fn details(&self) -> BTreeMap<String, String> {
        let mut details = BTreeMap::new();
        match self {
            CelestialObject::Star(star) => {
                details.insert("Spectral Class".to_string(), star.spectral_class.clone());
                details.insert(
                    "Brightness".to_string(),
                    format!("{:.1}%", star.brightness * 100.0),
                );
            }
            CelestialObject::Planet(planet) => {
                if let Some(distance) = planet.distance_au {
                    details.insert(
                        "Distance from Earth".to_string(),
                        format!("{:.2} AU", distance),
                    );
                }
            }
            CelestialObject::Nebula(nebula) => {
                details.insert("Catalog ID".to_string(), nebula.catalog_id.clone());
                details.insert("Magnitude".to_string(), format!("{:.1}", nebula.magnitude));
                details.insert("Spectral Type".to_string(), nebula.spectral_class.clone());
            }
        }
        details
    }
}

impl Positioned for CelestialObject {
    fn direction(&self) -> &Direction {
        match self {
            CelestialObject::Star(star) => &star.direction,
            CelestialObject::Planet(planet) => &planet.direction,
            CelestialObject::Nebula(nebula) => &nebula.direction,
        }
    }
}
