//! Standard NAIF target names and ID numbers for the drawn bodies
//!
//! Ephemeris tables from different tools spell bodies differently
//! ("Jupiter", "JUPITER BARYCENTER", "599", "5"). These lookups map all of
//! them onto [`Body`].

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::Body;

lazy_static! {
    /// Map from NAIF ID numbers to bodies
    static ref BODIES_BY_ID: HashMap<i32, Body> = {
        let mut m = HashMap::new();
        for &(id, _, body) in TARGET_NAME_PAIRS.iter() {
            m.insert(id, body);
        }
        m
    };

    /// Map from lowercase target names to bodies
    static ref BODIES_BY_NAME: HashMap<String, Body> = {
        let mut m = HashMap::new();
        for &(_, name, body) in TARGET_NAME_PAIRS.iter() {
            m.insert(name.to_lowercase(), body);
        }
        m
    };
}

/// Look up a body by NAIF ID; planet barycenters map to the planet
pub fn body_from_naif_id(id: i32) -> Option<Body> {
    BODIES_BY_ID.get(&id).copied()
}

/// Look up a body by name or NAIF ID, ignoring case and `_`/space spelling
pub fn body_from_name(name: &str) -> Option<Body> {
    let trimmed = name.trim();
    if let Ok(id) = trimmed.parse::<i32>() {
        return body_from_naif_id(id);
    }
    BODIES_BY_NAME
        .get(&trimmed.replace('_', " ").to_lowercase())
        .copied()
}

/// (id, name, body) triples
const TARGET_NAME_PAIRS: &[(i32, &str, Body)] = &[
    (1, "MERCURY BARYCENTER", Body::Mercury),
    (2, "VENUS BARYCENTER", Body::Venus),
    (4, "MARS BARYCENTER", Body::Mars),
    (5, "JUPITER BARYCENTER", Body::Jupiter),
    (6, "SATURN BARYCENTER", Body::Saturn),
    (7, "URANUS BARYCENTER", Body::Uranus),
    (8, "NEPTUNE BARYCENTER", Body::Neptune),
    (10, "SUN", Body::Sun),
    (10, "SOL", Body::Sun),
    (199, "MERCURY", Body::Mercury),
    (299, "VENUS", Body::Venus),
    (301, "MOON", Body::Moon),
    (301, "LUNA", Body::Moon),
    (499, "MARS", Body::Mars),
    (599, "JUPITER", Body::Jupiter),
    (699, "SATURN", Body::Saturn),
    (799, "URANUS", Body::Uranus),
    (899, "NEPTUNE", Body::Neptune),
];

/// NAIF codes of the bodies themselves
pub mod targets {
    /// Sun
    pub const SUN: i32 = 10;
    /// Mercury
    pub const MERCURY: i32 = 199;
    /// Venus
    pub const VENUS: i32 = 299;
    /// Moon
    pub const MOON: i32 = 301;
    /// Mars
    pub const MARS: i32 = 499;
    /// Jupiter
    pub const JUPITER: i32 = 599;
    /// Saturn
    pub const SATURN: i32 = 699;
    /// Uranus
    pub const URANUS: i32 = 799;
    /// Neptune
    pub const NEPTUNE: i32 = 899;
}
