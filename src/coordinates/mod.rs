//! Coordinate systems used between the catalog and the screen
//!
//! Equatorial (RA/Dec) positions come from catalogs and ephemerides,
//! horizontal (Az/Alt) positions depend on the observer, and [`Direction`]
//! is the observer-fixed rendering frame every object is drawn from.

pub mod angle;
pub mod cartesian;
pub mod equatorial;
pub mod horizontal;

pub use cartesian::Direction;
pub use equatorial::EquatorialPosition;
pub use horizontal::{equatorial_to_direction, to_cartesian, to_horizontal, HorizontalPosition};
