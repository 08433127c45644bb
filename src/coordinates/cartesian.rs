//! # Render-Frame Direction Module
//!
//! This module provides the 3D Cartesian direction type every sky object is
//! positioned with before orientation and projection are applied.
//!
//! ## Coordinate System Convention
//!
//! The rendering frame is fixed to the observer's horizon:
//! - **+Y**: Zenith (straight up)
//! - **-Z**: Geographic north on the horizon, **+Z**: south
//! - **-X**: East on the horizon, **+X**: west
//!
//! After an orientation has been applied, the camera looks along **+Z**, so a
//! rotated direction is in front of the viewer exactly when its Z component is
//! positive.
//!
//! ## Directions, Not Positions
//!
//! Values are points on (or very near) the unit sphere. Distances are never
//! encoded in a `Direction`; a planet's distance in AU is carried separately
//! for display.
//!
//! ## Examples
//!
//! ```rust
//! use starmap::coordinates::cartesian::Direction;
//!
//! let zenith = Direction::new(0.0, 1.0, 0.0);
//! let south = Direction::new(0.0, 0.0, 1.0);
//! assert_eq!(zenith.dot(&south), 0.0);
//! assert!(south.is_visible());
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A direction in the observer-fixed rendering frame
///
/// # Storage Strategy
///
/// - Each component stored as `f64`
/// - No normalization on construction; producers in this crate only emit
///   unit vectors, and rotations preserve length
/// - Converts to and from nalgebra `Vector3` for matrix work
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// X-component (negative toward east)
    pub x: f64,
    /// Y-component (positive toward zenith)
    pub y: f64,
    /// Z-component (negative toward north; camera axis once rotated)
    pub z: f64,
}

impl Direction {
    /// Creates a new direction from its components
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starmap::coordinates::cartesian::Direction;
    ///
    /// let north = Direction::new(0.0, 0.0, -1.0);
    /// assert_eq!(north.z, -1.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Direction { x, y, z }
    }

    /// Whether a rotated direction lies in front of the camera
    ///
    /// Only meaningful after an orientation has been applied. Points exactly
    /// on the image plane (`z == 0`) are treated as not visible.
    pub fn is_visible(&self) -> bool {
        self.z > 0.0
    }

    /// Euclidean length of the vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starmap::coordinates::cartesian::Direction;
    ///
    /// assert_eq!(Direction::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Dot product with another direction
    pub fn dot(&self, other: &Direction) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Direction {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl std::ops::Sub for Direction {
    type Output = Direction;

    fn sub(self, other: Direction) -> Direction {
        Direction {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}
