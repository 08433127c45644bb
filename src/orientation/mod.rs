//! # Viewing Orientation
//!
//! Rotates render-frame directions into camera space, either from the
//! device's attitude matrix (tracking mode) or from manual pitch/yaw.
//!
//! [`rotate`] is a pure function of a direction and an [`OrientationState`].
//! [`OrientationController`] owns the current state and swaps it wholesale on
//! every sensor or gesture event, so readers always see a consistent snapshot.

use log::{debug, info};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::coordinates::cartesian::Direction;

/// The active viewing orientation
///
/// Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrientationState {
    /// Device attitude as a 3×3 orthonormal matrix in the sensor's
    /// north-referenced frame (X = magnetic north, Z = vertical)
    DeviceMatrix(Matrix3<f64>),
    /// Manual camera angles in radians
    Manual {
        /// Rotation about the camera X axis; negative tilts toward the zenith
        pitch: f64,
        /// Rotation about the world Y axis; zero faces south, π/2 faces east
        yaw: f64,
    },
}

impl Default for OrientationState {
    fn default() -> Self {
        OrientationState::Manual {
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl OrientationState {
    /// Whether the state follows the device sensors
    pub fn is_tracking(&self) -> bool {
        matches!(self, OrientationState::DeviceMatrix(_))
    }
}

/// Rotates a render-frame direction into camera space
pub fn rotate(direction: &Direction, state: &OrientationState) -> Direction {
    match state {
        OrientationState::DeviceMatrix(matrix) => rotate_by_device_matrix(direction, matrix),
        OrientationState::Manual { pitch, yaw } => rotate_by_pitch_yaw(direction, *pitch, *yaw),
    }
}

/// Fixed −90° turn about Y taking the sensor's north (+X) onto the render
/// frame's north (−Z)
fn sensor_alignment() -> Matrix3<f64> {
    let angle = -FRAC_PI_2;
    let (sin, cos) = angle.sin_cos();
    Matrix3::new(
        cos, 0.0, -sin, //
        0.0, 1.0, 0.0, //
        sin, 0.0, cos,
    )
}

/// Shuffle from the landscape sensor axes to the portrait screen axes:
/// `(x, y, z) → (x, z, −y)`
fn portrait_remap() -> Matrix3<f64> {
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.0, -1.0, 0.0,
    )
}

/// Rotate with the device attitude
///
/// The attitude product is mirrored on X and Y, which turns the world the
/// opposite way to the device so that fixed stars stay fixed on screen.
pub fn rotate_by_device_matrix(direction: &Direction, attitude: &Matrix3<f64>) -> Direction {
    let aligned = portrait_remap() * sensor_alignment() * direction.to_vector3();
    let rotated = attitude * aligned;
    Direction::new(-rotated.x, -rotated.y, rotated.z)
}

/// Rotate with manual camera angles: yaw about world Y by `−yaw`, then pitch
/// about the resulting X axis by `−pitch`
pub fn rotate_by_pitch_yaw(direction: &Direction, pitch: f64, yaw: f64) -> Direction {
    let (sin_yaw, cos_yaw) = (-yaw).sin_cos();
    let yaw_matrix = Matrix3::new(
        cos_yaw, 0.0, -sin_yaw, //
        0.0, 1.0, 0.0, //
        sin_yaw, 0.0, cos_yaw,
    );

    let (sin_pitch, cos_pitch) = (-pitch).sin_cos();
    let pitch_matrix = Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, cos_pitch, -sin_pitch, //
        0.0, sin_pitch, cos_pitch,
    );

    Direction::from_vector3(pitch_matrix * yaw_matrix * direction.to_vector3())
}

/// Manual angles that look along the same axis as a device attitude
///
/// The camera's forward axis is pulled back into the render frame; pitch is
/// minus its altitude and yaw turns its azimuth onto +Z. Roll is dropped.
pub fn manual_angles_from_attitude(attitude: &Matrix3<f64>) -> (f64, f64) {
    let alignment = portrait_remap() * sensor_alignment();
    // Mirroring X and Y leaves the camera axis unchanged
    let forward = alignment.transpose() * attitude.transpose() * Vector3::z();

    let pitch = -forward.y.clamp(-1.0, 1.0).asin();
    let yaw = -forward.x.atan2(forward.z);
    (pitch, yaw)
}

/// Manual angles facing a compass heading on the horizon
pub fn manual_angles_from_heading(heading_deg: f64) -> (f64, f64) {
    (0.0, PI - heading_deg.to_radians())
}

/// Owns the current orientation and applies sensor and gesture events
///
/// The controller starts in tracking mode and shows a neutral manual view
/// until the first attitude sample arrives.
#[derive(Debug, Clone)]
pub struct OrientationController {
    state: OrientationState,
    tracking: bool,
    last_attitude: Option<Matrix3<f64>>,
    compass_heading_deg: f64,
    drag_sensitivity: f64,
    last_drag: (f64, f64),
}

impl OrientationController {
    /// Create a controller in tracking mode
    pub fn new(drag_sensitivity: f64) -> Self {
        Self {
            state: OrientationState::default(),
            tracking: true,
            last_attitude: None,
            compass_heading_deg: 0.0,
            drag_sensitivity,
            last_drag: (0.0, 0.0),
        }
    }

    /// Current orientation snapshot
    pub fn state(&self) -> OrientationState {
        self.state
    }

    /// Whether sensor updates drive the view
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Last reported compass heading in degrees
    pub fn compass_heading(&self) -> f64 {
        self.compass_heading_deg
    }

    /// Record a new attitude sample; replaces the state while tracking
    pub fn apply_attitude(&mut self, attitude: Matrix3<f64>) {
        self.last_attitude = Some(attitude);
        if self.tracking {
            self.state = OrientationState::DeviceMatrix(attitude);
        }
    }

    /// Record a new compass heading in degrees
    pub fn apply_heading(&mut self, heading_deg: f64) {
        self.compass_heading_deg = heading_deg;
    }

    /// Leave tracking and look along explicit manual angles (radians)
    pub fn set_manual(&mut self, pitch: f64, yaw: f64) {
        self.tracking = false;
        self.state = OrientationState::Manual { pitch, yaw };
    }

    /// Apply a drag gesture given its cumulative translation in pixels
    ///
    /// The first drag while tracking hands control to manual mode, seeded
    /// from the last attitude (or the compass heading before any attitude
    /// has arrived) so the view does not jump.
    pub fn handle_drag(&mut self, translation_x: f64, translation_y: f64) {
        let (mut pitch, mut yaw) = match self.state {
            OrientationState::Manual { pitch, yaw } if !self.tracking => (pitch, yaw),
            _ => {
                let (pitch, yaw) = match &self.last_attitude {
                    Some(attitude) => manual_angles_from_attitude(attitude),
                    None => manual_angles_from_heading(self.compass_heading_deg),
                };
                info!(
                    "Switching to manual orientation (pitch={:.3}, yaw={:.3})",
                    pitch, yaw
                );
                self.tracking = false;
                (pitch, yaw)
            }
        };

        let delta_x = translation_x - self.last_drag.0;
        let delta_y = translation_y - self.last_drag.1;

        yaw -= delta_x * self.drag_sensitivity;
        pitch += delta_y * self.drag_sensitivity;

        self.state = OrientationState::Manual { pitch, yaw };
        self.last_drag = (translation_x, translation_y);
    }

    /// Finish the current drag gesture
    pub fn end_drag(&mut self) {
        self.last_drag = (0.0, 0.0);
    }

    /// Hand control back to the device sensors
    pub fn resume_tracking(&mut self) {
        self.tracking = true;
        if let Some(attitude) = self.last_attitude {
            self.state = OrientationState::DeviceMatrix(attitude);
        }
        debug!("Resumed sensor tracking");
    }
}
