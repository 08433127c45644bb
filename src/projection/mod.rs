//! # Perspective Projection
//!
//! Maps camera-space directions onto the 2D viewport with a pinhole
//! (gnomonic) projection, and keeps the zoomable field of view.
//!
//! ## Transformation
//!
//! 1. **Visibility check**: reject directions behind the camera (`z ≤ 0`)
//! 2. **Tangent plane**: divide by depth (`x/z`, `y/z`)
//! 3. **Pixel scaling**: multiply by `width / (2·tan(fov/2))` and offset from
//!    the viewport center, with screen Y growing downward
//!
//! The horizontal field of view is what the scale is derived from, so the
//! vertical extent depends on the viewport aspect ratio.

pub mod hit_test;

pub use hit_test::{nearest, Positioned};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::coordinates::cartesian::Direction;

/// A point in screen pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels
    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the viewport, where the camera axis lands
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// Pixels per unit of tangent-plane offset for a horizontal field of view
    /// in degrees
    pub fn scale(&self, fov_deg: f64) -> f64 {
        self.width / (2.0 * (fov_deg.to_radians() / 2.0).tan())
    }

    /// Whether a point lies within the viewport grown by `buffer` pixels on
    /// every side (all bounds exclusive)
    pub fn contains_with_buffer(&self, point: &ScreenPoint, buffer: f64) -> bool {
        point.x > -buffer
            && point.x < self.width + buffer
            && point.y > -buffer
            && point.y < self.height + buffer
    }

    /// Whether a point lies strictly inside the viewport
    pub fn contains(&self, point: &ScreenPoint) -> bool {
        self.contains_with_buffer(point, 0.0)
    }
}

/// Projects a camera-space direction onto the screen
///
/// # Arguments
/// * `direction` - Direction after orientation has been applied
/// * `center` - Screen position of the camera axis
/// * `scale` - Pixels per unit tangent-plane offset, see [`Viewport::scale`]
///
/// # Returns
/// * `Some(point)` - If the direction is in front of the camera
/// * `None` - If `z ≤ 0`
pub fn project(direction: &Direction, center: &ScreenPoint, scale: f64) -> Option<ScreenPoint> {
    if !direction.is_visible() {
        return None;
    }

    let x = center.x + (direction.x / direction.z) * scale;
    let y = center.y - (direction.y / direction.z) * scale;
    Some(ScreenPoint::new(x, y))
}

/// Zoomable horizontal field of view driven by pinch gestures
///
/// Magnification values are cumulative per gesture, so each update divides
/// the field of view by the change since the previous update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOfView {
    degrees: f64,
    min_deg: f64,
    max_deg: f64,
    last_magnification: f64,
}

impl FieldOfView {
    /// Create a field of view clamped into `[min_deg, max_deg]`
    pub fn new(initial_deg: f64, min_deg: f64, max_deg: f64) -> Self {
        Self {
            degrees: initial_deg.clamp(min_deg, max_deg),
            min_deg,
            max_deg,
            last_magnification: 1.0,
        }
    }

    /// Current field of view in degrees
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Apply the cumulative magnification reported by an ongoing pinch
    pub fn apply_pinch(&mut self, magnification: f64) {
        if magnification <= 0.0 || !magnification.is_finite() {
            debug!("Ignoring pinch magnification {}", magnification);
            return;
        }

        let delta = magnification / self.last_magnification;
        self.last_magnification = magnification;
        self.degrees = (self.degrees / delta).clamp(self.min_deg, self.max_deg);
    }

    /// Finish the pinch gesture; the next one starts from magnification 1
    pub fn end_pinch(&mut self) {
        self.last_magnification = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_center_projection() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let center = viewport.center();
        let point = project(&Direction::new(0.0, 0.0, 1.0), &center, viewport.scale(60.0));

        assert_eq!(point, Some(ScreenPoint::new(960.0, 540.0)));
    }

    #[test]
    fn test_offsets_follow_screen_axes() {
        let center = ScreenPoint::new(100.0, 100.0);
        let scale = 200.0;

        // +X right, +Y up becomes smaller screen Y
        let p = project(&Direction::new(0.1, 0.2, 1.0), &center, scale).unwrap();
        assert_relative_eq!(p.x, 120.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 60.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(-1.0)]
    fn test_behind_camera_not_projected(#[case] z: f64) {
        let center = ScreenPoint::new(0.0, 0.0);
        assert!(project(&Direction::new(0.3, 0.3, z), &center, 100.0).is_none());
    }

    #[test]
    fn test_scale_puts_half_fov_at_edge() {
        let viewport = Viewport::new(800.0, 600.0);
        let fov: f64 = 60.0;
        let half = (fov / 2.0).to_radians();
        let edge = Direction::new(half.sin(), 0.0, half.cos());

        let p = project(&edge, &viewport.center(), viewport.scale(fov)).unwrap();
        assert_relative_eq!(p.x, 800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_buffered_bounds_are_exclusive() {
        let viewport = Viewport::new(100.0, 50.0);
        assert!(viewport.contains_with_buffer(&ScreenPoint::new(-49.0, 99.0), 50.0));
        assert!(!viewport.contains_with_buffer(&ScreenPoint::new(-50.0, 10.0), 50.0));
        assert!(!viewport.contains(&ScreenPoint::new(0.0, 10.0)));
        assert!(viewport.contains(&ScreenPoint::new(1.0, 49.0)));
    }

    #[test]
    fn test_pinch_zoom_is_relative_to_previous_value() {
        let mut fov = FieldOfView::new(60.0, 10.0, 60.0);
        fov.apply_pinch(1.5);
        assert_relative_eq!(fov.degrees(), 40.0, epsilon = 1e-12);

        // 3.0 relative to 1.5 halves it again
        fov.apply_pinch(3.0);
        assert_relative_eq!(fov.degrees(), 20.0, epsilon = 1e-12);

        fov.end_pinch();
        fov.apply_pinch(0.5);
        assert_relative_eq!(fov.degrees(), 40.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case(100.0, 10.0)]
    #[case(0.01, 60.0)]
    fn test_pinch_zoom_clamps(#[case] magnification: f64, #[case] expected: f64) {
        let mut fov = FieldOfView::new(30.0, 10.0, 60.0);
        fov.apply_pinch(magnification);
        assert_eq!(fov.degrees(), expected);
    }

    #[test]
    fn test_invalid_pinch_ignored() {
        let mut fov = FieldOfView::new(30.0, 10.0, 60.0);
        fov.apply_pinch(0.0);
        fov.apply_pinch(f64::NAN);
        assert_eq!(fov.degrees(), 30.0);
    }
}
