//! Nearest-object lookup for screen taps

use super::{project, ScreenPoint};
use crate::coordinates::cartesian::Direction;
use crate::orientation::{rotate, OrientationState};

/// Anything placed in the rendering frame
pub trait Positioned {
    /// Frame-fixed direction, before orientation is applied
    fn direction(&self) -> &Direction;
}

impl Positioned for Direction {
    fn direction(&self) -> &Direction {
        self
    }
}

/// Finds the candidate drawn closest to a tap
///
/// Every candidate is rotated by `orientation` and projected; those behind the
/// camera are skipped. The closest one is returned only if its distance is
/// strictly below `max_radius`. When several are equally close the earliest
/// in iteration order wins.
pub fn nearest<'a, T, I>(
    tap: &ScreenPoint,
    candidates: I,
    orientation: &OrientationState,
    center: &ScreenPoint,
    scale: f64,
    max_radius: f64,
) -> Option<&'a T>
where
    T: Positioned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut closest = None;
    let mut min_distance = max_radius;

    for candidate in candidates {
        let rotated = rotate(candidate.direction(), orientation);
        let Some(point) = project(&rotated, center, scale) else {
            continue;
        };

        let distance = point.distance_to(tap);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(candidate);
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Viewport;

    /// Direction that projects `dx` pixels right of center with no rotation
    fn offset_direction(dx: f64, scale: f64) -> Direction {
        let t = dx / scale;
        let norm = (1.0 + t * t).sqrt();
        Direction::new(t / norm, 0.0, 1.0 / norm)
    }

    #[test]
    fn test_nearest_respects_radius() {
        let viewport = Viewport::new(400.0, 400.0);
        let center = viewport.center();
        let scale = viewport.scale(60.0);
        let state = OrientationState::default();

        let far = offset_direction(60.0, scale);
        let near = offset_direction(10.0, scale);
        let objects = vec![far, near];

        let hit = nearest(&center, &objects, &state, &center, scale, 50.0);
        assert_eq!(hit, Some(&near));

        let miss = nearest(&center, &objects, &state, &center, scale, 5.0);
        assert!(miss.is_none());
    }

    #[test]
    fn test_radius_is_exclusive() {
        let viewport = Viewport::new(400.0, 400.0);
        let center = viewport.center();
        let scale = viewport.scale(60.0);
        let objects = vec![Direction::new(0.0, 0.0, 1.0)];
        let tap = ScreenPoint::new(center.x + 20.0, center.y);

        let state = OrientationState::default();
        assert!(nearest(&tap, &objects, &state, &center, scale, 20.0).is_none());
        assert!(nearest(&tap, &objects, &state, &center, scale, 20.000_001).is_some());
    }

    #[test]
    fn test_first_of_equal_distances_wins() {
        let center = ScreenPoint::new(200.0, 200.0);
        let objects = vec![
            Direction::new(0.0, 0.0, 1.0),
            Direction::new(0.0, 0.0, 1.0),
        ];

        let hit = nearest(
            &center,
            &objects,
            &OrientationState::default(),
            &center,
            300.0,
            50.0,
        )
        .unwrap();
        assert!(std::ptr::eq(hit, &objects[0]));
    }

    #[test]
    fn test_objects_behind_camera_ignored() {
        let center = ScreenPoint::new(200.0, 200.0);
        // Straight behind would project onto the center if not rejected
        let objects = vec![Direction::new(0.0, 0.0, -1.0)];

        let hit = nearest(
            &center,
            &objects,
            &OrientationState::default(),
            &center,
            300.0,
            50.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_orientation_applied_before_projection() {
        let center = ScreenPoint::new(200.0, 200.0);
        // East on the horizon is centered once yaw faces east
        let east = Direction::new(-1.0, 0.0, 0.0);
        let objects = vec![east];

        let facing_south = OrientationState::default();
        let facing_east = OrientationState::Manual {
            pitch: 0.0,
            yaw: std::f64::consts::FRAC_PI_2,
        };

        assert!(nearest(&center, &objects, &facing_south, &center, 300.0, 50.0).is_none());
        assert!(nearest(&center, &objects, &facing_east, &center, 300.0, 50.0).is_some());
    }
}
