//! Horizon line and cardinal point markers
//!
//! Both are placed through [`to_cartesian`] at altitude 0, so they line up
//! with every catalog object.

use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::coordinates::horizontal::{to_cartesian, HorizontalPosition};
use crate::orientation::{rotate, OrientationState};
use crate::projection::{project, ScreenPoint, Viewport};

/// Azimuth step between horizon samples (degrees)
pub const HORIZON_STEP_DEG: usize = 5;

const CARDINALS: [(&str, f64); 4] = [("N", 0.0), ("E", FRAC_PI_2), ("S", PI), ("W", 1.5 * PI)];

/// A compass label placed on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardinalMarker {
    pub label: &'static str,
    pub point: ScreenPoint,
}

/// Projects N, E, S and W on the horizon
///
/// A marker is kept only when it lands strictly inside the viewport.
pub fn cardinal_markers(
    orientation: &OrientationState,
    viewport: &Viewport,
    fov_deg: f64,
) -> Vec<CardinalMarker> {
    let center = viewport.center();
    let scale = viewport.scale(fov_deg);

    CARDINALS
        .iter()
        .filter_map(|&(label, azimuth)| {
            let direction = to_cartesian(&HorizontalPosition::new(azimuth, 0.0));
            let rotated = rotate(&direction, orientation);
            project(&rotated, &center, scale)
                .filter(|point| viewport.contains(point))
                .map(|point| CardinalMarker { label, point })
        })
        .collect()
}

/// Samples the horizon every [`HORIZON_STEP_DEG`] degrees into screen polylines
///
/// A new polyline starts after a sample behind the camera, or when two
/// consecutive samples are half a viewport width or more apart horizontally.
/// Single-point fragments are dropped.
pub fn horizon_polylines(
    orientation: &OrientationState,
    viewport: &Viewport,
    fov_deg: f64,
) -> Vec<Vec<ScreenPoint>> {
    let center = viewport.center();
    let scale = viewport.scale(fov_deg);
    let max_jump = viewport.width / 2.0;

    let mut lines: Vec<Vec<ScreenPoint>> = Vec::new();
    let mut current: Vec<ScreenPoint> = Vec::new();

    for azimuth_deg in (0..=360).step_by(HORIZON_STEP_DEG) {
        let direction = to_cartesian(&HorizontalPosition::new((azimuth_deg as f64).to_radians(), 0.0));
        let rotated = rotate(&direction, orientation);

        match project(&rotated, &center, scale) {
            Some(point) => {
                let continues = current
                    .last()
                    .map_or(false, |last| (last.x - point.x).abs() < max_jump);
                if !continues {
                    flush(&mut lines, &mut current);
                }
                current.push(point);
            }
            None => flush(&mut lines, &mut current),
        }
    }
    flush(&mut lines, &mut current);

    lines
}

fn flush(lines: &mut Vec<Vec<ScreenPoint>>, current: &mut Vec<ScreenPoint>) {
    let line = std::mem::take(current);
    if line.len() > 1 {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn facing(yaw: f64, pitch: f64) -> OrientationState {
        OrientationState::Manual { pitch, yaw }
    }

    #[test]
    fn test_south_marker_centered_when_facing_south() {
        let viewport = Viewport::new(400.0, 800.0);
        let markers = cardinal_markers(&facing(0.0, 0.0), &viewport, 60.0);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].label, "S");
        assert_abs_diff_eq!(markers[0].point.x, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(markers[0].point.y, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_east_marker_when_facing_east() {
        let viewport = Viewport::new(400.0, 800.0);
        let markers = cardinal_markers(&facing(FRAC_PI_2, 0.0), &viewport, 60.0);

        let labels: Vec<&str> = markers.iter().map(|m| m.label).collect();
        assert_eq!(labels, vec!["E"]);
        assert_abs_diff_eq!(markers[0].point.x, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_markers_looking_at_zenith() {
        // Horizon points land behind the camera or far off screen
        let viewport = Viewport::new(400.0, 800.0);
        let markers = cardinal_markers(&facing(0.0, -FRAC_PI_2), &viewport, 60.0);
        assert!(markers.is_empty());
    }

    #[test]
    fn test_horizon_is_flat_when_level() {
        let viewport = Viewport::new(400.0, 800.0);
        let lines = horizon_polylines(&facing(0.0, 0.0), &viewport, 60.0);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].len() > 2);
        for point in &lines[0] {
            assert_abs_diff_eq!(point.y, 400.0, epsilon = 1e-6);
        }
        // Left to right across the screen
        for pair in lines[0].windows(2) {
            assert!(pair[1].x > pair[0].x);
        }
    }

    #[test]
    fn test_horizon_drops_below_center_when_looking_up() {
        let viewport = Viewport::new(400.0, 800.0);
        let lines = horizon_polylines(&facing(0.0, -0.3), &viewport, 60.0);

        assert!(!lines.is_empty());
        let middle = lines[0]
            .iter()
            .min_by(|a, b| (a.x - 200.0).abs().total_cmp(&(b.x - 200.0).abs()))
            .unwrap();
        assert!(middle.y > 400.0);
    }
}
