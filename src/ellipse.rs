//! Ellipse perimeter points.
//!
//! Single points at a given angle, with optional pie-angle correction, and
//! whole perimeters at 1° resolution.

use crate::basics::{deg2rad, PointD};
use crate::rotation::{Centre, Rotation, Rotator};

/// Number of perimeter points produced by [`ellipse_points`].
pub const ELLIPSE_STEPS: usize = 360;

/// Parametric angle (radians) for a degree value.
///
/// With `pie_angle` and unequal radii, `angle` is read as the polar angle
/// of the point on the ellipse and converted through
/// `atan2(rx·sin, ry·cos)`, so equal steps sweep equal angles on the
/// ellipse itself rather than on its bounding circle.
#[inline]
pub fn parametric_angle(angle: f64, rx: f64, ry: f64, pie_angle: bool) -> f64 {
    let t = deg2rad(angle);
    if pie_angle && rx != ry {
        let (s, c) = t.sin_cos();
        (rx * s).atan2(ry * c)
    } else {
        t
    }
}

/// Unrotated point on the ellipse at `angle` degrees.
#[inline]
fn raw_point(angle: f64, cx: f64, cy: f64, rx: f64, ry: f64, pie_angle: bool) -> PointD {
    let (s, c) = parametric_angle(angle, rx, ry, pie_angle).sin_cos();
    PointD::new(cx + rx * c, cy + ry * s)
}

/// Point on the ellipse at `angle` degrees.
///
/// A rotation turns about its own centre if it has one, else about
/// `(cx, cy)`.
pub fn get_ellipse_point(
    angle: f64,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    rotation: Option<&Rotation>,
    pie_angle: bool,
) -> PointD {
    let p = raw_point(angle, cx, cy, rx, ry, pie_angle);
    match ellipse_rotator(rotation, cx, cy) {
        Some(r) => r.apply_point(p),
        None => p,
    }
}

/// Full perimeter at 1° steps starting at 0°, rotated in one batch.
pub fn ellipse_points(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    rotation: Option<&Rotation>,
) -> Vec<PointD> {
    let mut pts: Vec<PointD> = (0..ELLIPSE_STEPS)
        .map(|i| raw_point(i as f64, cx, cy, rx, ry, false))
        .collect();
    if let Some(r) = ellipse_rotator(rotation, cx, cy) {
        r.apply_all(&mut pts);
    }
    pts
}

/// Resolve a rotation for points around `(cx, cy)`.
pub(crate) fn ellipse_rotator(rotation: Option<&Rotation>, cx: f64, cy: f64) -> Option<Rotator> {
    let centre = rotation
        .and_then(|r| r.centre())
        .unwrap_or(Centre::new(cx, cy));
    Rotator::new(rotation, false, Some(centre), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_cardinal_points() {
        let p = get_ellipse_point(0.0, 10.0, 20.0, 5.0, 3.0, None, false);
        assert!((p.x - 15.0).abs() < EPSILON && (p.y - 20.0).abs() < EPSILON);
        let p = get_ellipse_point(90.0, 10.0, 20.0, 5.0, 3.0, None, false);
        assert!((p.x - 10.0).abs() < EPSILON && (p.y - 23.0).abs() < EPSILON);
        let p = get_ellipse_point(180.0, 10.0, 20.0, 5.0, 3.0, None, false);
        assert!((p.x - 5.0).abs() < EPSILON && (p.y - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_pie_angle_lands_on_polar_ray() {
        // 45° polar on a 2:1 ellipse: the point sits on the diagonal
        let p = get_ellipse_point(45.0, 0.0, 0.0, 20.0, 10.0, None, true);
        assert!((p.x - p.y).abs() < EPSILON);
        assert!(((p.x / 20.0).powi(2) + (p.y / 10.0).powi(2) - 1.0).abs() < EPSILON);

        // without correction it is the parametric point
        let q = get_ellipse_point(45.0, 0.0, 0.0, 20.0, 10.0, None, false);
        assert!((q.x - 2.0 * q.y).abs() < EPSILON);
    }

    #[test]
    fn test_pie_angle_ignored_for_circles() {
        let a = get_ellipse_point(33.0, 1.0, 2.0, 7.0, 7.0, None, true);
        let b = get_ellipse_point(33.0, 1.0, 2.0, 7.0, 7.0, None, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rotation_about_ellipse_centre() {
        let r = Rotation::new(90.0);
        let p = get_ellipse_point(0.0, 10.0, 10.0, 5.0, 2.0, Some(&r), false);
        assert!((p.x - 10.0).abs() < EPSILON);
        assert!((p.y - 15.0).abs() < EPSILON);

        // own centre wins over the ellipse centre
        let r = Rotation::new(180.0).with_centre(Centre::new(0.0, 0.0));
        let p = get_ellipse_point(0.0, 10.0, 10.0, 5.0, 2.0, Some(&r), false);
        assert!((p.x + 15.0).abs() < EPSILON);
        assert!((p.y + 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_ellipse_points_count_and_batch_equivalence() {
        let r = Rotation::new(30.0);
        let pts = ellipse_points(3.0, 4.0, 8.0, 5.0, Some(&r));
        assert_eq!(pts.len(), ELLIPSE_STEPS);
        for (i, p) in pts.iter().enumerate().step_by(37) {
            let q = get_ellipse_point(i as f64, 3.0, 4.0, 8.0, 5.0, Some(&r), false);
            assert!((p.x - q.x).abs() < EPSILON && (p.y - q.y).abs() < EPSILON);
        }
    }
}
