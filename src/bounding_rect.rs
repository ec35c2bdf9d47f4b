//! Bounding rectangle calculation.
//!
//! Axis-aligned bounds of point sequences. The stroke generator uses these
//! to decide which of two offset outlines is the outer one.

use crate::basics::{PointD, RectD};

/// Bounding rectangle of a point sequence.
///
/// Null sentinels are skipped. Returns `None` if no real point is found.
pub fn bounding_rect(points: &[PointD]) -> Option<RectD> {
    let mut it = points.iter().filter(|p| !p.is_empty());
    let first = it.next()?;
    let mut x1 = first.x;
    let mut y1 = first.y;
    let mut x2 = first.x;
    let mut y2 = first.y;

    for p in it {
        if p.x < x1 {
            x1 = p.x;
        }
        if p.y < y1 {
            y1 = p.y;
        }
        if p.x > x2 {
            x2 = p.x;
        }
        if p.y > y2 {
            y2 = p.y;
        }
    }
    Some(RectD::new(x1, y1, x2, y2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_rect_triangle() {
        let tri = [
            PointD::new(10.0, 20.0),
            PointD::new(50.0, 80.0),
            PointD::new(30.0, 10.0),
        ];
        let r = bounding_rect(&tri).unwrap();
        assert!((r.x1 - 10.0).abs() < 1e-10);
        assert!((r.y1 - 10.0).abs() < 1e-10);
        assert!((r.x2 - 50.0).abs() < 1e-10);
        assert!((r.y2 - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_bounding_rect_ellipse() {
        let pts = crate::ellipse::ellipse_points(50.0, 50.0, 30.0, 20.0, None);
        let r = bounding_rect(&pts).unwrap();
        assert!((r.x1 - 20.0).abs() < 1e-9);
        assert!((r.y1 - 30.0).abs() < 1e-9);
        assert!((r.x2 - 80.0).abs() < 1e-9);
        assert!((r.y2 - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_rect_empty_returns_none() {
        assert!(bounding_rect(&[]).is_none());
        assert!(bounding_rect(&[PointD::empty(), PointD::empty()]).is_none());
    }

    #[test]
    fn test_bounding_rect_skips_sentinels() {
        let pts = [PointD::empty(), PointD::new(42.0, 17.0), PointD::empty()];
        let r = bounding_rect(&pts).unwrap();
        assert_eq!(r, RectD::new(42.0, 17.0, 42.0, 17.0));
    }
}
