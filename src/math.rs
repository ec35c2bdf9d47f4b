//! Point geometry shared by the conic solver, the flatteners and the
//! stroke generator.

use crate::basics::PointD;

/// Points closer than this are treated as one.
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

/// Denominators below this mean parallel lines.
const INTERSECTION_EPSILON: f64 = 1.0e-30;

/// Which side of the directed line `a → b` the point `p` is on.
///
/// Positive on the left on screen (y down), negative on the right, zero
/// when collinear.
#[inline]
pub fn cross_product(a: PointD, b: PointD, p: PointD) -> f64 {
    (p.x - b.x) * (b.y - a.y) - (p.y - b.y) * (b.x - a.x)
}

/// Intersection of the infinite lines through `a → b` and `c → d`, or
/// `None` when they are parallel.
pub fn line_intersection(a: PointD, b: PointD, c: PointD, d: PointD) -> Option<PointD> {
    let num = (a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y);
    let den = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    if den.abs() < INTERSECTION_EPSILON {
        return None;
    }
    let r = num / den;
    Some(PointD::new(a.x + r * (b.x - a.x), a.y + r * (b.y - a.y)))
}

/// Offset of length `offset` perpendicular to the edge `a → b`, or zero for
/// a degenerate edge.
#[inline]
pub fn edge_normal(a: PointD, b: PointD, offset: f64) -> (f64, f64) {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let d = (dx * dx + dy * dy).sqrt();
    if d < VERTEX_DIST_EPSILON {
        return (0.0, 0.0);
    }
    (offset * dy / d, -offset * dx / d)
}

/// Signed shoelace area of a closed polygon, sentinels skipped.
///
/// Positive when the vertices run clockwise on screen.
pub fn polygon_area(vertices: &[PointD]) -> f64 {
    let mut it = vertices.iter().filter(|p| !p.is_empty());
    let Some(&first) = it.next() else {
        return 0.0;
    };
    let mut prev = first;
    let mut sum = 0.0;
    for &v in it {
        sum += prev.x * v.y - prev.y * v.x;
        prev = v;
    }
    (sum + prev.x * first.y - prev.y * first.x) * 0.5
}

/// Arithmetic mean of a point set; the origin for an empty slice.
pub fn centroid(points: &[PointD]) -> PointD {
    if points.is_empty() {
        return PointD::new(0.0, 0.0);
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f64;
    PointD::new(sx / n, sy / n)
}
