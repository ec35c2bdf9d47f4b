//! Stroke outline generation.
//!
//! A stroked perimeter is bounded by two offset copies of the input: the
//! outer one and the inner one. Offsets use mitered joins clamped to
//! [`MITER_LIMIT`] times the offset. For closed shapes the sign is chosen
//! from the winding so that a positive offset grows the shape; a final
//! bounds check swaps the pair when the "outer" copy does not contain the
//! "inner" one, which happens for concave or self-intersecting input. An
//! inner copy wider than the shape can hold collapses to a point.

use log::debug;

use crate::basics::{PointD, RectD};
use crate::bounding_rect::bounding_rect;
use crate::curve::{Curve, CurveType};
use crate::math::{centroid, edge_normal, line_intersection, polygon_area, VERTEX_DIST_EPSILON};

/// Longest miter, as a multiple of the offset distance.
pub const MITER_LIMIT: f64 = 4.0;

/// Where the stroke band lies relative to the perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeMode {
    /// Centred on the perimeter.
    #[default]
    Middle,
    /// Entirely outside.
    Outer,
    /// Entirely inside.
    Inner,
}

impl StrokeMode {
    /// Outer and inner offset distances for a stroke width.
    pub fn offsets(self, stroke: f64) -> (f64, f64) {
        match self {
            StrokeMode::Middle => (stroke * 0.5, -stroke * 0.5),
            StrokeMode::Outer => (stroke, 0.0),
            StrokeMode::Inner => (0.0, -stroke),
        }
    }
}

/// Whether the last point connects back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Closed,
    Open,
}

/// Result of [`stroke_points`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrokeOutline {
    pub outer: Vec<PointD>,
    pub inner: Vec<PointD>,
    /// The positive-offset copy turned out to be the inner one.
    pub swapped: bool,
    /// The inner offset folded over itself and was replaced by a single
    /// point repeated once per vertex.
    pub collapsed: bool,
}

/// Drop sentinels and coincident neighbours (including a closing
/// duplicate of the first point for closed shapes).
fn clean(points: &[PointD], shape: ShapeKind) -> Vec<PointD> {
    let mut out: Vec<PointD> = Vec::with_capacity(points.len());
    for p in points.iter().filter(|p| !p.is_empty()) {
        match out.last() {
            Some(last) if last.distance(p) <= VERTEX_DIST_EPSILON => {}
            _ => out.push(*p),
        }
    }
    if shape == ShapeKind::Closed && out.len() > 1 {
        let (f, l) = (out[0], out[out.len() - 1]);
        if f.distance(&l) <= VERTEX_DIST_EPSILON {
            out.pop();
        }
    }
    out
}

/// Offset a polyline or polygon by `offset` along the edge normals.
///
/// Every kept vertex yields exactly one output vertex, so indices line up
/// with the cleaned input. Zero-length edges are skipped, parallel
/// neighbouring edges reuse the incoming edge's normal and long miters are
/// pulled back to [`MITER_LIMIT`] × `|offset|`.
pub fn offset_points(points: &[PointD], offset: f64, shape: ShapeKind) -> Vec<PointD> {
    let pts = clean(points, shape);
    let n = pts.len();
    if n < 2 || offset == 0.0 {
        return pts;
    }
    let closed = shape == ShapeKind::Closed;
    let limit = MITER_LIMIT * offset.abs();

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let p = pts[i];
        let prev = if i > 0 {
            Some(pts[i - 1])
        } else if closed {
            Some(pts[n - 1])
        } else {
            None
        };
        let next = if i + 1 < n {
            Some(pts[i + 1])
        } else if closed {
            Some(pts[0])
        } else {
            None
        };

        let (x, y) = match (prev, next) {
            (Some(a), Some(b)) => {
                let (dx1, dy1) = edge_normal(a, p, offset);
                let (dx2, dy2) = edge_normal(p, b, offset);
                let shift = |q: PointD, dx: f64, dy: f64| PointD::new(q.x + dx, q.y + dy);
                match line_intersection(
                    shift(a, dx1, dy1),
                    shift(p, dx1, dy1),
                    shift(p, dx2, dy2),
                    shift(b, dx2, dy2),
                ) {
                    Some(m) => {
                        let d = p.distance(&m);
                        if d > limit {
                            let k = limit / d;
                            (p.x + (m.x - p.x) * k, p.y + (m.y - p.y) * k)
                        } else {
                            (m.x, m.y)
                        }
                    }
                    None => (p.x + dx1, p.y + dy1),
                }
            }
            (Some(a), None) => {
                let (dx, dy) = edge_normal(a, p, offset);
                (p.x + dx, p.y + dy)
            }
            (None, Some(b)) => {
                let (dx, dy) = edge_normal(p, b, offset);
                (p.x + dx, p.y + dy)
            }
            (None, None) => (p.x, p.y),
        };
        out.push(PointD::with_kind(x, y, p.kind));
    }
    out
}

/// Outer and inner perimeters of a stroke along `points`.
///
/// `swapped` reports that the bounds test exchanged the two copies. For
/// closed shapes an inner copy that turns inside out, or that escapes the
/// outer bounds without holding them, is collapsed onto the centroid of the
/// shape, so the outer bounds always hold the inner ones.
pub fn stroke_points(
    points: &[PointD],
    shape: ShapeKind,
    stroke: f64,
    mode: StrokeMode,
) -> StrokeOutline {
    let closed = shape == ShapeKind::Closed;
    let area = if closed { polygon_area(points) } else { 0.0 };
    let (mut o_out, mut o_in) = mode.offsets(stroke);
    if area < 0.0 {
        o_out = -o_out;
        o_in = -o_in;
    }

    let mut outer = offset_points(points, o_out, shape);
    let mut inner = offset_points(points, o_in, shape);
    let mut swapped = false;
    let mut collapsed = false;

    if closed && o_in != 0.0 && is_inverted(&clean(points, shape), &inner, area) {
        debug!("inner stroke perimeter inverted, collapsing it");
        collapse_inner(&mut inner, &outer, points);
        collapsed = true;
    }

    if let (Some(o), Some(i)) = (bounding_rect(&outer), bounding_rect(&inner)) {
        if !o.contains(&i) {
            if !closed || i.contains(&o) {
                debug!("stroke outer perimeter does not contain the inner one, swapping");
                std::mem::swap(&mut outer, &mut inner);
                swapped = true;
            } else {
                debug!("inner stroke perimeter escapes the outer bounds, collapsing it");
                collapse_inner(&mut inner, &outer, points);
                collapsed = true;
            }
        }
    }
    StrokeOutline {
        outer,
        inner,
        swapped,
        collapsed,
    }
}

/// `true` when the inner copy has turned inside out: its winding flips, or
/// its edges run on balance against the matching edges of `shape`.
fn is_inverted(shape: &[PointD], inner: &[PointD], area: f64) -> bool {
    if polygon_area(inner) * area < 0.0 {
        return true;
    }
    let n = shape.len().min(inner.len());
    let along: f64 = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            let (sx, sy) = (shape[j].x - shape[i].x, shape[j].y - shape[i].y);
            let (ix, iy) = (inner[j].x - inner[i].x, inner[j].y - inner[i].y);
            sx * ix + sy * iy
        })
        .sum();
    along < 0.0
}

/// Move every inner vertex onto the centroid of `shape`, or onto the
/// centre of the outer bounds when the centroid lies outside them.
fn collapse_inner(inner: &mut [PointD], outer: &[PointD], shape: &[PointD]) {
    let kept: Vec<PointD> = shape.iter().filter(|p| !p.is_empty()).copied().collect();
    let mut c = centroid(&kept);
    if let Some(b) = bounding_rect(outer) {
        if !b.contains(&RectD::new(c.x, c.y, c.x, c.y)) {
            let (x, y) = b.centre();
            c = PointD::new(x, y);
        }
    }
    for p in inner.iter_mut() {
        *p = PointD::with_kind(c.x, c.y, p.kind);
    }
}

/// Pie centres for the outer ("main") and inner ("child") stroke copies of
/// a curve.
///
/// The curve's pie triangle is stroked as a closed shape and the centre
/// vertex of each copy is taken. The pair is then exchanged once for each
/// of: the bounds swap, [`CurveType::ANTI_CLOCK`], [`CurveType::CROSS_STROKE`],
/// in that order.
pub fn get_stroked_centres(curve: &Curve, stroke: f64, mode: StrokeMode) -> (PointD, PointD) {
    let triangle = curve.pie_triangle();
    let centre = triangle[0];
    let outline = stroke_points(triangle, ShapeKind::Closed, stroke, mode);

    let mut main = outline.outer.first().copied().unwrap_or(centre);
    let mut child = outline.inner.first().copied().unwrap_or(centre);

    if outline.swapped {
        std::mem::swap(&mut main, &mut child);
    }
    if curve.kind.contains(CurveType::ANTI_CLOCK) {
        std::mem::swap(&mut main, &mut child);
    }
    if curve.kind.contains(CurveType::CROSS_STROKE) {
        std::mem::swap(&mut main, &mut child);
    }
    (main, child)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conic::Conic;

    const EPSILON: f64 = 1e-9;

    fn square() -> Vec<PointD> {
        vec![
            PointD::new(0.0, 0.0),
            PointD::new(10.0, 0.0),
            PointD::new(10.0, 10.0),
            PointD::new(0.0, 10.0),
        ]
    }

    fn close(p: PointD, x: f64, y: f64) -> bool {
        (p.x - x).abs() < EPSILON && (p.y - y).abs() < EPSILON
    }

    #[test]
    fn test_mode_offsets() {
        assert_eq!(StrokeMode::Middle.offsets(4.0), (2.0, -2.0));
        assert_eq!(StrokeMode::Outer.offsets(4.0), (4.0, 0.0));
        assert_eq!(StrokeMode::Inner.offsets(4.0), (0.0, -4.0));
    }

    #[test]
    fn test_offset_square_outward() {
        let out = offset_points(&square(), 1.0, ShapeKind::Closed);
        assert_eq!(out.len(), 4);
        assert!(close(out[0], -1.0, -1.0));
        assert!(close(out[2], 11.0, 11.0));
    }

    #[test]
    fn test_stroke_square_middle() {
        let s = stroke_points(&square(), ShapeKind::Closed, 2.0, StrokeMode::Middle);
        assert!(!s.swapped);
        assert!(close(s.outer[0], -1.0, -1.0));
        assert!(close(s.inner[0], 1.0, 1.0));
    }

    #[test]
    fn test_winding_does_not_flip_sides() {
        let mut rev = square();
        rev.reverse();
        let s = stroke_points(&rev, ShapeKind::Closed, 2.0, StrokeMode::Outer);
        assert!(!s.swapped);
        let b = bounding_rect(&s.outer).unwrap();
        assert!((b.x1 + 2.0).abs() < EPSILON && (b.x2 - 12.0).abs() < EPSILON);
        // outer-only: the inner copy is the shape itself
        assert_eq!(s.inner, rev);
    }

    #[test]
    fn test_zero_length_edges_skipped() {
        let mut pts = square();
        pts.insert(1, PointD::new(0.0, 0.0));
        pts.push(PointD::new(0.0, 0.0));
        let out = offset_points(&pts, 1.0, ShapeKind::Closed);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_miter_clamped_on_sharp_corner() {
        let spike = [
            PointD::new(0.0, 0.0),
            PointD::new(100.0, 1.0),
            PointD::new(0.0, 2.0),
        ];
        let out = offset_points(&spike, 1.0, ShapeKind::Closed);
        let d = spike[1].distance(&out[1]);
        assert!(d <= MITER_LIMIT + EPSILON);
    }

    #[test]
    fn test_open_polyline_ends_are_square() {
        let line = [PointD::new(0.0, 0.0), PointD::new(10.0, 0.0)];
        let out = offset_points(&line, 1.0, ShapeKind::Open);
        assert!(close(out[0], 0.0, -1.0));
        assert!(close(out[1], 10.0, -1.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(offset_points(&[], 1.0, ShapeKind::Closed).is_empty());
        let one = [PointD::new(3.0, 3.0)];
        assert_eq!(offset_points(&one, 1.0, ShapeKind::Closed), one.to_vec());
        let s = stroke_points(&[], ShapeKind::Closed, 2.0, StrokeMode::Middle);
        assert!(!s.swapped && s.outer.is_empty());
    }

    #[test]
    fn test_inverted_inner_collapses_to_centroid() {
        let sliver = [
            PointD::new(-1.23, 2.16),
            PointD::new(-1.46, 2.15),
            PointD::new(-1.80, -2.11),
        ];
        let s = stroke_points(&sliver, ShapeKind::Closed, 0.919, StrokeMode::Inner);
        assert!(s.collapsed && !s.swapped);
        assert_eq!(s.outer, sliver.to_vec());
        assert_eq!(s.inner.len(), 3);
        let c = centroid(&sliver);
        assert!(s.inner.iter().all(|p| close(*p, c.x, c.y)));

        let o = bounding_rect(&s.outer).unwrap();
        assert!(o.contains(&bounding_rect(&s.inner).unwrap()));
    }

    #[test]
    fn test_thin_stroke_keeps_inner_perimeter() {
        let s = stroke_points(&square(), ShapeKind::Closed, 2.0, StrokeMode::Inner);
        assert!(!s.collapsed);
        assert!(close(s.inner[0], 2.0, 2.0));

        // wider than the square: the inward copy folds over
        let s = stroke_points(&square(), ShapeKind::Closed, 12.0, StrokeMode::Middle);
        assert!(s.collapsed);
        assert!(s.inner.iter().all(|p| close(*p, 5.0, 5.0)));
    }

    #[test]
    fn test_stroked_centres_swap_flags() {
        let conic = Conic::new(0.0, 0.0, 10.0, 10.0);
        let pie = Curve::new(conic, CurveType::PIE, 0.0, 90.0);
        let (main, child) = get_stroked_centres(&pie, 2.0, StrokeMode::Middle);
        assert_ne!(main, child);

        let anti = Curve::new(conic, CurveType::PIE | CurveType::ANTI_CLOCK, 0.0, 90.0);
        let (m2, c2) = get_stroked_centres(&anti, 2.0, StrokeMode::Middle);
        // anti-clock walks 0 -> 270, a different wedge; only the order is checked
        let both = CurveType::PIE | CurveType::ANTI_CLOCK | CurveType::CROSS_STROKE;
        let crossed = Curve::new(conic, both, 0.0, 90.0);
        let (m3, c3) = get_stroked_centres(&crossed, 2.0, StrokeMode::Middle);
        assert_eq!((m3, c3), (c2, m2));

        let cross = Curve::new(conic, CurveType::PIE | CurveType::CROSS_STROKE, 0.0, 90.0);
        assert_eq!(get_stroked_centres(&cross, 2.0, StrokeMode::Middle), (child, main));
    }

    #[test]
    fn test_stroked_centre_moves_away_from_wedge() {
        let conic = Conic::new(0.0, 0.0, 10.0, 10.0);
        let pie = Curve::new(conic, CurveType::PIE, 0.0, 90.0);
        let (main, child) = get_stroked_centres(&pie, 2.0, StrokeMode::Middle);
        // the wedge opens towards +x/+y; the outer centre sits behind the apex
        assert!(main.x < 0.0 && main.y < 0.0);
        assert!(child.x > 0.0 && child.y > 0.0);
    }
}
