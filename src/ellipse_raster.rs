//! Ellipse rasterizers.
//!
//! Three interchangeable ways of turning an ellipse into something a
//! scan-converter can draw:
//!
//! - Bresenham: integer two-region walk with an incremental error term,
//!   emitting pixels or one span per row or column. Axis-aligned only.
//! - Nissen: a closed polygon whose face count follows the perimeter.
//! - Fast quadrant: one quadrant at 2° steps, mirrored into the other three.
//!
//! Nothing here touches a pixel buffer; results go to caller-supplied sinks.

use bitflags::bitflags;
use log::{debug, trace};

use crate::basics::{deg2rad, iround, PI};
use crate::ellipse::ellipse_rotator;
use crate::rotation::Rotation;

bitflags! {
    /// Quadrants of an ellipse, in screen orientation (y grows downwards).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Position: u8 {
        const TOP_RIGHT = 0b0001;
        const TOP_LEFT = 0b0010;
        const BOTTOM_LEFT = 0b0100;
        const BOTTOM_RIGHT = 0b1000;
        const TOP = Self::TOP_RIGHT.bits() | Self::TOP_LEFT.bits();
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        const LEFT = Self::TOP_LEFT.bits() | Self::BOTTOM_LEFT.bits();
        const RIGHT = Self::TOP_RIGHT.bits() | Self::BOTTOM_RIGHT.bits();
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::ALL
    }
}

// ============================================================================
// Spans and lines
// ============================================================================

/// Axis a span runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOrientation {
    Horizontal,
    Vertical,
}

/// Whether a span is drawn whole or only at its two ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndsMode {
    EndsOnly,
    WithEnds,
}

/// A run of pixels along one axis.
///
/// `fixed` is the row (horizontal) or column (vertical); `start..=end` the
/// positions along the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLine {
    pub fixed: i32,
    pub start: i32,
    pub end: i32,
    pub orientation: FillOrientation,
    pub ends: EndsMode,
}

impl AxisLine {
    pub fn horizontal(y: i32, x1: i32, x2: i32, ends: EndsMode) -> Self {
        Self {
            fixed: y,
            start: x1.min(x2),
            end: x1.max(x2),
            orientation: FillOrientation::Horizontal,
            ends,
        }
    }

    pub fn vertical(x: i32, y1: i32, y2: i32, ends: EndsMode) -> Self {
        Self {
            fixed: x,
            start: y1.min(y2),
            end: y1.max(y2),
            orientation: FillOrientation::Vertical,
            ends,
        }
    }

    /// Number of positions covered, ends included.
    pub fn pixel_count(&self) -> u32 {
        (self.end - self.start) as u32 + 1
    }

    /// Feed every pixel to draw into `sink` as `(x, y)`.
    pub fn pixels(&self, mut sink: impl FnMut(i32, i32)) {
        let mut put = |v: i32| match self.orientation {
            FillOrientation::Horizontal => sink(v, self.fixed),
            FillOrientation::Vertical => sink(self.fixed, v),
        };
        match self.ends {
            EndsMode::WithEnds => (self.start..=self.end).for_each(&mut put),
            EndsMode::EndsOnly => {
                put(self.start);
                if self.end != self.start {
                    put(self.end);
                }
            }
        }
    }

    pub fn to_line(&self) -> Line {
        let (s, e, f) = (self.start as f64, self.end as f64, self.fixed as f64);
        match self.orientation {
            FillOrientation::Horizontal => Line::new(s, f, e, f),
            FillOrientation::Vertical => Line::new(f, s, f, e),
        }
    }
}

/// A line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

// ============================================================================
// Bresenham
// ============================================================================

// quadrant, its horizontal mirror, its vertical mirror, x sign, y sign
const QUADRANTS: [(Position, Position, Position, i32, i32); 4] = [
    (Position::TOP_RIGHT, Position::TOP_LEFT, Position::BOTTOM_RIGHT, 1, -1),
    (Position::TOP_LEFT, Position::TOP_RIGHT, Position::BOTTOM_LEFT, -1, -1),
    (Position::BOTTOM_LEFT, Position::BOTTOM_RIGHT, Position::TOP_LEFT, -1, 1),
    (Position::BOTTOM_RIGHT, Position::BOTTOM_LEFT, Position::TOP_RIGHT, 1, 1),
];

/// Walk one quadrant of `x²/rx² + y²/ry² = 1` from `(0, ry)` and from
/// `(rx, 0)`, meeting where the slope is −1. A point can repeat where the
/// two regions meet.
fn quadrant_walk(rx: i32, ry: i32, mut plot: impl FnMut(i32, i32)) {
    let (a, b) = (rx as i64, ry as i64);
    let (a2, b2) = (a * a, b * b);
    let (fa2, fb2) = (4 * a2, 4 * b2);

    // steep top region, x advances every step
    let (mut x, mut y) = (0i64, b);
    let mut sigma = 2 * b2 + a2 * (1 - 2 * b);
    while b2 * x <= a2 * y {
        plot(x as i32, y as i32);
        if sigma >= 0 {
            sigma += fa2 * (1 - y);
            y -= 1;
        }
        sigma += b2 * (4 * x + 6);
        x += 1;
    }

    // side region, y advances every step
    let (mut x, mut y) = (a, 0i64);
    let mut sigma = 2 * a2 + b2 * (1 - 2 * a);
    while a2 * y <= b2 * x {
        plot(x as i32, y as i32);
        if sigma >= 0 {
            sigma += fb2 * (1 - x);
            x -= 1;
        }
        sigma += a2 * (4 * y + 6);
        y += 1;
    }
}

/// Largest radius the integer walk accepts; its squared terms stay well
/// inside `i64`.
pub const BRESENHAM_MAX_RADIUS: i32 = 1 << 15;

fn radii_in_range(rx: i32, ry: i32) -> bool {
    if rx <= 0 || ry <= 0 {
        debug!("bresenham ellipse with radius {}x{} skipped", rx, ry);
        return false;
    }
    if rx > BRESENHAM_MAX_RADIUS || ry > BRESENHAM_MAX_RADIUS {
        debug!(
            "bresenham ellipse with radius {}x{} exceeds {}, skipped",
            rx, ry, BRESENHAM_MAX_RADIUS
        );
        return false;
    }
    true
}

/// Perimeter pixels of an axis-aligned ellipse, limited to the quadrants
/// in `position`.
///
/// Points on an axis shared by two enabled quadrants are emitted once.
/// Nothing is emitted for a non-positive radius or one above
/// [`BRESENHAM_MAX_RADIUS`].
pub fn bresenham_points(
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    position: Position,
    mut sink: impl FnMut(i32, i32),
) {
    if !radii_in_range(rx, ry) {
        return;
    }
    quadrant_walk(rx, ry, |x, y| {
        for &(flag, mirror_x, mirror_y, sx, sy) in QUADRANTS.iter() {
            if !position.contains(flag) {
                continue;
            }
            if x == 0 && sx < 0 && position.contains(mirror_x) {
                continue;
            }
            if y == 0 && sy > 0 && position.contains(mirror_y) {
                continue;
            }
            sink(cx.saturating_add(sx * x), cy.saturating_add(sy * y));
        }
    });
}

/// Half widths of every row from the centre row (index 0) to the top.
fn row_half_widths(rx: i32, ry: i32) -> Vec<i32> {
    let mut half = vec![-1i32; ry as usize + 1];
    quadrant_walk(rx, ry, |x, y| {
        if let Some(h) = half.get_mut(y as usize) {
            *h = (*h).max(x);
        }
    });
    // the half width never shrinks towards the centre row
    for y in (0..ry as usize).rev() {
        if half[y] < half[y + 1] {
            half[y] = half[y + 1];
        }
    }
    half
}

/// Filled axis-aligned ellipse as one span per row (horizontal, top to
/// bottom) or per column (vertical, left to right).
///
/// A row with only its left or right quadrant enabled gets a half span
/// running from the centre column; a column with only its top or bottom
/// quadrant enabled gets one running from the centre row.
pub fn bresenham_spans(
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    position: Position,
    orientation: FillOrientation,
    mut sink: impl FnMut(AxisLine),
) {
    if !radii_in_range(rx, ry) {
        return;
    }
    match orientation {
        FillOrientation::Horizontal => {
            let half = row_half_widths(rx, ry);
            for dy in -ry..=ry {
                let (left, right) = match dy.signum() {
                    -1 => (Position::TOP_LEFT, Position::TOP_RIGHT),
                    1 => (Position::BOTTOM_LEFT, Position::BOTTOM_RIGHT),
                    _ => (Position::LEFT, Position::RIGHT),
                };
                let h = half[dy.unsigned_abs() as usize];
                let (l, r) = (position.intersects(left), position.intersects(right));
                let Some((a, b)) = span_ends(cx, h, l, r) else {
                    continue;
                };
                sink(AxisLine::horizontal(cy.saturating_add(dy), a, b, EndsMode::WithEnds));
            }
        }
        FillOrientation::Vertical => {
            // the transposed walk gives half heights per column
            let half = row_half_widths(ry, rx);
            for dx in -rx..=rx {
                let (top, bottom) = match dx.signum() {
                    -1 => (Position::TOP_LEFT, Position::BOTTOM_LEFT),
                    1 => (Position::TOP_RIGHT, Position::BOTTOM_RIGHT),
                    _ => (Position::TOP, Position::BOTTOM),
                };
                let h = half[dx.unsigned_abs() as usize];
                let (t, b) = (position.intersects(top), position.intersects(bottom));
                let Some((a, b)) = span_ends(cy, h, t, b) else {
                    continue;
                };
                sink(AxisLine::vertical(cx.saturating_add(dx), a, b, EndsMode::WithEnds));
            }
        }
    }
}

/// Ends of a span of half length `h` about `centre`, cut at the centre for
/// a disabled side.
fn span_ends(centre: i32, h: i32, low: bool, high: bool) -> Option<(i32, i32)> {
    match (low, high) {
        (true, true) => Some((centre.saturating_sub(h), centre.saturating_add(h))),
        (true, false) => Some((centre.saturating_sub(h), centre)),
        (false, true) => Some((centre, centre.saturating_add(h))),
        (false, false) => None,
    }
}

// ============================================================================
// Nissen polygon
// ============================================================================

/// Smallest and largest Nissen face counts.
pub const NISSEN_MIN_FACES: usize = 32;
pub const NISSEN_MAX_FACES: usize = 512;

/// Perimeter length covered by one face.
const NISSEN_FACE_LENGTH: f64 = 4.0;

/// Ramanujan's approximation of the ellipse perimeter.
pub fn ellipse_circumference(rx: f64, ry: f64) -> f64 {
    let (a, b) = (rx.abs(), ry.abs());
    PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
}

/// Faces for a Nissen polygon: one per few units of perimeter, rounded up
/// to a multiple of 4 and clamped to
/// [`NISSEN_MIN_FACES`]..=[`NISSEN_MAX_FACES`].
pub fn nissen_face_count(rx: f64, ry: f64) -> usize {
    let faces = (ellipse_circumference(rx, ry) / NISSEN_FACE_LENGTH).ceil();
    let faces = if faces.is_finite() && faces > 0.0 { faces as usize } else { 0 };
    (faces.saturating_add(3) / 4 * 4).clamp(NISSEN_MIN_FACES, NISSEN_MAX_FACES)
}

/// Closed polygon approximating the ellipse, one connected line per face.
///
/// The rotation turns about its own centre, else the ellipse centre.
pub fn nissen_lines(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    rotation: Option<&Rotation>,
    mut sink: impl FnMut(Line),
) {
    if rx <= 0.0 || ry <= 0.0 {
        debug!("nissen ellipse with radius {}x{} skipped", rx, ry);
        return;
    }
    let faces = nissen_face_count(rx, ry);
    trace!("nissen ellipse {}x{}: {} faces", rx, ry, faces);

    let rotator = ellipse_rotator(rotation, cx, cy);
    let vertex = |k: usize| {
        let (s, c) = (2.0 * PI * k as f64 / faces as f64).sin_cos();
        let (x, y) = (cx + rx * c, cy + ry * s);
        match &rotator {
            Some(r) => r.apply(x, y),
            None => (x, y),
        }
    };

    let first = vertex(0);
    let mut prev = first;
    for k in 1..=faces {
        let next = if k == faces { first } else { vertex(k) };
        sink(Line::new(prev.0, prev.1, next.0, next.1));
        prev = next;
    }
}

// ============================================================================
// Fast quadrant
// ============================================================================

/// Steps per quadrant of the fast method.
pub const FAST_QUADRANT_STEPS: usize = 45;

/// Ellipse outline from a single quadrant, mirrored into the other three.
///
/// Each 2° step produces four lines: top-right, top-left, bottom-left and
/// bottom-right. The mirrored offsets go through the same scale, skew and
/// rotation as the original quadrant, so a skewed ellipse stays closed.
pub fn fast_quadrant_lines(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    rotation: Option<&Rotation>,
    mut sink: impl FnMut(Line),
) {
    if rx <= 0.0 || ry <= 0.0 {
        debug!("fast quadrant ellipse with radius {}x{} skipped", rx, ry);
        return;
    }
    let rotator = ellipse_rotator(rotation, cx, cy);
    let place = |dx: f64, dy: f64| match &rotator {
        Some(r) => r.apply(cx + dx, cy + dy),
        None => (cx + dx, cy + dy),
    };

    let step = 90.0 / FAST_QUADRANT_STEPS as f64;
    let offset = |i: usize| {
        let (s, c) = deg2rad(step * i as f64).sin_cos();
        (rx * c, ry * s)
    };

    let mut prev = offset(0);
    for i in 1..=FAST_QUADRANT_STEPS {
        let next = offset(i);
        for (sx, sy) in [(1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            let a = place(sx * prev.0, sy * prev.1);
            let b = place(sx * next.0, sy * next.1);
            sink(Line::new(a.0, a.1, b.0, b.1));
        }
        prev = next;
    }
}

// ============================================================================
// Strategy
// ============================================================================

/// Selectable ellipse rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EllipseRasterizer {
    /// Filled rows; rounds to whole pixels and ignores rotation.
    Bresenham,
    #[default]
    Nissen,
    FastQuadrant,
}

impl EllipseRasterizer {
    /// Lines for the whole ellipse.
    ///
    /// Bresenham gives its horizontal spans as lines; the others give the
    /// outline. Bresenham yields nothing for radii above
    /// [`BRESENHAM_MAX_RADIUS`].
    pub fn lines(
        self,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        rotation: Option<&Rotation>,
    ) -> Vec<Line> {
        let mut out = Vec::new();
        match self {
            EllipseRasterizer::Bresenham => {
                if rotation.is_some_and(|r| r.valid()) {
                    debug!("bresenham rasterizer ignores rotation");
                }
                bresenham_spans(
                    iround(cx),
                    iround(cy),
                    iround(rx),
                    iround(ry),
                    Position::ALL,
                    FillOrientation::Horizontal,
                    |s| out.push(s.to_line()),
                );
            }
            EllipseRasterizer::Nissen => {
                nissen_lines(cx, cy, rx, ry, rotation, |l| out.push(l));
            }
            EllipseRasterizer::FastQuadrant => {
                fast_quadrant_lines(cx, cy, rx, ry, rotation, |l| out.push(l));
            }
        }
        out
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn collect_points(rx: i32, ry: i32, position: Position) -> Vec<(i32, i32)> {
        let mut pts = Vec::new();
        bresenham_points(100, 100, rx, ry, position, |x, y| pts.push((x, y)));
        pts
    }

    fn collect_spans(rx: i32, ry: i32, position: Position) -> Vec<AxisLine> {
        let mut spans = Vec::new();
        bresenham_spans(100, 100, rx, ry, position, FillOrientation::Horizontal, |s| {
            spans.push(s)
        });
        spans
    }

    fn collect_columns(rx: i32, ry: i32, position: Position) -> Vec<AxisLine> {
        let mut spans = Vec::new();
        bresenham_spans(100, 100, rx, ry, position, FillOrientation::Vertical, |s| {
            spans.push(s)
        });
        spans
    }

    #[test]
    fn test_circle_first_quadrant_walk() {
        let mut pts = Vec::new();
        quadrant_walk(5, 5, |x, y| pts.push((x, y)));
        assert_eq!(pts, vec![(0, 5), (1, 5), (2, 5), (3, 4), (5, 0), (5, 1), (5, 2), (4, 3)]);
    }

    #[test]
    fn test_bresenham_points_near_perimeter() {
        for (rx, ry) in [(5, 5), (20, 7), (3, 12)] {
            let pts = collect_points(rx, ry, Position::ALL);
            assert!(!pts.is_empty());
            for &(x, y) in &pts {
                let (dx, dy) = ((x - 100) as f64, (y - 100) as f64);
                let v = (dx / rx as f64).powi(2) + (dy / ry as f64).powi(2);
                assert!((v - 1.0).abs() < 0.5, "({}, {}) far from {}x{}", x, y, rx, ry);
            }
            assert!(pts.contains(&(100, 100 - ry)));
            assert!(pts.contains(&(100 + rx, 100)));
            assert!(pts.contains(&(100 - rx, 100)));
            assert!(pts.contains(&(100, 100 + ry)));
        }
    }

    #[test]
    fn test_axis_points_not_doubled() {
        let pts = collect_points(5, 5, Position::ALL);
        assert_eq!(pts.iter().filter(|&&p| p == (100, 95)).count(), 1);
        assert_eq!(pts.iter().filter(|&&p| p == (105, 100)).count(), 1);
    }

    #[test]
    fn test_bresenham_quadrant_mask() {
        let pts = collect_points(8, 4, Position::TOP_RIGHT);
        assert!(pts.iter().all(|&(x, y)| x >= 100 && y <= 100));
        let pts = collect_points(8, 4, Position::BOTTOM_LEFT);
        assert!(pts.iter().all(|&(x, y)| x <= 100 && y >= 100));
        assert!(collect_points(8, 4, Position::empty()).is_empty());
        assert!(collect_points(0, 4, Position::ALL).is_empty());
    }

    #[test]
    fn test_bresenham_spans_full() {
        let spans = collect_spans(5, 5, Position::ALL);
        assert_eq!(spans.len(), 11);
        assert_eq!(spans[0], AxisLine::horizontal(95, 98, 102, EndsMode::WithEnds));
        assert_eq!(spans[5], AxisLine::horizontal(100, 95, 105, EndsMode::WithEnds));
        assert_eq!(spans[10].fixed, 105);
        // symmetric about the centre row
        for i in 0..5 {
            assert_eq!(spans[i].pixel_count(), spans[10 - i].pixel_count());
        }
    }

    #[test]
    fn test_bresenham_half_spans() {
        let spans = collect_spans(6, 3, Position::RIGHT);
        assert_eq!(spans.len(), 7);
        assert!(spans.iter().all(|s| s.start == 100));

        let spans = collect_spans(6, 3, Position::TOP);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans.last().unwrap().fixed, 100);

        let spans = collect_spans(6, 3, Position::TOP_LEFT);
        assert!(spans.iter().all(|s| s.end == 100 && s.fixed <= 100));
    }

    #[test]
    fn test_bresenham_column_spans() {
        let cols = collect_columns(5, 5, Position::ALL);
        assert_eq!(cols.len(), 11);
        assert!(cols.iter().all(|c| c.orientation == FillOrientation::Vertical));
        assert_eq!(cols[0], AxisLine::vertical(95, 98, 102, EndsMode::WithEnds));
        assert_eq!(cols[5], AxisLine::vertical(100, 95, 105, EndsMode::WithEnds));

        // a circle fills the same pixels by rows and by columns
        let rows = collect_spans(5, 5, Position::ALL);
        for (r, c) in rows.iter().zip(&cols) {
            assert_eq!((r.fixed, r.start, r.end), (c.fixed, c.start, c.end));
        }

        let cols = collect_columns(6, 3, Position::BOTTOM);
        assert_eq!(cols.len(), 13);
        assert!(cols.iter().all(|c| c.start == 100 && c.end >= 100));

        let cols = collect_columns(6, 3, Position::TOP_LEFT);
        assert_eq!(cols.len(), 7);
        assert!(cols.iter().all(|c| c.end == 100 && c.fixed <= 100));
    }

    #[test]
    fn test_bresenham_radius_limit() {
        assert!(collect_points(BRESENHAM_MAX_RADIUS + 1, 4, Position::ALL).is_empty());
        assert!(collect_spans(4, BRESENHAM_MAX_RADIUS + 1, Position::ALL).is_empty());
        assert!(collect_columns(i32::MAX, i32::MAX, Position::ALL).is_empty());
        let lines = EllipseRasterizer::Bresenham.lines(0.0, 0.0, 3e9, 3e9, None);
        assert!(lines.is_empty());

        let spans = collect_spans(BRESENHAM_MAX_RADIUS, 3, Position::ALL);
        assert_eq!(spans.len(), 7);
        assert_eq!(spans[3].pixel_count(), 2 * BRESENHAM_MAX_RADIUS as u32 + 1);
    }

    #[test]
    fn test_axis_line_pixels() {
        let mut px = Vec::new();
        AxisLine::horizontal(3, 5, 1, EndsMode::WithEnds).pixels(|x, y| px.push((x, y)));
        assert_eq!(px, vec![(1, 3), (2, 3), (3, 3), (4, 3), (5, 3)]);

        px.clear();
        AxisLine::vertical(7, 0, 4, EndsMode::EndsOnly).pixels(|x, y| px.push((x, y)));
        assert_eq!(px, vec![(7, 0), (7, 4)]);

        let l = AxisLine::vertical(7, 0, 4, EndsMode::EndsOnly).to_line();
        assert_eq!(l, Line::new(7.0, 0.0, 7.0, 4.0));
    }

    #[test]
    fn test_nissen_face_count() {
        assert_eq!(nissen_face_count(1.0, 1.0), NISSEN_MIN_FACES);
        assert_eq!(nissen_face_count(10_000.0, 10_000.0), NISSEN_MAX_FACES);
        let n = nissen_face_count(100.0, 100.0);
        assert_eq!(n, 160);
        let n = nissen_face_count(120.0, 30.0);
        assert_eq!(n % 4, 0);
        assert!((NISSEN_MIN_FACES..=NISSEN_MAX_FACES).contains(&n));
    }

    #[test]
    fn test_circumference_of_circle() {
        assert!((ellipse_circumference(10.0, 10.0) - 20.0 * PI).abs() < EPSILON);
    }

    #[test]
    fn test_nissen_lines_closed_polygon() {
        let mut lines = Vec::new();
        nissen_lines(50.0, 50.0, 40.0, 20.0, None, |l| lines.push(l));
        assert_eq!(lines.len(), nissen_face_count(40.0, 20.0));
        for w in lines.windows(2) {
            assert_eq!((w[0].x2, w[0].y2), (w[1].x1, w[1].y1));
        }
        let (first, last) = (lines[0], lines[lines.len() - 1]);
        assert_eq!((last.x2, last.y2), (first.x1, first.y1));
        for l in &lines {
            let v = ((l.x1 - 50.0) / 40.0).powi(2) + ((l.y1 - 50.0) / 20.0).powi(2);
            assert!((v - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_nissen_rotated() {
        let rot = Rotation::new(90.0);
        let mut lines = Vec::new();
        nissen_lines(0.0, 0.0, 40.0, 20.0, Some(&rot), |l| lines.push(l));
        // the vertex at 0° turns onto the y axis
        assert!(lines[0].x1.abs() < EPSILON && (lines[0].y1 - 40.0).abs() < EPSILON);
        for l in &lines {
            let v = (l.x1 / 20.0).powi(2) + (l.y1 / 40.0).powi(2);
            assert!((v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fast_quadrant_lines() {
        let mut lines = Vec::new();
        fast_quadrant_lines(10.0, 10.0, 8.0, 4.0, None, |l| lines.push(l));
        assert_eq!(lines.len(), FAST_QUADRANT_STEPS * 4);
        assert!((lines[0].x1 - 18.0).abs() < EPSILON && (lines[0].y1 - 10.0).abs() < EPSILON);
        // the last top-right line ends on the top of the ellipse
        let tr = lines[lines.len() - 4];
        assert!((tr.x2 - 10.0).abs() < EPSILON && (tr.y2 - 6.0).abs() < EPSILON);
        for l in &lines {
            let v = ((l.x2 - 10.0) / 8.0).powi(2) + ((l.y2 - 10.0) / 4.0).powi(2);
            assert!((v - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_fast_quadrant_skew_keeps_mirrors_joined() {
        use crate::rotation::Skew;
        let rot = Rotation::new(30.0).with_skew(Skew::horizontal(1.5));
        let mut lines = Vec::new();
        fast_quadrant_lines(0.0, 0.0, 8.0, 4.0, Some(&rot), |l| lines.push(l));
        // top-right and bottom-right quadrants start at the same transformed point
        let (tr, br) = (lines[0], lines[3]);
        assert!((tr.x1 - br.x1).abs() < EPSILON && (tr.y1 - br.y1).abs() < EPSILON);
    }

    #[test]
    fn test_rasterizer_strategies() {
        let b = EllipseRasterizer::Bresenham.lines(100.0, 100.0, 5.0, 5.0, None);
        assert_eq!(b.len(), 11);
        assert!(b.iter().all(|l| l.y1 == l.y2));

        let n = EllipseRasterizer::Nissen.lines(0.0, 0.0, 100.0, 100.0, None);
        assert_eq!(n.len(), 160);

        let f = EllipseRasterizer::FastQuadrant.lines(0.0, 0.0, 100.0, 100.0, None);
        assert_eq!(f.len(), 180);

        assert!(EllipseRasterizer::default().lines(0.0, 0.0, 0.0, 1.0, None).is_empty());
    }
}
