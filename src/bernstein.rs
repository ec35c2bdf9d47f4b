//! Bezier flattening through the Bernstein basis.
//!
//! An `n`-point control polygon is evaluated at evenly spaced parameters to
//! produce `multiplier × n` points. Chained curves reuse the last point of
//! one segment as the first control point of the next.

use std::sync::OnceLock;

use log::trace;

use crate::basics::PointD;

/// Largest index held in the factorial table; higher degrees are clamped.
pub const FACTORIAL_CAP: usize = 32;

static FACTORIALS: OnceLock<[f64; FACTORIAL_CAP + 1]> = OnceLock::new();

fn factorials() -> &'static [f64; FACTORIAL_CAP + 1] {
    FACTORIALS.get_or_init(|| {
        let mut t = [1.0; FACTORIAL_CAP + 1];
        for i in 1..=FACTORIAL_CAP {
            t[i] = t[i - 1] * i as f64;
        }
        t
    })
}

/// `n!` from the process-wide table, with `n` clamped to [`FACTORIAL_CAP`].
#[inline]
pub fn factorial(n: usize) -> f64 {
    factorials()[n.min(FACTORIAL_CAP)]
}

/// Bernstein basis polynomial `B(n, i, t)`.
#[inline]
pub fn bernstein(n: usize, i: usize, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    let binomial = factorial(n) / (factorial(i) * factorial(n - i));
    binomial * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32)
}

/// Evaluate the Bezier curve of `control` at `t`.
#[inline]
pub fn bezier_point(control: &[PointD], t: f64) -> PointD {
    let n = control.len().saturating_sub(1);
    let (x, y) = control.iter().enumerate().fold((0.0, 0.0), |(x, y), (i, p)| {
        let b = bernstein(n, i, t);
        (x + b * p.x, y + b * p.y)
    });
    PointD::new(x, y)
}

/// Flatten one control polygon into `multiplier × control.len()` points,
/// from `t = 0` to `t = 1` inclusive.
pub fn bezier_points(control: &[PointD], multiplier: usize) -> Vec<PointD> {
    let count = multiplier * control.len();
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![bezier_point(control, 0.0)];
    }
    let last = count - 1;
    let step = 1.0 / last as f64;
    (0..count)
        .map(|k| {
            let t = if k == last { 1.0 } else { k as f64 * step };
            bezier_point(control, t)
        })
        .collect()
}

/// Segment grouping of a Bezier control sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BezierType {
    /// Groups of 3.
    Quadratic,
    /// Groups of 4.
    Cubic,
    /// Groups of 4; a leftover tail of two or more points becomes a final
    /// lower-degree segment instead of forcing a flat pass.
    Multiple,
}

impl BezierType {
    /// Points per segment.
    pub fn group(self) -> usize {
        match self {
            BezierType::Quadratic => 3,
            BezierType::Cubic | BezierType::Multiple => 4,
        }
    }
}

/// Control points with their segment grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier {
    pub points: Vec<PointD>,
    pub kind: BezierType,
}

impl Bezier {
    pub fn new(points: Vec<PointD>, kind: BezierType) -> Self {
        Self { points, kind }
    }

    /// `true` when the point count splits exactly into segments.
    pub fn is_compatible(&self, pick_from_last: bool) -> bool {
        segment_ranges(self.points.len(), self.kind.group(), pick_from_last).is_some()
    }

    pub fn flatten(&self, pick_from_last: bool, multiplier: usize) -> Vec<PointD> {
        get_bezier_points(&self.points, self.kind, pick_from_last, multiplier)
    }
}

/// Index ranges of whole segments, or `None` if `len` does not split.
///
/// Chained segments (`pick_from_last`) overlap by one point, so after the
/// first group each segment adds `group - 1` points.
fn segment_ranges(len: usize, group: usize, pick_from_last: bool) -> Option<Vec<(usize, usize)>> {
    if len < group {
        return None;
    }
    let stride = if pick_from_last { group - 1 } else { group };
    let tail = if pick_from_last { len - group } else { len };
    if tail % stride != 0 {
        return None;
    }
    let mut ranges = Vec::new();
    let mut start = 0;
    while start + group <= len {
        ranges.push((start, start + group));
        start += stride;
    }
    Some(ranges)
}

/// Flatten a sequence of Bezier segments.
///
/// With `pick_from_last` every segment after the first starts at the
/// previous segment's last point (quadratic stride 2, cubic stride 3) and
/// that shared point is emitted once. Counts that do not fit the grouping
/// fall back to one flat pass over all points, except for
/// [`BezierType::Multiple`], which flattens the leftover tail on its own.
pub fn get_bezier_points(
    points: &[PointD],
    kind: BezierType,
    pick_from_last: bool,
    multiplier: usize,
) -> Vec<PointD> {
    let group = kind.group();
    let ranges = match segment_ranges(points.len(), group, pick_from_last) {
        Some(r) => r,
        None if kind == BezierType::Multiple && points.len() >= group => {
            multiple_ranges(points.len(), group, pick_from_last)
        }
        None => {
            trace!("{} control points do not group, flattening in one pass", points.len());
            return bezier_points(points, multiplier);
        }
    };

    let mut out = Vec::with_capacity(points.len() * multiplier);
    for (i, &(a, b)) in ranges.iter().enumerate() {
        let seg = bezier_points(&points[a..b], multiplier);
        let skip = (i > 0 && pick_from_last) as usize;
        out.extend(seg.into_iter().skip(skip));
    }
    trace!("flattened {} segments into {} points", ranges.len(), out.len());
    out
}

/// Whole groups followed by a shorter tail segment.
fn multiple_ranges(len: usize, group: usize, pick_from_last: bool) -> Vec<(usize, usize)> {
    let stride = if pick_from_last { group - 1 } else { group };
    let mut ranges = Vec::new();
    let mut start = 0;
    while start + group <= len {
        ranges.push((start, start + group));
        start += stride;
    }
    // a tail needs two points, counting the shared one
    if len - start >= 2 {
        ranges.push((start, len));
    }
    ranges
}
