//! Outline decomposition.
//!
//! A contour is a closed sequence of tagged points. Untagged points lie on
//! the curve, [`PointKind::CONTROL`] points are quadratic controls (two in a
//! row imply an on-curve point halfway between them) and
//! [`PointKind::CUBIC`] points are cubic controls, which must come in pairs
//! followed by an on-curve point. A point tagged [`PointKind::BREAK`] starts
//! a new contour.
//!
//! Malformed control sequences are reported as [`OutlineError`]; the input
//! is expected to be validated upstream, so nothing is patched over.

use thiserror::Error;

use crate::basics::{PointD, PointKind};
use crate::curves::{CubicFlattener, QuadraticFlattener};

/// Malformed outline data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OutlineError {
    #[error("cubic control point at index {index} is not part of a pair")]
    UnpairedCubicControl { index: usize },
    #[error("contour starting at index {index} has no on-curve point")]
    MissingEndPoint { index: usize },
    #[error("empty contour at index {index}")]
    EmptyContour { index: usize },
}

/// One drawing command of a decomposed outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineSegment {
    MoveTo(PointD),
    LineTo(PointD),
    QuadTo(PointD, PointD),
    CubicTo(PointD, PointD, PointD),
    Close,
}

/// Split `points` into contours at [`PointKind::BREAK`] points, returning
/// the index range of each.
fn contours(points: &[PointD]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.kind.contains(PointKind::BREAK) {
            out.push((start, i));
            start = i;
        }
    }
    if start < points.len() {
        out.push((start, points.len()));
    }
    out
}

#[inline]
fn on_curve(p: PointD) -> PointD {
    PointD::new(p.x, p.y)
}

/// Walk every contour, handing segments to `sink`.
///
/// Each contour starts with a `MoveTo` and ends with `Close`. A contour of
/// quadratic controls only starts at the midpoint of its last and first
/// controls.
pub fn decompose_outline<F>(points: &[PointD], sink: &mut F) -> Result<(), OutlineError>
where
    F: FnMut(OutlineSegment),
{
    if points.is_empty() {
        return Err(OutlineError::EmptyContour { index: 0 });
    }
    for (a, b) in contours(points) {
        decompose_contour(&points[a..b], a, sink)?;
    }
    Ok(())
}

fn decompose_contour<F>(contour: &[PointD], base: usize, sink: &mut F) -> Result<(), OutlineError>
where
    F: FnMut(OutlineSegment),
{
    let n = contour.len();
    if n == 0 {
        return Err(OutlineError::EmptyContour { index: base });
    }

    let is_cubic = |p: &PointD| p.kind.contains(PointKind::CUBIC);
    let is_quad =
        |p: &PointD| p.kind.contains(PointKind::CONTROL) && !p.kind.contains(PointKind::CUBIC);

    // first on-curve point, or an implied one between quadratic controls
    let (start, first) = match contour.iter().position(|p| !p.kind.is_control()) {
        Some(i) => (on_curve(contour[i]), i + 1),
        None => {
            if contour.iter().any(is_cubic) {
                return Err(OutlineError::MissingEndPoint { index: base });
            }
            (contour[n - 1].midpoint(&contour[0]), 0)
        }
    };
    sink(OutlineSegment::MoveTo(start));

    let mut quad: Option<PointD> = None;
    let mut cubic: Vec<(usize, PointD)> = Vec::with_capacity(2);

    // visit every point once after the start, then close on the start
    let rest = if first == 0 { n } else { n - 1 };
    for k in 0..=rest {
        let (index, p) = if k == rest {
            (None, start)
        } else {
            let i = (first + k) % n;
            (Some(base + i), contour[i])
        };

        if let Some(index) = index.filter(|_| is_cubic(&p)) {
            if quad.is_some() || cubic.len() == 2 {
                return Err(OutlineError::UnpairedCubicControl { index });
            }
            cubic.push((index, p));
        } else if index.is_some() && is_quad(&p) {
            if let Some(&(i, _)) = cubic.first() {
                return Err(OutlineError::UnpairedCubicControl { index: i });
            }
            if let Some(c) = quad.take() {
                sink(OutlineSegment::QuadTo(c, c.midpoint(&p)));
            }
            quad = Some(p);
        } else {
            let end = on_curve(p);
            match cubic.len() {
                0 => match quad.take() {
                    Some(c) => sink(OutlineSegment::QuadTo(c, end)),
                    None if k < rest => sink(OutlineSegment::LineTo(end)),
                    None => {}
                },
                2 => {
                    sink(OutlineSegment::CubicTo(cubic[0].1, cubic[1].1, end));
                    cubic.clear();
                }
                _ => return Err(OutlineError::UnpairedCubicControl { index: cubic[0].0 }),
            }
        }
    }
    sink(OutlineSegment::Close);
    Ok(())
}

/// Flatten an outline into polylines, one per contour.
///
/// The first point of every contour after the first is tagged
/// [`PointKind::BREAK`]. The closing point of each contour equals its
/// start.
pub fn flatten_outline(
    points: &[PointD],
    quadratic: &QuadraticFlattener,
    cubic: &CubicFlattener,
) -> Result<Vec<PointD>, OutlineError> {
    let mut out: Vec<PointD> = Vec::with_capacity(points.len() * 4);
    let mut current = PointD::new(0.0, 0.0);
    let mut contour_start = 0;

    decompose_outline(points, &mut |seg| match seg {
        OutlineSegment::MoveTo(p) => {
            contour_start = out.len();
            let kind = if out.is_empty() {
                PointKind::empty()
            } else {
                PointKind::BREAK
            };
            out.push(PointD::with_kind(p.x, p.y, kind));
            current = p;
        }
        OutlineSegment::LineTo(p) => {
            out.push(p);
            current = p;
        }
        OutlineSegment::QuadTo(c, p) => {
            quadratic.flatten_into(current, c, p, &mut out, true);
            current = p;
        }
        OutlineSegment::CubicTo(c1, c2, p) => {
            cubic.flatten_into([current, c1, c2, p], &mut out, true);
            current = p;
        }
        OutlineSegment::Close => {
            if let Some(&s) = out.get(contour_start) {
                if current != on_curve(s) {
                    out.push(on_curve(s));
                }
            }
        }
    })?;
    Ok(out)
}
