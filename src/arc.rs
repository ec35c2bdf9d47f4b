//! Arc point generator.
//!
//! Produces points along an elliptical arc at 1° steps, with sweep or
//! absolute end-angle semantics and an optional centre point for pies.

use log::trace;

use crate::basics::{normalize_angle, PointD, PointKind};
use crate::ellipse::{ellipse_rotator, get_ellipse_point};
use crate::rotation::Rotation;

/// Parameters of one arc request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub start: f64,
    /// Absolute end angle, or the sweep when `sweep` is set.
    pub end: f64,
    /// Put the centre (tagged [`PointKind::CENTRE`]) in front of the arc.
    pub add_centre: bool,
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub rotation: Option<Rotation>,
    /// Walk from `start` towards decreasing angles.
    pub negative_motion: bool,
    /// `end` is relative: the arc ends at `start + end`.
    pub sweep: bool,
    pub pie_angle: bool,
}

impl ArcParams {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64, start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            add_centre: false,
            cx,
            cy,
            rx,
            ry,
            rotation: None,
            negative_motion: false,
            sweep: false,
            pie_angle: false,
        }
    }

    pub fn with_centre_point(mut self) -> Self {
        self.add_centre = true;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn negative_motion(mut self) -> Self {
        self.negative_motion = true;
        self
    }

    pub fn sweep(mut self) -> Self {
        self.sweep = true;
        self
    }

    pub fn pie_angle(mut self) -> Self {
        self.pie_angle = true;
        self
    }

    /// Normalised start angle, direction (`+1` or `-1`) and angular span.
    ///
    /// In sweep mode the sign of the sweep gives the direction and the span
    /// is its magnitude, capped at 360. Otherwise the span is 360 when start
    /// and end coincide after normalisation but the request was not empty.
    pub fn resolve(&self) -> (f64, f64, f64) {
        let start = normalize_angle(self.start);
        if self.sweep {
            let negative = self.negative_motion || self.end < 0.0;
            let span = self.end.abs().min(360.0);
            return (start, if negative { -1.0 } else { 1.0 }, span);
        }

        let end = normalize_angle(self.end);
        let negative = self.negative_motion || start > end;
        let span = if start == end {
            if self.end == self.start {
                0.0
            } else {
                360.0
            }
        } else if negative {
            if start > end {
                start - end
            } else {
                start + 360.0 - end
            }
        } else {
            end - start
        };
        (start, if negative { -1.0 } else { 1.0 }, span)
    }
}

/// Arc points at 1° steps from the start angle, the end angle included.
///
/// A span of `n` degrees yields `ceil(n)` steps plus the end point, and one
/// more point when the centre is requested. Rotation is resolved once for
/// the whole arc.
pub fn get_arc_points(params: &ArcParams) -> Vec<PointD> {
    let (start, dir, span) = params.resolve();
    let steps = span.ceil() as usize;

    let mut pts = Vec::with_capacity(steps + 1 + params.add_centre as usize);
    if params.add_centre {
        pts.push(PointD::with_kind(params.cx, params.cy, PointKind::CENTRE));
    }
    let at = |a: f64| {
        get_ellipse_point(
            a,
            params.cx,
            params.cy,
            params.rx,
            params.ry,
            None,
            params.pie_angle,
        )
    };
    for i in 0..steps {
        pts.push(at(start + dir * i as f64));
    }
    pts.push(at(start + dir * span));

    if let Some(r) = ellipse_rotator(params.rotation.as_ref(), params.cx, params.cy) {
        r.apply_all(&mut pts);
    }
    trace!("arc of {} degrees produced {} points", span, pts.len());
    pts
}
