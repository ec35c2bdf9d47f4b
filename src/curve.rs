//! Curves: conics with arc, pie and closed-arc semantics.
//!
//! A [`Curve`] wraps a [`Conic`] with type flags and start/end angles. Its
//! pie triangle holds the centre vertex (always index 0) and the arc's
//! start and end points, in the curve's transformed frame. A stroked curve
//! carries its inner copy as the attached curve.

use bitflags::bitflags;
use log::debug;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::arc::{get_arc_points, ArcParams};
use crate::basics::{PointD, PointKind};
use crate::conic::{Conic, ConicConfig, ConstructionMode};
use crate::ellipse::{ellipse_points, get_ellipse_point};
use crate::stroke::{get_stroked_centres, StrokeMode};

bitflags! {
    /// Curve semantics and construction flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
    pub struct CurveType: u16 {
        /// Whole perimeter; also the meaning of no shape flag at all.
        const FULL = 1 << 0;
        /// Open arc between the start and end angles.
        const ARC = 1 << 1;
        /// Arc closed through the centre.
        const PIE = 1 << 2;
        /// Arc closed by its chord.
        const CLOSED_ARC = 1 << 3;
        /// Walk from the start angle towards decreasing angles.
        const ANTI_CLOCK = 1 << 4;
        /// Exchange the stroked pie centres.
        const CROSS_STROKE = 1 << 5;
        /// Construction points are rhombus corners.
        const FITTING = 1 << 6;
        /// The fourth construction point is the centre.
        const CENTRE_POINT = 1 << 7;
        /// The end angle is a sweep relative to the start.
        const SWEEP_ANGLE = 1 << 8;
        /// Angles are polar angles on the ellipse.
        const PIE_ANGLE = 1 << 9;
        /// Three-point construction takes the minor axis pair first.
        const MINOR_FIRST = 1 << 10;
    }
}

impl CurveType {
    /// Construction mode selected by the flags.
    pub fn construction_mode(self) -> ConstructionMode {
        if self.contains(CurveType::FITTING) {
            ConstructionMode::Fitting
        } else if self.contains(CurveType::CENTRE_POINT) {
            ConstructionMode::FourthPointIsCenter
        } else {
            ConstructionMode::ThirdPointOnEllipse
        }
    }

    /// Axis ordering for three-point construction.
    pub fn major_first(self) -> bool {
        !self.contains(CurveType::MINOR_FIRST)
    }

    /// `true` when no partial-shape flag is set.
    pub fn is_full(self) -> bool {
        self.contains(CurveType::FULL)
            || !self.intersects(CurveType::ARC | CurveType::PIE | CurveType::CLOSED_ARC)
    }
}

/// A conic with arc semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub conic: Conic,
    pub kind: CurveType,
    pub start_angle: f64,
    pub end_angle: f64,
    pie_triangle: [PointD; 3],
    /// Inner copy of a stroked curve.
    pub attached: Option<Box<Curve>>,
}

impl Curve {
    pub fn new(conic: Conic, kind: CurveType, start_angle: f64, end_angle: f64) -> Self {
        let mut c = Self {
            conic,
            kind,
            start_angle,
            end_angle,
            pie_triangle: [PointD::empty(); 3],
            attached: None,
        };
        c.update_pie_triangle();
        c
    }

    /// Whole ellipse.
    pub fn full(conic: Conic) -> Self {
        Self::new(conic, CurveType::FULL, 0.0, 360.0)
    }

    /// Build the conic from construction points, choosing the mode and the
    /// axis ordering from `kind`. Returns `None` if too few points are given.
    pub fn from_points(
        points: &[PointD],
        kind: CurveType,
        start_angle: f64,
        end_angle: f64,
        config: &ConicConfig,
    ) -> Option<Self> {
        let conic =
            Conic::from_points(points, kind.construction_mode(), kind.major_first(), config)?;
        Some(Self::new(conic, kind, start_angle, end_angle))
    }

    /// Centre, start point and end point.
    pub fn pie_triangle(&self) -> &[PointD; 3] {
        &self.pie_triangle
    }

    /// Move the pie centre vertex, e.g. to a stroked centre.
    pub fn set_pie_centre(&mut self, centre: PointD) {
        self.pie_triangle[0] = PointD::with_kind(centre.x, centre.y, PointKind::CENTRE);
    }

    /// Arc request for this curve, without rotation (the conic transform is
    /// applied separately).
    pub fn arc_params(&self, add_centre: bool) -> ArcParams {
        let c = &self.conic;
        ArcParams {
            start: self.start_angle,
            end: self.end_angle,
            add_centre,
            cx: c.cx,
            cy: c.cy,
            rx: c.rx,
            ry: c.ry,
            rotation: None,
            negative_motion: self.kind.contains(CurveType::ANTI_CLOCK),
            sweep: self.kind.contains(CurveType::SWEEP_ANGLE),
            pie_angle: self.kind.contains(CurveType::PIE_ANGLE),
        }
    }

    fn update_pie_triangle(&mut self) {
        let c = &self.conic;
        let (start, dir, span) = self.arc_params(false).resolve();
        let pie_angle = self.kind.contains(CurveType::PIE_ANGLE);
        let mut tri = [
            PointD::with_kind(c.cx, c.cy, PointKind::CENTRE),
            get_ellipse_point(start, c.cx, c.cy, c.rx, c.ry, None, pie_angle),
            get_ellipse_point(start + dir * span, c.cx, c.cy, c.rx, c.ry, None, pie_angle),
        ];
        c.transform(&mut tri);
        self.pie_triangle = tri;
    }

    /// Perimeter points.
    ///
    /// Full curves give the whole ellipse; arcs their 1° points; pies put
    /// the pie centre first; closed arcs repeat the first point to close the
    /// chord. Tilt and rotation are applied in one batch each.
    pub fn points(&self) -> Vec<PointD> {
        let c = &self.conic;
        if !c.is_valid() {
            debug!("curve with non-positive radius produces no points");
            return Vec::new();
        }
        if self.kind.is_full() {
            let mut pts = ellipse_points(c.cx, c.cy, c.rx, c.ry, None);
            c.transform(&mut pts);
            return pts;
        }

        let pie = self.kind.contains(CurveType::PIE);
        let mut pts = get_arc_points(&self.arc_params(pie));
        c.transform(&mut pts);
        if pie {
            pts[0] = self.pie_triangle[0];
        } else if self.kind.contains(CurveType::CLOSED_ARC) {
            let first = pts[0];
            pts.push(first);
        }
        pts
    }

    /// Outer stroke copy of this curve with the inner copy attached.
    ///
    /// Radii grow by the mode's outer offset and shrink by its inner
    /// offset. Pies get their stroked centres. An inner copy whose radius
    /// collapses is dropped.
    pub fn stroked(&self, stroke: f64, mode: StrokeMode) -> Curve {
        let (o_out, o_in) = mode.offsets(stroke);
        let grow = |d: f64| {
            let mut conic = self.conic;
            conic.rx = (conic.rx + d).max(0.0);
            conic.ry = (conic.ry + d).max(0.0);
            Curve::new(conic, self.kind, self.start_angle, self.end_angle)
        };

        let mut outer = grow(o_out);
        let mut inner = grow(o_in);
        if self.kind.contains(CurveType::PIE) {
            let (main, child) = get_stroked_centres(self, stroke, mode);
            outer.set_pie_centre(main);
            inner.set_pie_centre(child);
        }
        if inner.conic.is_valid() {
            outer.attached = Some(Box::new(inner));
        } else {
            debug!("inner stroke copy collapsed, not attached");
        }
        outer
    }
}
