//! Rounded box, capsule and rhombus outlines.
//!
//! One quarter circle is flattened from a cubic Bezier (eight points) and
//! reflected into each enabled corner. A disabled corner is a single sharp
//! vertex. Outlines run clockwise on screen from the top-left corner.

use bitflags::bitflags;

use crate::basics::PointD;
use crate::bernstein::bezier_points;
use crate::rotation::{transform_points, Centre, Rotation, Scale};

/// Cubic handle length for a unit quarter circle, `4/3·(√2 − 1)`.
pub const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Points per flattened quarter circle (4 controls × 2).
pub const QUARTER_POINTS: usize = 8;

bitflags! {
    /// Which corners of a box are rounded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        const TOP_LEFT = 0b0001;
        const TOP_RIGHT = 0b0010;
        const BOTTOM_RIGHT = 0b0100;
        const BOTTOM_LEFT = 0b1000;
        const ALL = Self::TOP_LEFT.bits()
            | Self::TOP_RIGHT.bits()
            | Self::BOTTOM_RIGHT.bits()
            | Self::BOTTOM_LEFT.bits();
    }
}

impl Default for Corners {
    fn default() -> Self {
        Corners::ALL
    }
}

/// Unit quarter circle from `(1, 0)` to `(0, 1)`.
pub fn quarter_circle() -> Vec<PointD> {
    let control = [
        PointD::new(1.0, 0.0),
        PointD::new(1.0, KAPPA),
        PointD::new(KAPPA, 1.0),
        PointD::new(0.0, 1.0),
    ];
    bezier_points(&control, 2)
}

/// Rounded box outline, no transform.
///
/// The radius is clamped to half the shorter side; a non-positive radius
/// gives the plain four corners.
pub fn rounded_box_points(
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radius: f64,
    corners: Corners,
) -> Vec<PointD> {
    let r = radius.min(w * 0.5).min(h * 0.5);
    let (x2, y2) = (x + w, y + h);
    if r <= 0.0 || corners.is_empty() {
        return vec![
            PointD::new(x, y),
            PointD::new(x2, y),
            PointD::new(x2, y2),
            PointD::new(x, y2),
        ];
    }

    let q = quarter_circle();
    let mut out = Vec::with_capacity(4 * QUARTER_POINTS);
    // sharp corner, arc centre, mirror signs
    let mut corner = |flag: Corners, sharp: (f64, f64), c: (f64, f64), s: (f64, f64), reverse| {
        if !corners.contains(flag) {
            out.push(PointD::new(sharp.0, sharp.1));
            return;
        }
        let map = |p: &PointD| PointD::new(c.0 + s.0 * r * p.x, c.1 + s.1 * r * p.y);
        if reverse {
            out.extend(q.iter().rev().map(map));
        } else {
            out.extend(q.iter().map(map));
        }
    };

    // (-1,0) -> (0,-1)
    corner(Corners::TOP_LEFT, (x, y), (x + r, y + r), (-1.0, -1.0), false);
    // (0,-1) -> (1,0)
    corner(Corners::TOP_RIGHT, (x2, y), (x2 - r, y + r), (1.0, -1.0), true);
    // (1,0) -> (0,1)
    corner(Corners::BOTTOM_RIGHT, (x2, y2), (x2 - r, y2 - r), (1.0, 1.0), false);
    // (0,1) -> (-1,0)
    corner(Corners::BOTTOM_LEFT, (x, y2), (x + r, y2 - r), (-1.0, 1.0), true);
    out
}

/// Box with fully rounded short sides.
pub fn capsule_points(x: f64, y: f64, w: f64, h: f64) -> Vec<PointD> {
    rounded_box_points(x, y, w, h, w.min(h) * 0.5, Corners::ALL)
}

/// Diamond through the midpoints of the box edges: top, right, bottom, left.
pub fn rhombus_points(x: f64, y: f64, w: f64, h: f64) -> Vec<PointD> {
    let (mx, my) = (x + w * 0.5, y + h * 0.5);
    vec![
        PointD::new(mx, y),
        PointD::new(x + w, my),
        PointD::new(mx, y + h),
        PointD::new(x, my),
    ]
}

/// Outline shape of a [`BoxShape`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxOutline {
    Rounded { radius: f64, corners: Corners },
    Capsule,
    Rhombus,
}

/// A box outline with its own transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub outline: BoxOutline,
    pub rotation: Option<Rotation>,
    pub scale: Option<Scale>,
}

impl BoxShape {
    pub fn new(x: f64, y: f64, width: f64, height: f64, outline: BoxOutline) -> Self {
        Self {
            x,
            y,
            width,
            height,
            outline,
            rotation: None,
            scale: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Centre all transforms turn about: the rotation's own, else the box's.
    pub fn centre(&self) -> Centre {
        self.rotation.and_then(|r| r.centre()).unwrap_or(Centre::new(
            self.x + self.width * 0.5,
            self.y + self.height * 0.5,
        ))
    }

    /// Outline points with scale, skew and rotation applied in that order.
    pub fn points(&self) -> Vec<PointD> {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        let mut pts = match self.outline {
            BoxOutline::Rounded { radius, corners } => {
                rounded_box_points(x, y, w, h, radius, corners)
            }
            BoxOutline::Capsule => capsule_points(x, y, w, h),
            BoxOutline::Rhombus => rhombus_points(x, y, w, h),
        };
        let centre = Some(self.centre());
        transform_points(&mut pts, self.rotation.as_ref(), self.scale.as_ref(), centre);
        pts
    }
}
