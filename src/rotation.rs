//! Rotation, skew and scale composition.
//!
//! A [`Rotation`] carries an angle in degrees (clockwise on screen by
//! default), an optional [`Centre`] and an optional [`Skew`]. Every batch
//! operation resolves sine, cosine, centre and skew factors exactly once
//! into a [`Rotator`] and then runs a 2×2 multiply per point.
//!
//! Null or invalid rotations are silent no-ops: the input comes back
//! untransformed.

use log::trace;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::basics::{deg2rad, normalize_angle, rad2deg, PointD};
use crate::trans_affine::TransAffine;

// ============================================================================
// Centre
// ============================================================================

/// An explicit centre of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Centre {
    pub x: f64,
    pub y: f64,
}

impl Centre {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<PointD> for Centre {
    fn from(p: PointD) -> Self {
        Self { x: p.x, y: p.y }
    }
}

// ============================================================================
// Skew
// ============================================================================

/// Which axes a skew distorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SkewType {
    Horizontal,
    Vertical,
    /// Both axes, plus an extra rotation by the skew's own degree.
    Diagonal,
}

/// A non-uniform scale applied about the rotation centre before rotating.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Skew {
    pub kx: f64,
    pub ky: f64,
    pub kind: SkewType,
    pub degree: f64,
}

impl Skew {
    pub fn new(kx: f64, ky: f64, kind: SkewType, degree: f64) -> Self {
        Self {
            kx,
            ky,
            kind,
            degree,
        }
    }

    /// Stretch along x only.
    pub fn horizontal(kx: f64) -> Self {
        Self::new(kx, 1.0, SkewType::Horizontal, 0.0)
    }

    /// Stretch along y only.
    pub fn vertical(ky: f64) -> Self {
        Self::new(1.0, ky, SkewType::Vertical, 0.0)
    }

    /// Stretch both axes and turn by `degree` on top of the rotation angle.
    pub fn diagonal(kx: f64, ky: f64, degree: f64) -> Self {
        Self::new(kx, ky, SkewType::Diagonal, degree)
    }

    /// Degrees added to the rotation angle when this skew is applied.
    #[inline]
    pub fn extra_degree(&self) -> f64 {
        match self.kind {
            SkewType::Diagonal => self.degree,
            SkewType::Horizontal | SkewType::Vertical => 0.0,
        }
    }
}

// ============================================================================
// Rotation
// ============================================================================

/// Rotation angle with optional centre and skew.
///
/// Shared read-only by every geometry call that consumes it; only
/// [`Rotation::set_degree`] changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rotation {
    angle: f64,
    valid: bool,
    centre: Option<Centre>,
    skew: Option<Skew>,
}

impl Rotation {
    pub fn new(angle: f64) -> Self {
        let mut r = Self {
            angle,
            valid: false,
            centre: None,
            skew: None,
        };
        r.update_valid();
        r
    }

    pub fn with_centre(mut self, centre: Centre) -> Self {
        self.centre = Some(centre);
        self
    }

    pub fn with_skew(mut self, skew: Skew) -> Self {
        self.skew = Some(skew);
        self.update_valid();
        self
    }

    /// Change the angle, recomputing validity.
    pub fn set_degree(&mut self, angle: f64) {
        self.angle = angle;
        self.update_valid();
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// `false` for 0°, 360° and −360° without a skew.
    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn centre(&self) -> Option<Centre> {
        self.centre
    }

    pub fn skew(&self) -> Option<Skew> {
        self.skew
    }

    fn update_valid(&mut self) {
        let identity = self.angle == 0.0 || self.angle == 360.0 || self.angle == -360.0;
        self.valid = !identity || self.skew.is_some();
    }
}

// ============================================================================
// Scale
// ============================================================================

/// Non-uniform scale, composed with rotation in the same pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Scale {
    pub sx: f64,
    pub sy: f64,
}

impl Scale {
    pub fn new(sx: f64, sy: f64) -> Self {
        Self { sx, sy }
    }

    /// `true` when the scale changes anything and does not collapse an axis.
    pub fn has_scale(&self) -> bool {
        (self.sx != 1.0 || self.sy != 1.0) && self.sx != 0.0 && self.sy != 0.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

// ============================================================================
// Rotator
// ============================================================================

/// Batch transform resolved once from a rotation (and optionally a scale).
///
/// Holds the composed linear part `scale → skew → rotation` and the
/// effective centre.
#[derive(Debug, Clone, Copy)]
pub struct Rotator {
    sin: f64,
    cos: f64,
    cx: f64,
    cy: f64,
    linear: TransAffine,
}

impl Rotator {
    /// Resolve a rotation for a batch. Returns `None` for a null or invalid
    /// rotation.
    ///
    /// The centre is the explicit `centre` if given, else the rotation's
    /// own centre, else the origin.
    pub fn new(
        rotation: Option<&Rotation>,
        anti_clock: bool,
        centre: Option<Centre>,
        no_skew: bool,
    ) -> Option<Self> {
        let rotation = rotation.filter(|r| r.valid())?;
        Some(Self::build(Some(rotation), None, anti_clock, centre, no_skew))
    }

    /// Resolve a rotation together with a scale. Returns `None` when neither
    /// would change a point.
    pub fn with_scale(
        rotation: Option<&Rotation>,
        scale: Option<&Scale>,
        centre: Option<Centre>,
    ) -> Option<Self> {
        let rotation = rotation.filter(|r| r.valid());
        let scale = scale.filter(|s| s.has_scale());
        if rotation.is_none() && scale.is_none() {
            return None;
        }
        Some(Self::build(rotation, scale, false, centre, false))
    }

    fn build(
        rotation: Option<&Rotation>,
        scale: Option<&Scale>,
        anti_clock: bool,
        centre: Option<Centre>,
        no_skew: bool,
    ) -> Self {
        let skew = if no_skew {
            None
        } else {
            rotation.and_then(|r| r.skew())
        };

        let mut angle = rotation.map_or(0.0, |r| r.angle());
        if let Some(skew) = &skew {
            angle += skew.extra_degree();
        }
        let (mut sin, cos) = deg2rad(angle).sin_cos();
        if anti_clock {
            sin = -sin;
        }

        let c = centre
            .or_else(|| rotation.and_then(|r| r.centre()))
            .unwrap_or_default();

        let mut linear = TransAffine::IDENTITY;
        if let Some(s) = scale {
            linear = linear.then(&TransAffine::scaling(s.sx, s.sy));
        }
        if let Some(k) = &skew {
            linear = linear.then(&TransAffine::scaling(k.kx, k.ky));
        }
        linear = linear.then(&TransAffine::rotation(sin, cos));

        Self {
            sin,
            cos,
            cx: c.x,
            cy: c.y,
            linear,
        }
    }

    /// Sine of the resolved angle (negated for anti-clockwise).
    pub fn sin(&self) -> f64 {
        self.sin
    }

    pub fn cos(&self) -> f64 {
        self.cos
    }

    pub fn centre(&self) -> Centre {
        Centre::new(self.cx, self.cy)
    }

    /// Composed linear part, without the centre offset.
    pub fn linear(&self) -> &TransAffine {
        &self.linear
    }

    /// The whole transform, centre offset included, as one matrix.
    pub fn affine(&self) -> TransAffine {
        self.linear.about(self.cx, self.cy)
    }

    /// Transform a coordinate pair about the resolved centre.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        self.apply_about(x, y, self.cx, self.cy)
    }

    /// Transform a coordinate pair about an arbitrary centre.
    #[inline]
    pub fn apply_about(&self, x: f64, y: f64, cx: f64, cy: f64) -> (f64, f64) {
        let (dx, dy) = self.linear.apply_linear(x - cx, y - cy);
        (dx + cx, dy + cy)
    }

    /// Transform a point, keeping its kind.
    #[inline]
    pub fn apply_point(&self, p: PointD) -> PointD {
        if p.is_empty() {
            return p;
        }
        let (x, y) = self.apply(p.x, p.y);
        PointD::with_kind(x, y, p.kind)
    }

    /// Transform every point of a slice in place.
    pub fn apply_all(&self, points: &mut [PointD]) {
        for p in points.iter_mut() {
            *p = self.apply_point(*p);
        }
    }
}

// ============================================================================
// Composer operations
// ============================================================================

/// Rotate one point.
pub fn rotate(
    p: PointD,
    rotation: Option<&Rotation>,
    anti_clock: bool,
    centre: Option<Centre>,
    no_skew: bool,
) -> PointD {
    match Rotator::new(rotation, anti_clock, centre, no_skew) {
        Some(r) => r.apply_point(p),
        None => p,
    }
}

/// Rotate a stream of points in place with one resolved [`Rotator`].
pub fn rotate_points(
    points: &mut [PointD],
    rotation: Option<&Rotation>,
    anti_clock: bool,
    centre: Option<Centre>,
    no_skew: bool,
) {
    if points.is_empty() {
        return;
    }
    if let Some(r) = Rotator::new(rotation, anti_clock, centre, no_skew) {
        trace!("rotating {} points", points.len());
        r.apply_all(points);
    }
}

/// Rotated copy of a stream of points.
pub fn rotated(
    points: &[PointD],
    rotation: Option<&Rotation>,
    anti_clock: bool,
    centre: Option<Centre>,
    no_skew: bool,
) -> Vec<PointD> {
    let mut out = points.to_vec();
    rotate_points(&mut out, rotation, anti_clock, centre, no_skew);
    out
}

/// Rotate independent points, each about its own implied centre
/// `(x + width/2, y + height/2)`, unless the rotation owns a centre, which
/// then applies to all of them.
pub fn rotate_together(
    points: &mut [PointD],
    width: f64,
    height: f64,
    rotation: Option<&Rotation>,
) {
    if points.is_empty() {
        return;
    }
    let Some(r) = Rotator::new(rotation, false, None, false) else {
        return;
    };
    if rotation.and_then(|r| r.centre()).is_some() {
        r.apply_all(points);
        return;
    }
    let (hw, hh) = (width * 0.5, height * 0.5);
    for p in points.iter_mut().filter(|p| !p.is_empty()) {
        let (x, y) = r.apply_about(p.x, p.y, p.x + hw, p.y + hh);
        p.x = x;
        p.y = y;
    }
}

/// Single-point form of [`rotate_together`].
pub fn rotate_single(p: PointD, width: f64, height: f64, rotation: Option<&Rotation>) -> PointD {
    let mut one = [p];
    rotate_together(&mut one, width, height, rotation);
    one[0]
}

/// Angle of `p` around `centre`, in degrees within `[0, 360)`, measured
/// after undoing the rotation (skew is left alone).
pub fn get_angle(p: PointD, centre: Centre, rotation: Option<&Rotation>) -> f64 {
    let q = rotate(p, rotation, true, Some(centre), true);
    let dx = q.x - centre.x;
    let dy = q.y - centre.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    normalize_angle(rad2deg(dy.atan2(dx)))
}

/// Scale points in place about `centre` (origin if `None`).
pub fn scale_points(points: &mut [PointD], scale: Option<&Scale>, centre: Option<Centre>) {
    transform_points(points, None, scale, centre);
}

/// Apply scale, then skew, then rotation, all about the same resolved
/// centre, in one pass.
pub fn transform_points(
    points: &mut [PointD],
    rotation: Option<&Rotation>,
    scale: Option<&Scale>,
    centre: Option<Centre>,
) {
    if points.is_empty() {
        return;
    }
    if let Some(r) = Rotator::with_scale(rotation, scale, centre) {
        r.apply_all(points);
    }
}

// ============================================================================
// Tests
// ============================================================================
