//! Foundation types, constants, and angle utilities.
//!
//! Everything else in the crate depends on these: tagged points, the
//! bounds rectangle used for stroke containment tests, and the degree
//! conventions shared by every tessellator.

use bitflags::bitflags;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Round half away from zero to the nearest pixel coordinate.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

// ============================================================================
// Angles
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Multiplier taking degrees to radians. All trigonometry in the crate goes
/// through this constant.
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * DEG_TO_RAD
}

/// Convert radians to degrees.
#[inline]
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Normalize an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle(deg: f64) -> f64 {
    let mut a = deg % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    // -1e-17 % 360 + 360 rounds up to exactly 360
    if a >= 360.0 {
        a -= 360.0;
    }
    a
}

// ============================================================================
// Point kinds
// ============================================================================

bitflags! {
    /// Tag set carried by every point in a produced sequence.
    ///
    /// The empty set is an ordinary on-curve point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
    pub struct PointKind: u8 {
        /// Quadratic (conic) off-curve control point.
        const CONTROL = 0b0000_0001;
        /// Cubic off-curve control point; always comes in pairs.
        const CUBIC = 0b0000_0010;
        /// Segment separator: the renderer starts a new sub-path here.
        const BREAK = 0b0000_0100;
        /// Pixel is plotted but takes no part in a fill.
        const DRAW_ONLY = 0b0000_1000;
        /// Centre vertex of a pie cut.
        const CENTRE = 0b0001_0000;
        /// Null sentinel, distinct from an on-curve point at the origin.
        const EMPTY = 0b1000_0000;
    }
}

impl PointKind {
    /// Returns `true` for either flavour of off-curve control point.
    #[inline]
    pub fn is_control(self) -> bool {
        self.intersects(PointKind::CONTROL | PointKind::CUBIC)
    }
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point with a kind tag.
///
/// Equality compares all three fields exactly, so the null sentinel never
/// equals an on-curve `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
    pub kind: PointKind,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self {
            x,
            y,
            kind: PointKind::empty(),
        }
    }

    pub fn with_kind(x: T, y: T, kind: PointKind) -> Self {
        Self { x, y, kind }
    }

    /// Returns `true` if this is the null sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.contains(PointKind::EMPTY)
    }
}

impl<T: Copy + Default> PointBase<T> {
    /// The null sentinel.
    pub fn empty() -> Self {
        Self {
            x: T::default(),
            y: T::default(),
            kind: PointKind::EMPTY,
        }
    }
}

pub type PointD = PointBase<f64>;

impl PointD {
    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &PointD) -> f64 {
        self.sq_distance(other).sqrt()
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn sq_distance(&self, other: &PointD) -> f64 {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        dx * dx + dy * dy
    }

    /// Midpoint of the segment to `other`, as an on-curve point.
    #[inline]
    pub fn midpoint(&self, other: &PointD) -> PointD {
        PointD::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned bounds, `(x1, y1)` top-left and `(x2, y2)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// `true` if `r` lies entirely inside; shared edges count as inside.
    pub fn contains(&self, r: &Self) -> bool {
        r.x1 >= self.x1 && r.y1 >= self.y1 && r.x2 <= self.x2 && r.y2 <= self.y2
    }
}

pub type RectD = Rect<f64>;

impl RectD {
    /// Zero-width rectangle at the origin, substituted for degenerate bounds.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn centre(&self) -> (f64, f64) {
        ((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }
}

// ============================================================================
// Tests
// ============================================================================
