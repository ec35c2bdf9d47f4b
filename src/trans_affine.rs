//! Affine transformation matrix.
//!
//! The composer folds scale, skew and rotation into one of these per batch
//! so that the per-point cost is a single multiply.

/// 2D affine transformation matrix.
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    pub const IDENTITY: TransAffine = TransAffine {
        sx: 1.0,
        shy: 0.0,
        shx: 0.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Non-uniform scale about the origin.
    pub fn scaling(x: f64, y: f64) -> Self {
        Self {
            sx: x,
            sy: y,
            ..Self::IDENTITY
        }
    }

    /// Rotation from a resolved sine and cosine.
    ///
    /// With y growing downwards a positive sine turns clockwise on screen.
    pub fn rotation(sin: f64, cos: f64) -> Self {
        Self {
            sx: cos,
            shy: sin,
            shx: -sin,
            sy: cos,
            ..Self::IDENTITY
        }
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            tx: x,
            ty: y,
            ..Self::IDENTITY
        }
    }

    /// `self` followed by `m`.
    #[must_use]
    pub fn then(&self, m: &TransAffine) -> TransAffine {
        TransAffine {
            sx: self.sx * m.sx + self.shy * m.shx,
            shy: self.sx * m.shy + self.shy * m.sy,
            shx: self.shx * m.sx + self.sy * m.shx,
            sy: self.shx * m.shy + self.sy * m.sy,
            tx: self.tx * m.sx + self.ty * m.shx + m.tx,
            ty: self.tx * m.shy + self.ty * m.sy + m.ty,
        }
    }

    /// The same linear part acting about `(cx, cy)` instead of the origin.
    #[must_use]
    pub fn about(&self, cx: f64, cy: f64) -> TransAffine {
        TransAffine::translation(-cx, -cy)
            .then(self)
            .then(&TransAffine::translation(cx, cy))
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.sx + y * self.shx + self.tx,
            x * self.shy + y * self.sy + self.ty,
        )
    }

    /// Apply the 2×2 part only, for offsets.
    #[inline]
    pub fn apply_linear(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx * self.sx + dy * self.shx, dx * self.shy + dy * self.sy)
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_identity() {
        assert_eq!(TransAffine::default().apply(3.0, 4.0), (3.0, 4.0));
        assert_eq!(TransAffine::scaling(1.0, 1.0), TransAffine::IDENTITY);
    }

    #[test]
    fn test_rotation_quarter_turn_is_clockwise_on_screen() {
        let (x, y) = TransAffine::rotation(1.0, 0.0).apply(1.0, 0.0);
        assert!(x.abs() < EPSILON && (y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_then_applies_left_first() {
        // scale, then rotate a quarter turn: (1,0) -> (2,0) -> (0,2)
        let m = TransAffine::scaling(2.0, 3.0).then(&TransAffine::rotation(1.0, 0.0));
        let (x, y) = m.apply(1.0, 0.0);
        assert!(x.abs() < EPSILON && (y - 2.0).abs() < EPSILON);

        // translate, then scale: (1,1) -> (3,4) -> (6,12)
        let m = TransAffine::translation(2.0, 3.0).then(&TransAffine::scaling(2.0, 3.0));
        assert_eq!(m.apply(1.0, 1.0), (6.0, 12.0));
    }

    #[test]
    fn test_about_keeps_centre_fixed() {
        let m = TransAffine::rotation(1.0, 0.0).about(10.0, 20.0);
        assert_eq!(m.apply(10.0, 20.0), (10.0, 20.0));
        let (x, y) = m.apply(15.0, 20.0);
        assert!((x - 10.0).abs() < EPSILON && (y - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_apply_linear_ignores_translation() {
        let m = TransAffine::scaling(2.0, 3.0).about(100.0, 100.0);
        assert_eq!(m.apply_linear(1.0, 1.0), (2.0, 3.0));
    }
}
