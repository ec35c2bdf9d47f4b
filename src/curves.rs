//! Adaptive Bezier flattening (quadratic and cubic).
//!
//! Recursive de Casteljau subdivision: a segment is split at its midpoint
//! until it is flat enough, judged by the squared deviation of its control
//! points from the chord. The default tolerance is `(0.5 / scale)²`, i.e.
//! 0.25 at scale 1, and recursion stops at depth 32 regardless.
//!
//! Outline decomposition feeds its quadratic and cubic pieces through
//! these flatteners.

use crate::basics::{PointD, PI};

// ============================================================================
// Constants
// ============================================================================

const CURVE_COLLINEARITY_EPSILON: f64 = 1e-30;
const CURVE_ANGLE_TOLERANCE_EPSILON: f64 = 0.01;

/// Maximum subdivision depth.
pub const CURVE_RECURSION_LIMIT: u32 = 32;

/// Squared flatness threshold at approximation scale 1.
pub const DEFAULT_DISTANCE_TOLERANCE_SQUARE: f64 = 0.25;

#[inline]
fn tolerance_square(approximation_scale: f64) -> f64 {
    let d = 0.5 / approximation_scale;
    d * d
}

/// Smallest absolute difference between two directions, in `[0, π]`.
#[inline]
fn angle_between(a: f64, b: f64) -> f64 {
    let mut da = (a - b).abs();
    if da >= PI {
        da = 2.0 * PI - da;
    }
    da
}

#[inline]
fn direction(from: PointD, to: PointD) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

#[inline]
fn mid(a: PointD, b: PointD) -> PointD {
    PointD::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

// ============================================================================
// QuadraticFlattener
// ============================================================================

/// Recursive subdivision flattener for quadratic Bezier segments.
#[derive(Debug, Clone)]
pub struct QuadraticFlattener {
    approximation_scale: f64,
    distance_tolerance_square: f64,
    angle_tolerance: f64,
}

impl QuadraticFlattener {
    pub fn new() -> Self {
        Self {
            approximation_scale: 1.0,
            distance_tolerance_square: DEFAULT_DISTANCE_TOLERANCE_SQUARE,
            angle_tolerance: 0.0,
        }
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approximation_scale = s;
        self.distance_tolerance_square = tolerance_square(s);
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approximation_scale
    }

    /// Angle tolerance in radians; 0 disables the angle test.
    pub fn set_angle_tolerance(&mut self, a: f64) {
        self.angle_tolerance = a;
    }

    pub fn angle_tolerance(&self) -> f64 {
        self.angle_tolerance
    }

    /// Flatten `p1 → p3` with control `p2` into a fresh vector, both ends
    /// included.
    pub fn flatten(&self, p1: PointD, p2: PointD, p3: PointD) -> Vec<PointD> {
        let mut out = Vec::new();
        self.flatten_into(p1, p2, p3, &mut out, false);
        out
    }

    /// Append the flattened segment to `out`. With `skip_first`, `p1` is
    /// assumed to be there already.
    pub fn flatten_into(
        &self,
        p1: PointD,
        p2: PointD,
        p3: PointD,
        out: &mut Vec<PointD>,
        skip_first: bool,
    ) {
        if !skip_first {
            out.push(PointD::new(p1.x, p1.y));
        }
        self.recursive_bezier(p1, p2, p3, 0, out);
        out.push(PointD::new(p3.x, p3.y));
    }

    fn recursive_bezier(
        &self,
        p1: PointD,
        p2: PointD,
        p3: PointD,
        level: u32,
        out: &mut Vec<PointD>,
    ) {
        if level > CURVE_RECURSION_LIMIT {
            return;
        }

        let p12 = mid(p1, p2);
        let p23 = mid(p2, p3);
        let p123 = mid(p12, p23);

        let dx = p3.x - p1.x;
        let dy = p3.y - p1.y;
        let d = ((p2.x - p3.x) * dy - (p2.y - p3.y) * dx).abs();

        if d > CURVE_COLLINEARITY_EPSILON {
            if d * d <= self.distance_tolerance_square * (dx * dx + dy * dy) {
                if self.angle_tolerance < CURVE_ANGLE_TOLERANCE_EPSILON {
                    out.push(p123);
                    return;
                }
                let da = angle_between(direction(p2, p3), direction(p1, p2));
                if da < self.angle_tolerance {
                    out.push(p123);
                    return;
                }
            }
        } else {
            // collinear control point
            let da = dx * dx + dy * dy;
            let dist = if da == 0.0 {
                p1.sq_distance(&p2)
            } else {
                let k = ((p2.x - p1.x) * dx + (p2.y - p1.y) * dy) / da;
                if k > 0.0 && k < 1.0 {
                    // 1---2---3
                    return;
                }
                if k <= 0.0 {
                    p2.sq_distance(&p1)
                } else {
                    p2.sq_distance(&p3)
                }
            };
            if dist < self.distance_tolerance_square {
                out.push(PointD::new(p2.x, p2.y));
                return;
            }
        }

        self.recursive_bezier(p1, p12, p123, level + 1, out);
        self.recursive_bezier(p123, p23, p3, level + 1, out);
    }
}

impl Default for QuadraticFlattener {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CubicFlattener
// ============================================================================

/// Recursive subdivision flattener for cubic Bezier segments.
#[derive(Debug, Clone)]
pub struct CubicFlattener {
    approximation_scale: f64,
    distance_tolerance_square: f64,
    angle_tolerance: f64,
    cusp_limit: f64,
}

impl CubicFlattener {
    pub fn new() -> Self {
        Self {
            approximation_scale: 1.0,
            distance_tolerance_square: DEFAULT_DISTANCE_TOLERANCE_SQUARE,
            angle_tolerance: 0.0,
            cusp_limit: 0.0,
        }
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approximation_scale = s;
        self.distance_tolerance_square = tolerance_square(s);
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approximation_scale
    }

    pub fn set_angle_tolerance(&mut self, a: f64) {
        self.angle_tolerance = a;
    }

    pub fn angle_tolerance(&self) -> f64 {
        self.angle_tolerance
    }

    /// Cusp limit in radians; 0 disables it.
    pub fn set_cusp_limit(&mut self, v: f64) {
        self.cusp_limit = if v == 0.0 { 0.0 } else { PI - v };
    }

    pub fn cusp_limit(&self) -> f64 {
        if self.cusp_limit == 0.0 {
            0.0
        } else {
            PI - self.cusp_limit
        }
    }

    pub fn flatten(&self, p1: PointD, p2: PointD, p3: PointD, p4: PointD) -> Vec<PointD> {
        let mut out = Vec::new();
        self.flatten_into([p1, p2, p3, p4], &mut out, false);
        out
    }

    /// Append the flattened segment to `out`. With `skip_first`, the start
    /// point is assumed to be there already.
    pub fn flatten_into(&self, ctrl: [PointD; 4], out: &mut Vec<PointD>, skip_first: bool) {
        let [p1, _, _, p4] = ctrl;
        if !skip_first {
            out.push(PointD::new(p1.x, p1.y));
        }
        self.recursive_bezier(ctrl, 0, out);
        out.push(PointD::new(p4.x, p4.y));
    }

    fn recursive_bezier(&self, ctrl: [PointD; 4], level: u32, out: &mut Vec<PointD>) {
        if level > CURVE_RECURSION_LIMIT {
            return;
        }
        let [p1, p2, p3, p4] = ctrl;

        let p12 = mid(p1, p2);
        let p23 = mid(p2, p3);
        let p34 = mid(p3, p4);
        let p123 = mid(p12, p23);
        let p234 = mid(p23, p34);
        let p1234 = mid(p123, p234);

        let dx = p4.x - p1.x;
        let dy = p4.y - p1.y;
        let chord_sq = dx * dx + dy * dy;

        let mut d2 = ((p2.x - p4.x) * dy - (p2.y - p4.y) * dx).abs();
        let mut d3 = ((p3.x - p4.x) * dy - (p3.y - p4.y) * dx).abs();

        let significant2 = d2 > CURVE_COLLINEARITY_EPSILON;
        let significant3 = d3 > CURVE_COLLINEARITY_EPSILON;

        match (significant2, significant3) {
            (false, false) => {
                // all collinear, or p1 == p4
                if chord_sq == 0.0 {
                    d2 = p1.sq_distance(&p2);
                    d3 = p4.sq_distance(&p3);
                } else {
                    let k = 1.0 / chord_sq;
                    let t2 = k * ((p2.x - p1.x) * dx + (p2.y - p1.y) * dy);
                    let t3 = k * ((p3.x - p1.x) * dx + (p3.y - p1.y) * dy);
                    if t2 > 0.0 && t2 < 1.0 && t3 > 0.0 && t3 < 1.0 {
                        // 1---2---3---4
                        return;
                    }
                    d2 = Self::collinear_distance(p2, p1, p4, t2, dx, dy);
                    d3 = Self::collinear_distance(p3, p1, p4, t3, dx, dy);
                }
                if d2 > d3 {
                    if d2 < self.distance_tolerance_square {
                        out.push(PointD::new(p2.x, p2.y));
                        return;
                    }
                } else if d3 < self.distance_tolerance_square {
                    out.push(PointD::new(p3.x, p3.y));
                    return;
                }
            }

            (false, true) => {
                // p3 is significant
                if d3 * d3 <= self.distance_tolerance_square * chord_sq {
                    if self.angle_tolerance < CURVE_ANGLE_TOLERANCE_EPSILON {
                        out.push(p23);
                        return;
                    }
                    let da = angle_between(direction(p3, p4), direction(p2, p3));
                    if da < self.angle_tolerance {
                        out.push(PointD::new(p2.x, p2.y));
                        out.push(PointD::new(p3.x, p3.y));
                        return;
                    }
                    if self.cusp_limit != 0.0 && da > self.cusp_limit {
                        out.push(PointD::new(p3.x, p3.y));
                        return;
                    }
                }
            }

            (true, false) => {
                // p2 is significant
                if d2 * d2 <= self.distance_tolerance_square * chord_sq {
                    if self.angle_tolerance < CURVE_ANGLE_TOLERANCE_EPSILON {
                        out.push(p23);
                        return;
                    }
                    let da = angle_between(direction(p2, p3), direction(p1, p2));
                    if da < self.angle_tolerance {
                        out.push(PointD::new(p2.x, p2.y));
                        out.push(PointD::new(p3.x, p3.y));
                        return;
                    }
                    if self.cusp_limit != 0.0 && da > self.cusp_limit {
                        out.push(PointD::new(p2.x, p2.y));
                        return;
                    }
                }
            }

            (true, true) => {
                if (d2 + d3) * (d2 + d3) <= self.distance_tolerance_square * chord_sq {
                    if self.angle_tolerance < CURVE_ANGLE_TOLERANCE_EPSILON {
                        out.push(p23);
                        return;
                    }
                    let k = direction(p2, p3);
                    let da1 = angle_between(k, direction(p1, p2));
                    let da2 = angle_between(direction(p3, p4), k);
                    if da1 + da2 < self.angle_tolerance {
                        out.push(p23);
                        return;
                    }
                    if self.cusp_limit != 0.0 {
                        if da1 > self.cusp_limit {
                            out.push(PointD::new(p2.x, p2.y));
                            return;
                        }
                        if da2 > self.cusp_limit {
                            out.push(PointD::new(p3.x, p3.y));
                            return;
                        }
                    }
                }
            }
        }

        self.recursive_bezier([p1, p12, p123, p1234], level + 1, out);
        self.recursive_bezier([p1234, p234, p34, p4], level + 1, out);
    }

    /// Squared distance of a collinear control point from the chord
    /// `a → b`, given its projection parameter `t`.
    #[inline]
    fn collinear_distance(p: PointD, a: PointD, b: PointD, t: f64, dx: f64, dy: f64) -> f64 {
        if t <= 0.0 {
            p.sq_distance(&a)
        } else if t >= 1.0 {
            p.sq_distance(&b)
        } else {
            p.sq_distance(&PointD::new(a.x + t * dx, a.y + t * dy))
        }
    }
}

impl Default for CubicFlattener {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
