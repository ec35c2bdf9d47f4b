//! Conic construction.
//!
//! Turns three, four or five caller points into a canonical ellipse
//! description ([`Conic`]): centre, radii and tilt. The general conic
//! `Ax² + Bxy + Cy² + Dx + Ey + F = 0` is fitted through five points by
//! pivoting row elimination and classified by its discriminant.

use log::debug;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::basics::{deg2rad, normalize_angle, rad2deg, PointD, RectD};
use crate::bounding_rect::bounding_rect;
use crate::math::{centroid, cross_product};
use crate::rotation::{rotate, Centre, Rotation};

// ============================================================================
// Constants
// ============================================================================

/// Blend weights of the closed-form 45°/135° construction.
const W_HALF: f64 = 0.5;
const W_DIAG: f64 = 0.5 * std::f64::consts::SQRT_2;
const W_REST: f64 = 0.5 - 0.5 * std::f64::consts::SQRT_2;

/// Pivots smaller than this (relative to the normalised system) count as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// `|B² − 4AC|` below this (coefficients normalised to max 1) is a parabola.
const DISCRIMINANT_EPSILON: f64 = 1e-9;

// ============================================================================
// Configuration
// ============================================================================

/// Fallback dimensions used when five points do not describe an ellipse.
///
/// Set once when the engine starts and pass it to the constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ConicConfig {
    pub default_width: f64,
    pub default_height: f64,
}

impl Default for ConicConfig {
    fn default() -> Self {
        Self {
            default_width: 300.0,
            default_height: 300.0,
        }
    }
}

// ============================================================================
// Types
// ============================================================================

/// Classification of a fitted conic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConicType {
    Ellipse,
    Parabola,
    Hyperbola,
}

/// How caller points are turned into the five ellipse-making points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionMode {
    /// Three points; the longest (or shortest) pair is a diameter and the
    /// remaining point ends the conjugate diameter.
    ThirdPointOnEllipse,
    /// Four corners of a rhombus; the ellipse touches the midpoints of its
    /// sides.
    Fitting,
    /// The fourth point is the centre; the first gives the major radius and
    /// tilt, the second the minor radius.
    FourthPointIsCenter,
}

/// Result of [`solve_conic_equation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicSolution {
    pub kind: ConicType,
    pub cx: f64,
    pub cy: f64,
    /// Full extent along the tilt direction.
    pub width: f64,
    /// Full extent across the tilt direction.
    pub height: f64,
    /// Tilt of the width axis in degrees, within `(-90, 90]`.
    pub tilt: f64,
    /// `[A, B, C, D, E, F]` in the normalised frame, scaled to max magnitude 1.
    pub coefficients: [f64; 6],
}

/// Canonical ellipse description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conic {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub rotation: Option<Rotation>,
    /// Tilt of the `rx` axis in degrees, applied about the centre before
    /// `rotation`.
    pub tilt: f64,
}

impl Conic {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            cx,
            cy,
            rx,
            ry,
            rotation: None,
            tilt: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    /// Both radii strictly positive.
    pub fn is_valid(&self) -> bool {
        self.rx > 0.0 && self.ry > 0.0
    }

    pub fn centre(&self) -> Centre {
        Centre::new(self.cx, self.cy)
    }

    /// Conic described by a solved five-point fit.
    pub fn from_solution(sol: &ConicSolution) -> Self {
        Self::new(sol.cx, sol.cy, sol.width * 0.5, sol.height * 0.5).with_tilt(sol.tilt)
    }

    /// Build a conic from construction points.
    ///
    /// `major_first` selects whether [`ConstructionMode::ThirdPointOnEllipse`]
    /// takes the longest or the shortest pair as the diameter.
    pub fn from_points(
        points: &[PointD],
        mode: ConstructionMode,
        major_first: bool,
        config: &ConicConfig,
    ) -> Option<Self> {
        let making = get_ellipse_making_points(points, mode, major_first)?;
        let sol = solve_conic_equation(&making, config);
        Some(Self::from_solution(&sol))
    }

    /// Rotation that applies the tilt about the centre, if any.
    pub fn tilt_rotation(&self) -> Option<Rotation> {
        let r = Rotation::new(self.tilt).with_centre(self.centre());
        r.valid().then_some(r)
    }

    /// Apply tilt, then the attached rotation, to points generated around
    /// this conic's centre. The attached rotation turns about its own
    /// centre, else about the conic centre.
    pub fn transform(&self, points: &mut [PointD]) {
        if let Some(t) = self.tilt_rotation() {
            crate::rotation::rotate_points(points, Some(&t), false, None, false);
        }
        if let Some(r) = &self.rotation {
            let centre = r.centre().unwrap_or_else(|| self.centre());
            crate::rotation::rotate_points(points, Some(r), false, Some(centre), false);
        }
    }

    /// Axis-aligned bounds of the (tilted, rotated) ellipse.
    pub fn bounds(&self) -> RectD {
        if !self.is_valid() {
            return RectD::zero();
        }
        let skewed = self.rotation.and_then(|r| r.skew()).is_some();
        if skewed {
            let mut pts = crate::ellipse::ellipse_points(self.cx, self.cy, self.rx, self.ry, None);
            self.transform(&mut pts);
            return bounding_rect(&pts).unwrap_or_else(RectD::zero);
        }

        let mut angle = self.tilt;
        let mut c = PointD::new(self.cx, self.cy);
        if let Some(r) = self.rotation.filter(|r| r.valid()) {
            angle += r.angle();
            if let Some(rc) = r.centre() {
                c = rotate(c, Some(&r), false, Some(rc), true);
            }
        }
        let (s, co) = deg2rad(angle).sin_cos();
        let hx = ((self.rx * co).powi(2) + (self.ry * s).powi(2)).sqrt();
        let hy = ((self.rx * s).powi(2) + (self.ry * co).powi(2)).sqrt();
        RectD::new(c.x - hx, c.y - hy, c.x + hx, c.y + hy)
    }
}

// ============================================================================
// Point ordering
// ============================================================================

/// Order three points so that `p1–p2` is the longest pair (`major`) or the
/// shortest pair. Pairs are ranked `(1,2)`, `(1,3)`, `(2,3)`; on a tie the
/// earlier pair wins.
pub fn order_3_points(p1: PointD, p2: PointD, p3: PointD, major: bool) -> [PointD; 3] {
    let d12 = p1.sq_distance(&p2);
    let d13 = p1.sq_distance(&p3);
    let d23 = p2.sq_distance(&p3);

    let beats = |a: f64, b: f64| if major { a > b } else { a < b };
    let ties_or_beats = |a: f64, b: f64| a == b || beats(a, b);

    if beats(d13, d12) && ties_or_beats(d13, d23) {
        [p1, p3, p2]
    } else if beats(d23, d12) && beats(d23, d13) {
        [p2, p3, p1]
    } else {
        [p1, p2, p3]
    }
}

/// Order four rhombus corners around the perimeter, keeping `p1` first.
///
/// The corner opposite `p1` is the one whose diagonal separates the other
/// two; candidates are tried as `p3`, `p2`, `p4`. Collinear or coincident
/// input is returned unchanged.
pub fn correct_rhombus(points: [PointD; 4]) -> [PointD; 4] {
    let [p1, p2, p3, p4] = points;
    let separates = |a: &PointD, b: &PointD, c: &PointD, d: &PointD| {
        cross_product(*a, *b, *c) * cross_product(*a, *b, *d) < 0.0
    };

    if p1 == p3 || p1 == p2 || p1 == p4 {
        return points;
    }
    if separates(&p1, &p3, &p2, &p4) {
        [p1, p2, p3, p4]
    } else if separates(&p1, &p2, &p3, &p4) {
        [p1, p3, p2, p4]
    } else if separates(&p1, &p4, &p2, &p3) {
        [p1, p2, p4, p3]
    } else {
        points
    }
}

// ============================================================================
// Ellipse-making points
// ============================================================================

/// The two points completing a five-point ellipse from `p1`, `p2` (ends of a
/// diameter) and `p3` (end of the conjugate diameter): the 45° and 135°
/// points.
///
/// Closed form; `order_3_points` should already have arranged the input.
pub fn missing_2_points_of_ellipse(p1: PointD, p2: PointD, p3: PointD) -> (PointD, PointD) {
    let p4 = PointD::new(
        W_REST * p1.x + W_HALF * p2.x + W_DIAG * p3.x,
        W_REST * p1.y + W_HALF * p2.y + W_DIAG * p3.y,
    );
    let p5 = PointD::new(
        W_HALF * p1.x + W_REST * p2.x + W_DIAG * p3.x,
        W_HALF * p1.y + W_REST * p2.y + W_DIAG * p3.y,
    );
    (p4, p5)
}

/// Derive five points on the ellipse described by `points` under `mode`.
///
/// Returns `None` if fewer points are supplied than the mode needs.
pub fn get_ellipse_making_points(
    points: &[PointD],
    mode: ConstructionMode,
    major_first: bool,
) -> Option<[PointD; 5]> {
    match mode {
        ConstructionMode::ThirdPointOnEllipse => {
            if points.len() < 3 {
                return None;
            }
            let [p1, p2, p3] = order_3_points(points[0], points[1], points[2], major_first);
            let (p4, p5) = missing_2_points_of_ellipse(p1, p2, p3);
            Some([p1, p2, p3, p4, p5])
        }
        ConstructionMode::Fitting => {
            if points.len() < 4 {
                return None;
            }
            let r = correct_rhombus([points[0], points[1], points[2], points[3]]);
            let m1 = r[0].midpoint(&r[1]);
            let m2 = r[1].midpoint(&r[2]);
            let m3 = r[2].midpoint(&r[3]);
            // m1–m3 is a diameter; m2 ends its conjugate
            let (p4, p5) = missing_2_points_of_ellipse(m1, m3, m2);
            Some([m1, m3, m2, p4, p5])
        }
        ConstructionMode::FourthPointIsCenter => {
            if points.len() < 4 {
                return None;
            }
            let c = points[3];
            let rx = points[0].distance(&c);
            let ry = points[1].distance(&c);
            let tilt = (points[0].y - c.y).atan2(points[0].x - c.x);
            let (ts, tc) = tilt.sin_cos();
            let at = |deg: f64| {
                let (s, co) = deg2rad(deg).sin_cos();
                let (ex, ey) = (rx * co, ry * s);
                PointD::new(c.x + ex * tc - ey * ts, c.y + ex * ts + ey * tc)
            };
            Some([points[0], at(180.0), at(45.0), at(135.0), at(-90.0)])
        }
    }
}

// ============================================================================
// General conic
// ============================================================================

/// Fit `Ax² + Bxy + Cy² + Dx + Ey + F = 0` through five points.
///
/// Points are recentred on their centroid and scaled to unit extent, the
/// 5×6 system is reduced with partial pivoting, and the first free column
/// fixes the null vector. Ellipses get their standard form; parabolas,
/// hyperbolas and degenerate fits get `config`'s default size around the
/// centroid.
pub fn solve_conic_equation(points: &[PointD; 5], config: &ConicConfig) -> ConicSolution {
    let m = centroid(points);
    let extent = points
        .iter()
        .map(|p| (p.x - m.x).abs().max((p.y - m.y).abs()))
        .fold(0.0_f64, f64::max);

    let fallback = |kind: ConicType, coefficients: [f64; 6]| ConicSolution {
        kind,
        cx: m.x,
        cy: m.y,
        width: config.default_width,
        height: config.default_height,
        tilt: 0.0,
        coefficients,
    };

    if extent == 0.0 {
        debug!("conic fit on coincident points, using default size");
        return fallback(ConicType::Parabola, [0.0; 6]);
    }

    let mut rows = [[0.0_f64; 6]; 5];
    for (row, p) in rows.iter_mut().zip(points.iter()) {
        let u = (p.x - m.x) / extent;
        let v = (p.y - m.y) / extent;
        *row = [u * u, u * v, v * v, u, v, 1.0];
    }

    let coefficients = conic_null_vector(rows);
    let [a, b, c, d, e, f] = coefficients;
    let disc = b * b - 4.0 * a * c;

    if disc > DISCRIMINANT_EPSILON {
        debug!("five points describe a hyperbola, using default size");
        return fallback(ConicType::Hyperbola, coefficients);
    }
    if disc >= -DISCRIMINANT_EPSILON {
        debug!("five points describe a parabola, using default size");
        return fallback(ConicType::Parabola, coefficients);
    }

    // centre: gradient vanishes
    let det = -disc;
    let u0 = (b * e - 2.0 * c * d) / det;
    let v0 = (b * d - 2.0 * a * e) / det;
    let f0 = a * u0 * u0 + b * u0 * v0 + c * v0 * v0 + d * u0 + e * v0 + f;

    // major axis: direction of the smaller eigenvalue
    let circular = b.abs() < PIVOT_EPSILON && (a - c).abs() < PIVOT_EPSILON;
    let mut theta = if circular {
        0.0
    } else {
        0.5 * b.atan2(a - c) + std::f64::consts::FRAC_PI_2
    };
    if theta > std::f64::consts::FRAC_PI_2 {
        theta -= std::f64::consts::PI;
    }
    let (s, co) = theta.sin_cos();
    let l_along = a * co * co + b * co * s + c * s * s;
    let l_across = a + c - l_along;

    let sq_along = -f0 / l_along;
    let sq_across = -f0 / l_across;
    if !(sq_along > 0.0 && sq_across > 0.0) {
        debug!("five points describe an imaginary ellipse, using default size");
        return fallback(ConicType::Ellipse, coefficients);
    }

    ConicSolution {
        kind: ConicType::Ellipse,
        cx: m.x + u0 * extent,
        cy: m.y + v0 * extent,
        width: 2.0 * sq_along.sqrt() * extent,
        height: 2.0 * sq_across.sqrt() * extent,
        tilt: rad2deg(theta),
        coefficients,
    }
}

/// Null vector of a 5×6 system, scaled so its largest entry has magnitude 1.
fn conic_null_vector(mut rows: [[f64; 6]; 5]) -> [f64; 6] {
    let mut pivot_cols = [0usize; 5];
    let mut rank = 0;

    for col in 0..6 {
        if rank == 5 {
            break;
        }
        let mut best = rank;
        for i in (rank + 1)..5 {
            if rows[i][col].abs() > rows[best][col].abs() {
                best = i;
            }
        }
        if rows[best][col].abs() <= PIVOT_EPSILON {
            continue;
        }
        rows.swap(rank, best);

        let pivot = rows[rank][col];
        for j in col..6 {
            rows[rank][j] /= pivot;
        }
        for i in 0..5 {
            if i == rank {
                continue;
            }
            let factor = rows[i][col];
            if factor != 0.0 {
                for j in col..6 {
                    rows[i][j] -= factor * rows[rank][j];
                }
            }
        }
        pivot_cols[rank] = col;
        rank += 1;
    }

    // at most five pivots among six columns, so a free column always exists
    let free = (0..6)
        .find(|c| !pivot_cols[..rank].contains(c))
        .unwrap_or(5);

    let mut coeffs = [0.0_f64; 6];
    coeffs[free] = 1.0;
    for r in 0..rank {
        coeffs[pivot_cols[r]] = -rows[r][free];
    }

    let max = coeffs.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if max > 0.0 {
        for v in coeffs.iter_mut() {
            *v /= max;
        }
    }
    coeffs
}

// ============================================================================
// Canonical rotation
// ============================================================================

/// Bring a tilt into `[-45, 45)` by swapping width and height where needed.
///
/// The tilt is first reduced into `[0, 180)`. Bands `[45, 90)` and
/// `[90, 135)` swap the dimensions and subtract 90°; band `[135, 180)`
/// subtracts 180°.
pub fn effective_rotation(width: f64, height: f64, tilt: f64) -> (f64, f64, f64) {
    let a = normalize_angle(tilt) % 180.0;
    match (a / 45.0) as u32 {
        0 => (width, height, a),
        1 | 2 => (height, width, a - 90.0),
        _ => (width, height, a - 180.0),
    }
}

// ============================================================================
// Tests
// ============================================================================
