//! Cross-module geometric properties.

use conic_raster::arc::{get_arc_points, ArcParams};
use conic_raster::basics::{deg2rad, PointD, PI};
use conic_raster::bernstein::bernstein;
use conic_raster::bounding_rect::bounding_rect;
use conic_raster::conic::{
    missing_2_points_of_ellipse, solve_conic_equation, ConicConfig, ConicType,
};
use conic_raster::ellipse::get_ellipse_point;
use conic_raster::rotation::{get_angle, rotate, Centre, Rotation};
use conic_raster::stroke::{stroke_points, ShapeKind, StrokeMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-9;

fn close(a: PointD, b: PointD, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

#[test]
fn full_turns_leave_points_untouched() {
    let p = PointD::new(12.5, -3.25);
    for angle in [0.0, 360.0, -360.0] {
        let r = Rotation::new(angle);
        assert_eq!(rotate(p, Some(&r), false, Some(Centre::new(4.0, 9.0)), false), p);
    }
}

#[test]
fn rotation_is_undone_by_its_negation() {
    let centres = [Centre::new(0.0, 0.0), Centre::new(-20.0, 35.5), Centre::new(1e3, 7.0)];
    let p = PointD::new(17.0, -42.0);
    for &c in &centres {
        let mut angle = -350.0;
        while angle <= 350.0 {
            let q = rotate(p, Some(&Rotation::new(angle)), false, Some(c), false);
            let back = rotate(q, Some(&Rotation::new(-angle)), false, Some(c), false);
            assert!(close(back, p, 1e-9), "angle {} centre {:?}", angle, c);
            angle += 17.5;
        }
    }
}

#[test]
fn angle_of_circle_point_round_trips() {
    let (cx, cy, r) = (30.0, -10.0, 25.0);
    for i in 0..72 {
        let theta = i as f64 * 5.0;
        let p = get_ellipse_point(theta, cx, cy, r, r, None, false);
        let back = get_angle(p, Centre::new(cx, cy), None);
        let diff = (back - theta.rem_euclid(360.0)).abs();
        assert!(diff < 1e-9 || (diff - 360.0).abs() < 1e-9, "{} -> {}", theta, back);
    }
}

#[test]
fn bernstein_basis_sums_to_one() {
    for n in 1..=12 {
        for k in 0..=10 {
            let t = k as f64 / 10.0;
            let sum: f64 = (0..=n).map(|i| bernstein(n, i, t)).sum();
            assert!((sum - 1.0).abs() < 1e-12, "n={} t={}", n, t);
        }
    }
}

#[test]
fn stroke_outer_bounds_contain_inner_bounds() {
    let hexagon: Vec<PointD> = (0..6)
        .map(|i| {
            let (s, c) = deg2rad(i as f64 * 60.0).sin_cos();
            PointD::new(50.0 + 40.0 * c, 50.0 + 40.0 * s)
        })
        .collect();
    let mut reversed = hexagon.clone();
    reversed.reverse();
    let square = vec![
        PointD::new(0.0, 0.0),
        PointD::new(20.0, 0.0),
        PointD::new(20.0, 20.0),
        PointD::new(0.0, 20.0),
    ];

    for shape in [&hexagon, &reversed, &square] {
        for mode in [StrokeMode::Middle, StrokeMode::Outer, StrokeMode::Inner] {
            for stroke in [1.0, 4.0, 9.0] {
                let o = stroke_points(shape, ShapeKind::Closed, stroke, mode);
                let outer = bounding_rect(&o.outer).unwrap();
                let inner = bounding_rect(&o.inner).unwrap();
                assert!(
                    outer.x1 <= inner.x1 + EPSILON
                        && outer.y1 <= inner.y1 + EPSILON
                        && outer.x2 >= inner.x2 - EPSILON
                        && outer.y2 >= inner.y2 - EPSILON,
                    "{:?} stroke {}",
                    mode,
                    stroke
                );
            }
        }
    }
}

/// Convex polygon with `n` vertices at random angles on a tilted ellipse.
fn random_convex(rng: &mut StdRng) -> Vec<PointD> {
    let n = rng.gen_range(3..=8);
    let (rx, ry) = (rng.gen_range(0.5..50.0), rng.gen_range(0.5..50.0));
    let (cx, cy) = (rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
    let (ts, tc) = rng.gen_range(0.0..PI).sin_cos();
    let mut angles: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..2.0 * PI)).collect();
    angles.sort_by(f64::total_cmp);
    let mut pts: Vec<PointD> = angles
        .iter()
        .map(|a| {
            let (x, y) = (rx * a.cos(), ry * a.sin());
            PointD::new(cx + x * tc - y * ts, cy + x * ts + y * tc)
        })
        .collect();
    if rng.gen_bool(0.5) {
        pts.reverse();
    }
    pts
}

#[test]
fn stroke_bounds_hold_for_thin_convex_shapes() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2000 {
        let shape = random_convex(&mut rng);
        for mode in [StrokeMode::Middle, StrokeMode::Outer, StrokeMode::Inner] {
            let stroke = rng.gen_range(0.1..40.0);
            let o = stroke_points(&shape, ShapeKind::Closed, stroke, mode);
            let outer = bounding_rect(&o.outer).unwrap();
            let inner = bounding_rect(&o.inner).unwrap();
            assert!(
                outer.contains(&inner),
                "{:?} stroke {} on {:?}",
                mode,
                stroke,
                shape
            );
        }
    }
}

#[test]
fn five_circle_points_classify_as_ellipse() {
    let r = 40.0;
    let pts: [PointD; 5] = std::array::from_fn(|i| {
        let (s, c) = deg2rad(i as f64 * 72.0 + 10.0).sin_cos();
        PointD::new(r * c, r * s)
    });
    let sol = solve_conic_equation(&pts, &ConicConfig::default());
    assert_eq!(sol.kind, ConicType::Ellipse);
    assert!((sol.width - 2.0 * r).abs() < 1e-6);
    assert!((sol.height - 2.0 * r).abs() < 1e-6);
    assert!(sol.cx.abs() < 1e-6 && sol.cy.abs() < 1e-6);
}

#[test]
fn quarter_arc_has_ninety_one_points() {
    let pts = get_arc_points(&ArcParams::new(0.0, 0.0, 10.0, 10.0, 0.0, 90.0));
    assert_eq!(pts.len(), 91);
    assert!(close(pts[0], PointD::new(10.0, 0.0), EPSILON));
    assert!(close(pts[90], PointD::new(0.0, 10.0), EPSILON));
    for (i, p) in pts.iter().enumerate() {
        let (s, c) = deg2rad(i as f64).sin_cos();
        assert!(close(*p, PointD::new(10.0 * c, 10.0 * s), EPSILON));
    }
}

#[test]
fn missing_points_follow_the_blend_weights() {
    let (p1, p2, p3) = (PointD::new(0.0, 0.0), PointD::new(10.0, 0.0), PointD::new(10.0, 10.0));
    let (p4, p5) = missing_2_points_of_ellipse(p1, p2, p3);

    let half = 0.5;
    let diag = 0.5 * 2.0_f64.sqrt();
    let rest = 0.5 - 0.5 * 2.0_f64.sqrt();
    assert_eq!(p4.x, rest * p1.x + half * p2.x + diag * p3.x);
    assert_eq!(p4.y, rest * p1.y + half * p2.y + diag * p3.y);
    assert_eq!(p5.x, half * p1.x + rest * p2.x + diag * p3.x);
    assert_eq!(p5.y, half * p1.y + rest * p2.y + diag * p3.y);
}
