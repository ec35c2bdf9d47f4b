//! Benchmarks for batch transforms and curve flattening

use conic_raster::basics::PointD;
use conic_raster::bernstein::{get_bezier_points, BezierType};
use conic_raster::curves::CubicFlattener;
use conic_raster::rotation::{rotate_points, transform_points, Centre, Rotation, Scale, Skew};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn ring(n: usize) -> Vec<PointD> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.01;
            PointD::new(100.0 + 50.0 * t.cos(), 100.0 + 30.0 * t.sin())
        })
        .collect()
}

fn bench_rotate_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate_points");
    let rotation = Rotation::new(33.0).with_centre(Centre::new(100.0, 100.0));
    let skewed = rotation.with_skew(Skew::diagonal(1.2, 0.8, 15.0));

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        let points = ring(size);

        group.bench_with_input(BenchmarkId::new("plain", size), &points, |b, points| {
            b.iter(|| {
                let mut pts = points.clone();
                rotate_points(&mut pts, black_box(Some(&rotation)), false, None, false);
                pts
            });
        });

        group.bench_with_input(BenchmarkId::new("skew_scale", size), &points, |b, points| {
            b.iter(|| {
                let mut pts = points.clone();
                let scale = Scale::new(1.5, 0.5);
                transform_points(&mut pts, black_box(Some(&skewed)), Some(&scale), None);
                pts
            });
        });
    }

    group.finish();
}

fn bench_flattening(c: &mut Criterion) {
    let mut group = c.benchmark_group("flattening");

    for segments in [1, 8, 64] {
        let control = ring(segments * 3 + 1);
        group.throughput(Throughput::Elements(segments as u64));

        group.bench_with_input(BenchmarkId::new("bernstein", segments), &control, |b, control| {
            b.iter(|| get_bezier_points(black_box(control), BezierType::Cubic, true, 4));
        });

        group.bench_with_input(BenchmarkId::new("adaptive", segments), &control, |b, control| {
            let flattener = CubicFlattener::new();
            b.iter(|| {
                let mut out = Vec::new();
                for (i, w) in control.windows(4).step_by(3).enumerate() {
                    flattener.flatten_into([w[0], w[1], w[2], w[3]], &mut out, i > 0);
                }
                out
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rotate_points, bench_flattening);
criterion_main!(benches);
