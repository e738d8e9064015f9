//! Geometry-building and parsing benchmarks.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use wcurve::curve::fasta::sequence_to_curve;
use wcurve::curve::{build_geometry, Curve, CurveRecord};

fn synthetic_curve(len: usize) -> Curve {
    (0..len)
        .map(|i| {
            let t = i as f32 * 0.01;
            CurveRecord::new(t.cos(), t.sin(), 0.2, 0.4, 0.6)
        })
        .collect()
}

fn build_geometry_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_geometry");

    for count in [100, 1_000, 10_000, 100_000] {
        let curve = synthetic_curve(count);
        group.bench_function(format!("{count}_records"), |b| {
            b.iter(|| black_box(build_geometry(black_box(&curve), 0.8, 0.03125)))
        });
    }
    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    let json = synthetic_curve(10_000).to_json().unwrap_or_default();
    c.bench_function("parse_10000_records", |b| {
        b.iter(|| black_box(Curve::from_json(black_box(&json))))
    });
}

fn sequence_walk_benchmark(c: &mut Criterion) {
    let sequence = "ACGT".repeat(25_000);
    c.bench_function("walk_100000_bases", |b| {
        b.iter(|| black_box(sequence_to_curve(black_box(&sequence))))
    });
}

criterion_group!(
    benches,
    build_geometry_benchmark,
    parse_benchmark,
    sequence_walk_benchmark
);
criterion_main!(benches);
