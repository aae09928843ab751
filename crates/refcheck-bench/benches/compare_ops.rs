//! Criterion micro-benchmarks for scalar and array comparison.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use refcheck::prelude::*;
use refcheck_bench::{drifted_pair, matching_pair, SIDE};

/// Benchmark: 64K f32 scalar comparisons through `equals`.
fn bench_equals_scalar_f32(c: &mut Criterion) {
    let (reference, candidate) = matching_pair::<f32>(SIDE, SIDE);
    let tol = Tolerance::default();
    c.bench_function("equals_scalar_f32_64k", |b| {
        b.iter(|| {
            let mut equal = 0usize;
            for (&a, &r) in candidate.iter().zip(reference.iter()) {
                equal += usize::from(equals(a, r, &tol).is_equal());
            }
            black_box(equal);
        });
    });
}

/// Benchmark: `equals_slice` on matching 64K f64 arrays.
fn bench_slice_match_f64(c: &mut Criterion) {
    let (reference, candidate) = matching_pair::<f64>(SIDE, SIDE);
    let tol = Tolerance::default();
    c.bench_function("equals_slice_match_f64_64k", |b| {
        b.iter(|| {
            let cmp = equals_slice(&candidate, reference.as_slice(), &tol).unwrap();
            black_box(cmp.max_error);
        });
    });
}

/// Benchmark: `equals_slice` on 64K f32 arrays with 1 in 64 elements off.
fn bench_slice_drift_f32(c: &mut Criterion) {
    let (reference, candidate) = drifted_pair(SIDE, SIDE, 64);
    let tol = Tolerance::default();
    c.bench_function("equals_slice_drift_f32_64k", |b| {
        b.iter(|| {
            let cmp = equals_slice(&candidate, reference.as_slice(), &tol).unwrap();
            black_box(cmp.mismatch_count);
        });
    });
}

/// Benchmark: full checker round, register a reference then check a candidate.
fn bench_checker_round(c: &mut Criterion) {
    let (reference, candidate) = matching_pair::<f32>(SIDE, SIDE);
    c.bench_function("checker_round_f32_64k", |b| {
        b.iter(|| {
            let mut checker = OutputChecker::new(CheckerConfig::default()).unwrap();
            checker
                .check(reference.as_slice(), REFERENCE_NAME, SIDE, SIDE)
                .unwrap();
            let outcome = checker.check(&candidate, "gpu", SIDE, SIDE).unwrap();
            black_box(outcome);
        });
    });
}

criterion_group!(
    benches,
    bench_equals_scalar_f32,
    bench_slice_match_f64,
    bench_slice_drift_f32,
    bench_checker_round
);
criterion_main!(benches);
