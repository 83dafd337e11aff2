//! Benchmarks for the fixed-point kernel and ratio arithmetic.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use euro_dsp::dsp::{
    amplify,
    fixed::{mult_shift14, scale_to_fixed, Q14},
    SimpleRatio,
};

use crate::BLOCK_SIZES;

pub fn bench_fixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fixed");

    group.bench_function("ratio_approximate", |b| {
        b.iter(|| SimpleRatio::approximate(black_box(1.4983)))
    });

    let fifth = SimpleRatio::approximate(1.5).unwrap_or(SimpleRatio::UNITY);
    group.bench_function("ratio_multiply", |b| {
        b.iter(|| fifth.multiply(black_box(7040)))
    });

    for &size in BLOCK_SIZES {
        let signal: Vec<i16> = (0..size).map(|i| (i as i16).wrapping_mul(257)).collect();
        let k = scale_to_fixed(Q14, 0.7);
        let mut output = vec![0i16; size];

        group.bench_with_input(BenchmarkId::new("mult_shift14", size), &size, |b, _| {
            b.iter(|| {
                for (o, &x) in output.iter_mut().zip(&signal) {
                    *o = mult_shift14(black_box(k), x as i32) as i16;
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("ring", size), &size, |b, _| {
            b.iter(|| {
                for (o, &x) in output.iter_mut().zip(&signal) {
                    *o = amplify::ring(black_box(x), x);
                }
            })
        });
    }

    group.finish();
}
