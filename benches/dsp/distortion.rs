//! Benchmarks for the compander and folder curves.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use euro_dsp::dsp::distortion;

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let signal: Vec<i16> = (0..size)
            .map(|i| ((i as f32 / size as f32) * 2.0 - 1.0) * 32000.0)
            .map(|x| x as i16)
            .collect();
        let mut output = vec![0i16; size];

        group.bench_with_input(BenchmarkId::new("compand", size), &size, |b, _| {
            b.iter(|| {
                for (o, &x) in output.iter_mut().zip(&signal) {
                    *o = distortion::compand_sample(x, black_box(0.5));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("fold", size), &size, |b, _| {
            b.iter(|| {
                for (o, &x) in output.iter_mut().zip(&signal) {
                    *o = distortion::fold_sample(x, black_box(1.6));
                }
            })
        });
    }

    group.finish();
}
