//! Benchmarks for the boxcar moving average.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use euro_dsp::dsp::boxcar::Boxcar;

use crate::BLOCK_SIZES;

pub fn bench_boxcar(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/boxcar");

    for &size in BLOCK_SIZES {
        let signal: Vec<i16> = (0..size).map(|i| ((i * 977) % 65_535) as i16).collect();
        let mut output = vec![0i16; size];

        // Cost grows with the window: every call touches every running sum
        for length in [4, 32] {
            let mut boxcar = Boxcar::new(length);
            group.bench_with_input(BenchmarkId::new(format!("length_{length}"), size), &size, |b, _| {
                b.iter(|| {
                    for (o, &x) in output.iter_mut().zip(&signal) {
                        *o = boxcar.process(black_box(x));
                    }
                })
            });
        }
    }

    group.finish();
}
