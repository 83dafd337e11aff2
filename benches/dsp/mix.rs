//! Benchmarks for weighted mixing, float against Q14.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use euro_dsp::dsp::mix::{self, MixPolicy};

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    let raw = [0.5, 0.1, 0.2, 0.7];
    let mut weights = [0.0f32; 4];
    mix::normalize(MixPolicy::Priority, &raw, &mut weights);
    let mut fixed = [0i32; 4];
    mix::to_fixed(&weights, &mut fixed);

    group.bench_function("normalize_priority", |b| {
        let mut out = [0.0f32; 4];
        b.iter(|| mix::normalize(MixPolicy::Priority, black_box(&raw), &mut out))
    });

    for &size in BLOCK_SIZES {
        let frames: Vec<[i16; 4]> = (0..size)
            .map(|i| {
                let x = (i as i16).wrapping_mul(131);
                [x, x / 2, -x, x / 3]
            })
            .collect();
        let mut output = vec![0i16; size];

        group.bench_with_input(BenchmarkId::new("float", size), &size, |b, _| {
            b.iter(|| {
                for (o, frame) in output.iter_mut().zip(&frames) {
                    *o = mix::mix_float(black_box(frame), &weights);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("q14", size), &size, |b, _| {
            b.iter(|| {
                for (o, frame) in output.iter_mut().zip(&frames) {
                    *o = mix::mix_fixed(black_box(frame), &fixed);
                }
            })
        });
    }

    group.finish();
}
