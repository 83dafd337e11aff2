//! Benchmarks for catalog construction and table lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use euro_dsp::dsp::library::Wavetables;
use euro_dsp::PERIOD;

use crate::BLOCK_SIZES;

pub fn bench_wavetable(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/wavetable");

    group.bench_function("build_catalog", |b| b.iter(|| Wavetables::with_seed(black_box(7))));

    let tables = Wavetables::with_seed(7);
    let anchors = *tables.anchors();
    let step = 440 << 4;

    for &size in BLOCK_SIZES {
        let mut output = vec![0i16; size];

        for (name, index) in [("sine_quarter", anchors.sine), ("saw_half", anchors.saw), ("noise_full", anchors.noise)] {
            let table = tables.wrapped(index);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                let mut time = 0i64;
                b.iter(|| {
                    for o in output.iter_mut() {
                        time = (time + black_box(step)).rem_euclid(PERIOD);
                        *o = table.at_time(time);
                    }
                })
            });
        }
    }

    group.finish();
}
