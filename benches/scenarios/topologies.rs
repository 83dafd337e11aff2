//! Every topology rendered through the manager, one sample at a time.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use euro_dsp::{dsp::library::Wavetables, Manager, TopologyId, SUBTICKS_PER_SAMPLE};

use crate::BLOCK_SIZES;

pub fn bench_topologies(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/topologies");
    let tables = Arc::new(Wavetables::with_seed(1));

    for topology in TopologyId::ALL {
        let mut manager = Manager::new(tables.clone());
        if manager.build(topology).is_err() {
            continue;
        }

        for &size in BLOCK_SIZES {
            let mut output = vec![0i16; size];
            let mut tick = 0i32;
            group.bench_with_input(BenchmarkId::new(topology.name(), size), &size, |b, _| {
                b.iter(|| {
                    for o in output.iter_mut() {
                        *o = manager.next(black_box(tick));
                        tick = tick.wrapping_add(SUBTICKS_PER_SAMPLE);
                    }
                })
            });
        }
    }

    // Rebuild cost: the manager tears everything down each time
    let mut manager = Manager::new(tables);
    group.bench_function("build_chord", |b| b.iter(|| manager.build(black_box(TopologyId::Chord))));

    group.finish();
}
