//! Benchmarks for DSP primitives and full topologies.
//!
//! Run with: cargo bench
//!
//! The core produces one sample per call, so every benchmark here renders
//! a block sample by sample, the way the audio callback does.
//!
//! Reference timing at 44.1kHz sample rate:
//!   - 64 samples  = 1.45ms deadline
//!   - 128 samples = 2.90ms deadline
//!   - 256 samples = 5.80ms deadline
//!   - 512 samples = 11.61ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (ratio, wavetable, boxcar, mix, ...)
//!   - scenarios/*  Every topology rendered through the manager

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_fixed,
    dsp::bench_wavetable,
    dsp::bench_boxcar,
    dsp::bench_distortion,
    dsp::bench_mix,
    // Whole patches
    scenarios::bench_topologies,
);
criterion_main!(benches);
