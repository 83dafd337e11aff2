//! Benchmarks for low-level DSP primitives.

mod boxcar;
mod distortion;
mod fixed;
mod mix;
mod wavetable;

pub use boxcar::bench_boxcar;
pub use distortion::bench_distortion;
pub use fixed::bench_fixed;
pub use mix::bench_mix;
pub use wavetable::bench_wavetable;
