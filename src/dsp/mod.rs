//! Low-level DSP primitives used by the graph nodes.
//!
//! These components are allocation-free on the per-sample path and work in
//! 16-bit fixed point. They stay focused on the signal-processing math so
//! the graph can layer on ownership, frequency tracking and control.

/// Ring product and Q14 gain.
pub mod amplify;
/// Moving-average filter over running sums.
pub mod boxcar;
/// Compander and folder waveshaping curves.
pub mod distortion;
/// Saturation, Qn multiply-shift and sample conversions.
pub mod fixed;
/// The wavetable catalog.
pub mod library;
/// Weight normalization and N-way mixing.
pub mod mix;
/// Just-intonation frequency ratios.
pub mod ratio;
/// One-period lookup tables and phase folding.
pub mod wavetable;

pub use library::Wavetables;
pub use ratio::SimpleRatio;
