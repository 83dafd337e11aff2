//! The signal graph: an arena of fixed-point nodes addressed by handle.
//!
//! Every node produces one `i16` per call of `next(tick, phi)` and pulls its
//! children through the arena. Nodes are created once, bottom-up, while a
//! topology is built; the per-sample path never allocates.

/// Ring modulation node.
pub mod amplify;
/// Arena storage and sample evaluation.
pub mod arena;
/// Compander and folder nodes.
pub mod distortion;
/// Boxcar low-pass node.
pub mod filter;
/// Absolute and relative frequency bindings.
pub mod frequency;
/// Q14 and float gain nodes.
pub mod gain;
/// One-sample feedback register.
pub mod latch;
/// Weighted N-way mix node.
pub mod mix;
/// Phase modulation node.
pub mod modulate;
/// Handles and the node sum type.
pub mod node;
/// Phase-accumulator wavetable oscillator.
pub mod oscillator;
/// Constants and test sequences.
pub mod source;

pub use arena::Graph;
pub use mix::Precision;
pub use node::{FreqId, Node, SignalId};
