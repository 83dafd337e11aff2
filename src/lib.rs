pub mod config; // Engine configuration
pub mod control; // Knob-to-parameter mapping layers
pub mod dsp;
pub mod engine; // Graph manager and panes
pub mod error;
pub mod graph; // Arena of signal nodes
pub mod synth; // Sample driver and control messages
pub mod voices; // Fixed topology recipes

pub use config::EngineConfig;
pub use dsp::fixed::{SAMPLE_MAX, SAMPLE_MIN};
pub use engine::{Manager, Pane, Slot};
pub use error::BuildError;
pub use synth::Synth;
pub use voices::TopologyId;

/// Output sample rate of the DAC pipeline in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Fractional bits of sub-sample time and of stored frequencies.
pub const SUBTICK_BITS: u32 = 4;

/// Ticks that make up one output sample.
pub const SUBTICKS_PER_SAMPLE: i32 = 1 << SUBTICK_BITS;

pub const TABLE_BITS: u32 = 12;

/// Entries in one period of every wavetable, whatever its symmetry.
pub const TABLE_SIZE: usize = 1 << TABLE_BITS;

/// One oscillator cycle in phase-accumulator units: ticks per second times
/// the frequency scale.
pub const PERIOD: i64 = (SAMPLE_RATE as i64) << (2 * SUBTICK_BITS);

/// Right shift applied to `phi × frequency` before it offsets the phase.
pub const PHI_FUDGE_BITS: u32 = 4;
