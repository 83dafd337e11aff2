use crate::engine::Slot;
use crate::voices::TopologyId;

/// A knob position applied right after the topology is built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnobPreset {
    pub pane: usize,
    pub slot: Slot,
    /// Normalized knob position in [0, 1].
    pub value: f32,
}

/// Everything needed to bring an engine up.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub topology: TopologyId,
    /// Seed for the noise wavetables. `None` draws from OS entropy, so noise
    /// differs from run to run.
    pub noise_seed: Option<u64>,
    /// Capacity of the control message queue.
    pub queue_capacity: usize,
    pub knobs: Vec<KnobPreset>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            topology: TopologyId::default(),
            noise_seed: None,
            queue_capacity: 256,
            knobs: Vec::new(),
        }
    }
}
