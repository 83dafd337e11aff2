//! Absolute and relative frequency bindings.

use tracing::warn;

use crate::dsp::fixed::{fixed_to_float, mult_shift8, scale_to_fixed, Q8};
use crate::dsp::ratio::SimpleRatio;
use crate::error::BuildError;
use crate::graph::{node::FreqId, Graph};
use crate::SUBTICK_BITS;

/*
Frequency Bindings
==================

An oscillator does not store its own frequency. It holds a `FreqId` and
reads the binding's current value on every sample, so changing a binding
is heard on the very next call.

Bindings come in two flavours:

  ABSOLUTE    Set directly in Hz.

  RELATIVE    Follows a root binding at a musical ratio plus a fine
              detune:

                freq = detune ⊛ ratio(root)

              `ratio` is a SimpleRatio applied with integer math, `detune`
              is a Q8 multiplier (256 = in tune).

Fan-out
-------

Every binding keeps the list of relative bindings rooted on it. Setting a
binding walks that list, and their lists, until every transitive dependent
has recomputed:

    abs(440) ──► rel(3/2) ──► rel(2)
             └─► rel(5/4)

Relative bindings can only be rooted on bindings that already exist, so
the dependency graph is a forest and the walk always terminates.

Units
-----

Frequencies are stored as Hz << SUBTICK_BITS, so 440 Hz is 7040.
*/

/// Highest frequency a binding will hold, in Hz.
pub const MAX_HZ: f32 = 20_000.0;

/// Frequency source for one or more oscillators.
#[derive(Debug, Clone, PartialEq)]
pub enum FrequencyBinding {
    Absolute {
        freq: i32,
        dependents: Vec<FreqId>,
    },
    Relative {
        root: FreqId,
        root_freq: i32,
        ratio: SimpleRatio,
        detune: i32,
        freq: i32,
        dependents: Vec<FreqId>,
    },
}

impl FrequencyBinding {
    /// Current frequency in Hz << SUBTICK_BITS.
    #[inline]
    pub fn freq(&self) -> i32 {
        match self {
            FrequencyBinding::Absolute { freq, .. } | FrequencyBinding::Relative { freq, .. } => *freq,
        }
    }

    pub fn dependents(&self) -> &[FreqId] {
        match self {
            FrequencyBinding::Absolute { dependents, .. }
            | FrequencyBinding::Relative { dependents, .. } => dependents,
        }
    }

    fn dependents_mut(&mut self) -> &mut Vec<FreqId> {
        match self {
            FrequencyBinding::Absolute { dependents, .. }
            | FrequencyBinding::Relative { dependents, .. } => dependents,
        }
    }

    /// Called by the parent when its frequency changes.
    fn set_root(&mut self, value: i32) {
        if let FrequencyBinding::Relative { root_freq, .. } = self {
            *root_freq = value;
            self.recompute();
        }
    }

    fn set_ratio(&mut self, value: SimpleRatio) {
        if let FrequencyBinding::Relative { ratio, .. } = self {
            *ratio = value;
            self.recompute();
        }
    }

    /// Returns false for absolute bindings, which have no detune.
    fn set_detune(&mut self, value: f32) -> bool {
        let FrequencyBinding::Relative { detune, .. } = self else {
            return false;
        };
        *detune = detune_to_fixed(value);
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        if let FrequencyBinding::Relative {
            root_freq,
            ratio,
            detune,
            freq,
            ..
        } = self
        {
            *freq = mult_shift8(*detune, ratio.multiply(*root_freq));
        }
    }
}

/// Convert Hz to the stored fixed-point form, clamping to [0, MAX_HZ].
pub fn hz_to_fixed(hz: f32) -> i32 {
    (hz.clamp(0.0, MAX_HZ) * (1 << SUBTICK_BITS) as f32).round() as i32
}

pub fn fixed_to_hz(freq: i32) -> f32 {
    freq as f32 / (1 << SUBTICK_BITS) as f32
}

impl Graph {
    /// Add an independently set frequency.
    pub fn add_absolute(&mut self, hz: f32) -> FreqId {
        self.bindings.push(FrequencyBinding::Absolute {
            freq: hz_to_fixed(hz),
            dependents: Vec::new(),
        });
        FreqId(self.bindings.len() - 1)
    }

    /// Add a frequency that tracks `root` at `ratio`, detuned by `detune`
    /// (1.0 = in tune).
    pub fn add_relative(&mut self, root: FreqId, ratio: f32, detune: f32) -> Result<FreqId, BuildError> {
        let ratio = SimpleRatio::approximate(ratio)?;
        let root_freq = self
            .bindings
            .get(root.0)
            .map(FrequencyBinding::freq)
            .ok_or(BuildError::UnreachableRatio(ratio.as_float()))?;
        let id = FreqId(self.bindings.len());
        let mut binding = FrequencyBinding::Relative {
            root,
            root_freq,
            ratio,
            detune: detune_to_fixed(detune),
            freq: 0,
            dependents: Vec::new(),
        };
        binding.recompute();
        self.bindings.push(binding);
        self.bindings[root.0].dependents_mut().push(id);
        Ok(id)
    }

    pub fn binding(&self, id: FreqId) -> Option<&FrequencyBinding> {
        self.bindings.get(id.0)
    }

    /// Current frequency of `id` in Hz << SUBTICK_BITS, 0 if unknown.
    #[inline]
    pub fn frequency(&self, id: FreqId) -> i32 {
        self.bindings.get(id.0).map_or(0, FrequencyBinding::freq)
    }

    /// Set the main value of a binding: Hz for an absolute binding, the
    /// ratio for a relative one. Dependents follow immediately.
    pub fn set_frequency(&mut self, id: FreqId, value: f32) {
        let Some(binding) = self.bindings.get_mut(id.0) else {
            warn!(binding = id.0, "frequency set on unknown binding");
            return;
        };
        match binding {
            FrequencyBinding::Absolute { freq, .. } => *freq = hz_to_fixed(value),
            FrequencyBinding::Relative { .. } => match SimpleRatio::approximate(value) {
                Ok(ratio) => binding.set_ratio(ratio),
                Err(err) => {
                    warn!(binding = id.0, %err, "ignoring ratio");
                    return;
                }
            },
        }
        self.propagate(id);
    }

    /// Set the detune of a relative binding. Absolute bindings ignore it.
    pub fn set_detune(&mut self, id: FreqId, detune: f32) {
        let applied = self
            .bindings
            .get_mut(id.0)
            .is_some_and(|binding| binding.set_detune(detune));
        if applied {
            self.propagate(id);
        } else {
            warn!(binding = id.0, "detune set on a binding without detune");
        }
    }

    /// Detune of `id` as a float, 1.0 for absolute bindings.
    pub fn detune(&self, id: FreqId) -> f32 {
        match self.bindings.get(id.0) {
            Some(FrequencyBinding::Relative { detune, .. }) => fixed_to_float(Q8, *detune),
            _ => 1.0,
        }
    }

    /// Push the frequency of `from` to all of its transitive dependents.
    fn propagate(&mut self, from: FreqId) {
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            let value = self.bindings[id.0].freq();
            for i in 0..self.bindings[id.0].dependents().len() {
                let dep = self.bindings[id.0].dependents()[i];
                self.bindings[dep.0].set_root(value);
                pending.push(dep);
            }
        }
    }
}

fn detune_to_fixed(detune: f32) -> i32 {
    scale_to_fixed(Q8, detune.clamp(0.0, 4.0))
}
