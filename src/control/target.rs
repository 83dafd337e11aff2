use tracing::warn;

use crate::graph::{FreqId, Graph, Node, SignalId};

/// The graph parameter at the end of a control chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Hz for an absolute binding, the ratio for a relative one.
    Frequency(FreqId),
    /// Detune multiplier of a relative binding (1.0 = in tune).
    Detune(FreqId),
    /// Wavetable selection: [0, 1] spreads over `count` tables from `base`.
    Wavedex {
        osc: SignalId,
        base: usize,
        count: usize,
    },
    /// Amplitude of a gain or float gain.
    Amplitude(SignalId),
    /// One raw weight of a mix.
    Weight { mix: SignalId, index: usize },
    /// Boxcar window, rounded to whole samples.
    Length(SignalId),
    /// Compander exponent.
    Gamma(SignalId),
    /// Folder amount.
    Fold(SignalId),
    /// Level of a constant, in sample units.
    Value(SignalId),
}

/// Catalog index selected by a normalized value.
pub fn wavedex_for(value: f32, base: usize, count: usize) -> usize {
    let step = (value.clamp(0.0, 1.0) * count as f32) as usize;
    base + step.min(count.saturating_sub(1))
}

impl Graph {
    /// Write `value` into the parameter named by `target`.
    pub(crate) fn apply(&mut self, target: Target, value: f32) {
        let applied = match target {
            Target::Frequency(freq) => {
                self.set_frequency(freq, value);
                true
            }
            Target::Detune(freq) => {
                self.set_detune(freq, value);
                true
            }
            Target::Wavedex { osc, base, count } => match self.node_mut(osc) {
                Some(Node::Oscillator(node)) => {
                    node.set_wavedex(wavedex_for(value, base, count));
                    true
                }
                _ => false,
            },
            Target::Amplitude(id) => match self.node_mut(id) {
                Some(Node::Gain(node)) => {
                    node.set_amp(value);
                    true
                }
                Some(Node::FloatGain(node)) => {
                    node.set_amp(value);
                    true
                }
                _ => false,
            },
            Target::Weight { mix, index } => match self.node_mut(mix) {
                Some(Node::Mix(node)) => node.set_weight(index, value),
                _ => false,
            },
            Target::Length(id) => match self.node_mut(id) {
                Some(Node::Boxcar(node)) => {
                    node.set_length(value.round().max(1.0) as usize);
                    true
                }
                _ => false,
            },
            Target::Gamma(id) => match self.node_mut(id) {
                Some(Node::Compander(node)) => {
                    node.set_gamma(value);
                    true
                }
                _ => false,
            },
            Target::Fold(id) => match self.node_mut(id) {
                Some(Node::Folder(node)) => {
                    node.set_amount(value);
                    true
                }
                _ => false,
            },
            Target::Value(id) => match self.node_mut(id) {
                Some(Node::Constant(node)) => {
                    node.set_value(value);
                    true
                }
                _ => false,
            },
        };
        if !applied {
            warn!(?target, value, "control target does not match its node");
        }
    }
}
