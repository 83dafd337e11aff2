//! Control chains shared by the recipes.
//!
//! Every knob returned here takes a normalized position in [0, 1] and sits
//! behind a change-suppression layer, so a noisy pot that hovers inside one
//! 12-bit step does not keep rewriting the graph.

use crate::control::{ControlId, Meta, Target};
use crate::graph::{FreqId, Graph, SignalId};

/// Exponential sweep over `[low, high]` Hz on an absolute binding.
pub(super) fn frequency(graph: &mut Graph, freq: FreqId, low: f32, high: f32) -> ControlId {
    let meta = Meta::new("freq", low, high).logarithmic();
    let param = graph.add_param(Target::Frequency(freq), meta);
    let curve = graph.add_exponential(param, meta);
    graph.add_change(curve)
}

/// Exponential sweep over musical ratios on a relative binding.
pub(super) fn ratio(graph: &mut Graph, freq: FreqId) -> ControlId {
    let meta = Meta::new("ratio", 0.25, 8.0).logarithmic();
    let param = graph.add_param(Target::Frequency(freq), meta);
    let curve = graph.add_exponential(param, meta);
    graph.add_change(curve)
}

/// Fine tuning of a relative binding, ±10%.
pub(super) fn detune(graph: &mut Graph, freq: FreqId) -> ControlId {
    let meta = Meta::new("detune", 0.9, 1.1);
    let param = graph.add_param(Target::Detune(freq), meta);
    let span = graph.add_range(param, 0.2, 0.9, meta);
    graph.add_change(span)
}

/// Linear `[0, high]` on any scalar target.
pub(super) fn level(graph: &mut Graph, target: Target, label: &'static str, high: f32) -> ControlId {
    let meta = Meta::new(label, 0.0, high);
    let param = graph.add_param(target, meta);
    let span = graph.add_multiplicative(param, high, meta);
    graph.add_change(span)
}

/// Mix weight with a sigmoid response, so the ends of the knob travel are
/// fine-grained.
pub(super) fn balance(graph: &mut Graph, mix: SignalId, index: usize) -> ControlId {
    let meta = Meta::new("balance", 0.0, 1.0).with_linearity(4.0);
    let param = graph.add_param(Target::Weight { mix, index }, meta);
    let curve = graph.add_sigmoid(param, meta);
    graph.add_change(curve)
}

/// Spread over the whole wavetable catalog.
pub(super) fn wave(graph: &mut Graph, osc: SignalId) -> ControlId {
    let count = graph.tables().len();
    let meta = Meta::new("wave", 0.0, count.saturating_sub(1) as f32);
    let param = graph.add_param(Target::Wavedex { osc, base: 0, count }, meta);
    graph.add_change(param)
}

/// Turn `knob` to the position that displays `physical`.
pub(super) fn preset(graph: &mut Graph, knob: ControlId, physical: f32) {
    let normalized = graph.meta(knob).map_or(0.0, |meta| meta.normalize(physical));
    graph.set(knob, normalized);
}

/// Turn `knob` to the position of `index` in the catalog.
pub(super) fn preset_wave(graph: &mut Graph, knob: ControlId, index: usize) {
    let count = graph.tables().len().max(1);
    graph.set(knob, (index as f32 + 0.5) / count as f32);
}
