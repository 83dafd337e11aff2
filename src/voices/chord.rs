//! Four-note chord.
//!
//! A root oscillator and three relative oscillators tuned to a just major
//! triad plus octave (5/4, 3/2, 2). Because the intervals are exact ratios
//! of the root, moving the root knob transposes the whole chord without the
//! beating an equal-tempered chord would have.
//!
//! # Panes
//!
//! 0. root frequency, compander gamma, volume
//! 1. third: ratio, detune, level
//! 2. fifth: ratio, detune, level
//! 3. octave: ratio, detune, level

use super::{knobs, Patch};
use crate::control::{Meta, Target};
use crate::dsp::mix::MixPolicy;
use crate::engine::Pane;
use crate::error::BuildError;
use crate::graph::distortion::GAMMA_RANGE;
use crate::graph::{Graph, Precision};

const GAMMA: Meta = Meta::new("gamma", GAMMA_RANGE.0, GAMMA_RANGE.1).logarithmic();

/// Intervals above the root, in order.
const INTERVALS: [f32; 3] = [1.25, 1.5, 2.0];

pub(super) fn build(graph: &mut Graph) -> Result<Patch, BuildError> {
    let sine = graph.tables().anchors().sine;
    let root_freq = graph.add_absolute(220.0);
    let root = graph.add_oscillator(root_freq, sine)?;

    let mut voices = vec![(root, 1.0)];
    let mut freqs = Vec::with_capacity(INTERVALS.len());
    for ratio in INTERVALS {
        let freq = graph.add_relative(root_freq, ratio, 1.0)?;
        voices.push((graph.add_oscillator(freq, sine)?, 1.0));
        freqs.push(freq);
    }
    let mix = graph.add_mix(MixPolicy::Uniform, Precision::Fixed, &voices);
    let shape = graph.add_compander(mix, 1.0);
    let out = graph.add_gain(shape, 0.5);

    let pitch = knobs::frequency(graph, root_freq, 20.0, 2000.0);
    let gamma = graph.add_param(Target::Gamma(shape), GAMMA);
    let gamma = graph.add_exponential(gamma, GAMMA);
    let gamma = graph.add_change(gamma);
    let volume = knobs::level(graph, Target::Amplitude(out), "volume", 1.0);
    knobs::preset(graph, pitch, 220.0);
    knobs::preset(graph, gamma, 1.0);
    knobs::preset(graph, volume, 0.5);

    let mut panes = vec![Pane::new(pitch, gamma, volume)];
    for (i, freq) in freqs.into_iter().enumerate() {
        let ratio = knobs::ratio(graph, freq);
        let detune = knobs::detune(graph, freq);
        let level = knobs::level(graph, Target::Weight { mix, index: i + 1 }, "level", 1.0);
        knobs::preset(graph, ratio, INTERVALS[i]);
        graph.set(detune, 0.5);
        knobs::preset(graph, level, 1.0);
        panes.push(Pane::new(ratio, detune, level));
    }

    Ok(Patch { root: out, panes })
}
