//! Two-operator FM voice.
//!
//! The modulator's output becomes the carrier's phase offset. Strictly this
//! is phase modulation, which sounds the same as FM for sine operators and
//! keeps the carrier's pitch stable when the depth changes.
//!
//! # How It Works
//!
//! ```text
//! carrier freq ──► carrier ──────────────────────┐
//!      │                                          ▼
//!      └─(ratio, detune)─► modulator ─► depth ─► FM ─► balance mix ─► folder ─► volume
//!                                                       ▲
//!                                        dry carrier ───┘
//! ```
//!
//! The balance mix uses the priority policy: the FM path keeps exactly the
//! balance weight and the dry carrier fills the rest, so turning the balance
//! knob crossfades between a pure sine and the full FM spectrum.
//!
//! # Panes
//!
//! 0. carrier frequency, carrier wave, volume
//! 1. ratio, detune, depth
//! 2. balance, fold, modulator wave

use super::{knobs, Patch};
use crate::control::{ControlId, Target};
use crate::dsp::mix::MixPolicy;
use crate::engine::Pane;
use crate::error::BuildError;
use crate::graph::{FreqId, Graph, Precision, SignalId};

/// The nodes of an FM pair, shared by every FM family.
pub(super) struct Operators {
    pub carrier_freq: FreqId,
    pub carrier: SignalId,
    pub modulator_freq: FreqId,
    pub modulator: SignalId,
}

/// Carrier at 220 Hz, modulator at unity ratio and no detune.
pub(super) fn operators(graph: &mut Graph) -> Result<Operators, BuildError> {
    let sine = graph.tables().anchors().sine;
    let carrier_freq = graph.add_absolute(220.0);
    let carrier = graph.add_oscillator(carrier_freq, sine)?;
    let modulator_freq = graph.add_relative(carrier_freq, 1.0, 1.0)?;
    let modulator = graph.add_oscillator(modulator_freq, sine)?;
    Ok(Operators {
        carrier_freq,
        carrier,
        modulator_freq,
        modulator,
    })
}

/// Phase modulation of the carrier by `phase`, blended with the dry carrier.
pub(super) struct Voice {
    pub depth: SignalId,
    pub mix: SignalId,
}

pub(super) fn voice(graph: &mut Graph, ops: &Operators, phase: SignalId) -> Voice {
    let depth = graph.add_gain(phase, 1.0);
    let fm = graph.add_fm(ops.carrier, depth);
    let mix = graph.add_mix(MixPolicy::Priority, Precision::Fixed, &[(fm, 0.5), (ops.carrier, 1.0)]);
    Voice { depth, mix }
}

/// Folder and output gain after the voice.
pub(super) struct Output {
    pub fold: SignalId,
    pub out: SignalId,
}

pub(super) fn output(graph: &mut Graph, input: SignalId) -> Output {
    let fold = graph.add_folder(input, 0.0);
    let out = graph.add_gain(fold, 0.5);
    Output { fold, out }
}

/// The carrier and modulator panes every FM family starts with.
pub(super) fn operator_panes(graph: &mut Graph, ops: &Operators, voice: &Voice, out: &Output) -> [Pane; 2] {
    let pitch = knobs::frequency(graph, ops.carrier_freq, 20.0, 2000.0);
    let carrier_wave = knobs::wave(graph, ops.carrier);
    let volume = knobs::level(graph, Target::Amplitude(out.out), "volume", 1.0);
    let ratio = knobs::ratio(graph, ops.modulator_freq);
    let detune = knobs::detune(graph, ops.modulator_freq);
    let depth = knobs::level(graph, Target::Amplitude(voice.depth), "depth", 4.0);

    knobs::preset(graph, pitch, 220.0);
    knobs::preset(graph, volume, 0.5);
    knobs::preset(graph, ratio, 1.0);
    graph.set(detune, 0.5);
    knobs::preset(graph, depth, 1.0);

    [Pane::new(pitch, carrier_wave, volume), Pane::new(ratio, detune, depth)]
}

/// Balance and fold knobs for the voice and its output stage.
pub(super) fn tone_knobs(graph: &mut Graph, voice: &Voice, out: &Output) -> (ControlId, ControlId) {
    let balance = knobs::balance(graph, voice.mix, 0);
    let fold = knobs::level(graph, Target::Fold(out.fold), "fold", 2.0);
    graph.set(balance, 0.5);
    knobs::preset(graph, fold, 0.0);
    (balance, fold)
}

pub(super) fn build(graph: &mut Graph) -> Result<Patch, BuildError> {
    let ops = operators(graph)?;
    let voice = voice(graph, &ops, ops.modulator);
    let out = output(graph, voice.mix);

    let [carrier, modulator] = operator_panes(graph, &ops, &voice, &out);
    let (balance, fold) = tone_knobs(graph, &voice, &out);
    let modulator_wave = knobs::wave(graph, ops.modulator);

    Ok(Patch {
        root: out.out,
        panes: vec![carrier, modulator, Pane::new(balance, fold, modulator_wave)],
    })
}
