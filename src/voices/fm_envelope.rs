//! FM voice with a tremolo stage.
//!
//! The amplitude "envelope" of this family is a free-running LFO tremolo.
//! There is no note trigger and no attack/decay shape.
//!
//! A low-frequency oscillator ring-modulates the FM voice and the result is
//! priority-mixed against the untouched voice. The tremolo weight is the
//! depth: at 0 the voice passes through, at 1 the amplitude follows the LFO
//! all the way down to silence twice per cycle.
//!
//! # Panes
//!
//! 0. carrier frequency, carrier wave, volume
//! 1. ratio, detune, depth
//! 2. balance, fold, modulator wave
//! 3. tremolo rate, tremolo depth, LFO wave

use super::{fm, knobs, Patch};
use crate::dsp::mix::MixPolicy;
use crate::engine::Pane;
use crate::error::BuildError;
use crate::graph::{Graph, Precision};

pub(super) fn build(graph: &mut Graph) -> Result<Patch, BuildError> {
    let ops = fm::operators(graph)?;
    let voice = fm::voice(graph, &ops, ops.modulator);

    let sine = graph.tables().anchors().sine;
    let lfo_freq = graph.add_absolute(4.0);
    let lfo = graph.add_oscillator(lfo_freq, sine)?;
    let ring = graph.add_am(voice.mix, lfo);
    // Ring modulation halves the level, so the wet path gets gain 2 back
    let wet = graph.add_gain(ring, 2.0);
    let tremolo = graph.add_mix(MixPolicy::Priority, Precision::Fixed, &[(wet, 0.0), (voice.mix, 1.0)]);
    let out = fm::output(graph, tremolo);

    let [carrier, modulator] = fm::operator_panes(graph, &ops, &voice, &out);
    let (balance, fold) = fm::tone_knobs(graph, &voice, &out);
    let modulator_wave = knobs::wave(graph, ops.modulator);

    let rate = knobs::frequency(graph, lfo_freq, 0.1, 20.0);
    let depth = knobs::balance(graph, tremolo, 0);
    let lfo_wave = knobs::wave(graph, lfo);
    knobs::preset(graph, rate, 4.0);
    graph.set(depth, 0.0);

    Ok(Patch {
        root: out.out,
        panes: vec![
            carrier,
            modulator,
            Pane::new(balance, fold, modulator_wave),
            Pane::new(rate, depth, lfo_wave),
        ],
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dsp::library::Wavetables;
    use crate::SUBTICKS_PER_SAMPLE;

    #[test]
    fn test_full_depth_tremolo_dips() {
        let mut graph = Graph::new(Arc::new(Wavetables::with_seed(0)));
        let patch = build(&mut graph).unwrap();
        let depth = patch.panes[3].controls()[1];
        graph.set(depth, 1.0);

        // At 4 Hz the LFO crosses zero every 5512 samples or so; the window
        // around the first crossing must be much quieter than the peak.
        let out: Vec<i16> = (0..11025)
            .map(|n| graph.sample(patch.root, n * SUBTICKS_PER_SAMPLE))
            .collect();
        let loud = out[2000..3500].iter().map(|s| u32::from(s.unsigned_abs())).max().unwrap_or(0);
        let quiet = out[5400..5620].iter().map(|s| u32::from(s.unsigned_abs())).max().unwrap_or(0);
        assert!(quiet * 4 < loud, "quiet {quiet} loud {loud}");
    }
}
