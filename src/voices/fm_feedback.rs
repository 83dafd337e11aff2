//! FM voice with output feedback.
//!
//! The finished output is captured by a one-sample latch and priority-mixed
//! against the modulator before the depth stage. The feedback knob hands the
//! modulator's share over to the latch: at 0 the patch is exactly the plain
//! FM voice, small amounts thicken the tone, and large amounts tip it into
//! noisy self-oscillation.
//!
//! ```text
//! modulator ──► mix ──► depth ──► FM ──► ... ──► volume ──┐
//!                ▲                                        │
//!                └──────────── latch (z⁻¹) ◄──────────────┘
//! ```
//!
//! # Panes
//!
//! 0. carrier frequency, carrier wave, volume
//! 1. ratio, detune, depth
//! 2. balance, fold, feedback

use super::{fm, knobs, Patch};
use crate::control::{ControlId, Meta, Target};
use crate::dsp::mix::MixPolicy;
use crate::engine::Pane;
use crate::error::BuildError;
use crate::graph::{Graph, Precision, SignalId};

pub(super) fn build(graph: &mut Graph) -> Result<Patch, BuildError> {
    let ops = fm::operators(graph)?;
    let latch = graph.add_latch();
    let sum = graph.add_mix(
        MixPolicy::Priority,
        Precision::Fixed,
        &[(ops.modulator, 1.0), (latch, 1.0)],
    );
    let voice = fm::voice(graph, &ops, sum);
    let out = fm::output(graph, voice.mix);
    graph.resolve_latch(latch, out.out);

    let [carrier, modulator] = fm::operator_panes(graph, &ops, &voice, &out);
    let (balance, fold) = fm::tone_knobs(graph, &voice, &out);
    let amount = feedback(graph, sum);
    knobs::preset(graph, amount, 0.0);

    Ok(Patch {
        root: out.out,
        panes: vec![carrier, modulator, Pane::new(balance, fold, amount)],
    })
}

/// Feedback amount as `1 - w0` on the modulator's weight.
fn feedback(graph: &mut Graph, mix: SignalId) -> ControlId {
    let meta = Meta::new("feedback", 0.0, 1.0);
    let param = graph.add_param(Target::Weight { mix, index: 0 }, meta);
    let invert = graph.add_range(param, -1.0, 1.0, meta);
    graph.add_change(invert)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dsp::library::Wavetables;
    use crate::SUBTICKS_PER_SAMPLE;

    fn render(feedback: f32) -> Vec<i16> {
        let mut graph = Graph::new(Arc::new(Wavetables::with_seed(0)));
        let patch = build(&mut graph).unwrap();
        let amount = patch.panes[2].controls()[2];
        graph.set(amount, feedback);
        (0..512)
            .map(|n| graph.sample(patch.root, n * SUBTICKS_PER_SAMPLE))
            .collect()
    }

    #[test]
    fn test_feedback_changes_the_output() {
        assert_ne!(render(0.0), render(1.0));
        assert_ne!(render(0.0), render(0.3));
    }

    #[test]
    fn test_no_feedback_matches_plain_fm() {
        let mut graph = Graph::new(Arc::new(Wavetables::with_seed(0)));
        let patch = fm::build(&mut graph).unwrap();
        let plain: Vec<i16> = (0..512)
            .map(|n| graph.sample(patch.root, n * SUBTICKS_PER_SAMPLE))
            .collect();
        assert_eq!(render(0.0), plain);
    }

    #[test]
    fn test_feedback_stays_in_range() {
        for s in render(1.0) {
            assert!(s >= crate::SAMPLE_MIN);
        }
    }
}
