//! Simple voice.
//!
//! One oscillator through a boxcar smoother and an output gain. The boxcar
//! doubles as a crude tone control: longer windows dull the upper harmonics
//! of the brighter tables.
//!
//! # Panes
//!
//! 0. frequency, wavetable, volume
//! 1. smoothing, -, -

use super::{knobs, Patch};
use crate::control::Target;
use crate::engine::Pane;
use crate::error::BuildError;
use crate::graph::Graph;

pub(super) fn build(graph: &mut Graph) -> Result<Patch, BuildError> {
    let sine = graph.tables().anchors().sine;
    let freq = graph.add_absolute(220.0);
    let osc = graph.add_oscillator(freq, sine)?;
    let smooth = graph.add_boxcar(osc, 1);
    let out = graph.add_gain(smooth, 0.5);

    let pitch = knobs::frequency(graph, freq, 20.0, 2000.0);
    let wave = knobs::wave(graph, osc);
    let volume = knobs::level(graph, Target::Amplitude(out), "volume", 1.0);
    let window = knobs::level(graph, Target::Length(smooth), "smooth", 64.0);

    knobs::preset(graph, pitch, 220.0);
    knobs::preset(graph, volume, 0.5);
    knobs::preset(graph, window, 1.0);

    let blank_left = graph.add_blank();
    let blank_right = graph.add_blank();

    Ok(Patch {
        root: out,
        panes: vec![
            Pane::new(pitch, wave, volume),
            Pane::new(window, blank_left, blank_right),
        ],
    })
}
