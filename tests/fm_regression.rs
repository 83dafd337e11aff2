//! Phase modulation against an independent recomputation of the
//! oscillator rules, and frequency propagation through relative bindings.

use std::sync::Arc;

use euro_dsp::dsp::library::Wavetables;
use euro_dsp::graph::{frequency::hz_to_fixed, Graph};
use euro_dsp::{PERIOD, PHI_FUDGE_BITS, SUBTICKS_PER_SAMPLE};

/// Carrier 440 Hz, modulator at ratio 1 and detune 1, 50 samples.
#[test]
fn fm_matches_recomputed_oracle() {
    let tables = Arc::new(Wavetables::with_seed(0));
    let sine = tables.anchors().sine;
    let mut graph = Graph::new(tables.clone());

    let carrier_freq = graph.add_absolute(440.0);
    let carrier = graph.add_oscillator(carrier_freq, sine).unwrap();
    let modulator_freq = graph.add_relative(carrier_freq, 1.0, 1.0).unwrap();
    let modulator = graph.add_oscillator(modulator_freq, sine).unwrap();
    let fm = graph.add_fm(carrier, modulator);

    assert_eq!(graph.frequency(modulator_freq), 7040);

    let table = tables.wrapped(sine);
    let freq = hz_to_fixed(440.0) as i64;
    for n in 0..50 {
        let tick = n * SUBTICKS_PER_SAMPLE;
        let time = (tick as i64 * freq).rem_euclid(PERIOD);
        let modulation = table.at_time(time) as i64;
        let offset = (modulation * freq) >> PHI_FUDGE_BITS;
        let expected = table.at_time(time + offset);

        assert_eq!(graph.sample(fm, tick), expected, "sample {n}");
    }
}

#[test]
fn relative_binding_follows_absolute_set() {
    let mut graph = Graph::new(Arc::new(Wavetables::with_seed(0)));
    let root = graph.add_absolute(440.0);
    let fifth = graph.add_relative(root, 1.5, 1.0).unwrap();
    let octave_of_fifth = graph.add_relative(fifth, 2.0, 1.0).unwrap();

    assert_eq!(graph.frequency(fifth), 660 << 4);
    assert_eq!(graph.frequency(octave_of_fifth), 1320 << 4);

    graph.set_frequency(root, 100.0);
    assert_eq!(graph.frequency(fifth), 150 << 4);
    assert_eq!(graph.frequency(octave_of_fifth), 300 << 4);
}

#[test]
fn oscillator_picks_up_frequency_change_on_next_sample() {
    let tables = Arc::new(Wavetables::with_seed(0));
    let mut graph = Graph::new(tables.clone());
    let root = graph.add_absolute(440.0);
    let rel = graph.add_relative(root, 1.0, 1.0).unwrap();
    let osc = graph.add_oscillator(rel, tables.anchors().saw).unwrap();

    // One sample at 440 Hz, then jump to 880 Hz
    graph.sample(osc, 0);
    graph.sample(osc, SUBTICKS_PER_SAMPLE);
    graph.set_frequency(root, 880.0);
    let got = graph.sample(osc, 2 * SUBTICKS_PER_SAMPLE);

    let table = tables.wrapped(tables.anchors().saw);
    let time = 16 * 7040 + 16 * 14080;
    assert_eq!(got, table.at_time(time));
}
