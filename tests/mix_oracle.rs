//! The weighted-mix oracle: sources [100, 30, 90].

use std::sync::Arc;

use euro_dsp::control::{Meta, Target};
use euro_dsp::dsp::library::Wavetables;
use euro_dsp::dsp::mix::MixPolicy;
use euro_dsp::graph::{Graph, Precision, SignalId};

fn oracle(precision: Precision) -> (Graph, SignalId) {
    let mut graph = Graph::new(Arc::new(Wavetables::with_seed(0)));
    let a = graph.add_constant(100);
    let b = graph.add_constant(30);
    let c = graph.add_constant(90);
    let mix = graph.add_mix(MixPolicy::Priority, precision, &[(a, 0.5), (b, 0.1), (c, 0.2)]);
    (graph, mix)
}

#[test]
fn priority_mix_keeps_first_weight() {
    let (mut graph, mix) = oracle(Precision::Float);
    assert_eq!(graph.sample(mix, 0), 85);

    // 50 + 4 + 29: each Q14 product truncates on its own
    let (mut graph, mix) = oracle(Precision::Fixed);
    assert_eq!(graph.sample(mix, 0), 83);
}

#[test]
fn zero_first_weight_splits_the_rest() {
    let (mut graph, mix) = oracle(Precision::Float);
    let weight = graph.add_param(Target::Weight { mix, index: 0 }, Meta::new("w0", 0.0, 1.0));
    graph.set(weight, 0.0);
    assert_eq!(graph.sample(mix, 0), 70);
}

#[test]
fn fixed_point_mix_carries_rounding_bias() {
    let (mut graph, mix) = oracle(Precision::Fixed);
    let weight = graph.add_param(Target::Weight { mix, index: 0 }, Meta::new("w0", 0.0, 1.0));
    graph.set(weight, 0.0);
    assert_eq!(graph.sample(mix, 0), 68);
}
