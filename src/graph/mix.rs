use crate::dsp::mix::{mix_fixed, mix_float, normalize, to_fixed, MixPolicy};
use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/*
Weighted Mix Node
=================

Combines N inputs with weights normalized by a MixPolicy (see
`dsp/mix.rs` for the math).

How it works:
1. Pull every input once, in order, with the same tick and phi
2. Combine with the effective weights, in float or Q14

Raw weights are what the knobs set. Effective weights are recomputed
only when a raw weight changes, so the per-sample path is a plain
multiply-accumulate over preallocated buffers.

Use Cases:
----------
- Balance: priority mix of the dry carrier against the FM output, the
  first weight is the dry amount
- Chords: uniform mix of several oscillators
- Feedback: summing a modulator with the latched output
*/

/// Which arithmetic combines the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Float,
    Fixed,
}

#[derive(Debug, Clone)]
pub struct Mix {
    inputs: Vec<SignalId>,
    policy: MixPolicy,
    precision: Precision,
    weights: Vec<f32>,
    effective: Vec<f32>,
    fixed: Vec<i32>,
    samples: Vec<i16>,
}

impl Mix {
    pub fn policy(&self) -> MixPolicy {
        self.policy
    }

    pub fn inputs(&self) -> &[SignalId] {
        &self.inputs
    }

    /// Raw weights as last set.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weights after normalization.
    pub fn effective(&self) -> &[f32] {
        &self.effective
    }

    /// Set one raw weight. Out-of-range indices are ignored.
    pub fn set_weight(&mut self, index: usize, weight: f32) -> bool {
        let Some(w) = self.weights.get_mut(index) else {
            return false;
        };
        *w = weight;
        self.renormalize();
        true
    }

    fn renormalize(&mut self) {
        normalize(self.policy, &self.weights, &mut self.effective);
        to_fixed(&self.effective, &mut self.fixed);
    }

    #[inline]
    pub(crate) fn next(&mut self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        for (sample, &input) in self.samples.iter_mut().zip(&self.inputs) {
            *sample = graph.next(input, tick, phi);
        }
        match self.precision {
            Precision::Float => mix_float(&self.samples, &self.effective),
            Precision::Fixed => mix_fixed(&self.samples, &self.fixed),
        }
    }
}

impl Graph {
    /// Add a mix of `(input, raw weight)` pairs.
    pub fn add_mix(&mut self, policy: MixPolicy, precision: Precision, inputs: &[(SignalId, f32)]) -> SignalId {
        let n = inputs.len();
        let mut node = Mix {
            inputs: inputs.iter().map(|&(id, _)| id).collect(),
            policy,
            precision,
            weights: inputs.iter().map(|&(_, w)| w).collect(),
            effective: vec![0.0; n],
            fixed: vec![0; n],
            samples: vec![0; n],
        };
        node.renormalize();
        self.push(Node::Mix(node))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dsp::library::Wavetables;

    fn mix_of(precision: Precision, weights: [f32; 3]) -> (Graph, SignalId) {
        let mut g = Graph::new(Arc::new(Wavetables::with_seed(0)));
        let a = g.add_constant(100);
        let b = g.add_constant(30);
        let c = g.add_constant(90);
        let m = g.add_mix(
            MixPolicy::Priority,
            precision,
            &[(a, weights[0]), (b, weights[1]), (c, weights[2])],
        );
        (g, m)
    }

    #[test]
    fn test_priority_mix_node() {
        let (mut g, m) = mix_of(Precision::Float, [0.5, 0.1, 0.2]);
        assert_eq!(g.next(m, 0, 0), 85);
    }

    #[test]
    fn test_weight_change_renormalizes() {
        let (mut g, m) = mix_of(Precision::Float, [0.5, 0.1, 0.2]);
        if let Some(Node::Mix(mix)) = g.node_mut(m) {
            assert!(mix.set_weight(0, 0.0));
            assert!(!mix.set_weight(7, 1.0));
        }
        assert_eq!(g.next(m, 16, 0), 70);
    }

    #[test]
    fn test_fixed_precision_bias() {
        let (mut g, m) = mix_of(Precision::Fixed, [0.0, 0.1, 0.2]);
        assert_eq!(g.next(m, 0, 0), 68);
    }
}
