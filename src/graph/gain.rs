use crate::dsp::amplify::{gain, gain_float};
use crate::dsp::fixed::{scale_to_fixed, Q14};
use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/// Largest amplitude a gain stage accepts.
pub const MAX_AMP: f32 = 4.0;

/// Q14 gain: `clip16((k × in) >> 14)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gain {
    input: SignalId,
    amp: f32,
    fixed: i32,
}

impl Gain {
    pub fn amp(&self) -> f32 {
        self.amp
    }

    pub fn set_amp(&mut self, amp: f32) {
        self.amp = amp.clamp(0.0, MAX_AMP);
        self.fixed = scale_to_fixed(Q14, self.amp);
    }

    #[inline]
    pub(crate) fn next(&self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        gain(self.fixed, graph.next(self.input, tick, phi))
    }
}

/// Same contract as [`Gain`], computed in floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatGain {
    input: SignalId,
    amp: f32,
}

impl FloatGain {
    pub fn amp(&self) -> f32 {
        self.amp
    }

    pub fn set_amp(&mut self, amp: f32) {
        self.amp = amp.clamp(0.0, MAX_AMP);
    }

    #[inline]
    pub(crate) fn next(&self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        gain_float(self.amp, graph.next(self.input, tick, phi))
    }
}

impl Graph {
    pub fn add_gain(&mut self, input: SignalId, amp: f32) -> SignalId {
        let mut node = Gain {
            input,
            amp: 0.0,
            fixed: 0,
        };
        node.set_amp(amp);
        self.push(Node::Gain(node))
    }

    pub fn add_float_gain(&mut self, input: SignalId, amp: f32) -> SignalId {
        let mut node = FloatGain { input, amp: 0.0 };
        node.set_amp(amp);
        self.push(Node::FloatGain(node))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dsp::library::Wavetables;

    fn graph() -> Graph {
        Graph::new(Arc::new(Wavetables::with_seed(0)))
    }

    #[test]
    fn test_fixed_and_float_agree_on_binary_fractions() {
        let mut g = graph();
        let src = g.add_sequence([1000, -1000, 32767, -32767, 3]);
        let fixed = g.add_gain(src, 0.75);
        let float = g.add_float_gain(src, 0.75);
        for n in 0..5 {
            let a = g.next(fixed, n * 16, 0);
            let b = g.next(float, n * 16, 0);
            // The float path rounds, the fixed path floors
            assert!((a - b).abs() <= 1, "sample {n}: {a} vs {b}");
        }
    }

    #[test]
    fn test_gain_saturates() {
        let mut g = graph();
        let src = g.add_constant(20_000);
        let loud = g.add_gain(src, 2.0);
        assert_eq!(g.next(loud, 0, 0), i16::MAX);
    }

    #[test]
    fn test_amp_is_clamped() {
        let mut g = graph();
        let src = g.add_constant(100);
        let id = g.add_gain(src, 99.0);
        match g.node(id) {
            Some(Node::Gain(node)) => assert_eq!(node.amp(), MAX_AMP),
            other => panic!("unexpected node {other:?}"),
        }
    }
}
