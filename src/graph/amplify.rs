use crate::dsp::amplify::ring;
use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/// Ring modulation of two signals.
///
/// Both inputs see the same `tick` and `phi`. Mix the result against the
/// first input for tremolo-style AM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Am {
    a: SignalId,
    b: SignalId,
}

impl Am {
    #[inline]
    pub(crate) fn next(&self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        let a = graph.next(self.a, tick, phi);
        let b = graph.next(self.b, tick, phi);
        ring(a, b)
    }
}

impl Graph {
    pub fn add_am(&mut self, a: SignalId, b: SignalId) -> SignalId {
        self.push(Node::Am(Am { a, b }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dsp::library::Wavetables;

    #[test]
    fn test_am_is_ring_product() {
        let mut g = Graph::new(Arc::new(Wavetables::with_seed(0)));
        let a = g.add_sequence([32767, -32767, 16384, 0]);
        let b = g.add_sequence([32767, 32767, 32767, 32767]);
        let am = g.add_am(a, b);
        let out: Vec<i16> = (0..4).map(|n| g.next(am, n * 16, 0)).collect();
        assert_eq!(out, [16383, -16384, 8191, 0]);
    }
}
