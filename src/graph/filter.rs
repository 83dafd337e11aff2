use crate::dsp::boxcar::Boxcar;
use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/// Moving-average low-pass around [`Boxcar`].
///
/// Pulls its input once per call and expects one call per sample.
#[derive(Debug, Clone)]
pub struct BoxcarNode {
    input: SignalId,
    boxcar: Boxcar,
}

impl BoxcarNode {
    pub fn length(&self) -> usize {
        self.boxcar.len()
    }

    /// Resize the window, discarding history when the length changes.
    pub fn set_length(&mut self, length: usize) {
        self.boxcar.set_length(length);
    }

    #[inline]
    pub(crate) fn next(&mut self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        let input = graph.next(self.input, tick, phi);
        self.boxcar.process(input)
    }
}

impl Graph {
    pub fn add_boxcar(&mut self, input: SignalId, length: usize) -> SignalId {
        self.push(Node::Boxcar(BoxcarNode {
            input,
            boxcar: Boxcar::new(length),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dsp::library::Wavetables;

    #[test]
    fn test_boxcar_node_impulse() {
        let mut g = Graph::new(Arc::new(Wavetables::with_seed(0)));
        let src = g.add_sequence([0, 0, 100, 0, 0, 0, 0, 0, 0]);
        let smooth = g.add_boxcar(src, 3);
        let out: Vec<i16> = (0..7).map(|n| g.next(smooth, n * 16, 0)).collect();
        assert_eq!(out, [0, 0, 33, 33, 33, 0, 0]);
    }
}
