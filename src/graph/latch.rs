use tracing::warn;

use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/*
Feedback Latch
==============

A one-sample delay register that lets a patch feed its own output back
into itself without recursion.

    ┌───────────────────────────────┐
    │                               ▼
  latch ──► gain ──► mix ──► ... ──► root
    ▲                                 │
    └──────── committed after ────────┘
              the sample

1. Build the latch first. Its source is unknown, so it reads 0.
2. Build the rest of the patch, using the latch like any other signal.
3. `resolve_latch(latch, root)` once the root exists.
4. Every call to `Graph::sample` evaluates the root, then copies each
   latch source's latest output into its register.

Reading the latch never pulls its source, so the graph stays acyclic.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latch {
    source: Option<SignalId>,
    value: i16,
}

impl Latch {
    pub fn source(&self) -> Option<SignalId> {
        self.source
    }

    #[inline]
    pub(crate) fn next(&self) -> i16 {
        self.value
    }
}

impl Graph {
    /// Add an unresolved latch. It outputs 0 until resolved and committed.
    pub fn add_latch(&mut self) -> SignalId {
        let id = self.push(Node::Latch(Latch {
            source: None,
            value: 0,
        }));
        self.latches.push(id);
        id
    }

    /// Point `latch` at the node whose output it should delay.
    pub fn resolve_latch(&mut self, latch: SignalId, source: SignalId) {
        match self.node_mut(latch) {
            Some(Node::Latch(l)) => l.source = Some(source),
            _ => warn!(node = latch.index(), "resolve_latch on a node that is not a latch"),
        }
    }

    /// Copy each latch source's latest output into its register.
    pub(crate) fn commit_latches(&mut self) {
        for i in 0..self.latches.len() {
            let id = self.latches[i];
            let source = match self.node(id) {
                Some(Node::Latch(l)) => l.source,
                _ => None,
            };
            let Some(source) = source else {
                continue;
            };
            let value = self.last(source);
            if let Some(Node::Latch(l)) = self.node_mut(id) {
                l.value = value;
            }
        }
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
    fn test_latch_delays_by_one_sample() {
        let mut g = graph();
        let latch = g.add_latch();
        let src = g.add_sequence([10, 20, 30]);
        // root outputs src, latch watches root
        g.resolve_latch(latch, src);

        let mut delayed = Vec::new();
        for n in 0..4 {
            delayed.push(g.next(latch, n * 16, 0));
            g.sample(src, n * 16);
        }
        assert_eq!(delayed, [0, 10, 20, 30]);
    }

    #[test]
    fn test_self_feedback_accumulates() {
        let mut g = graph();
        let latch = g.add_latch();
        let one = g.add_constant(1000);
        let sum = g.add_mix(
            crate::dsp::mix::MixPolicy::Uniform,
            crate::graph::mix::Precision::Float,
            &[(one, 1.0), (latch, 1.0)],
        );
        g.resolve_latch(latch, sum);

        // y[n] = (1000 + y[n-1]) / 2 approaches 1000
        let out: Vec<i16> = (0..4).map(|n| g.sample(sum, n * 16)).collect();
        assert_eq!(out, [500, 750, 875, 938]);
    }

    #[test]
    fn test_unresolved_latch_is_silent() {
        let mut g = graph();
        let latch = g.add_latch();
        assert_eq!(g.sample(latch, 0), 0);
        assert_eq!(g.sample(latch, 16), 0);
    }
}
