use std::sync::Arc;

use crate::control::Control;
use crate::dsp::library::Wavetables;
use crate::graph::{
    frequency::FrequencyBinding,
    node::{Node, SignalId},
    source::Constant,
};

/*
Graph Arena
===========

All nodes of one patch live in a single arena and point at each other by
index. A parent never owns its children; it holds their `SignalId` and
pulls them through the arena when it needs a sample.

    sources   [osc, osc, fm, gain, mix, ...]   signal nodes
    bindings  [abs, rel, ...]                  frequency bindings
    controls  [param, range, blank, ...]       knob chains

Patches are built bottom-up, so a child always has a lower index than its
parent. The only back edge is the feedback latch, which reads its source's
*previous* output rather than calling it.


Pulling a sample
----------------

To evaluate node `i` we need `&mut` to it and `&mut` to the arena at the
same time. The node is swapped out for a placeholder, evaluated against
the arena, then put back:

    node = take(sources[i])      sources[i] = Constant(0)
    out  = node.next(arena, ...) children pulled recursively
    sources[i] = node
    sources[i].last = out

`last` is what the latches commit after the root finishes the sample.
*/

/// One arena entry: the node and its most recent output.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) node: Node,
    pub(crate) last: i16,
}

/// Owns every node, frequency binding and control of one patch.
#[derive(Debug, Clone)]
pub struct Graph {
    tables: Arc<Wavetables>,
    pub(crate) sources: Vec<Entry>,
    pub(crate) bindings: Vec<FrequencyBinding>,
    pub(crate) controls: Vec<Control>,
    pub(crate) latches: Vec<SignalId>,
}

impl Graph {
    pub fn new(tables: Arc<Wavetables>) -> Self {
        Self {
            tables,
            sources: Vec::new(),
            bindings: Vec::new(),
            controls: Vec::new(),
            latches: Vec::new(),
        }
    }

    pub fn tables(&self) -> &Wavetables {
        &self.tables
    }

    pub fn shared_tables(&self) -> Arc<Wavetables> {
        Arc::clone(&self.tables)
    }

    /// Drop every node, binding and control. Handles from before the call
    /// must not be used again.
    pub fn clear(&mut self) {
        self.sources.clear();
        self.bindings.clear();
        self.controls.clear();
        self.latches.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of signal nodes.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    pub(crate) fn push(&mut self, node: Node) -> SignalId {
        self.sources.push(Entry { node, last: 0 });
        SignalId(self.sources.len() - 1)
    }

    pub fn node(&self, id: SignalId) -> Option<&Node> {
        self.sources.get(id.0).map(|slot| &slot.node)
    }

    pub(crate) fn node_mut(&mut self, id: SignalId) -> Option<&mut Node> {
        self.sources.get_mut(id.0).map(|slot| &mut slot.node)
    }

    /// Output of `id` from the last time it was pulled.
    pub fn last(&self, id: SignalId) -> i16 {
        self.sources.get(id.0).map_or(0, |slot| slot.last)
    }

    /// Pull one sample from `id`.
    #[inline]
    pub fn next(&mut self, id: SignalId, tick: i32, phi: i32) -> i16 {
        let Some(slot) = self.sources.get_mut(id.0) else {
            return 0;
        };
        let mut node = std::mem::replace(&mut slot.node, Node::Constant(Constant::new(0)));
        let out = node.next(self, tick, phi);
        let slot = &mut self.sources[id.0];
        slot.node = node;
        slot.last = out;
        out
    }

    /// Produce one output sample from `root` and close the feedback loops.
    #[inline]
    pub fn sample(&mut self, root: SignalId, tick: i32) -> i16 {
        let out = self.next(root, tick, 0);
        self.commit_latches();
        out
    }
}
