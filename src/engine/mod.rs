//! The graph manager: builds one topology at a time and exposes its panes.
//!
//! ```text
//!            build(id)                 clear() / failed build
//!   Empty ──────────────► Built(id) ───────────────────────────► Empty
//!                           │   ▲
//!                           └───┘ build(other id): clear, then rebuild
//! ```
//!
//! Nothing survives a rebuild: the arena, the controls and the panes are all
//! discarded before the next recipe runs. Only the wavetable catalog is
//! shared across builds.

mod pane;

use std::sync::Arc;

use tracing::{debug, info};

use crate::control::{ControlId, Meta};
use crate::dsp::library::Wavetables;
use crate::error::BuildError;
use crate::graph::{Graph, SignalId};
use crate::voices::TopologyId;

pub use pane::{Pane, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Built {
    topology: TopologyId,
    root: SignalId,
}

/// Owns the graph of the current topology and its panes.
pub struct Manager {
    graph: Graph,
    panes: Vec<Pane>,
    built: Option<Built>,
}

impl Manager {
    pub fn new(tables: Arc<Wavetables>) -> Self {
        Self {
            graph: Graph::new(tables),
            panes: Vec::new(),
            built: None,
        }
    }

    /// Discard the current graph and wire `topology` in its place.
    ///
    /// On error the manager is left empty.
    pub fn build(&mut self, topology: TopologyId) -> Result<SignalId, BuildError> {
        self.clear();
        match topology.build(&mut self.graph) {
            Ok(patch) => {
                info!(
                    %topology,
                    nodes = self.graph.len(),
                    bindings = self.graph.binding_count(),
                    controls = self.graph.control_count(),
                    panes = patch.panes.len(),
                    "built topology"
                );
                self.panes = patch.panes;
                self.built = Some(Built {
                    topology,
                    root: patch.root,
                });
                Ok(patch.root)
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    /// Build from a raw identifier, as received from a panel or a config file.
    pub fn build_id(&mut self, id: u8) -> Result<SignalId, BuildError> {
        match TopologyId::try_from(id) {
            Ok(topology) => self.build(topology),
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.panes.clear();
        self.built = None;
    }

    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    pub fn topology(&self) -> Option<TopologyId> {
        self.built.map(|b| b.topology)
    }

    pub fn root(&self) -> Option<SignalId> {
        self.built.map(|b| b.root)
    }

    /// Produce the sample at `tick`. Silent while empty.
    #[inline]
    pub fn next(&mut self, tick: i32) -> i16 {
        match self.built {
            Some(built) => self.graph.sample(built.root, tick),
            None => 0,
        }
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn pane(&self, index: usize) -> Option<&Pane> {
        self.panes.get(index)
    }

    /// The control shown at `slot` of pane `pane`.
    pub fn control(&self, pane: usize, slot: Slot) -> Option<ControlId> {
        self.pane(pane).map(|p| p.control(slot))
    }

    /// Turn a knob. Returns false when the pane does not exist.
    pub fn set(&mut self, pane: usize, slot: Slot, value: f32) -> bool {
        match self.control(pane, slot) {
            Some(id) => {
                self.graph.set(id, value);
                true
            }
            None => false,
        }
    }

    /// Current knob position, 0 for a missing pane.
    pub fn get(&self, pane: usize, slot: Slot) -> f32 {
        self.control(pane, slot).map_or(0.0, |id| self.graph.get(id))
    }

    pub fn meta(&self, pane: usize, slot: Slot) -> Option<&Meta> {
        self.control(pane, slot).and_then(|id| self.graph.meta(id))
    }

    /// Exchange two panes. Out-of-range indices leave the order untouched.
    pub fn swap_panes(&mut self, a: usize, b: usize) -> bool {
        if a >= self.panes.len() || b >= self.panes.len() {
            return false;
        }
        self.panes.swap(a, b);
        debug!(a, b, "swapped panes");
        true
    }

    /// Rotate the pane order: positive `by` moves every pane towards the
    /// front, the first one wrapping to the back.
    pub fn rotate_panes(&mut self, by: i32) {
        let len = self.panes.len();
        if len < 2 {
            return;
        }
        let shift = by.rem_euclid(len as i32) as usize;
        self.panes.rotate_left(shift);
        debug!(by, "rotated panes");
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
}
