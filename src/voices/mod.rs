//! Fixed topology recipes.
//!
//! Each recipe wires a complete patch into an empty [`Graph`] and returns
//! its root together with the panes that expose it. Recipes are plain code,
//! not data: study them to see how the graph primitives fit together.
//!
//! | id | topology      | panes |
//! |----|---------------|-------|
//! | 0  | `Simple`      | 2     |
//! | 1  | `Fm`          | 3     |
//! | 2  | `FmFeedback`  | 3     |
//! | 3  | `FmEnvelope`  | 4     |
//! | 4  | `Chord`       | 4     |

mod chord;
mod fm;
mod fm_envelope;
mod fm_feedback;
mod knobs;
mod simple;

use std::fmt;

use crate::engine::Pane;
use crate::error::BuildError;
use crate::graph::{Graph, SignalId};

/// Selects which recipe [`crate::Manager::build`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TopologyId {
    /// One oscillator, smoothed and scaled.
    #[default]
    Simple = 0,
    /// Two-operator phase modulation.
    Fm = 1,
    /// Two-operator FM with the output fed back into the modulator.
    FmFeedback = 2,
    /// Two-operator FM with a tremolo stage.
    FmEnvelope = 3,
    /// Root plus three just-intoned intervals.
    Chord = 4,
}

impl TopologyId {
    pub const ALL: [TopologyId; 5] = [
        TopologyId::Simple,
        TopologyId::Fm,
        TopologyId::FmFeedback,
        TopologyId::FmEnvelope,
        TopologyId::Chord,
    ];

    /// Number of panes the recipe exposes.
    pub fn pane_count(self) -> usize {
        match self {
            TopologyId::Simple => 2,
            TopologyId::Fm | TopologyId::FmFeedback => 3,
            TopologyId::FmEnvelope | TopologyId::Chord => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TopologyId::Simple => "simple",
            TopologyId::Fm => "fm",
            TopologyId::FmFeedback => "fm-feedback",
            TopologyId::FmEnvelope => "fm-envelope",
            TopologyId::Chord => "chord",
        }
    }

    /// Wire the recipe into `graph`, which must be empty.
    pub(crate) fn build(self, graph: &mut Graph) -> Result<Patch, BuildError> {
        match self {
            TopologyId::Simple => simple::build(graph),
            TopologyId::Fm => fm::build(graph),
            TopologyId::FmFeedback => fm_feedback::build(graph),
            TopologyId::FmEnvelope => fm_envelope::build(graph),
            TopologyId::Chord => chord::build(graph),
        }
    }
}

impl TryFrom<u8> for TopologyId {
    type Error = BuildError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        TopologyId::ALL
            .get(id as usize)
            .copied()
            .ok_or(BuildError::UnknownTopology(id))
    }
}

impl fmt::Display for TopologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a recipe leaves behind: the node to pull samples from and the
/// panes in their initial order.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub root: SignalId,
    pub panes: Vec<Pane>,
}
