//! Leaf sources: constants and looped test sequences.

use crate::dsp::fixed::clip16f;
use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/// A fixed level. Also used as the placeholder while a node is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    value: i16,
}

impl Constant {
    pub const fn new(value: i16) -> Self {
        Self { value }
    }

    pub fn value(&self) -> i16 {
        self.value
    }

    /// Set from a control value in sample units, saturating.
    pub fn set_value(&mut self, value: f32) {
        self.value = clip16f(value);
    }

    #[inline]
    pub(crate) fn next(&self) -> i16 {
        self.value
    }
}

/// Plays a fixed list of samples on a loop, one per tick.
///
/// Pulling it again at the same tick repeats the current sample, so several
/// parents can share one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    samples: Vec<i16>,
    pos: usize,
    last: Option<(i32, i16)>,
}

impl Sequence {
    #[inline]
    pub(crate) fn next(&mut self, tick: i32) -> i16 {
        if let Some((last_tick, out)) = self.last {
            if last_tick == tick {
                return out;
            }
        }
        let Some(&out) = self.samples.get(self.pos) else {
            return 0;
        };
        self.pos = (self.pos + 1) % self.samples.len();
        self.last = Some((tick, out));
        out
    }
}

impl Graph {
    pub fn add_constant(&mut self, value: i16) -> SignalId {
        self.push(Node::Constant(Constant::new(value)))
    }

    /// Add a looping sample sequence. An empty sequence is silent.
    pub fn add_sequence(&mut self, samples: impl Into<Vec<i16>>) -> SignalId {
        self.push(Node::Sequence(Sequence {
            samples: samples.into(),
            pos: 0,
            last: None,
        }))
    }
}
