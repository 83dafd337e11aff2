use crate::graph::{
    amplify::Am,
    distortion::{Compander, Folder},
    filter::BoxcarNode,
    gain::{FloatGain, Gain},
    latch::Latch,
    mix::Mix,
    modulate::Fm,
    oscillator::Oscillator,
    source::{Constant, Sequence},
    Graph,
};

/// Handle to a signal node inside a [`Graph`].
///
/// Handles are plain indices. They stay valid until the graph is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(pub(crate) usize);

impl SignalId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a frequency binding inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FreqId(pub(crate) usize);

impl FreqId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Every kind of signal producer the graph can hold.
///
/// The set is closed, so dispatch is a `match` rather than a trait object
/// and nodes live inline in the arena.
#[derive(Debug, Clone)]
pub enum Node {
    Constant(Constant),
    Sequence(Sequence),
    Oscillator(Oscillator),
    Fm(Fm),
    Am(Am),
    Gain(Gain),
    FloatGain(FloatGain),
    Boxcar(BoxcarNode),
    Compander(Compander),
    Folder(Folder),
    Mix(Mix),
    Latch(Latch),
}

impl Node {
    /// Produce one sample. Children are pulled through `graph`.
    #[inline]
    pub(crate) fn next(&mut self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        match self {
            Node::Constant(n) => n.next(),
            Node::Sequence(n) => n.next(tick),
            Node::Oscillator(n) => n.next(graph, tick, phi),
            Node::Fm(n) => n.next(graph, tick, phi),
            Node::Am(n) => n.next(graph, tick, phi),
            Node::Gain(n) => n.next(graph, tick, phi),
            Node::FloatGain(n) => n.next(graph, tick, phi),
            Node::Boxcar(n) => n.next(graph, tick, phi),
            Node::Compander(n) => n.next(graph, tick, phi),
            Node::Folder(n) => n.next(graph, tick, phi),
            Node::Mix(n) => n.next(graph, tick, phi),
            Node::Latch(n) => n.next(),
        }
    }

    /// Short name for logs and the front-end.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Constant(_) => "constant",
            Node::Sequence(_) => "sequence",
            Node::Oscillator(_) => "oscillator",
            Node::Fm(_) => "fm",
            Node::Am(_) => "am",
            Node::Gain(_) => "gain",
            Node::FloatGain(_) => "float-gain",
            Node::Boxcar(_) => "boxcar",
            Node::Compander(_) => "compander",
            Node::Folder(_) => "folder",
            Node::Mix(_) => "mix",
            Node::Latch(_) => "latch",
        }
    }
}
