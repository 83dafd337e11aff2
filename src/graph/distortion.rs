use crate::dsp::distortion::{compand_sample, fold_sample, MAX_FOLD};
use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/// Gamma range accepted by the compander.
pub const GAMMA_RANGE: (f32, f32) = (0.125, 8.0);

/// Power-law compander, `sign(x) × |x/max|^γ × max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compander {
    input: SignalId,
    gamma: f32,
}

impl Compander {
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn set_gamma(&mut self, gamma: f32) {
        self.gamma = gamma.clamp(GAMMA_RANGE.0, GAMMA_RANGE.1);
    }

    #[inline]
    pub(crate) fn next(&self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        compand_sample(graph.next(self.input, tick, phi), self.gamma)
    }
}

/// Wavefolder. Amount 0 is clean, 1 saturates, 2 folds full scale to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Folder {
    input: SignalId,
    amount: f32,
}

impl Folder {
    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount.clamp(0.0, MAX_FOLD);
    }

    #[inline]
    pub(crate) fn next(&self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        fold_sample(graph.next(self.input, tick, phi), self.amount)
    }
}

impl Graph {
    pub fn add_compander(&mut self, input: SignalId, gamma: f32) -> SignalId {
        let mut node = Compander { input, gamma: 1.0 };
        node.set_gamma(gamma);
        self.push(Node::Compander(node))
    }

    pub fn add_folder(&mut self, input: SignalId, amount: f32) -> SignalId {
        let mut node = Folder { input, amount: 0.0 };
        node.set_amount(amount);
        self.push(Node::Folder(node))
    }
}
