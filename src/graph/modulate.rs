use crate::graph::{
    node::{Node, SignalId},
    Graph,
};

/*
Phase Modulation (FM)
=====================

The modulator's output becomes the carrier's phase offset:

    out = carrier.next(tick, modulator.next(tick, phi))

Strictly this is phase modulation; the audible result is the same family
of sidebands as classic FM, and phase modulation stays in tune when the
modulator has a DC offset.

Understanding Depth
-------------------

There is no depth parameter on the node itself. The amount of modulation
is the modulator's amplitude, so patches put a gain between the
modulator and this node:

    modulator ──► gain (depth) ──► FM ◄── carrier

Quiet modulator  →  small phase wobble  →  a few soft sidebands
Loud modulator   →  wide phase swing    →  bright, metallic spectrum

To hear the carrier and the modulated signal together ("balance"), the
FM patches mix the dry carrier back in after this node. The carrier
tracks absolute ticks, so pulling it again for the dry path does not
advance it twice.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fm {
    carrier: SignalId,
    modulator: SignalId,
}

impl Fm {
    pub fn carrier(&self) -> SignalId {
        self.carrier
    }

    pub fn modulator(&self) -> SignalId {
        self.modulator
    }

    #[inline]
    pub(crate) fn next(&self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        let phase = graph.next(self.modulator, tick, phi);
        graph.next(self.carrier, tick, phase as i32)
    }
}

impl Graph {
    pub fn add_fm(&mut self, carrier: SignalId, modulator: SignalId) -> SignalId {
        self.push(Node::Fm(Fm { carrier, modulator }))
    }
}
