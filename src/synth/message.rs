#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::fixed::{bits_to_float, float_to_bits};
use crate::engine::Slot;
use crate::voices::TopologyId;

/// A request from the user-facing side, applied by the audio side between
/// blocks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    /// Turn the knob at `slot` of pane `pane` to a normalized position.
    Set { pane: u8, slot: Slot, value: f32 },
    SwapPanes(u8, u8),
    RotatePanes(i32),
    /// Replace the running topology.
    Build(TopologyId),
}

/*
Word layout
-----------

Some FIFOs only carry machine words. A message packs into one u64:

    63      56 55      48 47      40 39      32 31                     0
    ┌─────────┬──────────┬──────────┬──────────┬────────────────────────┐
    │   tag   │    a     │    b     │ reserved │        payload         │
    └─────────┴──────────┴──────────┴──────────┴────────────────────────┘

    Set          tag 1   a = pane   b = slot    payload = f32 bits
    SwapPanes    tag 2   a, b = panes
    RotatePanes  tag 3                          payload = i32 bits
    Build        tag 4   a = topology id
*/

const TAG_SET: u8 = 1;
const TAG_SWAP: u8 = 2;
const TAG_ROTATE: u8 = 3;
const TAG_BUILD: u8 = 4;

fn pack(tag: u8, a: u8, b: u8, payload: u32) -> u64 {
    (tag as u64) << 56 | (a as u64) << 48 | (b as u64) << 40 | payload as u64
}

impl ControlMessage {
    pub fn encode(self) -> u64 {
        match self {
            ControlMessage::Set { pane, slot, value } => pack(TAG_SET, pane, slot.index() as u8, float_to_bits(value)),
            ControlMessage::SwapPanes(a, b) => pack(TAG_SWAP, a, b, 0),
            ControlMessage::RotatePanes(by) => pack(TAG_ROTATE, 0, 0, by as u32),
            ControlMessage::Build(topology) => pack(TAG_BUILD, topology as u8, 0, 0),
        }
    }

    /// Inverse of [`ControlMessage::encode`]. `None` for words no message
    /// encodes to.
    pub fn decode(word: u64) -> Option<Self> {
        let tag = (word >> 56) as u8;
        let a = (word >> 48) as u8;
        let b = (word >> 40) as u8;
        let payload = word as u32;
        match tag {
            TAG_SET => Some(ControlMessage::Set {
                pane: a,
                slot: Slot::from_index(b as usize)?,
                value: bits_to_float(payload),
            }),
            TAG_SWAP => Some(ControlMessage::SwapPanes(a, b)),
            TAG_ROTATE => Some(ControlMessage::RotatePanes(payload as i32)),
            TAG_BUILD => TopologyId::try_from(a).ok().map(ControlMessage::Build),
            _ => None,
        }
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Word-oriented queue: undecodable words are skipped.
#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<u64> {
    fn pop(&mut self) -> Option<ControlMessage> {
        while let Ok(word) = Consumer::pop(self) {
            if let Some(msg) = ControlMessage::decode(word) {
                return Some(msg);
            }
            tracing::warn!(word, "dropping undecodable control word");
        }
        None
    }
}

/// Receiver for engines driven without a UI.
impl MessageReceiver for () {
    fn pop(&mut self) -> Option<ControlMessage> {
        None
    }
}
