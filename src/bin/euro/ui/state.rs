//! Selection state and the local mirror of the patch
//!
//! Every user action is turned into a [`ControlMessage`], applied to the
//! mirror immediately, and returned for the caller to forward to the audio
//! side. The mirror never produces audio.

use euro_dsp::{synth::message::ControlMessage, Manager, Slot};

/// Knob travel per key press.
const STEP: f32 = 1.0 / 64.0;

pub struct UiState {
    manager: Manager,
    pane: usize,
    slot: Slot,
}

impl UiState {
    pub fn new(manager: Manager) -> Self {
        Self {
            manager,
            pane: 0,
            slot: Slot::Main,
        }
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn pane(&self) -> usize {
        self.pane
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn next_pane(&mut self) {
        let count = self.manager.panes().len().max(1);
        self.pane = (self.pane + 1) % count;
    }

    pub fn prev_pane(&mut self) {
        let count = self.manager.panes().len().max(1);
        self.pane = (self.pane + count - 1) % count;
    }

    pub fn select_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }

    /// Move the selected knob by `steps` key presses.
    pub fn turn(&mut self, steps: i32) -> Option<ControlMessage> {
        let value = (self.manager.get(self.pane, self.slot) + steps as f32 * STEP).clamp(0.0, 1.0);
        let msg = ControlMessage::Set {
            pane: u8::try_from(self.pane).ok()?,
            slot: self.slot,
            value,
        };
        self.apply(msg);
        Some(msg)
    }

    pub fn rotate(&mut self, by: i32) -> ControlMessage {
        let msg = ControlMessage::RotatePanes(by);
        self.apply(msg);
        msg
    }

    /// Exchange the first two panes.
    pub fn swap_front(&mut self) -> Option<ControlMessage> {
        if self.manager.panes().len() < 2 {
            return None;
        }
        let msg = ControlMessage::SwapPanes(0, 1);
        self.apply(msg);
        Some(msg)
    }

    fn apply(&mut self, msg: ControlMessage) {
        match msg {
            ControlMessage::Set { pane, slot, value } => {
                self.manager.set(pane as usize, slot, value);
            }
            ControlMessage::SwapPanes(a, b) => {
                self.manager.swap_panes(a as usize, b as usize);
            }
            ControlMessage::RotatePanes(by) => self.manager.rotate_panes(by),
            ControlMessage::Build(topology) => {
                if self.manager.build(topology).is_err() {
                    self.manager.clear();
                }
                self.pane = 0;
            }
        }
    }
}
