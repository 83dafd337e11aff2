use crate::control::ControlId;

/// Position of a control inside a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Slot {
    Main,
    Left,
    Right,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Main, Slot::Left, Slot::Right];

    pub fn index(self) -> usize {
        match self {
            Slot::Main => 0,
            Slot::Left => 1,
            Slot::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }
}

/// Three controls shown together on one view of the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pane {
    controls: [ControlId; 3],
}

impl Pane {
    pub fn new(main: ControlId, left: ControlId, right: ControlId) -> Self {
        Self {
            controls: [main, left, right],
        }
    }

    pub fn control(&self, slot: Slot) -> ControlId {
        self.controls[slot.index()]
    }

    pub fn controls(&self) -> &[ControlId; 3] {
        &self.controls
    }
}
