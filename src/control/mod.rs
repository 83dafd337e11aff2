//! Knob-to-parameter mapping.
//!
//! A control is one link in a chain that starts at a pane slot and ends at a
//! graph parameter. `Graph::set` hands the value to the head of the chain;
//! every layer transforms it and passes it on until a [`Target`] writes it
//! into a node or a frequency binding.
//!
//! ```text
//! pane slot ──► Change ──► Exponential(20..2000 Hz) ──► Param(Frequency)
//! ```
//!
//! Layers only ever point at controls that already exist, so a chain always
//! terminates. A layer aimed at an unknown or later control is turned into an
//! unwired blank. Blank controls are the one exception: they are created
//! before their target and pointed at it later with [`Graph::unblank`].

pub mod meta;
pub mod remap;
pub mod target;

use tracing::warn;

use crate::graph::Graph;

pub use meta::Meta;
pub use target::Target;

/// Handle to a control inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub(crate) usize);

impl ControlId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a control does with an incoming value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    /// Holds the value, and forwards it once pointed at a real control.
    Blank { target: Option<ControlId> },
    /// Forwards only when the value moves by at least one 12-bit step.
    Change { target: ControlId, last: Option<u16> },
    /// Sigmoid response with steepness `meta.linearity`.
    Sigmoid { target: ControlId },
    /// Exponential sweep from `meta.low` to `meta.high`.
    Exponential { target: ControlId },
    /// `v × factor + offset`, clamped to [`meta.low`, `meta.high`].
    Range {
        target: ControlId,
        factor: f32,
        offset: f32,
    },
    /// Terminal: writes into the graph.
    Param(Target),
}

/// One link of a control chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    kind: ControlKind,
    meta: Meta,
    value: f32,
}

enum Step {
    Forward(ControlId, f32),
    Apply(Target, f32),
    Hold,
}

impl Control {
    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Last value this control received.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, ControlKind::Blank { target: None })
    }

    fn next_link(&self) -> Option<ControlId> {
        match self.kind {
            ControlKind::Blank { target } => target,
            ControlKind::Change { target, .. }
            | ControlKind::Sigmoid { target }
            | ControlKind::Exponential { target }
            | ControlKind::Range { target, .. } => Some(target),
            ControlKind::Param(_) => None,
        }
    }

    fn step(&mut self, v: f32) -> Step {
        self.value = v;
        let meta = self.meta;
        match &mut self.kind {
            ControlKind::Blank { target: Some(target) } => Step::Forward(*target, v),
            ControlKind::Blank { target: None } => Step::Hold,
            ControlKind::Change { target, last } => {
                let q = remap::quantize(v);
                if *last == Some(q) {
                    Step::Hold
                } else {
                    *last = Some(q);
                    Step::Forward(*target, v)
                }
            }
            ControlKind::Sigmoid { target } => Step::Forward(*target, remap::sigmoid(v, meta.linearity)),
            ControlKind::Exponential { target } => {
                Step::Forward(*target, remap::exponential(v, meta.low, meta.high))
            }
            ControlKind::Range { target, factor, offset } => {
                Step::Forward(*target, remap::range(v, *factor, *offset, meta.low, meta.high))
            }
            ControlKind::Param(target) => Step::Apply(*target, v),
        }
    }
}

impl Graph {
    pub fn add_control(&mut self, kind: ControlKind, meta: Meta) -> ControlId {
        let id = ControlId(self.controls.len());
        let mut control = Control { kind, meta, value: 0.0 };
        if let Some(target) = control.next_link() {
            if target.0 >= id.0 {
                warn!(
                    control = id.0,
                    target = target.0,
                    "layer target does not exist, leaving it blank"
                );
                control.kind = ControlKind::Blank { target: None };
            }
        }
        self.controls.push(control);
        id
    }

    /// Terminal control writing into `target`.
    pub fn add_param(&mut self, target: Target, meta: Meta) -> ControlId {
        self.add_control(ControlKind::Param(target), meta)
    }

    /// A placeholder for a slot that is not wired (yet).
    pub fn add_blank(&mut self) -> ControlId {
        self.add_control(ControlKind::Blank { target: None }, Meta::BLANK)
    }

    /// Suppress repeats of the same 12-bit knob position. Takes the
    /// target's metadata.
    pub fn add_change(&mut self, target: ControlId) -> ControlId {
        let meta = self.meta(target).copied().unwrap_or_default();
        self.add_control(ControlKind::Change { target, last: None }, meta)
    }

    pub fn add_sigmoid(&mut self, target: ControlId, meta: Meta) -> ControlId {
        self.add_control(ControlKind::Sigmoid { target }, meta)
    }

    pub fn add_exponential(&mut self, target: ControlId, meta: Meta) -> ControlId {
        self.add_control(ControlKind::Exponential { target }, meta)
    }

    pub fn add_range(&mut self, target: ControlId, factor: f32, offset: f32, meta: Meta) -> ControlId {
        self.add_control(ControlKind::Range { target, factor, offset }, meta)
    }

    /// Range layer that only shifts: `v + offset`.
    pub fn add_additive(&mut self, target: ControlId, offset: f32, meta: Meta) -> ControlId {
        self.add_range(target, 1.0, offset, meta)
    }

    /// Range layer that only scales: `v × factor`.
    pub fn add_multiplicative(&mut self, target: ControlId, factor: f32, meta: Meta) -> ControlId {
        self.add_range(target, factor, 0.0, meta)
    }

    /// Point a blank control at `target` and take over its metadata.
    ///
    /// Refused when `blank` is not a blank, or when the chain starting at
    /// `target` already leads back to `blank`.
    pub fn unblank(&mut self, blank: ControlId, target: ControlId) -> bool {
        let is_blank = matches!(
            self.controls.get(blank.0).map(Control::kind),
            Some(ControlKind::Blank { .. })
        );
        if !is_blank || self.reaches(target, blank) {
            warn!(blank = blank.0, target = target.0, "refusing to unblank");
            return false;
        }
        let Some(meta) = self.meta(target).copied() else {
            warn!(target = target.0, "unblank target does not exist");
            return false;
        };
        let control = &mut self.controls[blank.0];
        control.kind = ControlKind::Blank { target: Some(target) };
        control.meta = meta;
        true
    }

    fn reaches(&self, from: ControlId, to: ControlId) -> bool {
        let mut cursor = Some(from);
        for _ in 0..=self.controls.len() {
            match cursor {
                Some(id) if id == to => return true,
                Some(id) => cursor = self.controls.get(id.0).and_then(Control::next_link),
                None => return false,
            }
        }
        true
    }

    /// Send `value` down the chain starting at `id`.
    ///
    /// Non-finite values are dropped with a warning; everything else is
    /// accepted and clamped by the layers.
    pub fn set(&mut self, id: ControlId, value: f32) {
        if !value.is_finite() {
            warn!(control = id.0, value, "ignoring non-finite control value");
            return;
        }
        let mut pending = Some((id, value));
        let mut hops = 0;
        while let Some((id, v)) = pending.take() {
            if hops > self.controls.len() {
                warn!(control = id.0, "control chain does not terminate");
                return;
            }
            hops += 1;
            let Some(control) = self.controls.get_mut(id.0) else {
                warn!(control = id.0, "set on unknown control");
                return;
            };
            match control.step(v) {
                Step::Forward(next, out) => pending = Some((next, out)),
                Step::Apply(target, out) => self.apply(target, out),
                Step::Hold => {}
            }
        }
    }

    /// Last value received by `id`, 0 if unknown.
    pub fn get(&self, id: ControlId) -> f32 {
        self.controls.get(id.0).map_or(0.0, Control::value)
    }

    pub fn meta(&self, id: ControlId) -> Option<&Meta> {
        self.controls.get(id.0).map(Control::meta)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }
}
