// Purpose: drive the manager from an audio callback
// Control messages are applied between blocks, never while a sample is in flight

pub mod message;

use std::sync::Arc;

use tracing::{error, trace, warn};

use crate::config::EngineConfig;
use crate::dsp::fixed::sample_to_float;
use crate::dsp::library::Wavetables;
use crate::engine::Manager;
use crate::error::BuildError;
use crate::SUBTICKS_PER_SAMPLE;

use self::message::{ControlMessage, MessageReceiver};

/// Owns a [`Manager`] and the consumer end of the control queue.
pub struct Synth<R: MessageReceiver> {
    manager: Manager,
    rx: R,
    tick: i32,
}

impl<R: MessageReceiver> Synth<R> {
    /// Build the catalog and the configured topology, then apply the knob
    /// presets.
    pub fn new(config: &EngineConfig, rx: R) -> Result<Self, BuildError> {
        let tables = Arc::new(Wavetables::from_seed(config.noise_seed));
        let mut manager = Manager::new(tables);
        manager.build(config.topology)?;
        for knob in &config.knobs {
            if !manager.set(knob.pane, knob.slot, knob.value) {
                warn!(pane = knob.pane, slot = ?knob.slot, "preset for a missing pane");
            }
        }
        Ok(Self { manager, rx, tick: 0 })
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }

    /// Current sample time in ticks.
    pub fn tick(&self) -> i32 {
        self.tick
    }

    /// Apply every queued control message.
    pub fn drain(&mut self) {
        while let Some(msg) = self.rx.pop() {
            trace!(?msg, "control message");
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: ControlMessage) {
        match msg {
            ControlMessage::Set { pane, slot, value } => {
                if !self.manager.set(pane as usize, slot, value) {
                    warn!(pane, ?slot, "set on a missing pane");
                }
            }
            ControlMessage::SwapPanes(a, b) => {
                self.manager.swap_panes(a as usize, b as usize);
            }
            ControlMessage::RotatePanes(by) => self.manager.rotate_panes(by),
            ControlMessage::Build(topology) => {
                // Recipes are fixed, so a failure here is a broken recipe
                if let Err(err) = self.manager.build(topology) {
                    error!(%topology, %err, "rebuild failed, output is silent");
                }
            }
        }
    }

    /// One sample, without draining the queue.
    #[inline]
    pub fn next_sample(&mut self) -> i16 {
        let out = self.manager.next(self.tick);
        self.tick = self.tick.wrapping_add(SUBTICKS_PER_SAMPLE);
        out
    }

    pub fn render_block(&mut self, out: &mut [i16]) {
        self.drain();
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Same as [`Synth::render_block`], scaled to [-1, 1].
    pub fn render_block_f32(&mut self, out: &mut [f32]) {
        self.drain();
        for sample in out.iter_mut() {
            *sample = sample_to_float(self.next_sample());
        }
    }
}
