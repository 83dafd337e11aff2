use crate::error::BuildError;
use crate::graph::{
    node::{FreqId, Node, SignalId},
    Graph,
};
use crate::{PERIOD, PHI_FUDGE_BITS};

/*
Wavetable Oscillator
====================

A phase accumulator reading one of the shared wavetables.

Time
----

`tick` is absolute sample time in subticks (16 per sample). The
oscillator remembers the last tick it saw and advances by the difference:

    time += (tick - last_tick) × freq          (mod PERIOD)

With freq = Hz << 4 and 16 ticks per sample, one second of ticks adds
Hz × PERIOD, i.e. Hz whole cycles.

Because the advance is a difference, pulling the same oscillator twice in
one sample (once inside an FM pair, once for the dry mix) reads the same
phase both times instead of running at double speed.

Phase offset
------------

`phi` shifts the read position without touching `time`. It is scaled by
the oscillator's own frequency so that the same `phi` moves every
oscillator by the same fraction of a sample, then shifted down by
PHI_FUDGE_BITS:

    read = time + (phi × freq) >> PHI_FUDGE_BITS

FM feeds the modulator's output in here.

Changes to the frequency binding or the wavetable index land on the next
call with no interpolation.
*/

#[derive(Debug, Clone)]
pub struct Oscillator {
    freq: FreqId,
    wavedex: usize,
    time: i64,
    last_tick: i32,
}

impl Oscillator {
    pub fn freq(&self) -> FreqId {
        self.freq
    }

    pub fn wavedex(&self) -> usize {
        self.wavedex
    }

    /// Select a different catalog table. Wrapped into range on lookup.
    pub fn set_wavedex(&mut self, wavedex: usize) {
        self.wavedex = wavedex;
    }

    #[inline]
    pub(crate) fn next(&mut self, graph: &mut Graph, tick: i32, phi: i32) -> i16 {
        let freq = graph.frequency(self.freq) as i64;
        let elapsed = tick.wrapping_sub(self.last_tick) as i64;
        self.last_tick = tick;
        self.time = (self.time + elapsed * freq).rem_euclid(PERIOD);
        let offset = (phi as i64 * freq) >> PHI_FUDGE_BITS;
        graph.tables().wrapped(self.wavedex).at_time(self.time + offset)
    }
}

impl Graph {
    /// Add an oscillator reading catalog table `wavedex` at the frequency
    /// of `freq`.
    pub fn add_oscillator(&mut self, freq: FreqId, wavedex: usize) -> Result<SignalId, BuildError> {
        if wavedex >= self.tables().len() {
            return Err(BuildError::InvalidWavetable(wavedex));
        }
        Ok(self.push(Node::Oscillator(Oscillator {
            freq,
            wavedex,
            time: 0,
            last_tick: 0,
        })))
    }
}
