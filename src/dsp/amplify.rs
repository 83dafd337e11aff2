//! Signal multiplication: fixed gain and ring modulation.

/*
Signal Multiplication
=====================

Multiplying a signal by something else is how we control level (gain) and
how we make two signals interact (ring modulation).

Vocabulary
----------

  gain          A multiplier applied to amplitude.
                  gain > 1.0  →  louder (saturates at full scale)
                  gain = 1.0  →  unchanged
                  gain < 1.0  →  quieter
                  gain = 0.0  →  silence

                Stored as a Q14 constant so the hot path is one multiply
                and one shift:

                  out = clip16((k × x) >> 14),   k = trunc(gain × 16384)

  ring mod      Multiplying two audio-rate signals sample by sample.


Ring Modulation
---------------

    Carrier:   [sine wave at 440 Hz]
    Modulator: [sine wave at 110 Hz]
    Output:    [contains 550 Hz and 330 Hz, but NOT 440 Hz or 110 Hz!]

Multiplying two sines produces their sum and difference frequencies:

    sin(A) × sin(B) = ½[cos(A-B) - cos(A+B)]

Two 16-bit samples multiply into a 32-bit product. Shifting right by 16
brings it back to sample scale at half amplitude:

    out = clip16((a × b) >> 16)

Full scale times full scale lands at about half scale, which leaves room
to mix the product against the dry signal for tremolo-style AM.

Slow modulators (< 20 Hz) are heard as volume pulsing rather than as new
pitches. That is the tremolo used by the enveloped FM patch.
*/

use crate::dsp::fixed::{clip16, clip16f, mult_shift14};

/// Ring product of two samples.
#[inline]
pub fn ring(a: i16, b: i16) -> i16 {
    clip16((a as i32 * b as i32) >> 16)
}

/// Apply a Q14 gain constant to a sample.
#[inline]
pub fn gain(k: i32, x: i16) -> i16 {
    clip16(mult_shift14(k, x as i32))
}

/// Float gain, used where exactness matters more than speed.
#[inline]
pub fn gain_float(amp: f32, x: i16) -> i16 {
    clip16f(amp * x as f32)
}
