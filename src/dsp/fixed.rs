//! Fixed-point arithmetic shared by every node.

/*
Fixed-Point Samples
===================

The DAC consumes signed 16-bit samples, so every node in the graph speaks
`i16`. Intermediate math happens in wider integers and is saturated back
into range at the end of each node.

Vocabulary
----------

  sample range  [SAMPLE_MIN, SAMPLE_MAX] = [-32767, +32767]. The range is
                symmetric: -32768 is never produced, so negating a sample
                can never overflow.

  Qn            A fixed-point number with n fractional bits. The value 1.0
                is stored as 1 << n.
                  Q8   256   = 1.0   (detune, compander-style coefficients)
                  Q14  16384 = 1.0   (gain, mix weights)

  mult-shift    Multiply a sample by a Qn constant, then shift right by n.
                The product is taken in 64 bits so it can't overflow before
                the shift.


Converting Floats to Qn
-----------------------

    k = trunc(f × 2ⁿ)

Truncation (not rounding) is deliberate and observable: a Q14 mix of
several weights sits a couple of LSB below the float-exact mix. That bias
is stable, so tests pin it down.

    mult_shift(n, k, x) = (k × x) >> n  ≈  f × x

The result is exact when f is a fraction with a power-of-two denominator
no larger than 2ⁿ (0.5, 0.25, 0.75, ...) and within 1 LSB otherwise.
*/

/// Largest sample value.
pub const SAMPLE_MAX: i16 = i16::MAX;

/// Smallest sample value. One code point is sacrificed for symmetry.
pub const SAMPLE_MIN: i16 = -SAMPLE_MAX;

/// Fractional bits used by detune and compander-style coefficients.
pub const Q8: u32 = 8;

/// Fractional bits used by gains and mix weights.
pub const Q14: u32 = 14;

/// Saturate any integer into the sample range.
#[inline]
pub fn clip16(x: impl Into<i64>) -> i16 {
    x.into().clamp(SAMPLE_MIN as i64, SAMPLE_MAX as i64) as i16
}

/// Saturate a float into the sample range, rounding to nearest.
///
/// NaN maps to silence.
#[inline]
pub fn clip16f(x: f32) -> i16 {
    if x.is_nan() {
        return 0;
    }
    x.round().clamp(SAMPLE_MIN as f32, SAMPLE_MAX as f32) as i16
}

/// Convert a float to a Qn fixed-point constant (truncating).
#[inline]
pub fn scale_to_fixed(q: u32, f: f32) -> i32 {
    (f * (1i64 << q) as f32) as i32
}

/// Convert a Qn constant back to a float.
#[inline]
pub fn fixed_to_float(q: u32, k: i32) -> f32 {
    k as f32 / (1i64 << q) as f32
}

/// Multiply `x` by the Qn constant `k` and shift back down, saturating to `i32`.
#[inline]
pub fn mult_shift(q: u32, k: i32, x: i32) -> i32 {
    let product = (k as i64 * x as i64) >> q;
    product.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[inline]
pub fn mult_shift8(k: i32, x: i32) -> i32 {
    mult_shift(Q8, k, x)
}

#[inline]
pub fn mult_shift14(k: i32, x: i32) -> i32 {
    mult_shift(Q14, k, x)
}

/// Map a sample to [-1.0, +1.0].
#[inline]
pub fn sample_to_float(s: i16) -> f32 {
    s as f32 / SAMPLE_MAX as f32
}

/// Map [-1.0, +1.0] to a sample, saturating outside that range.
#[inline]
pub fn float_to_sample(f: f32) -> i16 {
    clip16f(f * SAMPLE_MAX as f32)
}

/// Raw IEEE-754 bits of a float, for word-oriented transports.
#[inline]
pub fn float_to_bits(f: f32) -> u32 {
    f.to_bits()
}

/// Inverse of [`float_to_bits`].
#[inline]
pub fn bits_to_float(bits: u32) -> f32 {
    f32::from_bits(bits)
}
