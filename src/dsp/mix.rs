//! Weighted N-way mixing in float and Q14.

/*
Weighted Mixing
===============

A mix combines N sources by adding them with weights. Keeping the weights
summing to 1.0 keeps the output inside the sample range no matter how many
sources are added.

Vocabulary
----------

  weight        How much of one source ends up in the output.

  uniform       All weights are normalized together:
                  w_i' = w_i / Σ w

  priority      The first source ("dry") keeps exactly its given weight,
                clamped to [0, 1]. The remaining 1 - w_0 is shared by the
                other sources in proportion to their own weights:

                  w_0' = clamp(w_0, 0, 1)
                  w_i' = (1 - w_0') × w_i / Σ_{j≥1} w_j     (i ≥ 1)

                This is how "balance" works in the FM patches: one knob
                trades the dry carrier against everything else.

Worked example (priority)
-------------------------

    sources  [100, 30, 90]
    weights  [0.5, 0.1, 0.2]

    w_0' = 0.5
    rest = 0.5 shared 1:2   →  w_1' = 1/6, w_2' = 1/3

    out  = 50 + 5 + 30 = 85

    With w_0 = 0 the rest is the whole:  w' = [0, 1/3, 2/3]
    out  = 10 + 60 = 70


Float vs Q14
------------

The float path rounds once at the end. The Q14 path converts every weight
with `scale_to_fixed` (truncating) and shifts each product down on its
own, so it loses up to one LSB per source:

    Q14 with w' = [0, 1/3, 2/3]:
      5461 × 30 >> 14  =  9
      10922 × 90 >> 14 = 59
      out              = 68      (float: 70)

That bias is stable and documented, not a defect.


Degenerate weights
------------------

Negative or non-finite weights count as 0. When every weight that is
supposed to share a budget is 0, the budget is split evenly instead, so a
mix never goes silent just because its knobs are all the way down.
*/

use crate::dsp::fixed::{clip16, clip16f, mult_shift14, scale_to_fixed, Q14};

/// How the raw weights become the effective weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MixPolicy {
    Uniform,
    Priority,
}

#[inline]
fn sanitize(w: f32) -> f32 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        0.0
    }
}

/// Spread `budget` over `weights` in proportion, writing into `out`.
fn share(weights: &[f32], budget: f32, out: &mut [f32]) {
    let total: f32 = weights.iter().copied().map(sanitize).sum();
    if total > 0.0 {
        for (o, &w) in out.iter_mut().zip(weights) {
            *o = budget * sanitize(w) / total;
        }
    } else if !weights.is_empty() {
        let even = budget / weights.len() as f32;
        out.iter_mut().for_each(|o| *o = even);
    }
}

/// Effective weights under `policy`. `out` must be as long as `weights`.
pub fn normalize(policy: MixPolicy, weights: &[f32], out: &mut [f32]) {
    debug_assert_eq!(weights.len(), out.len());
    match policy {
        MixPolicy::Uniform => share(weights, 1.0, out),
        MixPolicy::Priority => {
            let Some((&first, rest)) = weights.split_first() else {
                return;
            };
            let w0 = if first.is_finite() { first.clamp(0.0, 1.0) } else { 0.0 };
            out[0] = w0;
            share(rest, 1.0 - w0, &mut out[1..]);
        }
    }
}

/// Float-exact mix, rounded once at the end.
#[inline]
pub fn mix_float(samples: &[i16], weights: &[f32]) -> i16 {
    debug_assert_eq!(samples.len(), weights.len());
    let acc: f32 = samples
        .iter()
        .zip(weights)
        .map(|(&s, &w)| s as f32 * w)
        .sum();
    clip16f(acc)
}

/// Q14 mix: every product is shifted down on its own.
#[inline]
pub fn mix_fixed(samples: &[i16], weights: &[i32]) -> i16 {
    debug_assert_eq!(samples.len(), weights.len());
    let acc: i64 = samples
        .iter()
        .zip(weights)
        .map(|(&s, &k)| mult_shift14(k, s as i32) as i64)
        .sum();
    clip16(acc)
}

/// Convert effective float weights to Q14.
pub fn to_fixed(weights: &[f32], out: &mut [i32]) {
    for (o, &w) in out.iter_mut().zip(weights) {
        *o = scale_to_fixed(Q14, w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCES: [i16; 3] = [100, 30, 90];

    fn effective(policy: MixPolicy, weights: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; weights.len()];
        normalize(policy, weights, &mut out);
        out
    }

    fn fixed(weights: &[f32]) -> Vec<i32> {
        let mut out = vec![0; weights.len()];
        to_fixed(weights, &mut out);
        out
    }

    #[test]
    fn test_priority_mix() {
        let w = effective(MixPolicy::Priority, &[0.5, 0.1, 0.2]);
        assert_eq!(w[0], 0.5);
        assert_eq!(mix_float(&SOURCES, &w), 85);
    }

    #[test]
    fn test_priority_mix_with_dry_muted() {
        let w = effective(MixPolicy::Priority, &[0.0, 0.1, 0.2]);
        assert_eq!(mix_float(&SOURCES, &w), 70);
        // The Q14 path sits two LSB lower
        assert_eq!(mix_fixed(&SOURCES, &fixed(&w)), 68);
    }

    #[test]
    fn test_uniform_weights_sum_to_one() {
        let w = effective(MixPolicy::Uniform, &[1.0, 3.0]);
        assert_eq!(w, [0.25, 0.75]);
        assert_eq!(mix_float(&[400, 800], &w), 700);
    }

    #[test]
    fn test_priority_first_weight_is_clamped() {
        let w = effective(MixPolicy::Priority, &[1.7, 0.3, 0.3]);
        assert_eq!(w, [1.0, 0.0, 0.0]);
        let w = effective(MixPolicy::Priority, &[-0.5, 0.3, 0.1]);
        assert_eq!(w[0], 0.0);
        assert!((w[1] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_zero_weights_split_evenly() {
        let w = effective(MixPolicy::Uniform, &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(w, [0.25; 4]);
        let w = effective(MixPolicy::Priority, &[0.5, 0.0, f32::NAN]);
        assert_eq!(w, [0.5, 0.25, 0.25]);
    }

    #[test]
    fn test_full_scale_mix_does_not_overflow() {
        let w = effective(MixPolicy::Uniform, &[1.0; 4]);
        assert_eq!(mix_float(&[i16::MAX; 4], &w), i16::MAX);
        // 4 × (32767 >> 2) loses the shifted-out bits of every source
        assert_eq!(mix_fixed(&[i16::MAX; 4], &fixed(&w)), 4 * 8191);
    }

    #[test]
    fn test_empty_mix_is_silent() {
        let mut out: [f32; 0] = [];
        normalize(MixPolicy::Priority, &[], &mut out);
        assert_eq!(mix_float(&[], &[]), 0);
        assert_eq!(mix_fixed(&[], &[]), 0);
    }
}
