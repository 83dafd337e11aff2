//! Waveshaping curves: compander and folder.
//!
//! Both curves work on the normalized magnitude `a = |x| / SAMPLE_MAX` and
//! restore the sign afterwards, so they are odd-symmetric: `f(-x) = -f(x)`.
//!
//! # Compander
//!
//!   f(a) = a^γ
//!
//!   γ < 1  expands quiet passages (square-root-ish, "compress")
//!   γ = 1  clean
//!   γ > 1  pushes quiet passages down ("expand")
//!
//! # Folder
//!
//! The fold amount `k` runs from 0 to 2.
//!
//! Below 1 the signal blends toward a gentle S-curve:
//!
//!   s(a) = a × (1.5 - 0.5 a²)          (s(1) = 1, s'(1) = 0)
//!   f(a) = (1 - k) a + k s(a)
//!
//! From 1 upward the input is driven by `b = k a` and anything above unity
//! folds back down:
//!
//!   f(a) = s(b)              b ≤ 1
//!   f(a) = 1 - (b - 1)²      b > 1
//!
//! At k = 2 a full-scale input folds all the way back to zero.
//!
//!   k = 0.0  clean
//!   k = 1.0  soft saturation
//!   k = 2.0  full fold

use crate::dsp::fixed::{float_to_sample, sample_to_float};

/// Largest useful fold amount.
pub const MAX_FOLD: f32 = 2.0;

#[inline]
fn soft(a: f32) -> f32 {
    a * (1.5 - 0.5 * a * a)
}

/// Compander curve on a normalized level in [-1, 1].
#[inline]
pub fn compand(x: f32, gamma: f32) -> f32 {
    x.signum() * x.abs().powf(gamma)
}

/// Folder curve on a normalized level in [-1, 1].
#[inline]
pub fn fold(x: f32, amount: f32) -> f32 {
    let k = amount.clamp(0.0, MAX_FOLD);
    let a = x.abs().min(1.0);
    let shaped = if k < 1.0 {
        (1.0 - k) * a + k * soft(a)
    } else {
        let b = k * a;
        if b <= 1.0 {
            soft(b)
        } else {
            1.0 - (b - 1.0) * (b - 1.0)
        }
    };
    x.signum() * shaped
}

/// Compander on a sample.
#[inline]
pub fn compand_sample(x: i16, gamma: f32) -> i16 {
    if x == 0 {
        return 0;
    }
    float_to_sample(compand(sample_to_float(x), gamma))
}

/// Folder on a sample.
#[inline]
pub fn fold_sample(x: i16, amount: f32) -> i16 {
    if x == 0 {
        return 0;
    }
    float_to_sample(fold(sample_to_float(x), amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SAMPLE_MAX, SAMPLE_MIN};

    #[test]
    fn test_compand_unity_gamma_is_clean() {
        for x in [-32767i16, -1000, 0, 1, 12345, 32767] {
            assert_eq!(compand_sample(x, 1.0), x);
        }
    }

    #[test]
    fn test_compand_keeps_endpoints() {
        for gamma in [0.25, 0.5, 2.0, 4.0] {
            assert_eq!(compand_sample(SAMPLE_MAX, gamma), SAMPLE_MAX);
            assert_eq!(compand_sample(SAMPLE_MIN, gamma), SAMPLE_MIN);
            assert_eq!(compand_sample(0, gamma), 0);
        }
    }

    #[test]
    fn test_compand_shapes_quiet_signals() {
        // Half scale with γ = 2 becomes quarter scale
        assert!((compand(0.5, 2.0) - 0.25).abs() < 1e-6);
        assert!((compand(-0.25, 0.5) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fold_zero_is_clean() {
        for x in [-32767i16, -5000, 0, 77, 32767] {
            assert_eq!(fold_sample(x, 0.0), x);
        }
    }

    #[test]
    fn test_fold_is_odd_symmetric() {
        for k in [0.0, 0.4, 1.0, 1.3, 2.0] {
            for x in [0.1f32, 0.5, 0.8, 1.0] {
                assert_eq!(fold(-x, k), -fold(x, k), "k={k} x={x}");
            }
        }
    }

    #[test]
    fn test_fold_is_continuous_at_unity() {
        for x in [0.2f32, 0.6, 1.0] {
            let below = fold(x, 1.0 - 1e-4);
            let at = fold(x, 1.0);
            assert!((below - at).abs() < 1e-3, "x={x}");
        }
    }

    #[test]
    fn test_full_fold_returns_to_zero() {
        assert!(fold(1.0, 2.0).abs() < 1e-6);
        // Peak of the fold sits where k·a crosses unity
        assert!((fold(0.5, 2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fold_stays_in_range() {
        for k in [0.0, 0.5, 1.0, 1.5, 2.0, 9.0] {
            for i in -100..=100 {
                let y = fold(i as f32 / 100.0, k);
                assert!((-1.0..=1.0).contains(&y), "k={k} i={i} y={y}");
            }
        }
    }
}
