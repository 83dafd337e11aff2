//! Response curves applied by the control layers.
//!
//! All inputs are knob positions, nominally in [0, 1]. Outputs are either
//! normalized (sigmoid) or physical (exponential, range).

/// Resolution of the change-suppression comparison.
pub const CHANGE_BITS: u32 = 12;

/// Quantize a knob position to [`CHANGE_BITS`] bits.
#[inline]
pub fn quantize(v: f32) -> u16 {
    let steps = ((1u32 << CHANGE_BITS) - 1) as f32;
    (v.clamp(0.0, 1.0) * steps).round() as u16
}

/// S-shaped response through (0, 0), (0.5, 0.5) and (1, 1).
///
/// `steepness` near 0 is linear; larger values flatten both ends.
pub fn sigmoid(v: f32, steepness: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if steepness.abs() < 1e-3 {
        return v;
    }
    let s = |x: f32| 1.0 / (1.0 + (-steepness * (x - 0.5)).exp());
    let (lo, hi) = (s(0.0), s(1.0));
    (s(v) - lo) / (hi - lo)
}

/// `low × (high/low)^v`. Falls back to linear when a bound is not positive.
pub fn exponential(v: f32, low: f32, high: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if low > 0.0 && high > 0.0 {
        low * (high / low).powf(v)
    } else {
        low + (high - low) * v
    }
}

/// `v × factor + offset`, held between `low` and `high`.
pub fn range(v: f32, factor: f32, offset: f32, low: f32, high: f32) -> f32 {
    let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
    (v * factor + offset).max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_resolution() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 4095);
        assert_eq!(quantize(2.0), 4095);
        // Changes smaller than one step collapse
        assert_eq!(quantize(0.5), quantize(0.5 + 1e-5));
        assert_ne!(quantize(0.5), quantize(0.5 + 1.5 / 4095.0));
    }

    #[test]
    fn test_sigmoid_endpoints_and_centre() {
        for k in [0.0, 2.0, 8.0, -4.0] {
            assert!(sigmoid(0.0, k).abs() < 1e-6, "k={k}");
            assert!((sigmoid(1.0, k) - 1.0).abs() < 1e-6, "k={k}");
            assert!((sigmoid(0.5, k) - 0.5).abs() < 1e-6, "k={k}");
        }
        // Steep curves are flat near the ends
        assert!(sigmoid(0.1, 8.0) < 0.1);
        assert!(sigmoid(0.9, 8.0) > 0.9);
    }

    #[test]
    fn test_exponential() {
        assert_eq!(exponential(0.0, 20.0, 2000.0), 20.0);
        assert!((exponential(1.0, 20.0, 2000.0) - 2000.0).abs() < 1e-2);
        assert!((exponential(0.5, 20.0, 2000.0) - 200.0).abs() < 1e-2);
        assert_eq!(exponential(0.5, 0.0, 10.0), 5.0);
    }

    #[test]
    fn test_range_additive_and_multiplicative() {
        // Additive: shift by 0.5 and clamp to [0, 1]
        assert_eq!(range(0.25, 1.0, 0.5, 0.0, 1.0), 0.75);
        assert_eq!(range(0.9, 1.0, 0.5, 0.0, 1.0), 1.0);
        // Multiplicative: scale by 4
        assert_eq!(range(0.5, 4.0, 0.0, 0.0, 4.0), 2.0);
        // Reversed bounds still clamp
        assert_eq!(range(10.0, 1.0, 0.0, 3.0, -3.0), 3.0);
    }
}
