//! Just-intonation frequency ratios that can be applied without floats.

use std::fmt;

/*
Simple Ratios
=============

A relative oscillator plays at a musical interval above or below its root.
Equal temperament would need irrational multipliers; we instead snap each
requested ratio to a *just* interval that integer hardware can apply with a
multiply, a shift and at most two tiny divisions.

Representable values
--------------------

    ratio = 2^bits × scale / (3^third × 5^fifth)

    scale  ∈ {1, 3, 5, 7, 9, 11, 13, 15}
    third  ∈ {0, 1}        one factor of 3 in the denominator
    fifth  ∈ {0, 1}        one factor of 5 in the denominator
    bits   any octave shift

Within one octave [1, 2) this yields the candidates below (sorted):

    1     16/15   9/8    6/5    5/4    4/3    11/8   7/5
    3/2   8/5     13/8   5/3    7/4    9/5    15/8   (2 = next octave)

The 7-, 11- and 13-limit entries are a curated extension; everything else
is a product of fifths and thirds.


Search
------

1. Split the target into an octave and a mantissa m ∈ [1, 2).
2. Scan the candidate list for the largest value ≤ m (bracket below) and
   the smallest value ≥ m (bracket above, falling back to 2).
3. Keep whichever bracket has the smaller symmetric relative error

       err(a) = max(a/m, m/a) - 1

   with ties going to the lower bracket.

This is a constant-time scan, not a continued-fraction search: the answer
is always one of the musical intervals above, and it is deterministic.
*/

/// Octave shifts beyond this are rejected as unreachable.
pub const MAX_OCTAVES: i32 = 20;

/// One entry of the per-octave candidate table.
#[derive(Clone, Copy)]
struct Candidate {
    scale: u8,
    third: bool,
    fifth: bool,
    /// Octave shift that brings the candidate into [1, 2).
    shift: i8,
}

const fn c(scale: u8, third: bool, fifth: bool, shift: i8) -> Candidate {
    Candidate {
        scale,
        third,
        fifth,
        shift,
    }
}

const CANDIDATES: [Candidate; 15] = [
    c(1, false, false, 0),  // 1
    c(1, true, true, 4),    // 16/15
    c(9, false, false, -3), // 9/8
    c(3, false, true, 1),   // 6/5
    c(5, false, false, -2), // 5/4
    c(1, true, false, 2),   // 4/3
    c(11, false, false, -3), // 11/8
    c(7, false, true, 0),   // 7/5
    c(3, false, false, -1), // 3/2
    c(1, false, true, 3),   // 8/5
    c(13, false, false, -3), // 13/8
    c(5, true, false, 0),   // 5/3
    c(7, false, false, -2), // 7/4
    c(9, false, true, 0),   // 9/5
    c(15, false, false, -3), // 15/8
];

/// Why a ratio could not be represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioError {
    /// Zero, negative or NaN.
    NotPositive(f32),
    /// Infinite, or further than [`MAX_OCTAVES`] from unity.
    OutOfRange(f32),
}

impl fmt::Display for RatioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioError::NotPositive(r) => write!(f, "ratio {r} is not positive"),
            RatioError::OutOfRange(r) => write!(f, "ratio {r} is outside ±{MAX_OCTAVES} octaves"),
        }
    }
}

impl std::error::Error for RatioError {}

/// A ratio of the form `2^bits × scale / (3^third × 5^fifth)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleRatio {
    bits: i8,
    scale: u8,
    third: bool,
    fifth: bool,
}

impl SimpleRatio {
    pub const UNITY: SimpleRatio = SimpleRatio {
        bits: 0,
        scale: 1,
        third: false,
        fifth: false,
    };

    /// Snap `target` to the nearest representable musical ratio.
    pub fn approximate(target: f32) -> Result<Self, RatioError> {
        if !(target > 0.0) {
            return Err(RatioError::NotPositive(target));
        }
        if !target.is_finite() {
            return Err(RatioError::OutOfRange(target));
        }

        // log2 can land a hair off for exact powers of two, so fix up.
        let mut octave = target.log2().floor() as i32;
        let mut mantissa = target * 2f32.powi(-octave);
        if mantissa >= 2.0 {
            octave += 1;
            mantissa *= 0.5;
        } else if mantissa < 1.0 {
            octave -= 1;
            mantissa *= 2.0;
        }
        if octave.abs() > MAX_OCTAVES {
            return Err(RatioError::OutOfRange(target));
        }

        let mut below = (CANDIDATES[0], 0);
        let mut above = (CANDIDATES[0], 1);
        let mut found_above = false;
        for cand in CANDIDATES {
            let value = cand_value(cand);
            if value <= mantissa {
                below = (cand, 0);
            }
            if !found_above && value >= mantissa {
                above = (cand, 0);
                found_above = true;
            }
        }

        let err = |cand: Candidate, octave_up: i32| {
            let a = cand_value(cand) * 2f32.powi(octave_up);
            (a / mantissa).max(mantissa / a) - 1.0
        };
        let (best, extra) = if err(above.0, above.1) < err(below.0, below.1) {
            above
        } else {
            below
        };

        Ok(SimpleRatio {
            bits: (octave + extra + best.shift as i32) as i8,
            scale: best.scale,
            third: best.third,
            fifth: best.fifth,
        })
    }

    /// The ratio as a float. Exact for every representable ratio.
    pub fn as_float(&self) -> f32 {
        let numerator = self.scale as f32 * 2f32.powi(self.bits as i32);
        numerator / self.denominator_factor() as f32
    }

    /// Apply the ratio to an integer using only a small multiply, shifts
    /// and divisions by 3 and 5. Saturates to the `i32` range.
    pub fn multiply(&self, val: i32) -> i32 {
        let mut x = val as i64 * self.scale as i64;
        if self.bits > 0 {
            x <<= self.bits;
        }
        if self.third {
            x /= 3;
        }
        if self.fifth {
            x /= 5;
        }
        if self.bits < 0 {
            x >>= -self.bits;
        }
        x.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    pub fn numerator(&self) -> i64 {
        (self.scale as i64) << self.bits.max(0)
    }

    pub fn denominator(&self) -> i64 {
        self.denominator_factor() << (-self.bits).max(0)
    }

    fn denominator_factor(&self) -> i64 {
        let mut d = 1;
        if self.third {
            d *= 3;
        }
        if self.fifth {
            d *= 5;
        }
        d
    }
}

fn cand_value(cand: Candidate) -> f32 {
    SimpleRatio {
        bits: cand.shift,
        scale: cand.scale,
        third: cand.third,
        fifth: cand.fifth,
    }
    .as_float()
}

impl Default for SimpleRatio {
    fn default() -> Self {
        Self::UNITY
    }
}

impl TryFrom<f32> for SimpleRatio {
    type Error = RatioError;

    fn try_from(target: f32) -> Result<Self, Self::Error> {
        Self::approximate(target)
    }
}

impl fmt::Display for SimpleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}
