//! Single-period lookup tables with symmetry folding.

use rand::Rng;

use crate::dsp::fixed::float_to_sample;
use crate::{PERIOD, TABLE_SIZE};

/*
Wavetables
==========

Every oscillator reads its waveform out of a table holding exactly one
period. Computing sin() per sample is too slow for the target, so shapes
are rendered once at startup and looked up forever after.

Symmetry
--------

Most musical waveforms repeat themselves inside one period, so we store
only the part that carries information and derive the rest:

  QUARTER   Stores the rising first quadrant (0 → peak).
            Sine and triangle.

              quadrant 0:  T(i)           = q[i]
              quadrant 1:  T(N/2 - 1 - i) = T(i)      (mirror)
              quadrant 2:  T(N/2 + i)     = -T(i)     (negate)
              quadrant 3:  mirror of quadrant 2

  HALF      Stores the first half period. The second half is the first
            one rotated about the centre point:

              T(N - 1 - i) = -T(i)

            Saw, square and the two-shape "shaped" tables.

  FULL      Stores everything, never reflected. Noise and pulses whose
            duty cycle breaks the half-wave symmetry.

Whatever the class, every table answers `at(idx)` for idx ∈ [0, N), so
any table can stand in for any other at the same index.

Stored entries are sampled at the centre of each slot, (i + 0.5) / len,
which is what makes the mirror relations exact rather than off by one.


Phase to index
--------------

An oscillator accumulates phase in units where one cycle is PERIOD.
`tick2idx` folds that into [0, N):

    idx = (time mod PERIOD) × N / PERIOD
*/

/// How much of the period a table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Quarter,
    Half,
    Full,
}

impl Symmetry {
    /// Entries physically stored for this class.
    pub const fn stored_len(self) -> usize {
        match self {
            Symmetry::Quarter => TABLE_SIZE / 4,
            Symmetry::Half => TABLE_SIZE / 2,
            Symmetry::Full => TABLE_SIZE,
        }
    }
}

/// A rising segment generator over normalized position x ∈ [0, 1].
///
/// Every shape starts near 0 and ends near 1 except `Noise`, which is
/// uniform in [-1, 1], and `Flat`, which holds 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Linear,
    Concave,
    Convex,
    Sine,
    Noise,
    Flat,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Linear,
        Shape::Concave,
        Shape::Convex,
        Shape::Sine,
        Shape::Noise,
        Shape::Flat,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Shape by index, wrapping modulo the shape count.
    pub const fn from_index(index: usize) -> Shape {
        Self::ALL[index % Self::COUNT]
    }

    pub fn eval(self, x: f32, rng: &mut impl Rng) -> f32 {
        match self {
            Shape::Linear => x,
            Shape::Concave => x * x,
            Shape::Convex => 1.0 - (1.0 - x) * (1.0 - x),
            Shape::Sine => (x * std::f32::consts::FRAC_PI_2).sin(),
            Shape::Noise => rng.gen_range(-1.0..=1.0),
            Shape::Flat => 1.0,
        }
    }
}

/// How the stored half of a half-wave table is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfFill {
    /// One shape rises across the whole half (saw, square).
    Whole(Shape),
    /// First quadrant rises with one shape, second falls with the other.
    Split(Shape, Shape),
}

/// One period of a waveform, stored according to its [`Symmetry`].
#[derive(Debug, Clone)]
pub struct Wavetable {
    symmetry: Symmetry,
    data: Box<[i16]>,
}

impl Wavetable {
    /// Render `f` over the stored segment. `f` receives the slot-centre
    /// position in [0, 1) and returns a level in [-1, 1].
    pub fn from_fn(symmetry: Symmetry, mut f: impl FnMut(f32) -> f32) -> Self {
        let len = symmetry.stored_len();
        let data = (0..len)
            .map(|i| float_to_sample(f((i as f32 + 0.5) / len as f32)))
            .collect();
        Self { symmetry, data }
    }

    /// Quarter-wave table whose first quadrant rises along `shape`.
    pub fn quarter(shape: Shape, rng: &mut impl Rng) -> Self {
        Self::from_fn(Symmetry::Quarter, |x| shape.eval(x, rng))
    }

    pub fn half(fill: HalfFill, rng: &mut impl Rng) -> Self {
        match fill {
            HalfFill::Whole(shape) => Self::from_fn(Symmetry::Half, |x| shape.eval(x, rng)),
            HalfFill::Split(rise, fall) => Self::from_fn(Symmetry::Half, |x| {
                if x < 0.5 {
                    rise.eval(x * 2.0, rng)
                } else {
                    fall.eval((1.0 - x) * 2.0, rng)
                }
            }),
        }
    }

    /// Full-period pulse, high for the first `duty` of the cycle.
    pub fn pulse(duty: f32) -> Self {
        Self::from_fn(Symmetry::Full, |x| if x < duty { 1.0 } else { -1.0 })
    }

    /// Full-period uniform noise.
    pub fn noise(rng: &mut impl Rng) -> Self {
        Self::from_fn(Symmetry::Full, |_| rng.gen_range(-1.0..=1.0))
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Value at `idx`, which must be in [0, TABLE_SIZE).
    #[inline]
    pub fn at(&self, idx: usize) -> i16 {
        debug_assert!(idx < TABLE_SIZE);
        let d = &self.data;
        match self.symmetry {
            Symmetry::Quarter => {
                let q = TABLE_SIZE / 4;
                match idx / q {
                    0 => d[idx],
                    1 => d[TABLE_SIZE / 2 - 1 - idx],
                    2 => -d[idx - TABLE_SIZE / 2],
                    _ => -d[TABLE_SIZE - 1 - idx],
                }
            }
            Symmetry::Half => {
                if idx < TABLE_SIZE / 2 {
                    d[idx]
                } else {
                    -d[TABLE_SIZE - 1 - idx]
                }
            }
            Symmetry::Full => d[idx],
        }
    }

    /// Value at an accumulated phase.
    #[inline]
    pub fn at_time(&self, time: i64) -> i16 {
        self.at(tick2idx(time))
    }
}

/// Fold an accumulated phase into a table index.
#[inline]
pub fn tick2idx(time: i64) -> usize {
    (time.rem_euclid(PERIOD) * TABLE_SIZE as i64 / PERIOD) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_MAX;
    use rand::{rngs::StdRng, SeedableRng};

    const N: usize = TABLE_SIZE;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_quarter_table_symmetry() {
        for shape in Shape::ALL {
            let t = Wavetable::quarter(shape, &mut rng());
            for i in 0..N / 2 {
                assert_eq!(t.at(N / 2 - 1 - i), t.at(i), "{shape:?} mirror at {i}");
                assert_eq!(t.at(N / 2 + i), -t.at(i), "{shape:?} negate at {i}");
            }
        }
    }

    #[test]
    fn test_half_table_symmetry() {
        let fills = [
            HalfFill::Whole(Shape::Linear),
            HalfFill::Whole(Shape::Flat),
            HalfFill::Split(Shape::Concave, Shape::Noise),
        ];
        for fill in fills {
            let t = Wavetable::half(fill, &mut rng());
            for i in 0..N {
                assert_eq!(t.at(N - 1 - i), -t.at(i), "{fill:?} at {i}");
            }
        }
    }

    #[test]
    fn test_sine_quarter_shape() {
        let t = Wavetable::quarter(Shape::Sine, &mut rng());
        // Peak sits at the end of the first quadrant
        assert!(t.at(N / 4 - 1) > SAMPLE_MAX - 5);
        assert!(t.at(0).abs() < 60);
        assert!(t.at(3 * N / 4) < -SAMPLE_MAX + 5);
        // Compare against sin() at the slot centres
        for i in (0..N).step_by(37) {
            let x = (i as f32 + 0.5) / N as f32;
            let expected = (x * std::f32::consts::TAU).sin() * SAMPLE_MAX as f32;
            assert!((t.at(i) as f32 - expected).abs() <= 2.0, "idx {i}");
        }
    }

    #[test]
    fn test_saw_and_square() {
        let saw = Wavetable::half(HalfFill::Whole(Shape::Linear), &mut rng());
        assert!(saw.at(0) < saw.at(N / 4));
        assert!(saw.at(N / 4) < saw.at(N / 2 - 1));
        assert!(saw.at(N / 2) < 0);

        let square = Wavetable::half(HalfFill::Whole(Shape::Flat), &mut rng());
        assert!((0..N / 2).all(|i| square.at(i) == SAMPLE_MAX));
        assert!((N / 2..N).all(|i| square.at(i) == -SAMPLE_MAX));
    }

    #[test]
    fn test_pulse_duty() {
        let t = Wavetable::pulse(0.25);
        let high = (0..N).filter(|&i| t.at(i) > 0).count();
        assert_eq!(high, N / 4);
        assert_eq!(t.symmetry(), Symmetry::Full);
    }

    #[test]
    fn test_split_fill_is_asymmetric() {
        let t = Wavetable::half(HalfFill::Split(Shape::Linear, Shape::Concave), &mut rng());
        // Rising quadrant is linear, falling quadrant is concave
        let rise = t.at(N / 8);
        let fall = t.at(3 * N / 8);
        assert!(rise > fall, "linear half-way {rise} vs concave half-way {fall}");
    }

    #[test]
    fn test_shape_index_wraps() {
        assert_eq!(Shape::from_index(0), Shape::Linear);
        assert_eq!(Shape::from_index(Shape::COUNT + 3), Shape::Sine);
    }

    #[test]
    fn test_tick2idx_wraps() {
        assert_eq!(tick2idx(0), 0);
        assert_eq!(tick2idx(PERIOD), 0);
        assert_eq!(tick2idx(PERIOD / 2), N / 2);
        assert_eq!(tick2idx(-1), N - 1);
        assert_eq!(tick2idx(3 * PERIOD + PERIOD / 4), N / 4);
        for t in (0..PERIOD).step_by(99_991) {
            assert!(tick2idx(t) < N);
        }
    }
}
