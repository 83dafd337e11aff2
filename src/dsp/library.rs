//! The wavetable catalog shared by every oscillator.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::dsp::wavetable::{HalfFill, Shape, Wavetable};

/// Duty cycles of the full-period pulse tables, in catalog order.
pub const PULSE_DUTIES: [f32; 3] = [0.125, 0.25, 0.375];

/// Positions of the named tables inside the catalog.
///
/// Oscillators refer to tables by index; these anchors keep recipes from
/// hard-coding positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub sine: usize,
    pub triangle: usize,
    pub saw: usize,
    pub square: usize,
    pub noise: usize,
    /// First of [`PULSE_DUTIES`].len() pulse tables.
    pub pulses: usize,
    /// First of `Shape::COUNT²` shaped half tables, rise-major.
    pub shaped: usize,
}

/// An ordered, immutable set of wavetables built once at startup.
#[derive(Debug, Clone)]
pub struct Wavetables {
    tables: Vec<Wavetable>,
    anchors: Anchors,
}

impl Wavetables {
    /// Build the catalog with noise seeded from the OS entropy source.
    pub fn new() -> Self {
        Self::from_rng(&mut StdRng::from_entropy())
    }

    /// Build the catalog with deterministic noise.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// Deterministic when a seed is given, entropy-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    pub fn from_rng(rng: &mut impl Rng) -> Self {
        let mut tables = Vec::new();

        let sine = push(&mut tables, Wavetable::quarter(Shape::Sine, rng));
        let triangle = push(&mut tables, Wavetable::quarter(Shape::Linear, rng));
        let saw = push(&mut tables, Wavetable::half(HalfFill::Whole(Shape::Linear), rng));
        let square = push(&mut tables, Wavetable::half(HalfFill::Whole(Shape::Flat), rng));
        let noise = push(&mut tables, Wavetable::noise(rng));

        let pulses = tables.len();
        for duty in PULSE_DUTIES {
            push(&mut tables, Wavetable::pulse(duty));
        }

        let shaped = tables.len();
        for rise in Shape::ALL {
            for fall in Shape::ALL {
                push(&mut tables, Wavetable::half(HalfFill::Split(rise, fall), rng));
            }
        }

        let anchors = Anchors {
            sine,
            triangle,
            saw,
            square,
            noise,
            pulses,
            shaped,
        };
        debug!(count = tables.len(), ?anchors, "generated wavetables");
        Self { tables, anchors }
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Wavetable> {
        self.tables.get(index)
    }

    /// Table at `index`, wrapping modulo the catalog size.
    ///
    /// Wavetable-index controls go through here so a knob can never select
    /// a table that does not exist.
    #[inline]
    pub fn wrapped(&self, index: usize) -> &Wavetable {
        &self.tables[index % self.tables.len()]
    }

    /// Index of the half table rising along `rise` and falling along `fall`.
    pub fn shaped(&self, rise: Shape, fall: Shape) -> usize {
        self.anchors.shaped + shape_pos(rise) * Shape::COUNT + shape_pos(fall)
    }

    /// Index of the pulse table closest to `duty`.
    pub fn pulse(&self, duty: f32) -> usize {
        let nearest = PULSE_DUTIES
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - duty).abs().total_cmp(&(*b - duty).abs()))
            .map_or(0, |(i, _)| i);
        self.anchors.pulses + nearest
    }
}

impl Default for Wavetables {
    fn default() -> Self {
        Self::new()
    }
}

fn push(tables: &mut Vec<Wavetable>, table: Wavetable) -> usize {
    tables.push(table);
    tables.len() - 1
}

fn shape_pos(shape: Shape) -> usize {
    Shape::ALL.iter().position(|&s| s == shape).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::wavetable::Symmetry;
    use crate::TABLE_SIZE;

    #[test]
    fn test_catalog_layout() {
        let lib = Wavetables::with_seed(1);
        let a = *lib.anchors();
        assert_eq!(lib.len(), 5 + PULSE_DUTIES.len() + Shape::COUNT * Shape::COUNT);
        assert_eq!(lib.get(a.sine).map(|t| t.symmetry()), Some(Symmetry::Quarter));
        assert_eq!(lib.get(a.triangle).map(|t| t.symmetry()), Some(Symmetry::Quarter));
        assert_eq!(lib.get(a.saw).map(|t| t.symmetry()), Some(Symmetry::Half));
        assert_eq!(lib.get(a.square).map(|t| t.symmetry()), Some(Symmetry::Half));
        assert_eq!(lib.get(a.noise).map(|t| t.symmetry()), Some(Symmetry::Full));
        assert_eq!(a.pulses, a.noise + 1);
        assert_eq!(a.shaped, a.pulses + PULSE_DUTIES.len());
    }

    #[test]
    fn test_shaped_lookup() {
        let lib = Wavetables::with_seed(1);
        let first = lib.shaped(Shape::Linear, Shape::Linear);
        let last = lib.shaped(Shape::Flat, Shape::Flat);
        assert_eq!(first, lib.anchors().shaped);
        assert_eq!(last, lib.len() - 1);
        assert_eq!(lib.shaped(Shape::Concave, Shape::Sine), first + Shape::COUNT + 3);
    }

    #[test]
    fn test_pulse_lookup() {
        let lib = Wavetables::with_seed(1);
        let p = lib.anchors().pulses;
        assert_eq!(lib.pulse(0.1), p);
        assert_eq!(lib.pulse(0.25), p + 1);
        assert_eq!(lib.pulse(0.9), p + 2);
    }

    #[test]
    fn test_wrapped_index() {
        let lib = Wavetables::with_seed(1);
        let sine = lib.anchors().sine;
        let direct = lib.wrapped(sine).at(TABLE_SIZE / 4);
        let wrapped = lib.wrapped(sine + lib.len()).at(TABLE_SIZE / 4);
        assert_eq!(direct, wrapped);
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let a = Wavetables::with_seed(42);
        let b = Wavetables::with_seed(42);
        let c = Wavetables::with_seed(43);
        let noise = a.anchors().noise;
        let sample = |lib: &Wavetables| (0..64).map(|i| lib.wrapped(noise).at(i)).collect::<Vec<_>>();
        assert_eq!(sample(&a), sample(&b));
        assert_ne!(sample(&a), sample(&c));
    }
}
