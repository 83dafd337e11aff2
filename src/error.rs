use std::fmt;

use crate::dsp::ratio::RatioError;

/// Why a topology could not be built.
///
/// Build errors are fatal for the graph: the manager is left empty rather
/// than holding a partial patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildError {
    /// No recipe is registered under this identifier.
    UnknownTopology(u8),
    /// A relative frequency asked for a ratio that cannot be represented.
    UnreachableRatio(f32),
    /// An oscillator referenced a wavetable outside the catalog.
    InvalidWavetable(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownTopology(id) => write!(f, "unknown topology id {id}"),
            BuildError::UnreachableRatio(r) => write!(f, "frequency ratio {r} is unreachable"),
            BuildError::InvalidWavetable(idx) => write!(f, "wavetable {idx} is not in the catalog"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<RatioError> for BuildError {
    fn from(err: RatioError) -> Self {
        match err {
            RatioError::NotPositive(r) | RatioError::OutOfRange(r) => BuildError::UnreachableRatio(r),
        }
    }
}
