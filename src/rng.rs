use crate::error::EngineError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of randomness for every resolver in the core.
///
/// All randomness flows through a handle passed explicitly into each call, so
/// a fixed seed reproduces an entire simulation run bit-for-bit. There is no
/// ambient/global RNG anywhere in the core.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[low, high]` inclusive. Requires `low <= high`.
    fn next_in(&mut self, low: u32, high: u32) -> u32;
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_in(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}

/// Builds the canonical seeded source (ChaCha8, portable across platforms).
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Builds a seeded source from an optional driver-supplied seed.
///
/// A deterministic run requires a seed; the core refuses to fall back to
/// entropy silently.
pub fn deterministic(seed: Option<u64>) -> Result<ChaCha8Rng, EngineError> {
    match seed {
        Some(seed) => Ok(seeded(seed)),
        None => Err(EngineError::Configuration(
            "deterministic run requires an explicit seed".to_string(),
        )),
    }
}

/// Plays back a pre-recorded sequence of die faces and unit floats.
///
/// Die faces feed `next_in` (clamped into the requested range) and unit
/// floats feed `next_unit`, so a test or replay can pin every roll an
/// encounter consumes. Exhausting either queue is a scripting mistake and
/// panics rather than inventing values.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    faces: VecDeque<u32>,
    units: VecDeque<f64>,
}

impl ScriptedSource {
    pub fn new(faces: impl IntoIterator<Item = u32>, units: impl IntoIterator<Item = f64>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            units: units.into_iter().collect(),
        }
    }

    /// Remaining die faces not yet consumed.
    pub fn faces_left(&self) -> usize {
        self.faces.len()
    }

    /// Remaining unit floats not yet consumed.
    pub fn units_left(&self) -> usize {
        self.units.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        match self.units.pop_front() {
            Some(unit) => unit,
            None => panic!("scripted source exhausted its unit queue"),
        }
    }

    fn next_in(&mut self, low: u32, high: u32) -> u32 {
        match self.faces.pop_front() {
            Some(face) => face.clamp(low, high),
            None => panic!("scripted source exhausted its face queue"),
        }
    }
}
