//! Injectable randomness for scramble generation.
//!
//! The generator only ever asks for two kinds of draw: a uniform index
//! below some bound and a uniform value in `[0, 1)`. Production code wraps a
//! `rand` RNG in [`RngEntropy`]; tests replay fixed draws with
//! [`ScriptedEntropy`].
//!
//! # Invariants
//!
//! - `index(bound)` returns a value in `0..bound` for every `bound > 0`
//! - `unit()` returns a value in `[0, 1)`
//! - Implementations hold no global state; two instances never share a stream

use derive_more::{Display, Error};
use rand::{Rng, SeedableRng, rngs::OsRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

/// A source of uniform random draws.
pub trait Entropy {
    /// Returns a uniform index in `0..bound`.
    ///
    /// `bound` is always non-zero; the generator only draws from its fixed
    /// axis, face and suffix tables.
    fn index(&mut self, bound: usize) -> usize;

    /// Returns a uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn index(&mut self, bound: usize) -> usize {
        (**self).index(bound)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// [`Entropy`] backed by any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: Rng> RngEntropy<R> {
    /// Wraps an existing RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<ChaCha8Rng> {
    /// Creates a ChaCha8 stream seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError`] if the OS entropy pool cannot be read.
    #[instrument]
    pub fn from_os() -> Result<Self, EntropyError> {
        let rng = ChaCha8Rng::from_rng(OsRng)
            .map_err(|e| EntropyError::new(format!("Failed to seed from OS entropy: {}", e)))?;
        Ok(Self::new(rng))
    }

    /// Creates a reproducible ChaCha8 stream from a fixed seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "Seeding deterministic entropy");
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Entropy for RngEntropy<R> {
    fn index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Largest value [`ScriptedEntropy::unit`] falls back to once its queue is
/// empty. It is at or above every re-draw threshold, so an exhausted script
/// never keeps the generator in its retry loop.
const EXHAUSTED_UNIT: f64 = 1.0 - f64::EPSILON;

/// [`Entropy`] that replays a fixed script of draws.
///
/// Index draws and unit draws are queued separately and consumed in order.
/// An exhausted index queue counts upward (`0, 1, 2, ...` modulo the bound);
/// an exhausted unit queue yields a value just below `1.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEntropy {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
    fallback: usize,
}

impl ScriptedEntropy {
    /// Creates a script from index draws and unit draws.
    pub fn new(
        indices: impl IntoIterator<Item = usize>,
        units: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            units: units.into_iter().collect(),
            fallback: 0,
        }
    }

    /// Returns `true` once every scripted draw has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.indices.is_empty() && self.units.is_empty()
    }

    /// Returns the number of index draws not yet consumed.
    pub fn remaining_indices(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of unit draws not yet consumed.
    pub fn remaining_units(&self) -> usize {
        self.units.len()
    }
}

impl Entropy for ScriptedEntropy {
    fn index(&mut self, bound: usize) -> usize {
        match self.indices.pop_front() {
            Some(index) if index < bound => index,
            Some(index) => {
                warn!(index, bound, "Scripted index out of range, wrapping");
                index % bound
            }
            None => {
                let index = self.fallback % bound;
                self.fallback = self.fallback.wrapping_add(1);
                index
            }
        }
    }

    fn unit(&mut self) -> f64 {
        self.units
            .pop_front()
            .map(|unit| unit.clamp(0.0, EXHAUSTED_UNIT))
            .unwrap_or(EXHAUSTED_UNIT)
    }
}

/// Entropy source failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Entropy error: {} at {}:{}", message, file, line)]
pub struct EntropyError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EntropyError {
    /// Creates a new entropy error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_draws_replay_in_order() {
        let mut entropy = ScriptedEntropy::new([2, 0, 1], [0.5, 0.25]);
        assert_eq!(entropy.index(3), 2);
        assert_eq!(entropy.unit(), 0.5);
        assert_eq!(entropy.index(3), 0);
        assert_eq!(entropy.index(3), 1);
        assert_eq!(entropy.unit(), 0.25);
        assert!(entropy.is_exhausted());
    }

    #[test]
    fn exhausted_script_accepts() {
        let mut entropy = ScriptedEntropy::default();
        assert_eq!(entropy.index(2), 0);
        assert_eq!(entropy.index(2), 1);
        assert_eq!(entropy.index(2), 0);
        assert!(entropy.unit() >= 0.9);
        assert!(entropy.unit() < 1.0);
    }

    #[test]
    fn out_of_range_script_wraps() {
        let mut entropy = ScriptedEntropy::new([5], Vec::<f64>::new());
        assert_eq!(entropy.index(3), 2);
    }

    #[test]
    fn seeded_streams_repeat() {
        let mut a = RngEntropy::seeded(42);
        let mut b = RngEntropy::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.index(18), b.index(18));
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn rng_draws_stay_in_range() {
        let mut entropy = RngEntropy::seeded(1);
        for _ in 0..1000 {
            assert!(entropy.index(3) < 3);
            let unit = entropy.unit();
            assert!((0.0..1.0).contains(&unit));
        }
    }

    #[test]
    fn os_seeded_entropy_is_available() {
        let mut entropy = RngEntropy::from_os().expect("OS entropy");
        assert!(entropy.index(6) < 6);
    }
}
