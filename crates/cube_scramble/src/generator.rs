//! Constrained scramble-sequence generator.
//!
//! Each token is chosen by consulting only the previous token:
//!
//! 1. Draw an axis. If it repeats the previous axis, re-draw with
//!    probability `1 - repeat_axis_acceptance` and keep drawing until a draw
//!    is accepted.
//! 2. Draw a face on that axis. If it repeats the previous face, flip to the
//!    opposite face.
//! 3. Draw a suffix independently.
//!
//! The axis rule is soft (same-axis pairs such as `R L` still occur), the
//! face rule is hard (`R R'` never occurs).

use crate::entropy::Entropy;
use crate::notation::{Axis, Face, Move, Suffix};
use crate::scramble::Scramble;
use derive_getters::Getters;
use tracing::{debug, instrument};

/// Probability of accepting a drawn axis that repeats the previous one.
pub const DEFAULT_REPEAT_AXIS_ACCEPTANCE: f64 = 0.1;

/// Generates scrambles subject to axis/face adjacency rules.
///
/// The generator holds configuration only. Per-call state lives inside
/// [`ScrambleGenerator::generate`], so a single generator can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct ScrambleGenerator {
    /// Probability in `[0, 1]` of keeping an axis draw that repeats the
    /// previous token's axis.
    repeat_axis_acceptance: f64,
}

impl Default for ScrambleGenerator {
    fn default() -> Self {
        Self {
            repeat_axis_acceptance: DEFAULT_REPEAT_AXIS_ACCEPTANCE,
        }
    }
}

/// Previous token, tracked for the length of one generation call.
#[derive(Debug, Clone, Copy, Default)]
struct LastTurn {
    axis: Option<Axis>,
    face: Option<Face>,
}

impl ScrambleGenerator {
    /// Creates a generator with a custom repeat-axis acceptance, clamped into
    /// `[0, 1]`. Non-finite values fall back to the default.
    #[instrument]
    pub fn new(repeat_axis_acceptance: f64) -> Self {
        let repeat_axis_acceptance = if repeat_axis_acceptance.is_finite() {
            repeat_axis_acceptance.clamp(0.0, 1.0)
        } else {
            DEFAULT_REPEAT_AXIS_ACCEPTANCE
        };
        Self {
            repeat_axis_acceptance,
        }
    }

    /// Generates a scramble of exactly `length` moves.
    ///
    /// Returns an empty scramble for `length == 0`. Callers are expected to
    /// have validated `length` against their accepted range already.
    #[instrument(skip(self, entropy))]
    pub fn generate<E: Entropy>(&self, length: usize, mut entropy: E) -> Scramble {
        let redraw_probability = 1.0 - self.repeat_axis_acceptance;
        let mut last = LastTurn::default();
        let mut moves = Vec::with_capacity(length);
        let mut redraws = 0usize;

        while moves.len() < length {
            let mut axis = draw_axis(&mut entropy);
            while Some(axis) == last.axis && entropy.unit() < redraw_probability {
                axis = draw_axis(&mut entropy);
                redraws += 1;
            }

            let faces = axis.faces();
            let mut face = faces[entropy.index(faces.len())];
            if Some(axis) == last.axis && Some(face) == last.face {
                face = face.opposite();
            }

            let suffix = draw_suffix(&mut entropy);

            moves.push(Move::new(face, suffix));
            last = LastTurn {
                axis: Some(axis),
                face: Some(face),
            };
        }

        debug!(length, redraws, "Generated scramble");
        Scramble::new(moves)
    }

    /// Generates `count` independent scrambles of `length` moves each.
    #[instrument(skip(self, entropy))]
    pub fn generate_batch<E: Entropy>(
        &self,
        count: usize,
        length: usize,
        mut entropy: E,
    ) -> Vec<Scramble> {
        (0..count)
            .map(|_| self.generate(length, &mut entropy))
            .collect()
    }
}

fn draw_axis<E: Entropy>(entropy: &mut E) -> Axis {
    // Index is drawn below Axis::COUNT, so from_index cannot miss.
    Axis::from_index(entropy.index(Axis::COUNT)).unwrap_or(Axis::UD)
}

fn draw_suffix<E: Entropy>(entropy: &mut E) -> Suffix {
    Suffix::from_index(entropy.index(Suffix::COUNT)).unwrap_or(Suffix::Clockwise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;

    #[test]
    fn zero_length_draws_nothing() {
        let mut entropy = ScriptedEntropy::new([1, 1, 1], [0.5]);
        let scramble = ScrambleGenerator::default().generate(0, &mut entropy);
        assert!(scramble.is_empty());
        assert_eq!(entropy.remaining_indices(), 3);
        assert_eq!(entropy.remaining_units(), 1);
    }

    #[test]
    fn first_token_never_consults_retry_draw() {
        // axis RL, face L, suffix Double
        let mut entropy = ScriptedEntropy::new([1, 1, 1], [0.0]);
        let scramble = ScrambleGenerator::default().generate(1, &mut entropy);
        assert_eq!(scramble.to_string(), "L2");
        assert_eq!(entropy.remaining_units(), 1);
    }

    #[test]
    fn acceptance_is_clamped() {
        assert_eq!(*ScrambleGenerator::new(3.0).repeat_axis_acceptance(), 1.0);
        assert_eq!(*ScrambleGenerator::new(-1.0).repeat_axis_acceptance(), 0.0);
        assert_eq!(
            *ScrambleGenerator::new(f64::NAN).repeat_axis_acceptance(),
            DEFAULT_REPEAT_AXIS_ACCEPTANCE
        );
    }
}
