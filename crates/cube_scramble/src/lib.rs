//! Cube Scramble - WCA-style scramble generation
//!
//! Pure scramble logic with no I/O. Randomness is injected through the
//! [`Entropy`] trait so that generation is reproducible under test.
//!
//! # Architecture
//!
//! - **Notation**: faces, axes, suffixes and move tokens
//! - **Entropy**: uniform draws from a `rand` RNG or a scripted queue
//! - **Generator**: the constrained sequence generator
//! - **Scramble**: the generated token sequence
//!
//! # Example
//!
//! ```
//! use cube_scramble::{RngEntropy, ScrambleGenerator};
//!
//! let generator = ScrambleGenerator::default();
//! let mut entropy = RngEntropy::seeded(7);
//! let scramble = generator.generate(20, &mut entropy);
//! assert_eq!(scramble.len(), 20);
//! assert_eq!(scramble.repeated_face_pairs(), 0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod entropy;
mod generator;
mod notation;
mod scramble;

pub use entropy::{Entropy, EntropyError, RngEntropy, ScriptedEntropy};
pub use generator::{DEFAULT_REPEAT_AXIS_ACCEPTANCE, ScrambleGenerator};
pub use notation::{Axis, Face, Move, ParseMoveError, Suffix};
pub use scramble::Scramble;
