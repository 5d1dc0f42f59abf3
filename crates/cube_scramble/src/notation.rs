//! Face-turn notation: faces, axes, suffixes and move tokens.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// One of the six cube faces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Face {
    /// Up.
    U,
    /// Down.
    D,
    /// Right.
    R,
    /// Left.
    L,
    /// Front.
    F,
    /// Back.
    B,
}

impl Face {
    /// Returns the axis this face turns around.
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::UD,
            Face::R | Face::L => Axis::RL,
            Face::F | Face::B => Axis::FB,
        }
    }

    /// Returns the face on the other side of the cube.
    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::R => Face::L,
            Face::L => Face::R,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    /// Returns the face's sticker color as a hex string.
    pub fn color_hex(self) -> &'static str {
        match self {
            Face::U => "#FFFF00",
            Face::R => "#FF0000",
            Face::F => "#0000FF",
            Face::D => "#FFFFFF",
            Face::L => "#FFA500",
            Face::B => "#008000",
        }
    }

    /// Returns the face's sticker color as RGB components.
    pub fn color_rgb(self) -> (u8, u8, u8) {
        match self {
            Face::U => (0xFF, 0xFF, 0x00),
            Face::R => (0xFF, 0x00, 0x00),
            Face::F => (0x00, 0x00, 0xFF),
            Face::D => (0xFF, 0xFF, 0xFF),
            Face::L => (0xFF, 0xA5, 0x00),
            Face::B => (0x00, 0x80, 0x00),
        }
    }

    /// Parses a single face letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        Face::iter().find(|face| face.letter() == letter)
    }

    /// Returns the face letter.
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::R => 'R',
            Face::L => 'L',
            Face::F => 'F',
            Face::B => 'B',
        }
    }
}

/// A pair of opposite faces. Turns on the same axis commute.
///
/// Index order is fixed: `UD = 0`, `RL = 1`, `FB = 2`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Axis {
    /// Up/Down.
    UD,
    /// Right/Left.
    RL,
    /// Front/Back.
    FB,
}

impl Axis {
    /// Number of axes.
    pub const COUNT: usize = 3;

    /// Returns the axis for an index in `0..3`.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::UD),
            1 => Some(Axis::RL),
            2 => Some(Axis::FB),
            _ => None,
        }
    }

    /// Returns the index of this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::UD => 0,
            Axis::RL => 1,
            Axis::FB => 2,
        }
    }

    /// Returns the two faces on this axis, in draw order.
    pub fn faces(self) -> [Face; 2] {
        match self {
            Axis::UD => [Face::U, Face::D],
            Axis::RL => [Face::R, Face::L],
            Axis::FB => [Face::F, Face::B],
        }
    }
}

/// Turn amount and direction appended to a face letter.
///
/// Index order is fixed: `Clockwise = 0`, `Double = 1`, `CounterClockwise = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Suffix {
    /// Quarter turn clockwise (no suffix).
    Clockwise,
    /// Half turn (`2`).
    Double,
    /// Quarter turn counter-clockwise (`'`).
    CounterClockwise,
}

impl Suffix {
    /// Number of suffixes.
    pub const COUNT: usize = 3;

    /// Returns the suffix for an index in `0..3`.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suffix::Clockwise),
            1 => Some(Suffix::Double),
            2 => Some(Suffix::CounterClockwise),
            _ => None,
        }
    }

    /// Returns the notation text.
    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::Clockwise => "",
            Suffix::Double => "2",
            Suffix::CounterClockwise => "'",
        }
    }
}

impl std::fmt::Display for Suffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single face turn, e.g. `R2` or `U'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{}{}", face, suffix)]
pub struct Move {
    face: Face,
    suffix: Suffix,
}

impl Move {
    /// Creates a move from a face and suffix.
    pub fn new(face: Face, suffix: Suffix) -> Self {
        Self { face, suffix }
    }

    /// Returns the turned face.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Returns the turn suffix.
    pub fn suffix(&self) -> Suffix {
        self.suffix
    }

    /// Returns the axis of the turned face.
    pub fn axis(&self) -> Axis {
        self.face.axis()
    }

    /// Returns all 18 distinct move tokens.
    pub fn all() -> Vec<Self> {
        Face::iter()
            .flat_map(|face| Suffix::iter().map(move |suffix| Move::new(face, suffix)))
            .collect()
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let face = chars
            .next()
            .and_then(Face::from_letter)
            .ok_or_else(|| ParseMoveError::new(format!("Unknown face in move '{}'", token)))?;

        let suffix = match chars.as_str() {
            "" => Suffix::Clockwise,
            "2" => Suffix::Double,
            "'" => Suffix::CounterClockwise,
            other => {
                return Err(ParseMoveError::new(format!(
                    "Unknown suffix '{}' in move '{}'",
                    other, token
                )));
            }
        };

        Ok(Move::new(face, suffix))
    }
}

/// Move parsing error.
#[derive(Debug, Clone, Display, Error)]
#[display("Parse error: {} at {}:{}", message, file, line)]
pub struct ParseMoveError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ParseMoveError {
    /// Creates a new parse error with caller location tracking.
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
    fn every_face_belongs_to_exactly_one_axis() {
        for axis in Axis::iter() {
            for face in axis.faces() {
                assert_eq!(face.axis(), axis);
            }
        }
        assert_eq!(Face::iter().count(), 6);
    }

    #[test]
    fn opposite_faces_share_an_axis() {
        for face in Face::iter() {
            assert_ne!(face, face.opposite());
            assert_eq!(face.axis(), face.opposite().axis());
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn index_tables_round_trip() {
        for axis in Axis::iter() {
            assert_eq!(Axis::from_index(axis.index()), Some(axis));
        }
        assert_eq!(Axis::from_index(Axis::COUNT), None);
        assert_eq!(Suffix::from_index(Suffix::COUNT), None);
    }

    #[test]
    fn face_display_is_single_letter() {
        for face in Face::iter() {
            assert_eq!(face.to_string(), face.letter().to_string());
        }
    }
}
