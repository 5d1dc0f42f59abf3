//! A generated scramble: an ordered sequence of moves.

use crate::notation::{Move, ParseMoveError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordered sequence of moves, rendered as space-separated notation.
///
/// Serializes as its notation string, e.g. `"R U2 F' L"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Scramble {
    moves: Vec<Move>,
}

impl Scramble {
    /// Creates a scramble from moves.
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    /// Returns the moves in order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns an iterator over the moves.
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if the scramble has no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Counts adjacent pairs that turn the same face.
    ///
    /// Always zero for generated scrambles.
    pub fn repeated_face_pairs(&self) -> usize {
        self.moves
            .windows(2)
            .filter(|pair| pair[0].face() == pair[1].face())
            .count()
    }

    /// Counts adjacent pairs that turn faces on the same axis.
    pub fn same_axis_pairs(&self) -> usize {
        self.moves
            .windows(2)
            .filter(|pair| pair[0].axis() == pair[1].axis())
            .count()
    }
}

impl std::fmt::Display for Scramble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

impl FromStr for Scramble {
    type Err = ParseMoveError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.split_whitespace()
            .map(Move::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl From<Scramble> for String {
    fn from(scramble: Scramble) -> Self {
        scramble.to_string()
    }
}

impl TryFrom<String> for Scramble {
    type Error = ParseMoveError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl<'a> IntoIterator for &'a Scramble {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
