//! Move type produced by inference and resolution.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::square::Square;

/// A single move together with its rendered notation.
///
/// Values are built by the rules engine or by the inferencer's fallback
/// and are not modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub color: Color,
    pub captured_piece: Option<Piece>,
    pub promotion: Option<Piece>,
    pub notation: String,
    pub is_check: bool,
    pub is_checkmate: bool,
}

impl Move {
    #[inline]
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    /// Coordinate form, e.g. `e2e4` or `e7e8q`
    #[must_use]
    pub fn uci(&self) -> String {
        let mut text = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            text.push(promo.to_char());
        }
        text
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation)
    }
}
