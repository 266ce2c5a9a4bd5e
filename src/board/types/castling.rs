//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

/// One of the four castling rights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastlingRight {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

impl CastlingRight {
    /// Canonical record order: K, Q, k, q
    pub const ALL: [CastlingRight; 4] = [
        CastlingRight::WhiteKingside,
        CastlingRight::WhiteQueenside,
        CastlingRight::BlackKingside,
        CastlingRight::BlackQueenside,
    ];

    #[must_use]
    pub const fn new(color: Color, kingside: bool) -> Self {
        match (color, kingside) {
            (Color::White, true) => CastlingRight::WhiteKingside,
            (Color::White, false) => CastlingRight::WhiteQueenside,
            (Color::Black, true) => CastlingRight::BlackKingside,
            (Color::Black, false) => CastlingRight::BlackQueenside,
        }
    }

    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'K' => Some(CastlingRight::WhiteKingside),
            'Q' => Some(CastlingRight::WhiteQueenside),
            'k' => Some(CastlingRight::BlackKingside),
            'q' => Some(CastlingRight::BlackQueenside),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_fen_char(self) -> char {
        match self {
            CastlingRight::WhiteKingside => 'K',
            CastlingRight::WhiteQueenside => 'Q',
            CastlingRight::BlackKingside => 'k',
            CastlingRight::BlackQueenside => 'q',
        }
    }

    const fn bit(self) -> u8 {
        match self {
            CastlingRight::WhiteKingside => CASTLE_WHITE_K,
            CastlingRight::WhiteQueenside => CASTLE_WHITE_Q,
            CastlingRight::BlackKingside => CASTLE_BLACK_K,
            CastlingRight::BlackQueenside => CASTLE_BLACK_Q,
        }
    }
}

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q)
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, right: CastlingRight) -> bool {
        self.0 & right.bit() != 0
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.contains(CastlingRight::new(color, kingside))
    }

    #[inline]
    pub fn insert(&mut self, right: CastlingRight) {
        self.0 |= right.bit();
    }

    #[inline]
    pub fn remove(&mut self, right: CastlingRight) {
        self.0 &= !right.bit();
    }

    /// Insert the right if absent, remove it if present
    #[inline]
    pub fn toggle(&mut self, right: CastlingRight) {
        self.0 ^= right.bit();
    }

    /// Drop both rights of one color
    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.remove(CastlingRight::new(color, true));
        self.remove(CastlingRight::new(color, false));
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Rights currently set, in canonical order
    pub fn iter(self) -> impl Iterator<Item = CastlingRight> {
        CastlingRight::ALL
            .into_iter()
            .filter(move |right| self.contains(*right))
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for right in self.iter() {
            write!(f, "{}", right.to_fen_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut rights = CastlingRights::none();
        rights.toggle(CastlingRight::BlackQueenside);
        assert!(rights.contains(CastlingRight::BlackQueenside));
        rights.toggle(CastlingRight::BlackQueenside);
        assert!(rights.is_empty());
    }

    #[test]
    fn test_display_is_canonical() {
        let mut rights = CastlingRights::none();
        rights.insert(CastlingRight::BlackQueenside);
        rights.insert(CastlingRight::WhiteKingside);
        rights.insert(CastlingRight::BlackKingside);
        assert_eq!(rights.to_string(), "Kkq");
        assert_eq!(CastlingRights::none().to_string(), "-");
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
    }

    #[test]
    fn test_clear_color() {
        let mut rights = CastlingRights::all();
        rights.clear_color(Color::White);
        assert!(!rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
    }
}
