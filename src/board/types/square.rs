//! Square types and utilities.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the chess board, represented as (rank, file).
///
/// Ordering follows the textual record: rank 8 down to rank 1, and
/// file a to h within a rank, so `a8 < b8 < ... < h8 < a7 < ... < h1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(pub usize, pub usize); // (rank, file)

impl Square {
    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        self.1
    }

    /// File letter, `'a'..='h'`
    #[inline]
    #[must_use]
    pub const fn file_char(self) -> char {
        (b'a' + self.1 as u8) as char
    }

    /// Rank digit, `'1'..='8'`
    #[inline]
    #[must_use]
    pub const fn rank_char(self) -> char {
        (b'1' + self.0 as u8) as char
    }

    /// Step by `(dr, df)`; `None` when the result leaves the board.
    #[inline]
    #[must_use]
    pub fn offset(self, dr: isize, df: isize) -> Option<Square> {
        let r = self.0 as isize + dr;
        let f = self.1 as isize + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            Some(Square(r as usize, f as usize))
        } else {
            None
        }
    }

    /// Every square in record order (a8, b8, ..., h8, a7, ..., h1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).rev().flat_map(|rank| (0..8).map(move |file| Square(rank, file)))
    }

    /// Every square file by file: a1, a2, ..., a8, b1, ..., h8.
    pub fn scan_order() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|file| (0..8).map(move |rank| Square(rank, file)))
    }

    /// Parse two characters `[a-h][1-8]`.
    #[must_use]
    pub fn from_chars(file: char, rank: char) -> Option<Square> {
        match (file, rank) {
            ('a'..='h', '1'..='8') => Some(Square(
                rank as usize - '1' as usize,
                file as usize - 'a' as usize,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0).then(self.1.cmp(&other.1))
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square(rank, file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                Square::from_chars(file, rank).ok_or_else(|| SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
            _ => Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_order() {
        let order: Vec<Square> = Square::all().collect();
        assert_eq!(order.len(), 64);
        assert_eq!(order[0].to_string(), "a8");
        assert_eq!(order[7].to_string(), "h8");
        assert_eq!(order[8].to_string(), "a7");
        assert_eq!(order[63].to_string(), "h1");
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_scan_order() {
        let order: Vec<Square> = Square::scan_order().collect();
        assert_eq!(order[0].to_string(), "a1");
        assert_eq!(order[1].to_string(), "a2");
        assert_eq!(order[8].to_string(), "b1");
        assert_eq!(order[63].to_string(), "h8");
    }

    #[test]
    fn test_parse_and_display() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq, Square(3, 4));
        assert_eq!(sq.to_string(), "e4");
        assert!("z9".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(Square(0, 0).offset(-1, 0), None);
        assert_eq!(Square(0, 0).offset(1, 2), Some(Square(1, 2)));
        assert_eq!(Square(7, 7).offset(0, 1), None);
    }

    #[test]
    fn test_try_from_bounds() {
        assert!(Square::try_from((8, 0)).is_err());
        assert!(Square::try_from((0, 8)).is_err());
        assert_eq!(Square::try_from((2, 3)), Ok(Square(2, 3)));
    }
}
