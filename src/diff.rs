//! Square-by-square comparison of two boards.
//!
//! Only the 64 cells are compared; side to move, castling rights and the
//! en passant square are ignored. No legality checking happens here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Piece, Square};

/// How a single square changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Change {
    /// Piece before, empty after: a candidate source square
    Vacated,
    /// Empty before, piece after: a candidate destination
    Occupied,
    /// Different pieces before and after: a candidate capture destination
    Replaced,
}

/// One differing square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SquareDiff {
    pub square: Square,
    pub before: Option<(Color, Piece)>,
    pub after: Option<(Color, Piece)>,
}

impl SquareDiff {
    #[must_use]
    pub fn change(&self) -> Change {
        match (self.before, self.after) {
            (Some(_), None) => Change::Vacated,
            (None, Some(_)) => Change::Occupied,
            _ => Change::Replaced,
        }
    }

    /// True for `Occupied` and `Replaced`.
    #[must_use]
    pub fn is_arrival(&self) -> bool {
        self.after.is_some()
    }
}

/// Every differing square, in record order (a8 ... h1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionDiff {
    entries: Vec<SquareDiff>,
}

impl PositionDiff {
    #[must_use]
    pub fn entries(&self) -> &[SquareDiff] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, square: Square) -> Option<&SquareDiff> {
        self.entries.iter().find(|e| e.square == square)
    }

    /// Squares a piece left.
    pub fn vacated(&self) -> impl Iterator<Item = &SquareDiff> {
        self.entries
            .iter()
            .filter(|e| e.change() == Change::Vacated)
    }

    /// Squares a piece arrived on, empty or not.
    pub fn arrivals(&self) -> impl Iterator<Item = &SquareDiff> {
        self.entries.iter().filter(|e| e.is_arrival())
    }

    /// The diff from `after` back to `before`.
    #[must_use]
    pub fn inverse(&self) -> PositionDiff {
        PositionDiff {
            entries: self
                .entries
                .iter()
                .map(|e| SquareDiff {
                    square: e.square,
                    before: e.after,
                    after: e.before,
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PositionDiff {
    type Item = &'a SquareDiff;
    type IntoIter = std::slice::Iter<'a, SquareDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compare two boards cell by cell.
#[must_use]
pub fn diff(before: &Board, after: &Board) -> PositionDiff {
    let entries = Square::all()
        .filter_map(|square| {
            let (b, a) = (before.piece_at(square), after.piece_at(square));
            (b != a).then_some(SquareDiff {
                square,
                before: b,
                after: a,
            })
        })
        .collect();
    PositionDiff { entries }
}
