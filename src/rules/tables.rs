//! Precomputed target squares for leaper pieces (knights, kings).

use once_cell::sync::Lazy;

use crate::board::Square;

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const QUEEN_DIRECTIONS: [(isize, isize); 8] = KING_DELTAS;

fn leaper_table(deltas: &[(isize, isize)]) -> Vec<Vec<Square>> {
    (0..64)
        .map(|idx| {
            let from = Square(idx / 8, idx % 8);
            deltas
                .iter()
                .filter_map(|&(dr, df)| from.offset(dr, df))
                .collect()
        })
        .collect()
}

pub(crate) static KNIGHT_TARGETS: Lazy<Vec<Vec<Square>>> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_TARGETS: Lazy<Vec<Vec<Square>>> = Lazy::new(|| leaper_table(&KING_DELTAS));

#[inline]
pub(crate) fn knight_targets(from: Square) -> &'static [Square] {
    &KNIGHT_TARGETS[from.0 * 8 + from.1]
}

#[inline]
pub(crate) fn king_targets(from: Square) -> &'static [Square] {
    &KING_TARGETS[from.0 * 8 + from.1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_counts() {
        assert_eq!(knight_targets(Square(0, 0)).len(), 2);
        assert_eq!(king_targets(Square(0, 0)).len(), 3);
        assert_eq!(knight_targets(Square(3, 3)).len(), 8);
        assert_eq!(king_targets(Square(3, 3)).len(), 8);
    }
}
