use super::movegen::Candidate;
use crate::board::{Board, CastlingRight, Piece, Square};

fn rook_corner_right(sq: Square) -> Option<CastlingRight> {
    match (sq.0, sq.1) {
        (0, 0) => Some(CastlingRight::WhiteQueenside),
        (0, 7) => Some(CastlingRight::WhiteKingside),
        (7, 0) => Some(CastlingRight::BlackQueenside),
        (7, 7) => Some(CastlingRight::BlackKingside),
        _ => None,
    }
}

/// Play `m` on a copy of `board` and return the copy.
///
/// The move is trusted to come from the generator; no legality is checked.
pub(crate) fn play(board: &Board, m: &Candidate) -> Board {
    let mut next = board.clone();
    let color = m.color;

    next.set(m.from, None);
    if m.is_en_passant {
        next.set(Square(m.from.0, m.to.1), None);
    }
    let placed = m.promotion.unwrap_or(m.piece);
    next.set(m.to, Some((color, placed)));

    if m.is_castling {
        let back_rank = color.back_rank();
        let (rook_from, rook_to) = if m.is_castle_kingside() {
            (Square(back_rank, 7), Square(back_rank, 5))
        } else {
            (Square(back_rank, 0), Square(back_rank, 3))
        };
        next.set(rook_from, None);
        next.set(rook_to, Some((color, Piece::Rook)));
    }

    if m.piece == Piece::King {
        next.castling_rights.clear_color(color);
    }
    for sq in [m.from, m.to] {
        if let Some(right) = rook_corner_right(sq) {
            next.castling_rights.remove(right);
        }
    }

    next.en_passant = if m.piece == Piece::Pawn && m.from.0.abs_diff(m.to.0) == 2 {
        Some(Square((m.from.0 + m.to.0) / 2, m.from.1))
    } else {
        None
    };

    next.side_to_move = color.opponent();
    next
}
