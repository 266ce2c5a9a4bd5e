//! Legal move generation on the mailbox board.
//!
//! Pseudo-legal moves are generated per piece, then each one is played on
//! a copy and kept only if the mover's king is not left attacked. A side
//! without a king is never in check, so incomplete authoring boards still
//! produce moves.

use super::tables::{
    king_targets, knight_targets, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};
use crate::board::{Board, Color, Piece, Square};

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// A generated move before notation is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) piece: Piece,
    pub(crate) color: Color,
    pub(crate) captured: Option<Piece>,
    pub(crate) promotion: Option<Piece>,
    pub(crate) is_castling: bool,
    pub(crate) is_en_passant: bool,
}

impl Candidate {
    pub(crate) fn is_castle_kingside(&self) -> bool {
        self.is_castling && self.to.1 > self.from.1
    }
}

fn create_move(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    is_castling: bool,
    is_en_passant: bool,
) -> Option<Candidate> {
    let (color, piece) = board.piece_at(from)?;
    let captured = if is_en_passant {
        Some(Piece::Pawn)
    } else if is_castling {
        None
    } else {
        board.piece_on(to)
    };
    Some(Candidate {
        from,
        to,
        piece,
        color,
        captured,
        promotion,
        is_castling,
        is_en_passant,
    })
}

fn push_pawn_move(board: &Board, moves: &mut Vec<Candidate>, from: Square, to: Square, color: Color) {
    if to.0 == color.pawn_promotion_rank() {
        for promo in PROMOTION_PIECES {
            moves.extend(create_move(board, from, to, Some(promo), false, false));
        }
    } else {
        moves.extend(create_move(board, from, to, None, false, false));
    }
}

fn generate_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Candidate>) {
    let dir = color.pawn_direction();

    if let Some(forward) = from.offset(dir, 0) {
        if board.is_empty(forward) {
            push_pawn_move(board, moves, from, forward, color);
            if from.0 == color.pawn_start_rank() {
                if let Some(double) = forward.offset(dir, 0) {
                    if board.is_empty(double) {
                        moves.extend(create_move(board, from, double, None, false, false));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(target) = from.offset(dir, df) else {
            continue;
        };
        match board.piece_at(target) {
            Some((target_color, _)) if target_color != color => {
                push_pawn_move(board, moves, from, target, color);
            }
            Some(_) => {}
            None => {
                let victim = Square(from.0, target.1);
                if board.en_passant() == Some(target)
                    && board.piece_at(victim) == Some((color.opponent(), Piece::Pawn))
                {
                    moves.extend(create_move(board, from, target, None, false, true));
                }
            }
        }
    }
}

fn generate_leaper_moves(
    board: &Board,
    from: Square,
    color: Color,
    targets: &[Square],
    moves: &mut Vec<Candidate>,
) {
    for &to in targets {
        if board.color_on(to) != Some(color) {
            moves.extend(create_move(board, from, to, None, false, false));
        }
    }
}

fn generate_sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(isize, isize)],
    moves: &mut Vec<Candidate>,
) {
    for &(dr, df) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, df) {
            match board.color_on(to) {
                None => moves.extend(create_move(board, from, to, None, false, false)),
                Some(c) => {
                    if c != color {
                        moves.extend(create_move(board, from, to, None, false, false));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn generate_castling_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Candidate>) {
    let back_rank = color.back_rank();
    if from != Square(back_rank, 4) {
        return;
    }
    let rights = board.castling_rights();
    if rights.has(color, true)
        && board.is_empty(Square(back_rank, 5))
        && board.is_empty(Square(back_rank, 6))
        && board.piece_at(Square(back_rank, 7)) == Some((color, Piece::Rook))
    {
        moves.extend(create_move(board, from, Square(back_rank, 6), None, true, false));
    }
    if rights.has(color, false)
        && board.is_empty(Square(back_rank, 1))
        && board.is_empty(Square(back_rank, 2))
        && board.is_empty(Square(back_rank, 3))
        && board.piece_at(Square(back_rank, 0)) == Some((color, Piece::Rook))
    {
        moves.extend(create_move(board, from, Square(back_rank, 2), None, true, false));
    }
}

fn generate_pseudo_moves(board: &Board) -> Vec<Candidate> {
    let color = board.side_to_move();
    let mut moves = Vec::with_capacity(64);

    for (from, piece_color, piece) in board.pieces() {
        if piece_color != color {
            continue;
        }
        match piece {
            Piece::Pawn => generate_pawn_moves(board, from, color, &mut moves),
            Piece::Knight => {
                generate_leaper_moves(board, from, color, knight_targets(from), &mut moves)
            }
            Piece::Bishop => {
                generate_sliding_moves(board, from, color, &BISHOP_DIRECTIONS, &mut moves)
            }
            Piece::Rook => generate_sliding_moves(board, from, color, &ROOK_DIRECTIONS, &mut moves),
            Piece::Queen => {
                generate_sliding_moves(board, from, color, &QUEEN_DIRECTIONS, &mut moves)
            }
            Piece::King => {
                generate_leaper_moves(board, from, color, king_targets(from), &mut moves);
                generate_castling_moves(board, from, color, &mut moves);
            }
        }
    }
    moves
}

fn slider_hits(
    board: &Board,
    square: Square,
    attacker: Color,
    directions: &[(isize, isize)],
    pieces: [Piece; 2],
) -> bool {
    for &(dr, df) in directions {
        let mut current = square;
        while let Some(next) = current.offset(dr, df) {
            if let Some((c, p)) = board.piece_at(next) {
                if c == attacker && pieces.contains(&p) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}

pub(crate) fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let back = -attacker.pawn_direction();
    for df in [-1, 1] {
        if let Some(source) = square.offset(back, df) {
            if board.piece_at(source) == Some((attacker, Piece::Pawn)) {
                return true;
            }
        }
    }

    if knight_targets(square)
        .iter()
        .any(|&sq| board.piece_at(sq) == Some((attacker, Piece::Knight)))
    {
        return true;
    }

    if king_targets(square)
        .iter()
        .any(|&sq| board.piece_at(sq) == Some((attacker, Piece::King)))
    {
        return true;
    }

    slider_hits(board, square, attacker, &ROOK_DIRECTIONS, [Piece::Rook, Piece::Queen])
        || slider_hits(board, square, attacker, &BISHOP_DIRECTIONS, [Piece::Bishop, Piece::Queen])
}

pub(crate) fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king_sq) => is_square_attacked(board, king_sq, color.opponent()),
        None => false,
    }
}

/// All legal moves for `board.side_to_move()`.
pub(crate) fn generate_legal(board: &Board) -> Vec<Candidate> {
    let color = board.side_to_move();
    let opponent = color.opponent();

    generate_pseudo_moves(board)
        .into_iter()
        .filter(|m| {
            if m.is_castling {
                let mid = Square(m.from.0, (m.from.1 + m.to.1) / 2);
                if is_square_attacked(board, m.from, opponent)
                    || is_square_attacked(board, mid, opponent)
                    || is_square_attacked(board, m.to, opponent)
                {
                    return false;
                }
            }
            let after = super::make_move::play(board, m);
            !is_in_check(&after, color)
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn perft(board: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|m| perft(&super::make_move::play(board, m), depth - 1))
        .sum()
}
