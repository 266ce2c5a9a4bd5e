//! Inferring the single move that turns one board into another.
//!
//! The mover's color is taken from the piece that left its square, not from
//! the board's side-to-move flag, which authoring tools rarely set
//! correctly. When the rules collaborator knows a matching legal move its
//! notation and check flags are adopted; otherwise a notation is assembled
//! from the diff alone and the result is marked as not engine-validated.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, Piece, Square};
use crate::diff::{diff, Change, SquareDiff};
use crate::rules::MoveGenerator;
use crate::trace::debug_log;

/// An inferred move and how much to trust its notation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inference {
    pub mv: Move,
    /// True when the rules collaborator confirmed the move as legal.
    pub engine_validated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferError {
    /// The diff does not isolate exactly one source and one destination.
    AmbiguousDiff { vacated: usize, arrivals: usize },
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::AmbiguousDiff { vacated, arrivals } if *vacated == 0 && *arrivals == 0 => {
                write!(f, "Boards are identical, no move to infer")
            }
            InferError::AmbiguousDiff { vacated, arrivals } => write!(
                f,
                "Expected one vacated and one destination square, found {vacated} vacated and {arrivals} destinations"
            ),
        }
    }
}

impl std::error::Error for InferError {}

struct Endpoints {
    from: Square,
    to: Square,
    color: Color,
    piece: Piece,
    arrived: (Color, Piece),
    captured: Option<Piece>,
}

fn endpoints(source: &SquareDiff, dest: &SquareDiff) -> Option<Endpoints> {
    let (color, piece) = source.before?;
    let arrived = dest.after?;
    let captured = match dest.change() {
        Change::Replaced => dest.before.map(|(_, p)| p),
        _ => None,
    };
    Some(Endpoints {
        from: source.square,
        to: dest.square,
        color,
        piece,
        arrived,
        captured,
    })
}

/// Infer the move that turns `before` into `after`.
pub fn infer<G: MoveGenerator>(
    rules: &G,
    before: &Board,
    after: &Board,
) -> Result<Inference, InferError> {
    let d = diff(before, after);
    let vacated: Vec<&SquareDiff> = d.vacated().collect();
    let arrivals: Vec<&SquareDiff> = d.arrivals().collect();

    let ambiguous = InferError::AmbiguousDiff {
        vacated: vacated.len(),
        arrivals: arrivals.len(),
    };
    let (source, dest) = match (vacated.as_slice(), arrivals.as_slice()) {
        ([source], [dest]) => (*source, *dest),
        _ => {
            debug_log!("ambiguous diff: {ambiguous}");
            return Err(ambiguous);
        }
    };
    let ends = endpoints(source, dest).ok_or(ambiguous)?;

    let mover_board = before.with_side_to_move(ends.color);
    let (arrived_color, arrived_piece) = ends.arrived;
    let validated = rules.legal_moves(&mover_board).into_iter().find(|m| {
        m.from == ends.from
            && m.to == ends.to
            && arrived_color == ends.color
            && m.promotion.unwrap_or(m.piece) == arrived_piece
    });

    if let Some(mv) = validated {
        debug_log!("inferred {} ({}), engine validated", mv.notation, mv.uci());
        return Ok(Inference {
            mv,
            engine_validated: true,
        });
    }

    let mv = heuristic_move(&ends);
    debug_log!(
        "no legal move {}{} for {}, falling back to {}",
        ends.from,
        ends.to,
        ends.color,
        mv.notation
    );
    Ok(Inference {
        mv,
        engine_validated: false,
    })
}

fn heuristic_move(ends: &Endpoints) -> Move {
    let (_, arrived_piece) = ends.arrived;
    let promotion = (ends.piece == Piece::Pawn && arrived_piece != Piece::Pawn).then_some(arrived_piece);

    let mut notation = String::new();
    match ends.piece.san_letter() {
        Some(letter) => notation.push(letter),
        None if ends.captured.is_some() => notation.push(ends.from.file_char()),
        None => {}
    }
    if ends.captured.is_some() {
        notation.push('x');
    }
    notation.push_str(&ends.to.to_string());
    if let Some(letter) = promotion.and_then(Piece::san_letter) {
        notation.push('=');
        notation.push(letter);
    }

    Move {
        from: ends.from,
        to: ends.to,
        piece: ends.piece,
        color: ends.color,
        captured_piece: ends.captured,
        promotion,
        notation,
        is_check: false,
        is_checkmate: false,
    }
}
