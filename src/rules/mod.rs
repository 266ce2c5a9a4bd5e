//! Legal-move generation behind a swappable trait.
//!
//! The inferencer and the resolver only talk to [`MoveGenerator`]; any
//! standards-compliant rules implementation can stand behind it.
//! [`StandardRules`] is the built-in one.
//!
//! # Example
//! ```
//! use chess_puzzle::board::Board;
//! use chess_puzzle::rules::{MoveGenerator, MoveInput, StandardRules};
//!
//! let rules = StandardRules;
//! let (after, mv) = rules.apply(&Board::new(), MoveInput::San("Nf3")).unwrap();
//! assert_eq!(mv.notation, "Nf3");
//! assert_eq!(after.side_to_move(), chess_puzzle::board::Color::Black);
//! ```

mod make_move;
mod movegen;
mod san;
mod tables;

use std::fmt;

use crate::board::{Board, Color, Move, Piece, SanError, Square};
use crate::trace::trace_log;

use movegen::Candidate;
pub(crate) use san::strip_annotations;

/// How a move is handed to the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveInput<'a> {
    /// SAN for the board's side to move
    San(&'a str),
    /// Explicit squares; `promotion` must be set exactly when the move promotes
    Coordinates {
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    },
}

impl fmt::Display for MoveInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveInput::San(text) => f.write_str(text),
            MoveInput::Coordinates {
                from,
                to,
                promotion,
            } => {
                write!(f, "{from}{to}")?;
                if let Some(promo) = promotion {
                    write!(f, "{}", promo.to_char())?;
                }
                Ok(())
            }
        }
    }
}

/// A well-formed move request rejected by the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// No piece on the source square
    EmptySquare { square: Square },
    /// The piece on the source square belongs to the side not on move
    WrongSide { square: Square, to_move: Color },
    /// Structurally fine but not among the legal moves
    NotLegal { notation: String },
    /// SAN text could not be matched
    Notation(SanError),
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::EmptySquare { square } => {
                write!(f, "No piece on {square}")
            }
            IllegalMoveError::WrongSide { square, to_move } => {
                write!(f, "Piece on {square} cannot move, {to_move} is to move")
            }
            IllegalMoveError::NotLegal { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
            IllegalMoveError::Notation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IllegalMoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMoveError::Notation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SanError> for IllegalMoveError {
    fn from(err: SanError) -> Self {
        IllegalMoveError::Notation(err)
    }
}

/// The rules collaborator consulted by inference and resolution.
pub trait MoveGenerator {
    /// Every legal move for `board.side_to_move()`, with SAN attached.
    fn legal_moves(&self, board: &Board) -> Vec<Move>;

    /// Play `input` on a copy of `board`.
    fn apply(&self, board: &Board, input: MoveInput<'_>) -> Result<(Board, Move), IllegalMoveError>;
}

impl<G: MoveGenerator + ?Sized> MoveGenerator for &G {
    fn legal_moves(&self, board: &Board) -> Vec<Move> {
        (**self).legal_moves(board)
    }

    fn apply(&self, board: &Board, input: MoveInput<'_>) -> Result<(Board, Move), IllegalMoveError> {
        (**self).apply(board, input)
    }
}

/// Built-in rules: full single-move legality including castling, en
/// passant and promotion. Boards missing a king are accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardRules;

impl StandardRules {
    fn finish(board: &Board, m: &Candidate, legal: &[Candidate]) -> (Board, Move) {
        let rendered = san::render(board, m, legal);
        let mv = Move {
            from: m.from,
            to: m.to,
            piece: m.piece,
            color: m.color,
            captured_piece: m.captured,
            promotion: m.promotion,
            notation: rendered.notation,
            is_check: rendered.is_check,
            is_checkmate: rendered.is_checkmate,
        };
        (make_move::play(board, m), mv)
    }

    fn find_coordinates(
        board: &Board,
        legal: &[Candidate],
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Candidate, IllegalMoveError> {
        match board.color_on(from) {
            None => return Err(IllegalMoveError::EmptySquare { square: from }),
            Some(color) if color != board.side_to_move() => {
                return Err(IllegalMoveError::WrongSide {
                    square: from,
                    to_move: board.side_to_move(),
                })
            }
            Some(_) => {}
        }
        legal
            .iter()
            .find(|m| m.from == from && m.to == to && m.promotion == promotion)
            .copied()
            .ok_or_else(|| IllegalMoveError::NotLegal {
                notation: MoveInput::Coordinates {
                    from,
                    to,
                    promotion,
                }
                .to_string(),
            })
    }
}

impl MoveGenerator for StandardRules {
    fn legal_moves(&self, board: &Board) -> Vec<Move> {
        let legal = movegen::generate_legal(board);
        legal
            .iter()
            .map(|m| Self::finish(board, m, &legal).1)
            .collect()
    }

    fn apply(&self, board: &Board, input: MoveInput<'_>) -> Result<(Board, Move), IllegalMoveError> {
        let legal = movegen::generate_legal(board);
        let candidate = match input {
            MoveInput::San(text) => san::parse(board, text)?,
            MoveInput::Coordinates {
                from,
                to,
                promotion,
            } => Self::find_coordinates(board, &legal, from, to, promotion)?,
        };
        let (after, mv) = Self::finish(board, &candidate, &legal);
        trace_log!("applied {input} as {} for {}", mv.notation, mv.color);
        Ok((after, mv))
    }
}
