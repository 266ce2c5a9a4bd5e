//! Board representation, textual records and rule-free editing.
//!
//! A `Board` is a plain 8x8 grid plus side to move, castling rights and
//! en passant target. It carries no legality invariant; all rules live in
//! [`crate::rules`].
//!
//! # Example
//! ```
//! use chess_puzzle::board::{Board, Color, Piece, Square};
//!
//! let board = Board::empty()
//!     .place_piece(Square(0, 4), Piece::King, Color::White)
//!     .place_piece(Square(7, 4), Piece::King, Color::Black);
//! assert_eq!(board.encode(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
//! assert_eq!(Board::decode(&board.encode()), Ok(board));
//! ```

mod editor;
mod error;
mod fen;
pub mod prelude;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, SanError, SquareError};
pub use state::Board;
pub use types::{CastlingRight, CastlingRights, Color, Move, Piece, Square};
