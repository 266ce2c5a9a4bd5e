//! Core chess types.
//!
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - (rank, file) board coordinate
//! - `CastlingRight` and `CastlingRights` - castling state
//! - `Move` - a resolved or inferred move with its notation

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::{CastlingRight, CastlingRights};
pub use moves::Move;
pub use piece::{Color, Piece};
pub use square::Square;
