//! Prelude module for convenient imports.
//!
//! # Example
//! ```
//! use chess_puzzle::board::prelude::*;
//!
//! let inference = infer(&StandardRules, &Board::new(), &Board::new().relocate_piece(
//!     Square(1, 4),
//!     Square(3, 4),
//! ));
//! assert_eq!(inference.unwrap().mv.notation, "e4");
//! ```

pub use super::{Board, CastlingRight, CastlingRights, Color, FenError, Move, Piece, Square};
pub use crate::diff::{diff, Change, PositionDiff};
pub use crate::infer::{infer, InferError, Inference};
pub use crate::resolve::{ResolutionOutcome, Resolver, StrategyKind};
pub use crate::rules::{MoveGenerator, MoveInput, StandardRules};
