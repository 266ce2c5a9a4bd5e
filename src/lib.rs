//! Position bookkeeping for chess puzzle authoring.
//!
//! Boards are read from and written to a FEN-style record, compared square
//! by square, and connected by moves: [`infer`] finds the move between two
//! boards, and [`resolve::Resolver`] turns free-form move text into a
//! played move. Legality questions go through the [`rules::MoveGenerator`]
//! trait, implemented by [`rules::StandardRules`].

pub mod board;
pub mod cli;
pub mod config;
pub mod diff;
pub mod infer;
pub mod resolve;
pub mod rules;
mod trace;

pub use board::{Board, Color, Move, Piece, Square};
pub use config::ResolverConfig;
pub use diff::diff;
pub use infer::infer;
pub use resolve::{ResolutionOutcome, Resolver, StrategyKind};
pub use rules::{MoveGenerator, MoveInput, StandardRules};
