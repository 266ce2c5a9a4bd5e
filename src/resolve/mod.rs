//! Turning loosely written move text into a played move.
//!
//! Puzzle authors write `Nf3`, `g1f3`, `g1-f3`, `0-0` or just `f3`, and the
//! recorded side to move is often wrong. The [`Resolver`] runs an ordered
//! chain of interpretations against the position and keeps the first one
//! the rules accept.
//!
//! # Example
//! ```
//! use chess_puzzle::board::Board;
//! use chess_puzzle::resolve::{Resolver, StrategyKind};
//!
//! let resolver = Resolver::new();
//! let outcome = resolver.resolve("g1-f3", &Board::new());
//! assert_eq!(outcome.strategy(), Some(StrategyKind::SeparatorCoordinate));
//! assert_eq!(outcome.mv().unwrap().notation, "Nf3");
//! ```

mod strategies;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move};
use crate::config::ResolverConfig;
use crate::rules::{MoveGenerator, StandardRules};
use crate::trace::{debug_log, trace_log};

pub use strategies::StrategyKind;

/// Result of a resolution attempt. Failing to resolve is an expected
/// outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResolutionOutcome {
    Resolved {
        board: Board,
        mv: Move,
        strategy: StrategyKind,
    },
    Unresolved {
        tried: Vec<StrategyKind>,
    },
}

impl ResolutionOutcome {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        match self {
            ResolutionOutcome::Resolved { board, .. } => Some(board),
            ResolutionOutcome::Unresolved { .. } => None,
        }
    }

    #[must_use]
    pub fn mv(&self) -> Option<&Move> {
        match self {
            ResolutionOutcome::Resolved { mv, .. } => Some(mv),
            ResolutionOutcome::Unresolved { .. } => None,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> Option<StrategyKind> {
        match self {
            ResolutionOutcome::Resolved { strategy, .. } => Some(*strategy),
            ResolutionOutcome::Unresolved { .. } => None,
        }
    }

    /// Convert into a `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<(Board, Move), UnresolvableMoveError> {
        match self {
            ResolutionOutcome::Resolved { board, mv, .. } => Ok((board, mv)),
            ResolutionOutcome::Unresolved { tried } => Err(UnresolvableMoveError { tried }),
        }
    }
}

/// No strategy produced a legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvableMoveError {
    pub tried: Vec<StrategyKind>,
}

impl fmt::Display for UnresolvableMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not resolve move (tried: ")?;
        for (i, kind) in self.tried.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for UnresolvableMoveError {}

#[derive(Clone, Debug, Default)]
pub struct Resolver<G = StandardRules> {
    rules: G,
    config: ResolverConfig,
}

impl Resolver<StandardRules> {
    /// A resolver over the built-in rules with every strategy enabled.
    #[must_use]
    pub fn new() -> Self {
        Resolver::with_rules(StandardRules)
    }
}

impl<G: MoveGenerator> Resolver<G> {
    #[must_use]
    pub fn with_rules(rules: G) -> Self {
        Resolver {
            rules,
            config: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ResolverConfig {
        &mut self.config
    }

    #[must_use]
    pub fn rules(&self) -> &G {
        &self.rules
    }

    /// Interpret `text` against `before`, trying each configured strategy
    /// in order. `before` itself is never modified.
    #[must_use]
    pub fn resolve(&self, text: &str, before: &Board) -> ResolutionOutcome {
        let text = text.trim();
        let mut tried = Vec::with_capacity(self.config.strategies.len());

        for &kind in &self.config.strategies {
            tried.push(kind);
            match strategies::run(
                kind,
                &self.rules,
                text,
                before,
                self.config.default_promotion,
            ) {
                Ok((board, mv)) => {
                    debug_log!("resolved '{text}' as {} via {kind}", mv.notation);
                    return ResolutionOutcome::Resolved {
                        board,
                        mv,
                        strategy: kind,
                    };
                }
                Err(failure) => trace_log!("{kind} failed for '{text}': {failure}"),
            }
        }

        debug_log!("could not resolve '{text}'");
        ResolutionOutcome::Unresolved { tried }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece, Square};

    fn board(fen: &str) -> Board {
        Board::decode(fen).unwrap()
    }

    #[test]
    fn test_notations_agree() {
        let resolver = Resolver::new();
        let start = Board::new();
        let outcomes: Vec<ResolutionOutcome> = ["Nf3", "g1f3", "g1-f3"]
            .iter()
            .map(|text| resolver.resolve(text, &start))
            .collect();
        assert_eq!(outcomes[0].strategy(), Some(StrategyKind::DirectSan));
        assert_eq!(outcomes[1].strategy(), Some(StrategyKind::UciCoordinate));
        assert_eq!(outcomes[2].strategy(), Some(StrategyKind::SeparatorCoordinate));
        for outcome in &outcomes {
            assert_eq!(outcome.board(), outcomes[0].board());
            assert_eq!(outcome.mv().unwrap().notation, "Nf3");
        }
    }

    #[test]
    fn test_turn_flip_when_recorded_side_is_wrong() {
        let before = board("4k3/8/8/8/6b1/8/8/3QK3 w - - 0 1");
        let outcome = Resolver::new().resolve("Bxd1", &before);
        assert_eq!(outcome.strategy(), Some(StrategyKind::TurnFlipSan));
        let resolved = outcome.board().unwrap();
        assert_eq!(resolved.piece_at(Square(0, 3)), Some((Color::Black, Piece::Bishop)));
        assert_eq!(resolved.side_to_move(), Color::White);
        // the input board is untouched
        assert_eq!(before.piece_on(Square(0, 3)), Some(Piece::Queen));
    }

    #[test]
    fn test_garbage_tries_every_strategy() {
        let outcome = Resolver::new().resolve("zz99", &Board::new());
        assert_eq!(
            outcome,
            ResolutionOutcome::Unresolved {
                tried: StrategyKind::ALL.to_vec()
            }
        );
        let err = outcome.into_result().unwrap_err();
        assert!(err.to_string().starts_with("Could not resolve move (tried: direct-san"));
    }

    #[test]
    fn test_empty_text_is_unresolved() {
        let outcome = Resolver::new().resolve("   ", &Board::new());
        assert!(!outcome.is_resolved());
    }

    #[test]
    fn test_input_is_trimmed() {
        let outcome = Resolver::new().resolve("  e4 \n", &Board::new());
        assert_eq!(outcome.mv().unwrap().notation, "e4");
    }

    #[test]
    fn test_annotated_coordinates_use_separator() {
        let outcome = Resolver::new().resolve("e2-e4!", &Board::new());
        assert_eq!(outcome.strategy(), Some(StrategyKind::SeparatorCoordinate));
        assert_eq!(outcome.mv().unwrap().notation, "e4");
    }

    #[test]
    fn test_castling_case_insensitive() {
        let before = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let outcome = Resolver::new().resolve("o-o", &before);
        assert_eq!(outcome.strategy(), Some(StrategyKind::Castling));
        assert_eq!(outcome.mv().unwrap().notation, "O-O");
        let outcome = Resolver::new().resolve("0-0-0", &before);
        assert_eq!(outcome.mv().unwrap().notation, "O-O-O");
    }

    #[test]
    fn test_first_match_tie_break() {
        // "Rxd4" is ambiguous SAN; the search picks a4 over h4
        let before = board("1k6/8/8/8/R2p3R/8/8/4K3 w - - 0 1");
        let outcome = Resolver::new().resolve("Rxd4", &before);
        assert_eq!(outcome.strategy(), Some(StrategyKind::PieceTargetSearch));
        assert_eq!(outcome.mv().unwrap().from, Square(3, 0));
        assert_eq!(outcome.mv().unwrap().notation, "Raxd4");
    }

    #[test]
    fn test_capture_search_with_wrong_side_flag() {
        // black to move is recorded, but only white can take on e5
        let before = board("4k3/8/8/4p3/8/5N2/8/4K3 b - - 0 1");
        let outcome = Resolver::new().resolve("N takes e5", &before);
        assert_eq!(outcome.strategy(), Some(StrategyKind::CaptureSearch));
        let mv = outcome.mv().unwrap();
        assert_eq!(mv.color, Color::White);
        assert_eq!(mv.notation, "Nxe5");
    }

    #[test]
    fn test_configured_chain_only() {
        let mut config = ResolverConfig::default();
        config.set_option("Strategies", Some("uci")).unwrap();
        let resolver = Resolver::new().with_config(config);
        assert_eq!(
            resolver.resolve("Nf3", &Board::new()),
            ResolutionOutcome::Unresolved {
                tried: vec![StrategyKind::UciCoordinate]
            }
        );
        assert!(resolver.resolve("g1f3", &Board::new()).is_resolved());
    }

    #[test]
    fn test_default_promotion_is_configurable() {
        let before = board("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let mut resolver = Resolver::new();
        resolver
            .config_mut()
            .set_option("DefaultPromotion", Some("n"))
            .unwrap();
        let outcome = resolver.resolve("a7a8", &before);
        assert_eq!(outcome.mv().unwrap().notation, "a8=N");
    }

    #[test]
    fn test_generic_over_borrowed_rules() {
        let rules = StandardRules;
        let resolver = Resolver::with_rules(&rules);
        assert!(resolver.resolve("e4", &Board::new()).is_resolved());
    }
}
