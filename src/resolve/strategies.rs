//! The individual interpretations tried by the resolver.
//!
//! Each strategy either declines the text (`Failure::NotApplicable`), has
//! its candidate rejected by the rules (`Failure::Rejected`), or returns
//! the resulting board and move. Strategies only read the board they are
//! given and build their own modified copies.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Move, Piece, Square};
use crate::rules::{strip_annotations, IllegalMoveError, MoveGenerator, MoveInput};

/// One interpretation of free-form move text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrategyKind {
    /// SAN for the recorded side to move
    DirectSan,
    /// SAN for the other side
    TurnFlipSan,
    /// `e2e4`, `e7e8q`
    UciCoordinate,
    /// `e2-e4`, `Ng1-f3`, `e7-e8=N`
    SeparatorCoordinate,
    /// `O-O`, `0-0-0`, `o-o`
    Castling,
    /// Piece letter and target square, first matching piece in scan order
    PieceTargetSearch,
    /// Like `PieceTargetSearch`, but moves the opponent of the piece on the
    /// target square rather than the recorded side to move
    CaptureSearch,
}

impl StrategyKind {
    /// Default chain order
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::DirectSan,
        StrategyKind::TurnFlipSan,
        StrategyKind::UciCoordinate,
        StrategyKind::SeparatorCoordinate,
        StrategyKind::Castling,
        StrategyKind::PieceTargetSearch,
        StrategyKind::CaptureSearch,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::DirectSan => "direct-san",
            StrategyKind::TurnFlipSan => "turn-flip-san",
            StrategyKind::UciCoordinate => "uci",
            StrategyKind::SeparatorCoordinate => "separator",
            StrategyKind::Castling => "castling",
            StrategyKind::PieceTargetSearch => "piece-target",
            StrategyKind::CaptureSearch => "capture-search",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

/// Why a strategy did not produce a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    NotApplicable(&'static str),
    Rejected(IllegalMoveError),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::NotApplicable(why) => write!(f, "not applicable: {why}"),
            Failure::Rejected(err) => write!(f, "rejected: {err}"),
        }
    }
}

impl From<IllegalMoveError> for Failure {
    fn from(err: IllegalMoveError) -> Self {
        Failure::Rejected(err)
    }
}

pub(crate) type Attempt = Result<(Board, Move), Failure>;

pub(crate) fn run<G: MoveGenerator>(
    kind: StrategyKind,
    rules: &G,
    text: &str,
    before: &Board,
    default_promotion: Piece,
) -> Attempt {
    match kind {
        StrategyKind::DirectSan => direct_san(rules, text, before),
        StrategyKind::TurnFlipSan => direct_san(rules, text, &before.with_side_flipped()),
        StrategyKind::UciCoordinate => uci_coordinate(rules, text, before, default_promotion),
        StrategyKind::SeparatorCoordinate => {
            separator_coordinate(rules, text, before, default_promotion)
        }
        StrategyKind::Castling => castling(rules, text, before),
        StrategyKind::PieceTargetSearch => {
            piece_target_search(rules, text, before, default_promotion)
        }
        StrategyKind::CaptureSearch => capture_search(rules, text, before, default_promotion),
    }
}

fn direct_san<G: MoveGenerator>(rules: &G, text: &str, board: &Board) -> Attempt {
    if text.is_empty() {
        return Err(Failure::NotApplicable("empty text"));
    }
    Ok(rules.apply(board, MoveInput::San(text))?)
}

fn needs_promotion(board: &Board, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some((color, Piece::Pawn)) => to.0 == color.pawn_promotion_rank(),
        _ => false,
    }
}

/// Play `from`-`to` for whichever side owns the piece on `from`.
fn play_coordinates<G: MoveGenerator>(
    rules: &G,
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    default_promotion: Piece,
) -> Attempt {
    let mover = board.color_on(from).unwrap_or(board.side_to_move());
    let board = board.with_side_to_move(mover);
    let promotion =
        promotion.or_else(|| needs_promotion(&board, from, to).then_some(default_promotion));
    Ok(rules.apply(
        &board,
        MoveInput::Coordinates {
            from,
            to,
            promotion,
        },
    )?)
}

fn promotion_letter(c: char) -> Option<Piece> {
    Piece::from_char(c).filter(|p| p.is_promotion_target())
}

fn square_at(chars: &[char], idx: usize) -> Option<Square> {
    Square::from_chars(*chars.get(idx)?, *chars.get(idx + 1)?)
}

fn uci_coordinate<G: MoveGenerator>(
    rules: &G,
    text: &str,
    before: &Board,
    default_promotion: Piece,
) -> Attempt {
    let chars: Vec<char> = strip_annotations(text).to_ascii_lowercase().chars().collect();
    if !(4..=5).contains(&chars.len()) {
        return Err(Failure::NotApplicable("not 4-5 characters"));
    }
    let (Some(from), Some(to)) = (square_at(&chars, 0), square_at(&chars, 2)) else {
        return Err(Failure::NotApplicable("no coordinate squares"));
    };
    let promotion = match chars.get(4) {
        None => None,
        Some(&c) => Some(promotion_letter(c).ok_or(Failure::NotApplicable("bad promotion"))?),
    };
    play_coordinates(rules, before, from, to, promotion, default_promotion)
}

fn separator_coordinate<G: MoveGenerator>(
    rules: &G,
    text: &str,
    before: &Board,
    default_promotion: Piece,
) -> Attempt {
    let lowered = text.to_ascii_lowercase();
    let Some((left, right)) = lowered.split_once('-') else {
        return Err(Failure::NotApplicable("no separator"));
    };
    let left: Vec<char> = left.trim().chars().collect();
    let right: Vec<char> = right.trim().chars().collect();
    if left.len() < 2 {
        return Err(Failure::NotApplicable("no source square"));
    }
    let (Some(from), Some(to)) = (square_at(&left, left.len() - 2), square_at(&right, 0)) else {
        return Err(Failure::NotApplicable("no coordinate squares"));
    };

    let rest: String = right[2..].iter().collect();
    let rest = strip_annotations(rest.trim_start_matches('='));
    let promotion = match rest.chars().next() {
        None => None,
        Some(c) => Some(promotion_letter(c).ok_or(Failure::NotApplicable("bad promotion"))?),
    };
    play_coordinates(rules, before, from, to, promotion, default_promotion)
}

fn castling<G: MoveGenerator>(rules: &G, text: &str, before: &Board) -> Attempt {
    let normalized = strip_annotations(text)
        .to_ascii_uppercase()
        .replace('0', "O");
    let kingside = match normalized.as_str() {
        "O-O" => true,
        "O-O-O" => false,
        _ => return Err(Failure::NotApplicable("not castling notation")),
    };

    let recorded = before.side_to_move();
    let mut last_failure = Failure::NotApplicable("no side can castle");
    for color in [recorded, recorded.opponent()] {
        let back_rank = color.back_rank();
        let from = Square(back_rank, 4);
        let to = Square(back_rank, if kingside { 6 } else { 2 });
        let board = before.with_side_to_move(color);
        match rules.apply(
            &board,
            MoveInput::Coordinates {
                from,
                to,
                promotion: None,
            },
        ) {
            Ok(done) => return Ok(done),
            Err(err) => last_failure = Failure::Rejected(err),
        }
    }
    Err(last_failure)
}

/// Piece type and target square pulled out of loose text such as `Nf3`,
/// `nxe5`, `Bc4+` or `e4`.
struct Target {
    piece: Piece,
    square: Square,
}

fn parse_target(text: &str) -> Option<Target> {
    let chars: Vec<char> = text.chars().collect();
    let square = (0..chars.len().saturating_sub(1))
        .rev()
        .find_map(|i| Square::from_chars(chars[i].to_ascii_lowercase(), chars[i + 1]))?;

    let piece = match chars.first().copied() {
        Some(c) if c.is_ascii_uppercase() => Piece::from_san_letter(c).unwrap_or(Piece::Pawn),
        Some('n') => Piece::Knight,
        Some('r') => Piece::Rook,
        Some('q') => Piece::Queen,
        Some('k') => Piece::King,
        _ => Piece::Pawn,
    };
    Some(Target { piece, square })
}

fn search_from<G: MoveGenerator>(
    rules: &G,
    board: &Board,
    mover: Color,
    target: &Target,
    default_promotion: Piece,
) -> Attempt {
    let board = board.with_side_to_move(mover);
    let mut last_failure = Failure::NotApplicable("no piece of that type");
    for from in board.squares_with(mover, target.piece) {
        if from == target.square {
            continue;
        }
        match play_coordinates(rules, &board, from, target.square, None, default_promotion) {
            Ok(done) => return Ok(done),
            Err(failure) => last_failure = failure,
        }
    }
    Err(last_failure)
}

fn piece_target_search<G: MoveGenerator>(
    rules: &G,
    text: &str,
    before: &Board,
    default_promotion: Piece,
) -> Attempt {
    let target = parse_target(text).ok_or(Failure::NotApplicable("no target square"))?;
    search_from(rules, before, before.side_to_move(), &target, default_promotion)
}

fn capture_search<G: MoveGenerator>(
    rules: &G,
    text: &str,
    before: &Board,
    default_promotion: Piece,
) -> Attempt {
    let target = parse_target(text).ok_or(Failure::NotApplicable("no target square"))?;
    let (victim_color, _) = before
        .piece_at(target.square)
        .ok_or(Failure::NotApplicable("target square is empty"))?;
    search_from(rules, before, victim_color.opponent(), &target, default_promotion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StandardRules;

    fn board(fen: &str) -> Board {
        Board::decode(fen).unwrap()
    }

    fn attempt(kind: StrategyKind, text: &str, before: &Board) -> Attempt {
        run(kind, &StandardRules, text, before, Piece::Queen)
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!(" UCI ".parse::<StrategyKind>(), Ok(StrategyKind::UciCoordinate));
        assert!("telepathy".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_uci_declines_non_coordinates() {
        let result = attempt(StrategyKind::UciCoordinate, "Nf3", &Board::new());
        assert!(matches!(result, Err(Failure::NotApplicable(_))));
        let result = attempt(StrategyKind::UciCoordinate, "e7e8k", &Board::new());
        assert!(matches!(result, Err(Failure::NotApplicable(_))));
    }

    #[test]
    fn test_uci_moves_the_piece_owner() {
        // white recorded to move, but e7 holds a black pawn
        let (after, mv) = attempt(StrategyKind::UciCoordinate, "E7E5", &Board::new()).unwrap();
        assert_eq!(mv.notation, "e5");
        assert_eq!(mv.color, Color::Black);
        assert_eq!(after.side_to_move(), Color::White);
    }

    #[test]
    fn test_uci_promotion_defaults_to_queen() {
        let pos = board("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let (_, mv) = attempt(StrategyKind::UciCoordinate, "a7a8", &pos).unwrap();
        assert_eq!(mv.promotion, Some(Piece::Queen));
        let (_, mv) = attempt(StrategyKind::UciCoordinate, "a7a8r", &pos).unwrap();
        assert_eq!(mv.promotion, Some(Piece::Rook));
    }

    #[test]
    fn test_separator_forms() {
        let start = Board::new();
        let (_, mv) = attempt(StrategyKind::SeparatorCoordinate, "g1-f3", &start).unwrap();
        assert_eq!(mv.notation, "Nf3");
        let (_, mv) = attempt(StrategyKind::SeparatorCoordinate, "Ng1 - f3", &start).unwrap();
        assert_eq!(mv.notation, "Nf3");
        let pos = board("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let (_, mv) = attempt(StrategyKind::SeparatorCoordinate, "a7-a8=N", &pos).unwrap();
        assert_eq!(mv.promotion, Some(Piece::Knight));
        let (_, mv) = attempt(StrategyKind::SeparatorCoordinate, "a7-a8", &pos).unwrap();
        assert_eq!(mv.promotion, Some(Piece::Queen));
    }

    #[test]
    fn test_coordinates_ignore_annotations() {
        let start = Board::new();
        for text in ["e2-e4!", "e2-e4!?", "e2-e4+", "e2 - e4??"] {
            let (_, mv) = attempt(StrategyKind::SeparatorCoordinate, text, &start).unwrap();
            assert_eq!(mv.notation, "e4", "{text}");
        }
        let (_, mv) = attempt(StrategyKind::UciCoordinate, "e2e4!", &start).unwrap();
        assert_eq!(mv.notation, "e4");
        let pos = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let (_, mv) = attempt(StrategyKind::Castling, "0-0!", &pos).unwrap();
        assert_eq!(mv.notation, "O-O");
    }

    #[test]
    fn test_separator_declines_castling_text() {
        let result = attempt(StrategyKind::SeparatorCoordinate, "O-O", &Board::new());
        assert!(matches!(result, Err(Failure::NotApplicable(_))));
    }

    #[test]
    fn test_castling_variants() {
        let pos = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        for text in ["O-O", "0-0", "o-o", "O-O+"] {
            let (_, mv) = attempt(StrategyKind::Castling, text, &pos).unwrap();
            assert_eq!(mv.notation, "O-O", "{text}");
        }
        let (after, mv) = attempt(StrategyKind::Castling, "o-o-o", &pos).unwrap();
        assert_eq!(mv.notation, "O-O-O");
        assert_eq!(after.piece_on(Square(0, 3)), Some(Piece::Rook));
    }

    #[test]
    fn test_castling_falls_back_to_other_color() {
        let pos = board("r3k2r/8/8/8/8/8/8/4K3 w kq - 0 1");
        let (_, mv) = attempt(StrategyKind::Castling, "0-0", &pos).unwrap();
        assert_eq!(mv.color, Color::Black);
        assert_eq!(mv.to, Square(7, 6));
    }

    #[test]
    fn test_piece_target_first_match_in_scan_order() {
        // rooks on a4 and h4 can both reach d4; a4 comes first
        let pos = board("1k6/8/8/8/R6R/8/8/4K3 w - - 0 1");
        let (_, mv) = attempt(StrategyKind::PieceTargetSearch, "Rd4", &pos).unwrap();
        assert_eq!(mv.from, Square(3, 0));
        // disambiguation characters are not honoured
        let (_, mv) = attempt(StrategyKind::PieceTargetSearch, "Rhd4", &pos).unwrap();
        assert_eq!(mv.from, Square(3, 0));
    }

    #[test]
    fn test_piece_target_lowercase_letter() {
        let (_, mv) = attempt(StrategyKind::PieceTargetSearch, "nf3", &Board::new()).unwrap();
        assert_eq!(mv.notation, "Nf3");
    }

    #[test]
    fn test_piece_target_uses_recorded_side() {
        let result = attempt(StrategyKind::PieceTargetSearch, "Nc6", &Board::new());
        assert!(matches!(result, Err(Failure::Rejected(_))));
    }

    #[test]
    fn test_capture_search_requires_occupied_target() {
        let result = attempt(StrategyKind::CaptureSearch, "Nf3", &Board::new());
        assert_eq!(result, Err(Failure::NotApplicable("target square is empty")));
    }

    #[test]
    fn test_capture_search_moves_the_capturing_side() {
        let pos = board("4k3/8/8/8/6b1/8/8/3QK3 w - - 0 1");
        let (after, mv) = attempt(StrategyKind::CaptureSearch, "B takes d1", &pos).unwrap();
        assert_eq!(mv.notation, "Bxd1");
        assert_eq!(mv.color, Color::Black);
        assert_eq!(after.piece_at(Square(0, 3)), Some((Color::Black, Piece::Bishop)));
    }

    #[test]
    fn test_garbage_declined_everywhere() {
        for kind in StrategyKind::ALL {
            assert!(attempt(kind, "zz99", &Board::new()).is_err(), "{kind}");
        }
    }
}
