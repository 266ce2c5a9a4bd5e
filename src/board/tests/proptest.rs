//! Property-based tests using proptest.

use crate::board::{Board, CastlingRight, Color, Move, Piece, Square};
use crate::diff::diff;
use crate::infer::infer;
use crate::resolve::Resolver;
use crate::rules::{MoveGenerator, MoveInput, StandardRules};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Edit {
    Place(Square, Piece, Color),
    Remove(Square),
    Relocate(Square, Square),
    SideToMove(Color),
    Toggle(CastlingRight),
}

fn square_strategy() -> impl Strategy<Value = Square> {
    (0..8usize, 0..8usize).prop_map(|(rank, file)| Square(rank, file))
}

fn color_strategy() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::White), Just(Color::Black)]
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => (square_strategy(), 0..6usize, color_strategy())
            .prop_map(|(sq, p, c)| Edit::Place(sq, Piece::ALL[p], c)),
        2 => square_strategy().prop_map(Edit::Remove),
        2 => (square_strategy(), square_strategy()).prop_map(|(a, b)| Edit::Relocate(a, b)),
        1 => color_strategy().prop_map(Edit::SideToMove),
        1 => (0..4usize).prop_map(|i| Edit::Toggle(CastlingRight::ALL[i])),
    ]
}

fn apply_edit(board: &Board, edit: Edit) -> Board {
    match edit {
        Edit::Place(sq, piece, color) => board.place_piece(sq, piece, color),
        Edit::Remove(sq) => board.remove_piece(sq),
        Edit::Relocate(from, to) => board.relocate_piece(from, to),
        Edit::SideToMove(color) => board.set_side_to_move(color),
        Edit::Toggle(right) => board.toggle_castling_right(right),
    }
}

fn edited_board(start_full: bool, edits: &[Edit]) -> Board {
    let start = if start_full { Board::new() } else { Board::empty() };
    edits.iter().fold(start, |board, &edit| apply_edit(&board, edit))
}

/// Play `num_moves` random legal moves from the start position.
fn random_game(seed: u64, num_moves: usize) -> Vec<(Board, Move, Board)> {
    use rand::prelude::*;

    let rules = StandardRules;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut plies = Vec::new();

    for _ in 0..num_moves {
        let moves = rules.legal_moves(&board);
        if moves.is_empty() {
            break;
        }
        let mv = &moves[rng.gen_range(0..moves.len())];
        let (next, played) = rules
            .apply(
                &board,
                MoveInput::Coordinates {
                    from: mv.from,
                    to: mv.to,
                    promotion: mv.promotion,
                },
            )
            .expect("generated move must apply");
        plies.push((board, played, next.clone()));
        board = next;
    }
    plies
}

fn is_castling(mv: &Move) -> bool {
    mv.piece == Piece::King && mv.from.file().abs_diff(mv.to.file()) == 2
}

proptest! {
    /// Property: any edited board survives an encode/decode round trip
    #[test]
    fn prop_edited_board_roundtrip(
        start_full in any::<bool>(),
        edits in prop::collection::vec(edit_strategy(), 0..40),
    ) {
        let board = edited_board(start_full, &edits);
        let decoded = Board::decode(&board.encode());
        prop_assert_eq!(decoded, Ok(board));
    }

    /// Property: placing or removing the same thing twice changes nothing more
    #[test]
    fn prop_edits_are_idempotent(
        edits in prop::collection::vec(edit_strategy(), 0..20),
        sq in square_strategy(),
        p in 0..6usize,
        color in color_strategy(),
    ) {
        let board = edited_board(true, &edits);
        let placed = board.place_piece(sq, Piece::ALL[p], color);
        prop_assert_eq!(placed.place_piece(sq, Piece::ALL[p], color), placed.clone());
        let removed = board.remove_piece(sq);
        prop_assert_eq!(removed.remove_piece(sq), removed.clone());
        prop_assert!(removed.is_empty(sq));
        prop_assert_eq!(placed.en_passant(), None);
    }

    /// Property: placing on an empty square and removing again restores the board
    #[test]
    fn prop_place_then_remove_restores(
        edits in prop::collection::vec(edit_strategy(), 0..20),
        sq in square_strategy(),
        p in 0..6usize,
        color in color_strategy(),
    ) {
        let board = edited_board(true, &edits);
        prop_assume!(board.is_empty(sq));
        let restored = board.place_piece(sq, Piece::ALL[p], color).remove_piece(sq);
        prop_assert_eq!(restored, board);
    }

    /// Property: the same holds mid-game, except that en passant is dropped
    #[test]
    fn prop_place_then_remove_in_play(
        seed in any::<u64>(),
        num_moves in 1..=20usize,
        p in 0..6usize,
        color in color_strategy(),
    ) {
        for (_, _, after) in random_game(seed, num_moves) {
            let mut expected = after.clone();
            expected.en_passant = None;
            for sq in Square::all().filter(|sq| after.is_empty(*sq)) {
                let restored = after.place_piece(sq, Piece::ALL[p], color).remove_piece(sq);
                prop_assert_eq!(&restored, &expected);
            }
        }
    }

    /// Property: diff(a, b) and diff(b, a) cover the same squares with swapped cells
    #[test]
    fn prop_diff_symmetry(
        a in prop::collection::vec(edit_strategy(), 0..20),
        b in prop::collection::vec(edit_strategy(), 0..20),
    ) {
        let before = edited_board(true, &a);
        let after = edited_board(true, &b);
        let forward = diff(&before, &after);
        let backward = diff(&after, &before);
        prop_assert_eq!(backward, forward.inverse());
        prop_assert_eq!(forward.is_empty(), before.pieces().eq(after.pieces()));
    }

    /// Property: positions reached in play survive a round trip
    #[test]
    fn prop_game_positions_roundtrip(seed in any::<u64>(), num_moves in 1..=30usize) {
        for (_, _, after) in random_game(seed, num_moves) {
            prop_assert_eq!(Board::decode(&after.encode()), Ok(after));
        }
    }

    /// Property: every ordinary played move is inferred back, validated
    #[test]
    fn prop_infer_recovers_played_move(seed in any::<u64>(), num_moves in 1..=30usize) {
        for (before, played, after) in random_game(seed, num_moves) {
            let en_passant = played.piece == Piece::Pawn
                && played.from.file() != played.to.file()
                && before.is_empty(played.to);
            let result = infer(&StandardRules, &before, &after);
            if is_castling(&played) || en_passant {
                prop_assert!(result.is_err());
                continue;
            }
            let inference = result.expect("single move diff");
            prop_assert!(inference.engine_validated);
            prop_assert_eq!(inference.mv, played);
        }
    }

    /// Property: the SAN of a played move resolves to the same position
    #[test]
    fn prop_resolver_replays_san(seed in any::<u64>(), num_moves in 1..=20usize) {
        let resolver = Resolver::new();
        for (before, played, after) in random_game(seed, num_moves) {
            let outcome = resolver.resolve(&played.notation, &before);
            prop_assert_eq!(outcome.board(), Some(&after));
            prop_assert_eq!(outcome.mv(), Some(&played));
        }
    }
}
