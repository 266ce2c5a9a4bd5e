use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CastlingRights, Color, Piece, Square};

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

static STARTING_POSITION: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    for (file, piece) in BACK_RANK.iter().enumerate() {
        board.squares[0][file] = Some((Color::White, *piece));
        board.squares[7][file] = Some((Color::Black, *piece));
        board.squares[1][file] = Some((Color::White, Piece::Pawn));
        board.squares[6][file] = Some((Color::Black, Piece::Pawn));
    }
    board.castling_rights = CastlingRights::all();
    board
});

/// A position snapshot: 64 cells plus side to move, castling rights and
/// en passant target.
///
/// No legality invariant is enforced. Boards with missing kings, pawns on
/// the back rank or both kings in check are all representable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    pub(crate) squares: [[Option<(Color, Piece)>; 8]; 8],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
}

impl Board {
    /// The standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        STARTING_POSITION.clone()
    }

    /// Same as [`Board::starting_position`].
    #[must_use]
    pub fn new() -> Self {
        Board::starting_position()
    }

    /// A board with no pieces, White to move and no castling rights.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.0][sq.1]
    }

    /// Get just the piece type on a square (without color)
    #[inline]
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[inline]
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.0][sq.1].is_none()
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Occupied squares in record order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Color, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(c, p)| (sq, c, p)))
    }

    /// Squares holding `(color, piece)`, file by file (a1, a2, ..., h8)
    pub fn squares_with(&self, color: Color, piece: Piece) -> impl Iterator<Item = Square> + '_ {
        Square::scan_order().filter(move |sq| self.piece_at(*sq) == Some((color, piece)))
    }

    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|sq| self.piece_at(*sq) == Some((color, Piece::King)))
    }

    pub(crate) fn set(&mut self, sq: Square, cell: Option<(Color, Piece)>) {
        self.squares[sq.0][sq.1] = cell;
    }

    /// Same position with the side to move flipped.
    #[must_use]
    pub fn with_side_flipped(&self) -> Self {
        let mut board = self.clone();
        board.side_to_move = board.side_to_move.opponent();
        board
    }

    /// Same position with an explicit side to move.
    #[must_use]
    pub fn with_side_to_move(&self, color: Color) -> Self {
        let mut board = self.clone();
        board.side_to_move = color;
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
