//! Rule-free board editing for puzzle authoring.
//!
//! Every edit returns a new `Board` and never consults the rules engine, so
//! arbitrary (including illegal) training positions can be built. Edits
//! drop the en passant square, which only means something right after a
//! real double pawn push.

use super::{Board, CastlingRight, Color, Piece, Square};

impl Board {
    /// Put `(color, piece)` on `sq`, replacing whatever was there.
    #[must_use]
    pub fn place_piece(&self, sq: Square, piece: Piece, color: Color) -> Board {
        let mut board = self.edited();
        board.set(sq, Some((color, piece)));
        board
    }

    /// Empty `sq`.
    #[must_use]
    pub fn remove_piece(&self, sq: Square) -> Board {
        let mut board = self.edited();
        board.set(sq, None);
        board
    }

    /// Drag a piece from one square to another, capturing nothing and
    /// checking nothing. An empty `from` leaves the board unchanged apart
    /// from the en passant square.
    #[must_use]
    pub fn relocate_piece(&self, from: Square, to: Square) -> Board {
        let mut board = self.edited();
        if let Some(cell) = board.piece_at(from) {
            board.set(from, None);
            board.set(to, Some(cell));
        }
        board
    }

    #[must_use]
    pub fn set_side_to_move(&self, color: Color) -> Board {
        let mut board = self.edited();
        board.side_to_move = color;
        board
    }

    /// Insert the right if absent, remove it if present.
    #[must_use]
    pub fn toggle_castling_right(&self, right: CastlingRight) -> Board {
        let mut board = self.edited();
        board.castling_rights.toggle(right);
        board
    }

    /// Remove every piece, keeping side to move and castling rights.
    #[must_use]
    pub fn clear(&self) -> Board {
        let mut board = self.edited();
        board.squares = [[None; 8]; 8];
        board
    }

    fn edited(&self) -> Board {
        let mut board = self.clone();
        board.en_passant = None;
        board
    }
}
