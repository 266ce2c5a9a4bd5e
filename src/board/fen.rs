//! Textual position records.
//!
//! `<placement> <side> <castling> <en passant> <halfmove> <fullmove>`.
//! Decoding is lenient about trailing fields: a record with only a
//! placement decodes with White to move, no castling rights and no en
//! passant square. Move counters are read past and never stored; encoding
//! always writes `0 1`.

use std::fmt;
use std::str::FromStr;

use super::error::FenError;
use super::{Board, CastlingRight, Color, Piece, Square};
use crate::trace::debug_log;

impl Board {
    /// Parse a board position from a textual record.
    pub fn decode(text: &str) -> Result<Self, FenError> {
        let result = Self::decode_fields(text);
        if let Err(err) = &result {
            debug_log!("rejected record {text:?}: {err}");
        }
        result
    }

    fn decode_fields(text: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = text.split_whitespace().collect();

        let placement = parts.first().ok_or_else(|| FenError::MalformedPlacement {
            rank: 0,
            detail: "empty record".to_string(),
        })?;
        Self::decode_placement(&mut board, placement)?;

        board.side_to_move = match parts.get(1).copied() {
            None => Color::White,
            Some("w" | "W") => Color::White,
            Some("b" | "B") => Color::Black,
            Some(other) => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if let Some(castling) = parts.get(2) {
            for c in castling.chars() {
                if c == '-' {
                    continue;
                }
                let right =
                    CastlingRight::from_fen_char(c).ok_or(FenError::InvalidCastling { char: c })?;
                board.castling_rights.insert(right);
            }
        }

        board.en_passant = match parts.get(3).copied() {
            None | Some("-") => None,
            Some(ep) => Some(ep.parse::<Square>().map_err(|_| FenError::InvalidEnPassant {
                found: ep.to_string(),
            })?),
        };

        Ok(board)
    }

    fn decode_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::MalformedPlacement {
                rank: ranks.len().min(8),
                detail: format!("expected 8 ranks, found {}", ranks.len()),
            });
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 || run > 8 {
                        return Err(FenError::MalformedPlacement {
                            rank: rank_idx,
                            detail: format!("invalid empty-run digit '{c}'"),
                        });
                    }
                    file += run as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file < 8 {
                        board.squares[rank][file] = Some((color, piece));
                    }
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::MalformedPlacement {
                        rank: rank_idx,
                        detail: format!("rank '{rank_str}' has more than 8 cells"),
                    });
                }
            }
            if file != 8 {
                return Err(FenError::MalformedPlacement {
                    rank: rank_idx,
                    detail: format!("rank '{rank_str}' has {file} cells"),
                });
            }
        }
        Ok(())
    }

    /// Convert the board to its textual record.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.squares[rank][file] {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} 0 1",
            rows.join("/"),
            self.side_to_move.to_fen_char(),
            self.castling_rights,
            ep
        )
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::decode(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
