//! Standard Algebraic Notation (SAN) rendering and parsing.
//!
//! SAN is the notation used in scoresheets, books and puzzle answers.
//! Examples: "e4", "Nf3", "Bxc6+", "O-O", "e8=Q#"

use super::make_move::play;
use super::movegen::{generate_legal, is_in_check, Candidate};
use crate::board::{Board, Piece, Square, SanError};

/// Notation plus the check flags that were appended to it.
pub(crate) struct Rendered {
    pub(crate) notation: String,
    pub(crate) is_check: bool,
    pub(crate) is_checkmate: bool,
}

/// Format `m` in SAN. `legal` are the legal moves of `board`, used for
/// disambiguation.
pub(crate) fn render(board: &Board, m: &Candidate, legal: &[Candidate]) -> Rendered {
    let mut san = String::new();

    if m.is_castling {
        san.push_str(if m.is_castle_kingside() { "O-O" } else { "O-O-O" });
    } else {
        if let Some(letter) = m.piece.san_letter() {
            san.push(letter);
            let (needs_file, needs_rank) = needs_disambiguation(m, legal);
            if needs_file {
                san.push(m.from.file_char());
            }
            if needs_rank {
                san.push(m.from.rank_char());
            }
        } else if m.captured.is_some() {
            san.push(m.from.file_char());
        }

        if m.captured.is_some() {
            san.push('x');
        }
        san.push_str(&m.to.to_string());

        if let Some(promo) = m.promotion.and_then(Piece::san_letter) {
            san.push('=');
            san.push(promo);
        }
    }

    let after = play(board, m);
    let is_check = is_in_check(&after, after.side_to_move());
    let is_checkmate = is_check && generate_legal(&after).is_empty();
    if is_checkmate {
        san.push('#');
    } else if is_check {
        san.push('+');
    }

    Rendered {
        notation: san,
        is_check,
        is_checkmate,
    }
}

/// Returns (`needs_file`, `needs_rank`).
fn needs_disambiguation(m: &Candidate, legal: &[Candidate]) -> (bool, bool) {
    let rivals: Vec<&Candidate> = legal
        .iter()
        .filter(|other| other.to == m.to && other.piece == m.piece && other.from != m.from)
        .collect();

    if rivals.is_empty() {
        return (false, false);
    }

    let same_file = rivals.iter().any(|o| o.from.file() == m.from.file());
    let same_rank = rivals.iter().any(|o| o.from.rank() == m.from.rank());

    match (same_file, same_rank) {
        (false, _) => (true, false),
        (true, false) => (false, true),
        (true, true) => (true, true),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct SanParts {
    piece: Piece,
    dest: Square,
    file: Option<usize>,
    rank: Option<usize>,
    promotion: Option<Piece>,
}

/// Drop surrounding whitespace and trailing `+`, `#`, `!` and `?` marks.
pub(crate) fn strip_annotations(san: &str) -> &str {
    san.trim().trim_end_matches(['+', '#', '!', '?'])
}

fn parse_parts(san: &str) -> Result<SanParts, SanError> {
    let mut chars: Vec<char> = san.chars().collect();

    let piece = match chars.first() {
        None => return Err(SanError::Empty),
        Some(&c) if c.is_ascii_uppercase() => {
            let piece = Piece::from_san_letter(c).ok_or(SanError::InvalidPiece { char: c })?;
            chars.remove(0);
            piece
        }
        Some(_) => Piece::Pawn,
    };

    let mut promotion = None;
    if let Some(eq) = chars.iter().position(|&c| c == '=') {
        let promo_char = chars
            .get(eq + 1)
            .copied()
            .ok_or(SanError::InvalidPromotion { char: '=' })?;
        promotion = Some(
            Piece::from_char(promo_char)
                .filter(|p| p.is_promotion_target())
                .ok_or(SanError::InvalidPromotion { char: promo_char })?,
        );
        chars.truncate(eq);
    } else if piece == Piece::Pawn && chars.len() >= 3 {
        // "e8Q": promotion letter glued to the destination
        let last = chars[chars.len() - 1];
        if last.is_ascii_alphabetic() && chars[chars.len() - 2].is_ascii_digit() {
            promotion = Some(
                Piece::from_char(last)
                    .filter(|p| p.is_promotion_target())
                    .ok_or(SanError::InvalidPromotion { char: last })?,
            );
            chars.pop();
        }
    }

    if chars.len() < 2 {
        return Err(SanError::InvalidSquare {
            notation: chars.iter().collect(),
        });
    }
    let split = chars.len() - 2;
    let dest = Square::from_chars(chars[split], chars[split + 1]).ok_or_else(|| {
        SanError::InvalidSquare {
            notation: chars[split..].iter().collect(),
        }
    })?;

    let mut prefix = &chars[..split];
    if prefix.last() == Some(&'x') {
        prefix = &prefix[..prefix.len() - 1];
    }

    let mut file = None;
    let mut rank = None;
    for &c in prefix {
        match c {
            'a'..='h' if file.is_none() && rank.is_none() => {
                file = Some(c as usize - 'a' as usize);
            }
            '1'..='8' if rank.is_none() => rank = Some(c as usize - '1' as usize),
            _ => {
                return Err(SanError::InvalidSquare {
                    notation: san.to_string(),
                })
            }
        }
    }

    Ok(SanParts {
        piece,
        dest,
        file,
        rank,
        promotion,
    })
}

fn find_castling(board: &Board, kingside: bool, san: &str) -> Result<Candidate, SanError> {
    generate_legal(board)
        .into_iter()
        .find(|m| m.is_castling && m.is_castle_kingside() == kingside)
        .ok_or_else(|| SanError::NoMatchingMove {
            san: san.to_string(),
        })
}

/// Parse a SAN move for `board.side_to_move()`.
///
/// Check and annotation suffixes are ignored, as is a capture marker on a
/// move that does not capture.
pub(crate) fn parse(board: &Board, san: &str) -> Result<Candidate, SanError> {
    let san = strip_annotations(san);
    if san.is_empty() {
        return Err(SanError::Empty);
    }

    match san {
        "O-O" | "0-0" => return find_castling(board, true, san),
        "O-O-O" | "0-0-0" => return find_castling(board, false, san),
        _ => {}
    }

    let parts = parse_parts(san)?;
    let matching: Vec<Candidate> = generate_legal(board)
        .into_iter()
        .filter(|m| {
            m.to == parts.dest
                && m.piece == parts.piece
                && !m.is_castling
                && m.promotion == parts.promotion
                && parts.file.map_or(true, |f| m.from.file() == f)
                && parts.rank.map_or(true, |r| m.from.rank() == r)
        })
        .collect();

    match matching.as_slice() {
        [] => Err(SanError::NoMatchingMove {
            san: san.to_string(),
        }),
        [only] => Ok(*only),
        _ => Err(SanError::AmbiguousMove {
            san: san.to_string(),
        }),
    }
}
