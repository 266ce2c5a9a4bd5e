//! Line-oriented command front end.
//!
//! Each input line is one command; each command answers with one or more
//! lines. Two-argument commands separate their arguments with `|` because
//! records and move text both contain spaces.
//!
//! ```text
//! decode <record>
//! diff <record> | <record>
//! infer <record> | <record>
//! resolve <record> | <move text>
//! setoption name <name> [value <value>]
//! quit
//! ```

use crate::board::{Board, Color, Piece};
use crate::diff::{diff, Change};
use crate::infer::infer;
use crate::resolve::{ResolutionOutcome, Resolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Decode(String),
    Diff { before: String, after: String },
    Infer { before: String, after: String },
    Resolve { record: String, text: String },
    SetOption { name: String, value: Option<String> },
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Command> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };
        let pair = || {
            rest.split_once('|')
                .map(|(a, b)| (a.trim().to_string(), b.trim().to_string()))
        };
        let unknown = || Command::Unknown(trimmed.to_string());

        let cmd = match word {
            "decode" if !rest.is_empty() => Command::Decode(rest.to_string()),
            "diff" => match pair() {
                Some((before, after)) => Command::Diff { before, after },
                None => unknown(),
            },
            "infer" => match pair() {
                Some((before, after)) => Command::Infer { before, after },
                None => unknown(),
            },
            "resolve" => match pair() {
                Some((record, text)) => Command::Resolve { record, text },
                None => unknown(),
            },
            "setoption" => parse_setoption(rest).unwrap_or_else(unknown),
            "quit" => Command::Quit,
            _ => unknown(),
        };
        Some(cmd)
    }
}

fn parse_setoption(rest: &str) -> Option<Command> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.first() != Some(&"name") {
        return None;
    }
    let value_at = parts.iter().position(|p| *p == "value");
    let name_end = value_at.unwrap_or(parts.len());
    if name_end <= 1 {
        return None;
    }
    Some(Command::SetOption {
        name: parts[1..name_end].join(" "),
        value: value_at.map(|i| parts[i + 1..].join(" ")),
    })
}

fn cell_char(cell: Option<(Color, Piece)>) -> char {
    cell.map_or('.', |(color, piece)| piece.to_fen_char(color))
}

fn change_name(change: Change) -> &'static str {
    match change {
        Change::Vacated => "vacated",
        Change::Occupied => "occupied",
        Change::Replaced => "replaced",
    }
}

/// Interpreter state carried between commands.
#[derive(Debug, Default)]
pub struct Session {
    resolver: Resolver,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Session::default()
    }

    /// Run one command and return the response lines. `Quit` is left to
    /// the caller and produces no output.
    pub fn execute(&mut self, command: &Command) -> Vec<String> {
        match command {
            Command::Decode(record) => match Board::decode(record) {
                Ok(board) => vec![format!("record {board}")],
                Err(e) => vec![format!("error {e}")],
            },
            Command::Diff { before, after } => match decode_pair(before, after) {
                Ok((before, after)) => {
                    let d = diff(&before, &after);
                    let mut out: Vec<String> = d
                        .entries()
                        .iter()
                        .map(|e| {
                            format!(
                                "{} {} {} {}",
                                e.square,
                                change_name(e.change()),
                                cell_char(e.before),
                                cell_char(e.after)
                            )
                        })
                        .collect();
                    out.push(format!("changed {}", d.len()));
                    out
                }
                Err(line) => vec![line],
            },
            Command::Infer { before, after } => match decode_pair(before, after) {
                Ok((before, after)) => match infer(self.resolver.rules(), &before, &after) {
                    Ok(inference) => vec![format!(
                        "move {} uci {} validated {}",
                        inference.mv.notation,
                        inference.mv.uci(),
                        inference.engine_validated
                    )],
                    Err(e) => vec![format!("error {e}")],
                },
                Err(line) => vec![line],
            },
            Command::Resolve { record, text } => match Board::decode(record) {
                Ok(board) => match self.resolver.resolve(text, &board) {
                    ResolutionOutcome::Resolved { board, mv, strategy } => vec![
                        format!("resolved {} via {strategy}", mv.notation),
                        format!("record {board}"),
                    ],
                    ResolutionOutcome::Unresolved { tried } => {
                        let names: Vec<&str> = tried.iter().map(|k| k.name()).collect();
                        vec![format!("unresolved tried {}", names.join(","))]
                    }
                },
                Err(e) => vec![format!("error {e}")],
            },
            Command::SetOption { name, value } => {
                match self.resolver.config_mut().set_option(name, value.as_deref()) {
                    Ok(()) => Vec::new(),
                    Err(e) => vec![format!("error {e}")],
                }
            }
            Command::Quit => Vec::new(),
            Command::Unknown(line) => vec![format!("error Unknown command '{line}'")],
        }
    }
}

fn decode_pair(before: &str, after: &str) -> Result<(Board, Board), String> {
    let before = Board::decode(before).map_err(|e| format!("error {e}"))?;
    let after = Board::decode(after).map_err(|e| format!("error {e}"))?;
    Ok((before, after))
}
