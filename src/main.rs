use std::io::{self, BufRead, Write};

use chess_puzzle::cli::{Command, Session};

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        if command == Command::Quit {
            break;
        }
        for out in session.execute(&command) {
            writeln!(stdout, "{out}")?;
        }
        stdout.flush()?;
    }
    Ok(())
}
