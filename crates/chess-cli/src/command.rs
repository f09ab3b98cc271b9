//! Parsing of the commands typed at the interactive prompt.

use chess_core::Square;
use std::fmt;

/// One line of user input at the `play` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Both squares at once, e.g. `e2e4` or `6 4 4 4`.
    Move(Square, Square),
    /// A single click, e.g. `select e2` or `6 4`.
    Select(Square),
    Undo,
    Moves,
    Fen,
    Eval,
    Board,
    Help,
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

/// Text printed by the `help` command.
pub const HELP: &str = "\
commands:
  e2e4            move from e2 to e4
  6 4 4 4         same move as grid coordinates (row col row col, row 0 = rank 8)
  select e2       click a square; a second click on another square moves
  6 4             click by grid coordinates
  undo            take back the last move
  moves           list pseudo-legal moves
  fen             print the position as FEN
  eval            evaluate the position
  board           print the board
  help            show this text
  quit            leave";

impl Command {
    /// Parses one input line. Surrounding whitespace and case are ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim().to_ascii_lowercase();
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(ParseError("empty command".to_string())),
            ["undo" | "u"] => Ok(Command::Undo),
            ["moves" | "m"] => Ok(Command::Moves),
            ["fen"] => Ok(Command::Fen),
            ["eval" | "e"] => Ok(Command::Eval),
            ["board" | "b"] => Ok(Command::Board),
            ["help" | "h" | "?"] => Ok(Command::Help),
            ["quit" | "q" | "exit"] => Ok(Command::Quit),
            ["select", sq] => algebraic(sq).map(Command::Select),
            [mv] if mv.len() == 4 => {
                let (start, end) = mv.split_at(2);
                Ok(Command::Move(algebraic(start)?, algebraic(end)?))
            }
            [mv] => algebraic(mv).map(Command::Select),
            [row, col] => grid(row, col).map(Command::Select),
            [r1, c1, r2, c2] => Ok(Command::Move(grid(r1, c1)?, grid(r2, c2)?)),
            _ => Err(ParseError(format!("unknown command: {line}"))),
        }
    }
}

fn algebraic(text: &str) -> Result<Square, ParseError> {
    Square::from_algebraic(text).ok_or_else(|| ParseError(format!("not a square: {text}")))
}

fn grid(row: &str, col: &str) -> Result<Square, ParseError> {
    let index = |text: &str| text.parse::<u8>().ok();
    index(row)
        .zip(index(col))
        .and_then(|(row, col)| Square::new(row, col))
        .ok_or_else(|| ParseError(format!("not a grid square: {row} {col}")))
}
