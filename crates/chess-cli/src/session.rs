//! The interactive `play` loop.

use crate::command::{Command, HELP};
use crate::opponent::RandomOpponent;
use crate::render;
use chess_analysis::{evaluate_or_neutral, Evaluation, Evaluator};
use chess_core::{Color, Move, Square};
use chess_engine::{moves_from, Game, Selection};
use std::io::{self, BufRead, Write};

/// A game driven by text commands.
pub struct Session {
    game: Game,
    evaluator: Option<Box<dyn Evaluator>>,
    opponent: Option<RandomOpponent>,
    human: Color,
}

impl Session {
    /// Starts a session; the side to move in `game` is the human's side.
    pub fn new(game: Game) -> Self {
        let human = game.position().side_to_move();
        Self {
            game,
            evaluator: None,
            opponent: None,
            human,
        }
    }

    /// Shows an evaluation after every move.
    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Lets `opponent` answer every move of the human.
    pub fn with_opponent(mut self, opponent: RandomOpponent) -> Self {
        self.opponent = Some(opponent);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", render::board(self.game.position(), None))?;
        let mut lines = input.lines();
        loop {
            write!(out, "{}> ", self.game.position().side_to_move())?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => self.handle(command, out)?,
                Err(err) => writeln!(out, "{err} (type 'help' for commands)")?,
            }
        }
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        match command {
            Command::Move(start, end) => match self.game.try_move(start, end) {
                Ok(m) => self.after_move(m, out)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Select(sq) => self.select(sq, out)?,
            Command::Undo => self.undo(out)?,
            Command::Moves => {
                let moves = self.game.legal_moves();
                let list: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
                writeln!(out, "{} moves: {}", moves.len(), list.join(" "))?;
            }
            Command::Fen => writeln!(out, "{}", self.game.to_fen())?,
            Command::Eval => {
                let evaluation = self.evaluate();
                writeln!(out, "{}", render::eval_bar(evaluation))?;
            }
            Command::Board => writeln!(
                out,
                "{}",
                render::board(self.game.position(), self.game.selected())
            )?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn select<W: Write>(&mut self, sq: Square, out: &mut W) -> io::Result<()> {
        match self.game.select(sq) {
            Selection::Pending(sq) => {
                let targets: Vec<String> = moves_from(self.game.position(), sq)
                    .iter()
                    .map(|m| m.end().to_string())
                    .collect();
                if targets.is_empty() {
                    writeln!(out, "selected {sq} (no moves)")
                } else {
                    writeln!(out, "selected {sq}: {}", targets.join(" "))
                }
            }
            Selection::Cleared => writeln!(out, "selection cleared"),
            Selection::Moved(m) => self.after_move(m, out),
            Selection::Rejected(m) => writeln!(out, "illegal move: {m}"),
        }
    }

    fn undo<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Ok(m) = self.game.undo() else {
            return writeln!(out, "no move to undo");
        };
        writeln!(out, "took back {m}")?;
        // With an opponent, unwind to the human's turn.
        if self.opponent.is_some() && self.game.position().side_to_move() != self.human {
            if let Ok(m) = self.game.undo() {
                writeln!(out, "took back {m}")?;
            }
        }
        writeln!(out, "{}", render::board(self.game.position(), None))
    }

    fn after_move<W: Write>(&mut self, m: Move, out: &mut W) -> io::Result<()> {
        writeln!(out, "played {m}")?;
        if self.game.position().side_to_move() != self.human {
            if let Some(opponent) = self.opponent.as_mut() {
                match opponent.choose(self.game.position()) {
                    Some(reply) => match self.game.try_move(reply.start(), reply.end()) {
                        Ok(reply) => writeln!(out, "opponent plays {reply}")?,
                        Err(err) => tracing::error!(%err, "opponent chose an ungenerated move"),
                    },
                    None => writeln!(out, "opponent has no moves")?,
                }
            }
        }
        writeln!(out, "{}", render::board(self.game.position(), None))?;
        if self.evaluator.is_some() {
            let evaluation = self.evaluate();
            writeln!(out, "{}", render::eval_bar(evaluation))?;
        }
        Ok(())
    }

    fn evaluate(&mut self) -> Evaluation {
        let fen = self.game.to_fen();
        evaluate_or_neutral(&mut self.evaluator, &fen)
    }
}
