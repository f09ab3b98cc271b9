//! Interactive game session.
//!
//! The [`Game`] struct is the caller side of the board core: it turns two
//! square selections into a candidate move, accepts it only if the move
//! generator lists it, and applies it to the owned [`Position`].

use crate::movegen::generate_moves;
use crate::{MoveList, Position};
use chess_core::{FenError, Move, Square};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not in the generated pseudo-legal move list.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The move text could not be parsed.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
    /// There is no move to take back.
    #[error("no move to undo")]
    NothingToUndo,
}

/// Result of selecting a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The square is now the pending start square.
    Pending(Square),
    /// The pending square was selected again and the selection was cleared.
    Cleared,
    /// Two squares were selected and the move between them was played.
    Moved(Move),
    /// Two squares were selected but no generated move joins them.
    Rejected(Move),
}

/// A game in progress: the position plus the pending square selection.
#[derive(Debug, Clone, Default)]
pub struct Game {
    position: Position,
    selected: Option<Square>,
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        Game {
            position,
            selected: None,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the pending selected square, if any.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Returns all pseudo-legal moves in the current position.
    ///
    /// The list is a snapshot; it goes stale after the next move or undo.
    pub fn legal_moves(&self) -> MoveList {
        generate_moves(&self.position)
    }

    /// Returns the number of half-moves played.
    pub fn ply_count(&self) -> usize {
        self.position.move_log().len()
    }

    /// Selects a square.
    ///
    /// The first selection becomes the pending start square. Selecting the
    /// same square again clears it. Selecting a different square attempts
    /// the move between the two and clears the selection either way.
    pub fn select(&mut self, sq: Square) -> Selection {
        match self.selected.take() {
            None => {
                self.selected = Some(sq);
                Selection::Pending(sq)
            }
            Some(start) if start == sq => Selection::Cleared,
            Some(start) => match self.try_move(start, sq) {
                Ok(m) => Selection::Moved(m),
                Err(_) => Selection::Rejected(self.position.candidate_move(start, sq)),
            },
        }
    }

    /// Plays the move between two squares if the move generator lists it.
    ///
    /// The applied move carries the generator's snapshots.
    pub fn try_move(&mut self, start: Square, end: Square) -> Result<Move, GameError> {
        let candidate = self.position.candidate_move(start, end);
        let m = self
            .legal_moves()
            .find(start, end)
            .ok_or_else(|| GameError::IllegalMove(candidate.to_uci()))?;
        self.position.apply(&m);
        self.selected = None;
        Ok(m)
    }

    /// Plays a move given in UCI notation (e.g., "e2e4").
    pub fn try_move_uci(&mut self, uci: &str) -> Result<Move, GameError> {
        let m = Move::from_uci(uci).ok_or_else(|| GameError::InvalidNotation(uci.to_string()))?;
        self.try_move(m.start(), m.end())
    }

    /// Takes back the last move and clears any pending selection.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        self.selected = None;
        self.position.undo().ok_or(GameError::NothingToUndo)
    }

    /// Returns the FEN of the current position.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}
