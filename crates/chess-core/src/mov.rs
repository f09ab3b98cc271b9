//! Move representation.

use crate::{Piece, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A chess move.
///
/// Carries the start and end squares plus a snapshot of the piece that stood
/// on each of them when the move was built. Equality and hashing look only at
/// the coordinates, so a move typed in by a user matches the generated move
/// with the same squares whatever its snapshots say.
#[derive(Clone, Copy)]
pub struct Move {
    start: Square,
    end: Square,
    moved: Option<Piece>,
    captured: Option<Piece>,
}

impl Move {
    /// Creates a move with snapshots of the start and end square contents.
    #[inline]
    pub const fn new(
        start: Square,
        end: Square,
        moved: Option<Piece>,
        captured: Option<Piece>,
    ) -> Self {
        Move {
            start,
            end,
            moved,
            captured,
        }
    }

    /// Creates a move from coordinates alone, with empty snapshots.
    #[inline]
    pub const fn candidate(start: Square, end: Square) -> Self {
        Self::new(start, end, None, None)
    }

    /// Returns the source square.
    #[inline]
    pub const fn start(self) -> Square {
        self.start
    }

    /// Returns the destination square.
    #[inline]
    pub const fn end(self) -> Square {
        self.end
    }

    /// Returns the piece that stood on the start square.
    #[inline]
    pub const fn moved(self) -> Option<Piece> {
        self.moved
    }

    /// Returns the piece that stood on the end square, if any.
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    /// Returns true if the end square held a piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    /// Returns the UCI notation for this move (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.start, self.end)
    }

    /// Parses the coordinates of a move from UCI notation.
    ///
    /// Snapshots are left empty; look the move up in a generated move list
    /// to recover them. Promotion suffixes are rejected since pawns never
    /// promote here.
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let start = Square::from_algebraic(&s[0..2])?;
        let end = Square::from_algebraic(&s[2..4])?;
        Some(Move::candidate(start, end))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
