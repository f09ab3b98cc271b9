//! Chess position evaluation types.

use chess_core::Color;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Pawn value a forced mate is shown as on the evaluation scale.
pub const MATE_PAWNS: f64 = 10.0;

/// Centipawn value a forced mate counts as when computing losses.
pub const MATE_CENTIPAWNS: i32 = 10_000;

/// Represents a chess position evaluation from white's point of view.
///
/// Evaluations are either centipawn scores (positive favors white) or a
/// forced mate for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Centipawn evaluation (positive = white advantage).
    Centipawns(i32),
    /// Forced mate in `moves` moves for `winner`. Zero means the side to
    /// move is already mated.
    Mate { moves: u32, winner: Color },
}

impl Evaluation {
    /// The score used when no engine answer is available.
    pub const NEUTRAL: Evaluation = Evaluation::Centipawns(0);

    /// Creates a centipawn evaluation.
    pub const fn centipawns(value: i32) -> Self {
        Evaluation::Centipawns(value)
    }

    /// Builds an evaluation from a UCI `score` field.
    ///
    /// UCI scores are relative to the side to move; the result is turned
    /// around to white's point of view. A mate score takes precedence over a
    /// centipawn score. `mate 0` means the side to move is mated.
    pub fn from_uci_score(cp: Option<i32>, mate: Option<i32>, side_to_move: Color) -> Option<Self> {
        if let Some(mate) = mate {
            let winner = if mate > 0 {
                side_to_move
            } else {
                side_to_move.opposite()
            };
            return Some(Evaluation::Mate {
                moves: mate.unsigned_abs(),
                winner,
            });
        }
        let cp = cp?;
        Some(match side_to_move {
            Color::White => Evaluation::centipawns(cp),
            Color::Black => Evaluation::centipawns(-cp),
        })
    }

    /// Returns the evaluation in pawns.
    ///
    /// Mates are pinned to ±[`MATE_PAWNS`].
    pub fn pawns(self) -> f64 {
        match self {
            Evaluation::Centipawns(value) => value as f64 / 100.0,
            Evaluation::Mate { winner, .. } => match winner {
                Color::White => MATE_PAWNS,
                Color::Black => -MATE_PAWNS,
            },
        }
    }

    /// Returns the score as centipawns, with mates mapped to
    /// ±[`MATE_CENTIPAWNS`] so losses can be computed across kinds.
    pub fn to_centipawns(self) -> i32 {
        match self {
            Evaluation::Centipawns(value) => value,
            Evaluation::Mate { winner: Color::White, .. } => MATE_CENTIPAWNS,
            Evaluation::Mate { winner: Color::Black, .. } => -MATE_CENTIPAWNS,
        }
    }

    /// Returns white's share of an evaluation bar, from 0.0 to 1.0.
    ///
    /// The pawn score is clamped to ±10 before scaling, so an even position
    /// fills half the bar.
    pub fn bar_fraction(self) -> f64 {
        let clamped = self.pawns().clamp(-MATE_PAWNS, MATE_PAWNS);
        (clamped + MATE_PAWNS) / (2.0 * MATE_PAWNS)
    }

    /// Returns the short label shown next to an evaluation bar.
    ///
    /// Pawn scores print with two decimals, pending mates as `M<n>`, and a
    /// delivered mate as the game result.
    pub fn label(self) -> String {
        match self {
            Evaluation::Centipawns(_) => format!("{:.2}", self.pawns()),
            Evaluation::Mate { moves: 0, winner } => match winner {
                Color::White => "1-0".to_string(),
                Color::Black => "0-1".to_string(),
            },
            Evaluation::Mate { moves, .. } => format!("M{}", moves),
        }
    }

    /// Returns true for a forced mate.
    pub fn is_mate(self) -> bool {
        matches!(self, Evaluation::Mate { .. })
    }
}

impl Default for Evaluation {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Serializes as `{"kind": "centipawn", "value": n}` or
/// `{"kind": "mate", "movesToMate": n, "winner": "white"}`.
impl Serialize for Evaluation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Evaluation::Centipawns(value) => {
                let mut state = serializer.serialize_struct("Evaluation", 2)?;
                state.serialize_field("kind", "centipawn")?;
                state.serialize_field("value", &value)?;
                state.end()
            }
            Evaluation::Mate { moves, winner } => {
                let mut state = serializer.serialize_struct("Evaluation", 3)?;
                state.serialize_field("kind", "mate")?;
                state.serialize_field("movesToMate", &moves)?;
                state.serialize_field("winner", &winner)?;
                state.end()
            }
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Centipawns(value) => write!(f, "{} centipawns", value),
            Evaluation::Mate { moves, winner } => write!(f, "{} mates in {}", winner, moves),
        }
    }
}
