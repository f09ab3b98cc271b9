//! Centipawn loss and playing-strength estimates.

use crate::Evaluation;
use chess_core::Color;
use serde::Serialize;
use std::fmt;

/// Returns how many centipawns `mover` gave away between the position before
/// and after their move.
///
/// Only centipawn scores are compared; if either side of the move is a mate
/// score there is no meaningful loss and `None` is returned. A move that
/// improves the mover's standing loses nothing, unlike an absolute swing
/// `|after - before|`, which would also charge the mover for good moves.
pub fn centipawn_loss(before: Evaluation, after: Evaluation, mover: Color) -> Option<u32> {
    let (Evaluation::Centipawns(before), Evaluation::Centipawns(after)) = (before, after) else {
        return None;
    };
    let swing = match mover {
        Color::White => before - after,
        Color::Black => after - before,
    };
    Some(swing.max(0).unsigned_abs())
}

/// Average of the given losses, or `None` when there are none.
pub fn average_centipawn_loss(losses: &[u32]) -> Option<f64> {
    if losses.is_empty() {
        return None;
    }
    let total: u64 = losses.iter().map(|&loss| u64::from(loss)).sum();
    Some(total as f64 / losses.len() as f64)
}

/// Rough playing-strength band derived from the average centipawn loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthBand {
    /// ACPL below 20.
    Grandmaster,
    /// ACPL below 50, roughly 1800-2200.
    StrongClub,
    /// ACPL below 100, roughly 1400-1800.
    Intermediate,
    /// Everything else.
    Beginner,
}

impl StrengthBand {
    pub fn from_acpl(acpl: f64) -> Self {
        if acpl < 20.0 {
            StrengthBand::Grandmaster
        } else if acpl < 50.0 {
            StrengthBand::StrongClub
        } else if acpl < 100.0 {
            StrengthBand::Intermediate
        } else {
            StrengthBand::Beginner
        }
    }

    /// Human-readable description of the band.
    pub fn description(self) -> &'static str {
        match self {
            StrengthBand::Grandmaster => "Grandmaster level",
            StrengthBand::StrongClub => "Strong club player (1800-2200)",
            StrengthBand::Intermediate => "Intermediate player (1400-1800)",
            StrengthBand::Beginner => "Beginner or casual player",
        }
    }
}

impl fmt::Display for StrengthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Statistics for a player's performance in a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub color: Color,
    /// Moves played by this side.
    pub total_moves: u32,
    /// Moves whose loss could be measured (no mate score involved).
    pub scored_moves: u32,
    /// Average centipawn loss over the scored moves.
    pub acpl: Option<f64>,
    /// Strength band for `acpl`, if there is one.
    pub band: Option<StrengthBand>,
}

impl PlayerStats {
    /// Builds stats from the per-move losses of one side; `None` entries
    /// are moves that could not be scored.
    pub fn from_losses(color: Color, losses: &[Option<u32>]) -> Self {
        let scored: Vec<u32> = losses.iter().flatten().copied().collect();
        let acpl = average_centipawn_loss(&scored);
        Self {
            color,
            total_moves: losses.len() as u32,
            scored_moves: scored.len() as u32,
            acpl,
            band: acpl.map(StrengthBand::from_acpl),
        }
    }
}
