//! Human-readable output for game analyses.

use chess_analysis::{GameAnalysis, PlayerStats};
use chess_core::Color;
use std::fmt::Write;

/// Formats one line per move followed by a summary per side.
pub fn analysis(analysis: &GameAnalysis) -> String {
    let mut out = String::new();
    for m in &analysis.moves {
        let number = (m.ply + 1) / 2;
        let dots = match m.mover {
            Color::White => ".",
            Color::Black => "...",
        };
        let loss = m
            .cp_loss
            .map_or_else(|| "-".to_string(), |loss| loss.to_string());
        let _ = writeln!(
            out,
            "{number}{dots} {} {:>7} -> {:<7} loss {loss}",
            m.uci,
            m.before.label(),
            m.after.label(),
        );
    }
    let _ = writeln!(out, "{}", player(&analysis.white));
    let _ = write!(out, "{}", player(&analysis.black));
    out
}

fn player(stats: &PlayerStats) -> String {
    match (stats.acpl, stats.band) {
        (Some(acpl), Some(band)) => format!(
            "{}: ACPL {:.1} over {} moves, {}",
            stats.color, acpl, stats.scored_moves, band
        ),
        _ => format!("{}: no scored moves", stats.color),
    }
}
