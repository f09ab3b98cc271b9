//! Text rendering of the board and the evaluation bar.

use chess_analysis::Evaluation;
use chess_core::{square_code, Square};
use chess_engine::Position;
use std::fmt::Write;

/// Width of the evaluation bar in characters.
pub const BAR_WIDTH: usize = 20;

/// Renders the grid with rank and file labels, white at the bottom.
///
/// A selected square is drawn in brackets.
pub fn board(position: &Position, selected: Option<Square>) -> String {
    let mut out = String::new();
    for row in 0..8u8 {
        let _ = write!(out, "{} ", 8 - row);
        for col in 0..8u8 {
            let Some(sq) = Square::new(row, col) else {
                continue;
            };
            let code = square_code(position.piece_at(sq));
            if selected == Some(sq) {
                let _ = write!(out, "[{code}]");
            } else {
                let _ = write!(out, " {code} ");
            }
        }
        out.push('\n');
    }
    out.push_str("   a   b   c   d   e   f   g   h\n");
    let _ = write!(out, "{} to move", position.side_to_move());
    out
}

/// Renders an evaluation as a bar filled with white's share, followed by
/// its label.
pub fn eval_bar(evaluation: Evaluation) -> String {
    let filled = (evaluation.bar_fraction() * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        evaluation.label()
    )
}
