//! Move-tree node counting.
//!
//! Perft counts the leaf nodes of the pseudo-legal move tree at a given
//! depth. The counts match the standard tables only while no position in the
//! tree has an illegal, castling, en passant or promotion move, which holds
//! for the start position through depth 3.

use super::generate_moves;
use crate::Position;
use chess_core::Move;

/// Counts the leaf nodes `depth` plies below `position`.
///
/// Every move is applied and then undone, so the position is unchanged on
/// return.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    match depth {
        0 => 1,
        1 => generate_moves(position).len() as u64,
        _ => generate_moves(position)
            .iter()
            .map(|m| subtree(position, m, depth - 1))
            .sum(),
    }
}

/// Node count below each root move, sorted by UCI text.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let below = depth.saturating_sub(1);
    let mut counts: Vec<(String, u64)> = generate_moves(position)
        .iter()
        .map(|m| (m.to_uci(), subtree(position, m, below)))
        .collect();
    counts.sort_unstable();
    counts
}

fn subtree(position: &mut Position, m: &Move, depth: u32) -> u64 {
    position.apply(m);
    let nodes = perft(position, depth);
    position.undo();
    nodes
}
