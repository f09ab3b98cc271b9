//! Computer opponents for the interactive game.

use chess_core::Move;
use chess_engine::{generate_moves, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Picks a uniformly random pseudo-legal move.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    /// Creates an opponent seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an opponent with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Chooses a reply, or `None` if the side to move has no moves.
    pub fn choose(&mut self, position: &Position) -> Option<Move> {
        let moves = generate_moves(position);
        moves.as_slice().choose(&mut self.rng).copied()
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}
