//! Mailbox chess engine with pseudo-legal move generation.
//!
//! This crate provides:
//! - [`Position`] - 8x8 grid of square contents, side to move and undo log
//! - [`generate_moves`] - pseudo-legal move generation dispatched by piece kind
//! - FEN serialization via [`Position::to_fen`]
//! - [`Game`] - two-click move entry checked against the generated moves
//!
//! # Limitations
//!
//! There is no check detection: moves that leave the mover's king capturable
//! are generated and accepted. Castling, en passant and promotion are not
//! implemented, and FEN output always ends in `- - 0 1`.
//!
//! # Example
//!
//! ```
//! use chess_engine::{generate_moves, Position};
//!
//! let mut position = Position::startpos();
//! let moves = generate_moves(&position);
//! assert_eq!(moves.len(), 20);
//!
//! position.apply(&moves[0]);
//! position.undo();
//! assert_eq!(position, Position::startpos());
//! ```

mod game;
pub mod movegen;
mod position;

pub use game::{Game, GameError, Selection};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{generate_moves, moves_from, MoveList};
pub use position::{Grid, Position};
