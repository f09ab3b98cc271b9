//! Core types for chess.
//!
//! This crate provides the fundamental types used across the workspace:
//! - [`Piece`], [`PieceKind`] and [`Color`] for square contents
//! - [`Square`] for row/column board coordinates
//! - [`Move`] for move representation
//! - [`FenBoard`] for reading a grid out of FEN

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenBoard, FenError, START_FEN};
pub use mov::Move;
pub use piece::{parse_square_code, square_code, Piece, PieceCodeError, PieceKind, EMPTY_CODE};
pub use square::{Square, COLS, ROWS};
