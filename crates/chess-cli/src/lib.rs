//! Terminal front end for the chess board.
//!
//! # Modules
//!
//! - [`command`] - Parsing of the commands typed at the `play` prompt
//! - [`session`] - The interactive game loop
//! - [`opponent`] - Random-move computer opponent
//! - [`render`] - Board and evaluation bar as text
//! - [`report`] - Text output for game analyses

pub mod command;
pub mod opponent;
pub mod render;
pub mod report;
pub mod session;
