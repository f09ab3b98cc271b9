//! Position evaluation through an external UCI engine.
//!
//! This crate is the bridge between a board and Stockfish (or any other UCI
//! engine). Every failure on that path degrades to a neutral score.
//!
//! # Overview
//!
//! - [`Evaluation`] - Position score from white's point of view
//! - [`Evaluator`] - Anything that scores a FEN; [`evaluate_or_neutral`] applies the fallback
//! - [`UciEngine`] - Wrapper for UCI analysis engines like Stockfish
//! - [`AppConfig`] - Engine settings loaded from TOML
//! - [`GameAnalyzer`] - Per-move evaluation and centipawn loss for a whole game
//!
//! # Example
//!
//! ```no_run
//! use chess_analysis::{evaluate_or_neutral, AppConfig, UciEngine};
//! use chess_engine::Position;
//!
//! let config = AppConfig::load("chess.toml")?;
//! let mut engine = UciEngine::new(&config.engine).ok();
//! let evaluation = evaluate_or_neutral(&mut engine, &Position::startpos().to_fen());
//! println!("{}", evaluation.label());
//! # Ok::<(), chess_analysis::ConfigError>(())
//! ```

pub mod analyzer;
pub mod bridge;
pub mod config;
pub mod engine;
pub mod evaluation;
pub mod quality;

pub use analyzer::{parse_moves, AnalyzerError, GameAnalysis, GameAnalyzer, MoveEvaluation};
pub use bridge::{evaluate_or_neutral, Evaluator};
pub use config::{AppConfig, ConfigError, EngineConfig, DEFAULT_CONFIG_FILE};
pub use engine::{EngineError, PositionAnalysis, UciEngine};
pub use evaluation::Evaluation;
pub use quality::{average_centipawn_loss, centipawn_loss, PlayerStats, StrengthBand};
