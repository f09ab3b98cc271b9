//! Whole-game evaluation with per-move centipawn loss.
//!
//! This module provides the [`GameAnalyzer`], which replays a move list on a
//! [`Position`], scores every position through an [`Evaluator`] and turns the
//! score swings into centipawn losses and per-side statistics.

use chess_core::{Color, Move};
use chess_engine::{generate_moves, Position};
use serde::Serialize;
use thiserror::Error;

use crate::bridge::{evaluate_or_neutral, Evaluator};
use crate::evaluation::Evaluation;
use crate::quality::{centipawn_loss, PlayerStats};

/// Errors that can occur during game analysis.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyzerError {
    /// A move is not among the pseudo-legal moves of its position.
    #[error("Illegal move at ply {ply}: {uci}")]
    IllegalMove { ply: usize, uci: String },
    /// A move could not be read as coordinate notation.
    #[error("Invalid move notation: {0}")]
    InvalidNotation(String),
}

/// Evaluation of a single played move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveEvaluation {
    /// One-based half-move number.
    pub ply: usize,
    pub mover: Color,
    /// The move in coordinate notation, e.g. "e2e4".
    pub uci: String,
    /// Score of the position before the move.
    pub before: Evaluation,
    /// Score of the position after the move.
    pub after: Evaluation,
    /// Centipawns the mover gave away, if both scores are centipawns.
    pub cp_loss: Option<u32>,
}

/// Complete evaluation of a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameAnalysis {
    pub start_fen: String,
    pub final_fen: String,
    pub moves: Vec<MoveEvaluation>,
    pub white: PlayerStats,
    pub black: PlayerStats,
}

/// Parses coordinate-notation moves such as `e2e4`.
///
/// # Errors
///
/// Returns [`AnalyzerError::InvalidNotation`] for the first unreadable move.
pub fn parse_moves<S: AsRef<str>>(moves: &[S]) -> Result<Vec<Move>, AnalyzerError> {
    moves
        .iter()
        .map(|m| {
            let text = m.as_ref();
            Move::from_uci(text).ok_or_else(|| AnalyzerError::InvalidNotation(text.to_string()))
        })
        .collect()
}

/// Evaluates whole games move by move.
///
/// Evaluation failures never abort an analysis: they fall back to the
/// neutral score, as everywhere else.
pub struct GameAnalyzer<E: Evaluator> {
    evaluator: E,
}

impl<E: Evaluator> GameAnalyzer<E> {
    /// Creates an analyzer around the given evaluator.
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    /// Gives the evaluator back.
    pub fn into_inner(self) -> E {
        self.evaluator
    }

    /// Replays `moves` from `start` and evaluates each one.
    ///
    /// For each move:
    /// 1. The move is matched against the generated moves of the current
    ///    position by its coordinates.
    /// 2. It is applied, and the position after it is evaluated.
    /// 3. The centipawn loss is computed from the mover's point of view.
    ///
    /// The score after one move is reused as the score before the next.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::IllegalMove`] if a move is not generated in
    /// its position. Nothing after that move is analyzed.
    pub fn analyze(
        &mut self,
        start: Position,
        moves: &[Move],
    ) -> Result<GameAnalysis, AnalyzerError> {
        let mut position = start;
        let start_fen = position.to_fen();
        let mut before = evaluate_or_neutral(&mut self.evaluator, &start_fen);
        let mut evaluated: Vec<MoveEvaluation> = Vec::with_capacity(moves.len());

        for (index, candidate) in moves.iter().enumerate() {
            let ply = index + 1;
            let generated = generate_moves(&position)
                .find(candidate.start(), candidate.end())
                .ok_or_else(|| AnalyzerError::IllegalMove {
                    ply,
                    uci: candidate.to_uci(),
                })?;

            let mover = position.side_to_move();
            position.apply(&generated);
            let after = evaluate_or_neutral(&mut self.evaluator, &position.to_fen());
            let cp_loss = centipawn_loss(before, after, mover);
            tracing::debug!(ply, mv = %generated, ?after, ?cp_loss, "evaluated move");

            evaluated.push(MoveEvaluation {
                ply,
                mover,
                uci: generated.to_uci(),
                before,
                after,
                cp_loss,
            });
            before = after;
        }

        let losses_of = |color: Color| -> Vec<Option<u32>> {
            evaluated
                .iter()
                .filter(|m| m.mover == color)
                .map(|m| m.cp_loss)
                .collect()
        };
        let white = PlayerStats::from_losses(Color::White, &losses_of(Color::White));
        let black = PlayerStats::from_losses(Color::Black, &losses_of(Color::Black));

        Ok(GameAnalysis {
            start_fen,
            final_fen: position.to_fen(),
            moves: evaluated,
            white,
            black,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use std::collections::VecDeque;

    /// Hands out scripted scores in order and records the FENs it was asked about.
    struct Scripted {
        scores: VecDeque<Result<Evaluation, EngineError>>,
        seen: Vec<String>,
    }

    impl Scripted {
        fn new(scores: Vec<Result<Evaluation, EngineError>>) -> Self {
            Self {
                scores: scores.into(),
                seen: Vec::new(),
            }
        }
    }

    impl Evaluator for Scripted {
        fn evaluate(&mut self, fen: &str) -> Result<Evaluation, EngineError> {
            self.seen.push(fen.to_string());
            self.scores.pop_front().unwrap_or(Err(EngineError::Closed))
        }
    }

    fn cp(value: i32) -> Result<Evaluation, EngineError> {
        Ok(Evaluation::centipawns(value))
    }

    #[test]
    fn test_losses_per_move() {
        let evaluator = Scripted::new(vec![cp(20), cp(30), cp(-40), cp(-40)]);
        let mut analyzer = GameAnalyzer::new(evaluator);
        let moves = parse_moves(&["e2e4", "e7e5", "g1f3"]).unwrap();

        let analysis = analyzer.analyze(Position::startpos(), &moves).unwrap();
        assert_eq!(analysis.moves.len(), 3);

        let first = &analysis.moves[0];
        assert_eq!(first.ply, 1);
        assert_eq!(first.mover, Color::White);
        assert_eq!(first.uci, "e2e4");
        assert_eq!(first.cp_loss, Some(0));

        // Black's reply moved the score from +30 to -40: a gain for black.
        assert_eq!(analysis.moves[1].cp_loss, Some(0));
        assert_eq!(analysis.moves[1].before, Evaluation::centipawns(30));

        assert_eq!(analysis.white.total_moves, 2);
        assert_eq!(analysis.black.total_moves, 1);
        assert_eq!(
            analysis.final_fen,
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b - - 0 1"
        );

        let seen = analyzer.into_inner().seen;
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], Position::startpos().to_fen());
    }

    #[test]
    fn test_blunder_is_measured_for_black() {
        let evaluator = Scripted::new(vec![cp(0), cp(10), cp(310)]);
        let mut analyzer = GameAnalyzer::new(evaluator);
        let moves = parse_moves(&["d2d4", "g8f6"]).unwrap();
        let analysis = analyzer.analyze(Position::startpos(), &moves).unwrap();
        assert_eq!(analysis.moves[0].cp_loss, Some(0));
        assert_eq!(analysis.moves[1].cp_loss, Some(300));
        assert_eq!(analysis.black.acpl, Some(300.0));
    }

    #[test]
    fn test_engine_failures_fall_back_to_neutral() {
        let evaluator = Scripted::new(vec![
            cp(50),
            Err(EngineError::Timeout(std::time::Duration::from_millis(5))),
        ]);
        let mut analyzer = GameAnalyzer::new(evaluator);
        let moves = parse_moves(&["e2e4", "e7e5"]).unwrap();
        let analysis = analyzer.analyze(Position::startpos(), &moves).unwrap();
        assert_eq!(analysis.moves[0].after, Evaluation::NEUTRAL);
        assert_eq!(analysis.moves[0].cp_loss, Some(50));
        // The script ran dry: the last score is neutral too.
        assert_eq!(analysis.moves[1].after, Evaluation::NEUTRAL);
    }

    #[test]
    fn test_unmatched_move_stops_analysis() {
        let evaluator = Scripted::new((0..8).map(|_| cp(0)).collect());
        let mut analyzer = GameAnalyzer::new(evaluator);
        let moves = parse_moves(&["e2e4", "e7e5", "e1e3"]).unwrap();
        let err = analyzer.analyze(Position::startpos(), &moves).unwrap_err();
        assert_eq!(
            err,
            AnalyzerError::IllegalMove {
                ply: 3,
                uci: "e1e3".to_string()
            }
        );
        assert!(err.to_string().contains("ply 3"));
    }

    #[test]
    fn test_king_exposing_move_is_still_analyzed() {
        // The e-file pin is not enforced: the pinned knight may move.
        let start = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let mut analyzer = GameAnalyzer::new(Option::<Scripted>::None);
        let moves = parse_moves(&["e2c3"]).unwrap();
        let analysis = analyzer.analyze(start, &moves).unwrap();
        assert_eq!(analysis.moves[0].after, Evaluation::NEUTRAL);
    }

    #[test]
    fn test_parse_moves_reports_bad_notation() {
        assert_eq!(
            parse_moves(&["e2e4", "e9e5"]).unwrap_err(),
            AnalyzerError::InvalidNotation("e9e5".to_string())
        );
        assert!(parse_moves::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let mut analyzer = GameAnalyzer::new(Scripted::new(vec![cp(0), cp(25)]));
        let moves = parse_moves(&["e2e4"]).unwrap();
        let analysis = analyzer.analyze(Position::startpos(), &moves).unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["moves"][0]["uci"], "e2e4");
        assert_eq!(json["moves"][0]["mover"], "white");
        assert_eq!(json["moves"][0]["after"]["value"], 25);
        assert_eq!(json["white"]["acpl"], 0.0);
        assert!(json["black"]["acpl"].is_null());
    }
}
