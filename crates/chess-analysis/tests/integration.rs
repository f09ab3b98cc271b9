//! Integration tests for chess-analysis crate.
//!
//! The Stockfish tests require Stockfish to be installed and available in PATH.
//! Run with: `cargo test -p chess-analysis --test integration -- --ignored`

use chess_analysis::{
    evaluate_or_neutral, parse_moves, AppConfig, EngineConfig, EngineError, Evaluation,
    Evaluator, GameAnalyzer, StrengthBand, UciEngine,
};
use chess_core::Color;
use chess_engine::Position;
use std::io::Write;

/// Check if Stockfish is available in PATH.
fn stockfish_available() -> bool {
    std::process::Command::new("stockfish")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}

fn fast_config() -> EngineConfig {
    EngineConfig {
        depth: 8,
        hash_mb: 16,
        threads: 1,
        ..EngineConfig::default()
    }
}

/// Scores positions by counting material, white minus black.
struct MaterialCounter;

impl Evaluator for MaterialCounter {
    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, EngineError> {
        let position =
            Position::from_fen(fen).map_err(|e| EngineError::InvalidResponse(e.to_string()))?;
        let score = position
            .grid()
            .iter()
            .flatten()
            .flatten()
            .map(|piece| {
                let value = match piece.kind.letter() {
                    'p' => 100,
                    'N' | 'B' => 300,
                    'R' => 500,
                    'Q' => 900,
                    _ => 0,
                };
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum();
        Ok(Evaluation::centipawns(score))
    }
}

#[test]
fn captures_move_the_score_but_cost_the_capturer_nothing() {
    // 1.e4 d5 2.Qh5 Nf6 3.Qxf7+ Kxf7
    let moves = parse_moves(&["e2e4", "d7d5", "d1h5", "g8f6", "h5f7", "e8f7"]).unwrap();
    let mut analyzer = GameAnalyzer::new(MaterialCounter);
    let analysis = analyzer.analyze(Position::startpos(), &moves).unwrap();

    assert_eq!(analysis.moves[4].after, Evaluation::centipawns(100));
    assert_eq!(analysis.moves[4].cp_loss, Some(0));
    assert_eq!(analysis.moves[5].after, Evaluation::centipawns(-800));
    assert_eq!(analysis.moves[5].cp_loss, Some(0));
    assert_eq!(analysis.white.acpl, Some(0.0));
    assert_eq!(analysis.black.band, Some(StrengthBand::Grandmaster));
    assert_eq!(
        analysis.final_fen,
        "rnbq1b1r/ppp1pkpp/5n2/3p4/4P3/8/PPPP1PPP/RNB1KBNR w - - 0 1"
    );
}

#[test]
fn unavailable_engine_means_neutral_scores() {
    let config = EngineConfig {
        path: "/nonexistent/engine".to_string(),
        ..EngineConfig::default()
    };
    let mut engine = UciEngine::new(&config).ok();
    assert!(engine.is_none());
    let fen = Position::startpos().to_fen();
    assert_eq!(evaluate_or_neutral(&mut engine, &fen), Evaluation::NEUTRAL);
}

#[test]
fn config_file_drives_engine_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chess.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[engine]\npath = \"/opt/sf\"\ndepth = 10\ntimeout_ms = 500").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.engine.path, "/opt/sf");
    assert_eq!(config.engine.depth, 10);
    assert_eq!(config.engine.timeout_ms, 500);
    assert_eq!(config.engine.hash_mb, 1024);
}

#[test]
#[ignore = "requires Stockfish"]
fn test_engine_basic_analysis() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    let mut engine = UciEngine::new(&fast_config()).expect("Failed to create UciEngine");
    assert!(
        engine.name().to_lowercase().contains("stockfish"),
        "Engine name should contain 'Stockfish', got: {}",
        engine.name()
    );

    let analysis = engine
        .analyze_fen(&Position::startpos().to_fen())
        .expect("Failed to analyze starting position");
    assert!(!analysis.best_move.is_empty());
    assert!(analysis.depth >= 8, "got depth {}", analysis.depth);
    assert!(analysis.evaluation.pawns().abs() < 1.0);
}

#[test]
#[ignore = "requires Stockfish"]
fn test_mate_is_reported_for_the_winner() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    let mut engine = UciEngine::new(&fast_config()).expect("Failed to create UciEngine");
    // Back-rank mate already on the board, black to move.
    let fen = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1";
    let evaluation = engine.evaluate(fen).expect("evaluation failed");
    assert_eq!(
        evaluation,
        Evaluation::Mate {
            moves: 0,
            winner: Color::White
        }
    );
    assert_eq!(evaluation.label(), "1-0");
}

#[test]
#[ignore = "requires Stockfish"]
fn test_scholars_mate_game_analysis() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    // 1.e4 e5 2.Qh5 Nc6 3.Bc4 Nf6?? 4.Qxf7#
    let moves = parse_moves(&[
        "e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7",
    ])
    .unwrap();
    let engine = UciEngine::new(&fast_config()).expect("Failed to create UciEngine");
    let mut analyzer = GameAnalyzer::new(engine);
    let analysis = analyzer
        .analyze(Position::startpos(), &moves)
        .expect("analysis failed");

    assert_eq!(analysis.moves.len(), 7);
    assert!(analysis.moves[6].after.is_mate());
    assert_eq!(analysis.moves[6].after.label(), "1-0");
}
