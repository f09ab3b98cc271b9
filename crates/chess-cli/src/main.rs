//! `chess` - play, inspect and evaluate positions from the terminal.

use anyhow::Context;
use chess_analysis::{
    evaluate_or_neutral, parse_moves, AppConfig, GameAnalyzer, UciEngine, DEFAULT_CONFIG_FILE,
};
use chess_cli::opponent::RandomOpponent;
use chess_cli::render;
use chess_cli::report;
use chess_cli::session::Session;
use chess_engine::{generate_moves, perft, perft_divide, Game, Position};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess board with pseudo-legal move generation and engine evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play on the terminal board
    Play {
        /// Starting position in FEN (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Do not start the evaluation engine
        #[arg(long)]
        no_engine: bool,
        /// Computer opponent answering every move
        #[arg(long, value_enum)]
        opponent: Option<OpponentKind>,
    },
    /// Apply moves from the start position and print the FEN
    Fen {
        /// Moves in coordinate notation, e.g. e2e4 e7e5
        #[arg(long, num_args = 0..)]
        moves: Vec<String>,
    },
    /// List the pseudo-legal moves of a position
    Moves {
        #[arg(long)]
        fen: Option<String>,
    },
    /// Count leaf nodes of the pseudo-legal move tree
    Perft {
        depth: u32,
        #[arg(long)]
        fen: Option<String>,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Evaluate a single position
    Eval {
        #[arg(long)]
        fen: String,
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Evaluate every move of a game from the start position
    Analyze {
        /// Moves in coordinate notation
        #[arg(required = true)]
        moves: Vec<String>,
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OpponentKind {
    /// Uniformly random pseudo-legal moves
    Random,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            fen,
            config,
            no_engine,
            opponent,
        } => {
            let game = Game::from_position(load_position(fen.as_deref())?);
            let mut session = Session::new(game);
            if !no_engine {
                if let Some(engine) = start_engine(&config)? {
                    session = session.with_evaluator(Box::new(engine));
                }
            }
            if let Some(OpponentKind::Random) = opponent {
                session = session.with_opponent(RandomOpponent::new());
            }
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            session.run(stdin.lock(), &mut stdout)?;
        }
        Commands::Fen { moves } => {
            let mut game = Game::new();
            for m in &moves {
                game.try_move_uci(m)
                    .with_context(|| format!("after {} moves", game.ply_count()))?;
            }
            println!("{}", game.to_fen());
        }
        Commands::Moves { fen } => {
            let position = load_position(fen.as_deref())?;
            let moves = generate_moves(&position);
            for m in &moves {
                println!("{m}");
            }
            println!("{} moves", moves.len());
        }
        Commands::Perft { depth, fen, divide } => {
            let mut position = load_position(fen.as_deref())?;
            let started = Instant::now();
            let nodes: u64 = if divide {
                let counts = perft_divide(&mut position, depth);
                for (uci, count) in &counts {
                    println!("{uci}: {count}");
                }
                counts.iter().map(|(_, count)| count).sum()
            } else {
                perft(&mut position, depth)
            };
            tracing::info!(depth, nodes, elapsed = ?started.elapsed(), "perft finished");
            println!("Nodes searched: {nodes}");
        }
        Commands::Eval { fen, config } => {
            let position = load_position(Some(fen.as_str()))?;
            let mut engine = start_engine(&config)?;
            let evaluation = evaluate_or_neutral(&mut engine, &position.to_fen());
            println!("{}", render::eval_bar(evaluation));
        }
        Commands::Analyze {
            moves,
            config,
            json,
        } => {
            let moves = parse_moves(moves.as_slice())?;
            let engine = start_engine(&config)?;
            let mut analyzer = GameAnalyzer::new(engine);
            let analysis = analyzer.analyze(Position::startpos(), &moves)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("{}", report::analysis(&analysis));
            }
        }
    }

    Ok(())
}

/// Parses `fen`, or returns the start position when there is none.
fn load_position(fen: Option<&str>) -> anyhow::Result<Position> {
    match fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("invalid FEN: {fen}")),
        None => Ok(Position::startpos()),
    }
}

/// Starts the configured engine.
///
/// A broken config file is an error. An engine that cannot be started is not:
/// the caller then runs without one and every score is neutral.
fn start_engine(config_path: &Path) -> anyhow::Result<Option<UciEngine>> {
    let config = AppConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    match UciEngine::new(&config.engine) {
        Ok(engine) => {
            tracing::info!(name = engine.name(), "evaluation engine started");
            Ok(Some(engine))
        }
        Err(err) => {
            tracing::warn!(error = %err, path = %config.engine.path, "running without engine");
            Ok(None)
        }
    }
}
