//! Talking to an external UCI engine over stdin/stdout.

use crate::bridge::Evaluator;
use crate::config::EngineConfig;
use crate::Evaluation;
use chess_core::Color;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Lines tolerated while waiting for `uciok` or `readyok`.
pub const MAX_UCI_LINES: usize = 1000;

const QUIT_GRACE: Duration = Duration::from_millis(500);
/// How long a stopped search may take to send its `bestmove`.
const STOP_GRACE: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no engine executable at {0}")]
    NotFound(String),
    #[error("engine process I/O failed: {0}")]
    Spawn(#[from] std::io::Error),
    /// The handshake never produced `uciok`/`readyok`.
    #[error("engine did not complete the UCI handshake")]
    InitFailed,
    #[error("no answer from engine within {0:?}")]
    Timeout(Duration),
    #[error("unexpected engine output: {0}")]
    InvalidResponse(String),
    #[error("engine exited")]
    Closed,
}

/// What the engine reported for one `go` request.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionAnalysis {
    /// First word after `bestmove`, in coordinate notation.
    pub best_move: String,
    /// White-relative score from the deepest `info` line.
    pub evaluation: Evaluation,
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<String>,
}

/// A scored `info` line, with the score still relative to the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLine {
    pub depth: u32,
    pub cp: Option<i32>,
    pub mate: Option<i32>,
    pub nodes: u64,
    pub pv: Vec<String>,
}

/// Picks depth, score, node count and principal variation out of an `info`
/// line. Returns `None` unless both a depth and a score are present.
///
/// Every token after `pv` belongs to the variation.
pub fn parse_info_line(line: &str) -> Option<InfoLine> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("info") {
        return None;
    }

    let (mut depth, mut cp, mut mate) = (None, None, None);
    let mut nodes = 0;
    let mut pv = Vec::new();
    while let Some(key) = tokens.next() {
        match key {
            "depth" => depth = tokens.next().and_then(|t| t.parse::<u32>().ok()),
            "nodes" => nodes = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0),
            "score" => match (tokens.next(), tokens.next()) {
                (Some("cp"), Some(v)) => cp = v.parse().ok(),
                (Some("mate"), Some(v)) => mate = v.parse().ok(),
                _ => {}
            },
            "pv" => pv = tokens.by_ref().map(str::to_string).collect(),
            _ => {}
        }
    }

    if cp.is_none() && mate.is_none() {
        return None;
    }
    Some(InfoLine {
        depth: depth?,
        cp,
        mate,
        nodes,
        pv,
    })
}

/// Second FEN field; white unless it is `b`.
fn side_to_move(fen: &str) -> Color {
    fen.split_whitespace()
        .nth(1)
        .and_then(|field| field.chars().next())
        .and_then(Color::from_letter)
        .unwrap_or(Color::White)
}

/// A running engine process, Stockfish or anything else that speaks UCI.
///
/// A reader thread forwards stdout lines over a channel so that every wait
/// has a deadline. Dropping the engine sends `quit` and reaps the process.
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    name: String,
    depth: u32,
    timeout: Duration,
    /// A `go` is out and its `bestmove` has not been read yet.
    searching: bool,
}

impl UciEngine {
    /// Starts `config.path` and runs the handshake with the configured
    /// options. A missing executable is reported as [`EngineError::NotFound`].
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Self::with_command(Command::new(&config.path), config).map_err(|err| match err {
            EngineError::Spawn(io) if io.kind() == ErrorKind::NotFound => {
                EngineError::NotFound(config.path.clone())
            }
            other => other,
        })
    }

    /// Like [`UciEngine::new`] but runs `command` instead of `config.path`.
    pub fn with_command(mut command: Command, config: &EngineConfig) -> Result<Self, EngineError> {
        let mut process = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!(pid = process.id(), "spawned engine process");

        let (Some(stdin), Some(stdout)) = (process.stdin.take(), process.stdout.take()) else {
            return Err(EngineError::InitFailed);
        };
        let (tx, lines) = mpsc::channel();
        thread::Builder::new()
            .name("uci-reader".to_string())
            .spawn(move || {
                for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                    if tx.send(line.trim().to_string()).is_err() {
                        break;
                    }
                }
            })?;

        let mut engine = Self {
            process,
            stdin,
            lines,
            name: String::new(),
            depth: config.depth,
            timeout: config.timeout(),
            searching: false,
        };
        engine.handshake(config)?;
        tracing::info!(engine = %engine.name, depth = engine.depth, "engine ready");
        Ok(engine)
    }

    fn handshake(&mut self, config: &EngineConfig) -> Result<(), EngineError> {
        self.send_command("uci")?;
        let mut name = None;
        self.wait_for("uciok", |line| {
            if let Some(id) = line.strip_prefix("id name ") {
                name = Some(id.to_string());
            }
        })?;
        self.name = name.unwrap_or_else(|| "unnamed engine".to_string());

        for (option, value) in [
            ("Threads", config.threads),
            ("Hash", config.hash_mb),
            ("Skill Level", config.skill_level),
        ] {
            self.send_command(&format!("setoption name {option} value {value}"))?;
        }
        self.sync()
    }

    /// `isready` round trip.
    fn sync(&mut self) -> Result<(), EngineError> {
        self.send_command("isready")?;
        self.wait_for("readyok", |_| {})
    }

    /// Reads until `token` arrives, showing every earlier line to `seen`.
    fn wait_for(&mut self, token: &str, mut seen: impl FnMut(&str)) -> Result<(), EngineError> {
        let deadline = Instant::now() + self.timeout;
        for _ in 0..MAX_UCI_LINES {
            let line = self.read_line(deadline)?;
            if line == token {
                return Ok(());
            }
            seen(&line);
        }
        Err(EngineError::InitFailed)
    }

    /// Name from the `id name` line of the handshake.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Searches `fen` to the configured depth.
    ///
    /// A search that runs past the timeout is stopped and its output
    /// discarded, so a late `bestmove` never answers the next request.
    pub fn analyze_fen(&mut self, fen: &str) -> Result<PositionAnalysis, EngineError> {
        self.finish_search()?;
        self.send_command(&format!("position fen {fen}"))?;
        self.send_command(&format!("go depth {}", self.depth))?;
        self.searching = true;
        let deadline = Instant::now() + self.timeout;

        let mut latest: Option<InfoLine> = None;
        loop {
            let line = match self.read_line(deadline) {
                Ok(line) => line,
                Err(err @ EngineError::Timeout(_)) => {
                    if let Err(stop_err) = self.finish_search() {
                        tracing::debug!(error = %stop_err, "engine still busy after stop");
                    }
                    return Err(err);
                }
                Err(err) => return Err(err),
            };
            if let Some(rest) = line.strip_prefix("bestmove") {
                self.searching = false;
                let info = latest.ok_or_else(|| {
                    EngineError::InvalidResponse("bestmove without a score".to_string())
                })?;
                let evaluation = Evaluation::from_uci_score(info.cp, info.mate, side_to_move(fen))
                    .ok_or_else(|| EngineError::InvalidResponse(line.clone()))?;
                return Ok(PositionAnalysis {
                    best_move: rest.split_whitespace().next().unwrap_or_default().to_string(),
                    evaluation,
                    depth: info.depth,
                    nodes: info.nodes,
                    pv: info.pv,
                });
            }
            if let Some(info) = parse_info_line(&line) {
                latest = Some(info);
            }
        }
    }

    /// Stops a search that never sent `bestmove` and drops its output.
    fn finish_search(&mut self) -> Result<(), EngineError> {
        if !self.searching {
            return Ok(());
        }
        self.send_command("stop")?;
        let deadline = Instant::now() + STOP_GRACE;
        loop {
            if self.read_line(deadline)?.starts_with("bestmove") {
                self.searching = false;
                return Ok(());
            }
        }
    }

    fn send_command(&mut self, command: &str) -> Result<(), EngineError> {
        tracing::debug!(command, "uci >");
        match writeln!(self.stdin, "{command}").and_then(|()| self.stdin.flush()) {
            Err(err) if err.kind() == ErrorKind::BrokenPipe => Err(EngineError::Closed),
            other => Ok(other?),
        }
    }

    fn read_line(&mut self, deadline: Instant) -> Result<String, EngineError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match self.lines.recv_timeout(remaining) {
            Ok(line) => {
                tracing::trace!(line = %line, "uci <");
                Ok(line)
            }
            Err(RecvTimeoutError::Timeout) => Err(EngineError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Closed),
        }
    }
}

impl Evaluator for UciEngine {
    fn evaluate(&mut self, fen: &str) -> Result<Evaluation, EngineError> {
        Ok(self.analyze_fen(fen)?.evaluation)
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send_command("quit");
        let deadline = Instant::now() + QUIT_GRACE;
        while Instant::now() < deadline {
            if let Ok(Some(_)) = self.process.try_wait() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        tracing::debug!("engine ignored quit, killing it");
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_not_found() {
        let config = EngineConfig {
            path: "/nonexistent/path/to/stockfish".to_string(),
            ..EngineConfig::default()
        };
        match UciEngine::new(&config) {
            Err(EngineError::NotFound(path)) => assert_eq!(path, config.path),
            Err(other) => panic!("expected NotFound, got {other}"),
            Ok(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn error_messages() {
        let io = EngineError::Spawn(std::io::Error::new(ErrorKind::PermissionDenied, "denied"));
        assert_eq!(io.to_string(), "engine process I/O failed: denied");
        assert_eq!(
            EngineError::NotFound("/opt/sf".to_string()).to_string(),
            "no engine executable at /opt/sf"
        );
        assert_eq!(
            EngineError::Timeout(Duration::from_millis(250)).to_string(),
            "no answer from engine within 250ms"
        );
        assert_eq!(EngineError::Closed.to_string(), "engine exited");
    }

    #[test]
    fn info_with_centipawns() {
        let info = parse_info_line("info depth 15 score cp 35 nodes 50000 pv e2e4 e7e5 g1f3")
            .unwrap();
        assert_eq!(
            info,
            InfoLine {
                depth: 15,
                cp: Some(35),
                mate: None,
                nodes: 50000,
                pv: vec!["e2e4".into(), "e7e5".into(), "g1f3".into()],
            }
        );
    }

    #[test]
    fn info_with_mate() {
        let info = parse_info_line("info depth 12 score mate -3 nodes 10000 pv d1h5 g6h5").unwrap();
        assert_eq!((info.cp, info.mate), (None, Some(-3)));
        assert_eq!(info.pv.len(), 2);
    }

    #[test]
    fn info_skips_unknown_fields() {
        let line = "info depth 20 seldepth 28 multipv 1 score cp 18 nodes 2000000 nps 1500000 \
                    hashfull 300 tbhits 0 time 1333 pv e2e4 c7c5";
        let info = parse_info_line(line).unwrap();
        assert_eq!((info.depth, info.cp, info.nodes), (20, Some(18), 2_000_000));
        assert_eq!(info.pv, ["e2e4", "c7c5"]);
    }

    #[test]
    fn info_variation_runs_to_end_of_line() {
        let info = parse_info_line("info depth 3 score cp 5 pv e2e4 depth").unwrap();
        assert_eq!(info.depth, 3);
        assert_eq!(info.pv, ["e2e4", "depth"]);
    }

    #[test]
    fn info_without_depth_or_score() {
        assert!(parse_info_line("info score cp 35 nodes 50000 pv e2e4").is_none());
        assert!(parse_info_line("info depth 15 nodes 50000 pv e2e4").is_none());
        assert!(parse_info_line("info depth 15 currmove e2e4 currmovenumber 1").is_none());
        assert!(parse_info_line("bestmove e2e4").is_none());
    }

    #[test]
    fn side_to_move_from_fen() {
        assert_eq!(side_to_move("8/8/8/8/8/8/8/8 b - - 0 1"), Color::Black);
        assert_eq!(side_to_move("8/8/8/8/8/8/8/8 w - - 0 1"), Color::White);
        assert_eq!(side_to_move("8/8/8/8/8/8/8/8"), Color::White);
    }

    /// Scripted stand-ins for a UCI engine, run through `sh`.
    #[cfg(unix)]
    mod scripted {
        use super::*;
        use std::io::Write as _;
        use tempfile::NamedTempFile;

        const HANDSHAKE: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "id name FakeFish 1.0"; echo "option name Hash type spin"; echo "uciok" ;;
    isready) echo "readyok" ;;
    quit) exit 0 ;;
"#;

        fn script(go_branch: &str) -> NamedTempFile {
            let mut file = NamedTempFile::new().unwrap();
            write!(file, "{HANDSHAKE}    go*) {go_branch} ;;\n  esac\ndone\n").unwrap();
            file
        }

        fn spawn(file: &NamedTempFile, timeout_ms: u64) -> Result<UciEngine, EngineError> {
            let mut command = Command::new("sh");
            command.arg(file.path());
            let config = EngineConfig {
                timeout_ms,
                depth: 4,
                ..EngineConfig::default()
            };
            UciEngine::with_command(command, &config)
        }

        #[test]
        fn handshake_reads_engine_name() {
            let file = script("echo \"bestmove e2e4\"");
            let engine = spawn(&file, 2000).unwrap();
            assert_eq!(engine.name(), "FakeFish 1.0");
        }

        #[test]
        fn analysis_keeps_last_score_and_normalizes_it() {
            let file = script(
                "echo \"info depth 1 score cp 10 nodes 20 pv d7d5\"; \
                 echo \"info depth 2 score cp 42 nodes 80 pv e7e5 g1f3\"; \
                 echo \"bestmove e7e5 ponder g1f3\"",
            );
            let mut engine = spawn(&file, 2000).unwrap();
            let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1";
            let analysis = engine.analyze_fen(fen).unwrap();
            assert_eq!(analysis.best_move, "e7e5");
            assert_eq!(analysis.depth, 2);
            assert_eq!(analysis.nodes, 80);
            assert_eq!(analysis.pv, vec!["e7e5", "g1f3"]);
            // Black to move and +42 for black is -42 for white.
            assert_eq!(analysis.evaluation, Evaluation::centipawns(-42));
        }

        #[test]
        fn silent_engine_times_out() {
            let file = script(":");
            let mut engine = spawn(&file, 150).unwrap();
            let err = engine.evaluate("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
            assert!(matches!(err, EngineError::Timeout(_)), "got {err}");
        }

        #[test]
        fn late_answer_is_not_reused_after_timeout() {
            // Only the first search is slow; each answer carries its number.
            let file = script(
                "n=$((${n:-0} + 1)); \
                 if [ \"$n\" -eq 1 ]; then sleep 0.4; fi; \
                 echo \"info depth 1 score cp ${n}00 pv e2e4\"; \
                 echo \"bestmove e2e4\"",
            );
            let mut engine = spawn(&file, 250).unwrap();
            let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";

            let err = engine.evaluate(fen).unwrap_err();
            assert!(matches!(err, EngineError::Timeout(_)), "got {err}");
            assert!(!engine.searching);

            assert_eq!(engine.evaluate(fen).unwrap(), Evaluation::centipawns(200));
        }

        #[test]
        fn exiting_engine_is_closed() {
            let file = script("exit 0");
            let mut engine = spawn(&file, 2000).unwrap();
            let err = engine.evaluate("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
            assert!(
                matches!(err, EngineError::Closed | EngineError::Spawn(_)),
                "got {err}"
            );
        }

        #[test]
        fn bestmove_without_score_is_invalid() {
            let file = script("echo \"bestmove e2e4\"");
            let mut engine = spawn(&file, 2000).unwrap();
            let err = engine.evaluate("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err();
            assert!(matches!(err, EngineError::InvalidResponse(_)), "got {err}");
        }
    }
}
