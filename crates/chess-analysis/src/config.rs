//! Configuration file loading for the evaluation engine.
//!
//! Settings live in a TOML file with an `[engine]` table. Every field is
//! optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "chess.toml";

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for the external UCI evaluation engine.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine executable, either a path or a name resolved through `PATH`.
    pub path: String,
    /// Search depth passed to `go depth`.
    pub depth: u32,
    /// Value of the `Threads` UCI option.
    pub threads: u32,
    /// Value of the `Hash` UCI option, in megabytes.
    pub hash_mb: u32,
    /// Value of the `Skill Level` UCI option (0-20).
    pub skill_level: u32,
    /// Upper bound on every engine round-trip, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: "stockfish".to_string(),
            depth: 18,
            threads: 2,
            hash_mb: 1024,
            skill_level: 20,
            timeout_ms: 10_000,
        }
    }
}

impl EngineConfig {
    /// Returns the round-trip timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Top-level application configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Evaluation engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}
