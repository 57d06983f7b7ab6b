//! Visualizer settings, read from a JSON file.
//!
//! ```json
//! { "puzzle": "depth: 510\ntarget: 10,10", "search_margin": 32, "steps_per_tick": 4, "tick_ms": 30 }
//! ```
//!
//! Every field is optional. The file is named by the `MODE_MAZE_CONFIG`
//! environment variable; without it the built-in defaults are used.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use maze_cave::{CaveConfig, DEFAULT_SEARCH_MARGIN, MAX_SEARCH_MARGIN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "MODE_MAZE_CONFIG";

/// Puzzle shown on startup.
pub const DEFAULT_PUZZLE: &str = "depth: 510\ntarget: 10,10\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Puzzle text loaded on startup.
    pub puzzle: String,
    /// Regions generated past the target for the route search.
    pub search_margin: i32,
    /// Scan or search steps taken per tick.
    pub steps_per_tick: usize,
    /// Milliseconds between ticks.
    pub tick_ms: u64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            puzzle: DEFAULT_PUZZLE.to_string(),
            search_margin: DEFAULT_SEARCH_MARGIN,
            steps_per_tick: 4,
            tick_ms: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse mode-maze config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read mode-maze config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MazeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Cave options with the margin clamped to `0..=MAX_SEARCH_MARGIN`.
    pub fn cave_config(&self) -> CaveConfig {
        CaveConfig {
            search_margin: self.search_margin.clamp(0, MAX_SEARCH_MARGIN),
        }
    }

    /// Steps per tick, at least one.
    pub fn steps(&self) -> usize {
        self.steps_per_tick.max(1)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Load the config named by [`CONFIG_ENV`], falling back to the defaults when
/// the variable is unset or the file cannot be used. Returns the path the
/// config came from, if any.
pub fn load_from_env() -> (MazeConfig, Option<PathBuf>) {
    let Some(path) = env::var_os(CONFIG_ENV).map(PathBuf::from) else {
        log::info!("no {CONFIG_ENV} set, using built-in config");
        return (MazeConfig::default(), None);
    };
    match MazeConfig::from_file(&path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            (config, Some(path))
        }
        Err(err) => {
            log::warn!("{err}; using built-in config");
            (MazeConfig::default(), None)
        }
    }
}
