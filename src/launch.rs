//! Runner options read from the environment.
//!
//! - `MATCH3_CONFIG`: path to a JSON level config
//! - `MATCH3_SEED`: board seed (u32); a clock-derived seed when unset
//! - `MATCH3_LOG`: log file path; logging is off when unset

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{ConfigError, GameConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

impl LaunchOptions {
    pub fn from_env() -> Self {
        use std::env;

        Self::from_vars(
            env::var("MATCH3_CONFIG").ok(),
            env::var("MATCH3_SEED").ok(),
            env::var("MATCH3_LOG").ok(),
        )
    }

    /// Build from raw variable values; blank values count as unset and an
    /// unparsable seed is ignored.
    pub fn from_vars(config: Option<String>, seed: Option<String>, log: Option<String>) -> Self {
        Self {
            config_path: non_empty(config).map(PathBuf::from),
            seed: non_empty(seed).and_then(|s| s.parse().ok()),
            log_path: non_empty(log).map(PathBuf::from),
        }
    }

    /// The configured level, or the default one.
    pub fn load_config(&self) -> Result<GameConfig, ConfigError> {
        match &self.config_path {
            Some(path) => GameConfig::load(path),
            None => Ok(GameConfig::default()),
        }
    }

    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
