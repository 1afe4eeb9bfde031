//! Level configuration
//!
//! `GameConfig` is plain serde data so a level can be tuned from a JSON file.
//! Every field has a default, so partial files are fine:
//!
//! ```
//! use tui_match3_core::GameConfig;
//!
//! let cfg = GameConfig::from_json_str(r#"{ "width": 6, "target_score": 300 }"#).unwrap();
//! assert_eq!(cfg.width, 6);
//! assert_eq!(cfg.height, 8);
//! assert_eq!(cfg.target_score, 300);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::token::TokenPalette;
use crate::types::*;

/// Construction parameters for a board and its session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub min_match: u32,
    pub tile_size: f32,
    /// World units per second for swaps and falls.
    pub fall_speed: f32,
    pub cascade_bonus_step: f32,
    pub target_score: u32,
    pub time_limit_secs: f32,
    /// Pause between clearing a chain step and collapsing the columns.
    pub clear_pause_secs: f32,
    /// Upper bound on chain steps per turn.
    pub max_chain: u32,
    pub palette: Vec<TokenType>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            min_match: DEFAULT_MIN_MATCH,
            tile_size: DEFAULT_TILE_SIZE,
            fall_speed: DEFAULT_FALL_SPEED,
            cascade_bonus_step: DEFAULT_CASCADE_BONUS_STEP,
            target_score: DEFAULT_TARGET_SCORE,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            clear_pause_secs: DEFAULT_CLEAR_PAUSE_SECS,
            max_chain: DEFAULT_MAX_CHAIN,
            palette: default_gem_types(),
        }
    }
}

/// Validated resolver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub width: usize,
    pub height: usize,
    pub min_match: u32,
    pub tile_size: f32,
    pub fall_speed: f32,
    pub cascade_bonus_step: f32,
    pub clear_pause_secs: f32,
    pub max_chain: u32,
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON config file. The result is not validated yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every field; returns the board rules and the token palette.
    pub fn validate(&self) -> Result<(Rules, TokenPalette), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let palette = TokenPalette::new(self.palette.clone())?;
        if self.min_match < 3 {
            return Err(ConfigError::MinMatchTooSmall(self.min_match));
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if !(self.fall_speed.is_finite() && self.fall_speed > 0.0) {
            return Err(ConfigError::InvalidFallSpeed(self.fall_speed));
        }
        if !(self.time_limit_secs.is_finite() && self.time_limit_secs >= 0.0) {
            return Err(ConfigError::InvalidTimeLimit(self.time_limit_secs));
        }
        if !(self.clear_pause_secs.is_finite() && self.clear_pause_secs >= 0.0) {
            return Err(ConfigError::InvalidClearPause(self.clear_pause_secs));
        }
        if self.max_chain == 0 {
            return Err(ConfigError::ZeroMaxChain);
        }

        let mut cascade_bonus_step = self.cascade_bonus_step;
        if !(cascade_bonus_step.is_finite() && cascade_bonus_step >= 0.0) {
            warn!(
                step = self.cascade_bonus_step,
                "cascade_bonus_step must be >= 0; using 0"
            );
            cascade_bonus_step = 0.0;
        }

        let rules = Rules {
            width: self.width as usize,
            height: self.height as usize,
            min_match: self.min_match,
            tile_size: self.tile_size,
            fall_speed: self.fall_speed,
            cascade_bonus_step,
            clear_pause_secs: self.clear_pause_secs,
            max_chain: self.max_chain,
        };
        Ok((rules, palette))
    }
}
