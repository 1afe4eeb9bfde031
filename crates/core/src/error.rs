//! Error types for board construction and access.

use thiserror::Error;

use crate::types::{Coord, TokenTypeId};

/// Invalid construction parameters. Fatal: no board is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("palette is empty; configure at least one token type")]
    EmptyPalette,

    #[error("token type id {0:?} appears more than once in the palette")]
    DuplicateTypeId(TokenTypeId),

    #[error("invalid board size {width}x{height}; width and height must be > 0")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("min_match must be at least 3, got {0}")]
    MinMatchTooSmall(u32),

    #[error("tile_size must be a positive finite number, got {0}")]
    InvalidTileSize(f32),

    #[error("fall_speed must be a positive finite number, got {0}")]
    InvalidFallSpeed(f32),

    #[error("time_limit_secs must be a non-negative finite number, got {0}")]
    InvalidTimeLimit(f32),

    #[error("clear_pause_secs must be a non-negative finite number, got {0}")]
    InvalidClearPause(f32),

    #[error("max_chain must be at least 1")]
    ZeroMaxChain,

    #[error("layout has {got} rows, board height is {expected}")]
    LayoutHeight { expected: usize, got: usize },

    #[error("layout row {row} has {got} cells, board width is {expected}")]
    LayoutWidth {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("layout glyph {0:?} does not name a token type in the palette")]
    UnknownGlyph(char),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Grid access outside the board. Never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinate {coord} is outside the {width}x{height} board")]
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },
}

/// Why a swap request was turned down. Nothing on the board changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapRejected {
    #[error("cells {0} and {1} are not adjacent")]
    NotAdjacent(Coord, Coord),

    #[error("cell {0} is outside the board")]
    OutOfBounds(Coord),

    #[error("a turn is still resolving")]
    Busy,

    #[error("the game is over")]
    GameOver,
}
