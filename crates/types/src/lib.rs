//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no required dependencies, so it can be used
//! by the engine, the terminal view and the input layer alike. Enable the `serde`
//! feature to (de)serialize token types as part of a configuration file.
//!
//! # Coordinates
//!
//! Boards are addressed with [`Coord`] where `(0, 0)` is the **bottom-left** cell,
//! `x` grows to the right and `y` grows upwards. This matches the world-space
//! transform used by the engine (positive `y` is up).
//!
//! # Default Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 8 | Columns |
//! | `DEFAULT_BOARD_HEIGHT` | 8 | Rows |
//! | `DEFAULT_MIN_MATCH` | 3 | Shortest run that clears |
//! | `DEFAULT_TILE_SIZE` | 1.0 | World units per cell |
//! | `DEFAULT_FALL_SPEED` | 12.0 | World units per second for swaps and falls |
//! | `DEFAULT_TARGET_SCORE` | 800 | Score needed to win |
//! | `DEFAULT_TIME_LIMIT_SECS` | 60.0 | Countdown length |
//! | `DEFAULT_CASCADE_BONUS_STEP` | 0.5 | Multiplier added per chain step |
//! | `DEFAULT_CLEAR_PAUSE_SECS` | 0.05 | Pause between a clear and the collapse |
//! | `DEFAULT_MAX_CHAIN` | 64 | Safety cap on cascade length |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Coord, PlayerAction};
//!
//! let a = Coord::new(3, 2);
//! let b = Coord::new(4, 2);
//! assert!(a.is_adjacent(b));
//! assert_eq!(a.manhattan(Coord::new(5, 4)), 4);
//!
//! assert_eq!(PlayerAction::from_str("select"), Some(PlayerAction::Select));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: i32 = 8;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: i32 = 8;

/// Default minimum run length that clears
pub const DEFAULT_MIN_MATCH: u32 = 3;

/// Default cell size in world units
pub const DEFAULT_TILE_SIZE: f32 = 1.0;

/// Default movement speed for swaps and falls (world units per second)
pub const DEFAULT_FALL_SPEED: f32 = 12.0;

/// Default score needed to win a level
pub const DEFAULT_TARGET_SCORE: u32 = 800;

/// Default countdown length in seconds
pub const DEFAULT_TIME_LIMIT_SECS: f32 = 60.0;

/// Default multiplier step per cascade (chain 2 = 1.5x, chain 3 = 2.0x, ...)
pub const DEFAULT_CASCADE_BONUS_STEP: f32 = 0.5;

/// Default pause between clearing tokens and collapsing columns
pub const DEFAULT_CLEAR_PAUSE_SECS: f32 = 0.05;

/// Default cap on the number of chain steps in one turn
pub const DEFAULT_MAX_CHAIN: u32 = 64;

/// Score value of each default gem type
pub const DEFAULT_GEM_SCORE: u32 = 10;

/// Replacement attempts per cell when building a board without starting matches
pub const BUILD_RETRY_LIMIT: u32 = 100;

/// A token is settled once its squared distance to the target is at most this,
/// in tiles squared (the resolver scales it by the tile size)
pub const SETTLE_EPSILON_SQ: f32 = 0.0001;

/// Refilled tokens start this many tiles above the top row
pub const SPAWN_OFFSET_TILES: f32 = 2.0;

/// Fixed timestep of the terminal runner in milliseconds (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Brightness gain applied to the selected token
pub const HIGHLIGHT_GAIN: f32 = 1.2;

/// Grid coordinate. `(0, 0)` is the bottom-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when the two coordinates share an edge
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// World-space position (y up).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance_sq(self, other: Vec2) -> f32 {
        (other - self).length_sq()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Identifier of a token type. Matching compares these ids only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenTypeId(pub u16);

/// Identifier of a token instance.
///
/// Survives falls; a refill always mints a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u32);

/// 24-bit RGB tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply each channel by `gain`, saturating at 255.
    pub fn scaled(self, gain: f32) -> Self {
        let ch = |c: u8| (c as f32 * gain).round().clamp(0.0, 255.0) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }
}

/// Presentation metadata carried by a token type.
///
/// The engine never looks at this; it is passed through to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenDisplay {
    pub glyph: char,
    pub tint: Rgb,
}

/// A kind of gem: unique id, score value and display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenType {
    pub id: TokenTypeId,
    pub score: u32,
    pub display: TokenDisplay,
}

impl TokenType {
    pub const fn new(id: u16, score: u32, glyph: char, tint: Rgb) -> Self {
        Self {
            id: TokenTypeId(id),
            score,
            display: TokenDisplay { glyph, tint },
        }
    }
}

/// The six gem types used when no palette is configured.
///
/// Glyphs are the initials of the colours, which keeps board layouts readable
/// in tests (`"RGB"` is red, green, blue).
pub fn default_gem_types() -> Vec<TokenType> {
    vec![
        TokenType::new(0, DEFAULT_GEM_SCORE, 'R', Rgb::new(220, 70, 70)),
        TokenType::new(1, DEFAULT_GEM_SCORE, 'O', Rgb::new(240, 150, 50)),
        TokenType::new(2, DEFAULT_GEM_SCORE, 'Y', Rgb::new(235, 215, 80)),
        TokenType::new(3, DEFAULT_GEM_SCORE, 'G', Rgb::new(90, 200, 110)),
        TokenType::new(4, DEFAULT_GEM_SCORE, 'B', Rgb::new(80, 130, 225)),
        TokenType::new(5, DEFAULT_GEM_SCORE, 'P', Rgb::new(175, 100, 215)),
    ]
}

/// Final result of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn from_won(won: bool) -> Self {
        if won {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }
}

/// Player actions produced by the input layer
///
/// The board is driven by a cursor: move it, then select two adjacent cells
/// to request a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Move the cursor one row up
    CursorUp,
    /// Move the cursor one row down
    CursorDown,
    /// Select the cell under the cursor (second adjacent selection swaps)
    Select,
    /// Drop the current selection
    Cancel,
    /// Start the level over
    Restart,
}

impl PlayerAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::PlayerAction;
    ///
    /// assert_eq!(PlayerAction::from_str("cursorLeft"), Some(PlayerAction::CursorLeft));
    /// assert_eq!(PlayerAction::from_str("RESTART"), Some(PlayerAction::Restart));
    /// assert_eq!(PlayerAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(PlayerAction::CursorLeft),
            "cursorright" => Some(PlayerAction::CursorRight),
            "cursorup" => Some(PlayerAction::CursorUp),
            "cursordown" => Some(PlayerAction::CursorDown),
            "select" => Some(PlayerAction::Select),
            "cancel" => Some(PlayerAction::Cancel),
            "restart" => Some(PlayerAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::CursorLeft => "cursorLeft",
            PlayerAction::CursorRight => "cursorRight",
            PlayerAction::CursorUp => "cursorUp",
            PlayerAction::CursorDown => "cursorDown",
            PlayerAction::Select => "select",
            PlayerAction::Cancel => "cancel",
            PlayerAction::Restart => "restart",
        }
    }
}

/// Events produced by the engine for presentation collaborators.
///
/// Drained from the session after each tick. `TokenMoved` and `TokenSpawned`
/// are advisory and only drive animation.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScoreChanged {
        score: u32,
    },
    TimeChanged {
        seconds_remaining: f32,
    },
    /// All coordinates cleared by one chain step.
    TokensCleared {
        coords: Vec<Coord>,
        chain: u32,
    },
    TokenMoved {
        token: TokenId,
        from: Coord,
        to: Coord,
    },
    TokenSpawned {
        token: TokenId,
        at: Coord,
        kind: TokenTypeId,
    },
    /// A swap produced no match and was undone.
    SwapReverted {
        a: Coord,
        b: Coord,
    },
    /// The engine returned to idle after `chains` chain steps.
    TurnCompleted {
        chains: u32,
    },
    GameEnded {
        won: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_matches_reference_level() {
        assert_eq!(DEFAULT_BOARD_WIDTH, 8);
        assert_eq!(DEFAULT_BOARD_HEIGHT, 8);
        assert_eq!(DEFAULT_MIN_MATCH, 3);
        assert_eq!(DEFAULT_TARGET_SCORE, 800);
        assert_eq!(DEFAULT_TIME_LIMIT_SECS, 60.0);
        assert_eq!(DEFAULT_CASCADE_BONUS_STEP, 0.5);
        assert_eq!(BUILD_RETRY_LIMIT, 100);
    }

    #[test]
    fn adjacency_is_manhattan_one() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(1, 2)));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 2)));
    }

    #[test]
    fn default_gem_types_have_unique_ids_and_glyphs() {
        let types = default_gem_types();
        for (i, a) in types.iter().enumerate() {
            for b in &types[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.display.glyph, b.display.glyph);
            }
        }
    }

    #[test]
    fn rgb_scaled_saturates() {
        assert_eq!(Rgb::new(100, 250, 0).scaled(1.2), Rgb::new(120, 255, 0));
    }

    #[test]
    fn player_action_round_trips_through_str() {
        for action in [
            PlayerAction::CursorLeft,
            PlayerAction::CursorRight,
            PlayerAction::CursorUp,
            PlayerAction::CursorDown,
            PlayerAction::Select,
            PlayerAction::Cancel,
            PlayerAction::Restart,
        ] {
            assert_eq!(PlayerAction::from_str(action.as_str()), Some(action));
        }
    }
}
