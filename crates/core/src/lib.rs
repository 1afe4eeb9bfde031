//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play a match-3 level lives here: the board, match
//! detection, cascade resolution, scoring and the timed session. There is no
//! dependency on the terminal, so the same code runs headless in tests.
//!
//! # Module Structure
//!
//! - [`grid`]: token slots and the grid-to-world transform
//! - [`matcher`]: horizontal and vertical run detection
//! - [`motion`]: time-based movement of tokens toward their cells
//! - [`resolver`]: the swap / clear / collapse / refill state machine
//! - [`scoring`]: cascade multipliers and the scoreboard
//! - [`session`]: countdown, selection and win/lose
//! - [`rng`]: injectable random sources
//! - [`config`]: JSON-loadable level configuration
//!
//! # Game Rules
//!
//! - A swap is only accepted between orthogonally adjacent cells while the board is idle
//! - A swap that makes no run of at least `min_match` is undone
//! - Every cleared token scores its type's value; chain step `n` multiplies by
//!   `1 + (n - 1) * cascade_bonus_step`
//! - Reaching the target score wins at once; running out of time decides the
//!   level as soon as the board is idle
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{GameConfig, Session, SimpleRng};
//!
//! let mut session = Session::new(GameConfig::default(), SimpleRng::new(12345)).unwrap();
//! assert_eq!(session.score(), 0);
//! assert!(session.grid().is_full());
//!
//! // One simulated frame.
//! session.tick(0.016);
//! assert!(session.time_left() < 60.0);
//! ```
//!
//! # Timing
//!
//! The frontend calls [`Session::tick`](session::Session::tick) every frame
//! with the elapsed time in seconds. Tokens move at `fall_speed` world units
//! per second, and a short pause separates each clear from the collapse.

pub mod config;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod motion;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod token;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use config::{GameConfig, Rules};
pub use error::{ConfigError, GridError, SwapRejected};
pub use grid::Grid;
pub use matcher::{find_matches, has_match_at, MatchGroup};
pub use motion::Motion;
pub use resolver::{ChainStep, Phase, Resolver, TurnReport};
pub use rng::{RandomSource, SequenceSource, SimpleRng};
pub use scoring::{award_points, cascade_multiplier, Scoreboard};
pub use session::{Selection, Session};
pub use snapshot::{CellSnapshot, SessionSnapshot};
pub use token::{Token, TokenPalette};
