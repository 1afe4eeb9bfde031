//! Terminal input module.
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::PlayerAction`] and tracks the board cursor that turns those
//! actions into cell selections.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::{BoardCursor, CursorCommand};
pub use map::{handle_key_event, should_quit};
