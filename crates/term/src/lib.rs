//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer of styled characters which is then flushed to the terminal.
//! No widget toolkit is involved, so the layout (three columns per board
//! cell, side panel, result overlay) is fully under our control.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{clock_parts, format_clock, outcome_text, BoardView, Viewport};
pub use renderer::{changed_rows, encode_full_into, encode_rows_into, TerminalRenderer};
