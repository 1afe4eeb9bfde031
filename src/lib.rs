//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the member crates as `tui_match3::{core,input,term,types}` and
//! holds the runner's environment handling.

pub mod launch;

pub use tui_match3_core as core;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
