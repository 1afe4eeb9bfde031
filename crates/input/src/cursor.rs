//! Board cursor - turns cursor actions into cell selections.

use crate::types::{Coord, PlayerAction};

/// What the frontend should do after a [`PlayerAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCommand {
    /// The cursor moved (or stayed put against an edge).
    Moved(Coord),
    /// Select the cell under the cursor.
    Select(Coord),
    Cancel,
    Restart,
}

/// Cursor position on a `width x height` board, `y = 0` at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    pos: Coord,
    width: i32,
    height: i32,
}

impl BoardCursor {
    /// Cursor starting near the middle of the board.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1) as i32;
        let height = height.max(1) as i32;
        Self {
            pos: Coord::new((width - 1) / 2, (height - 1) / 2),
            width,
            height,
        }
    }

    pub fn position(&self) -> Coord {
        self.pos
    }

    /// Apply an action; movement is clamped to the board.
    pub fn apply(&mut self, action: PlayerAction) -> CursorCommand {
        let (dx, dy) = match action {
            PlayerAction::CursorLeft => (-1, 0),
            PlayerAction::CursorRight => (1, 0),
            PlayerAction::CursorUp => (0, 1),
            PlayerAction::CursorDown => (0, -1),
            PlayerAction::Select => return CursorCommand::Select(self.pos),
            PlayerAction::Cancel => return CursorCommand::Cancel,
            PlayerAction::Restart => return CursorCommand::Restart,
        };
        self.pos = Coord::new(
            (self.pos.x + dx).clamp(0, self.width - 1),
            (self.pos.y + dy).clamp(0, self.height - 1),
        );
        CursorCommand::Moved(self.pos)
    }
}
