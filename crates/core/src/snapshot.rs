use crate::resolver::Phase;
use crate::types::{Coord, Outcome, Rgb, TokenId, TokenTypeId, Vec2};

/// One occupied cell as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSnapshot {
    pub token: TokenId,
    pub kind: TokenTypeId,
    pub glyph: char,
    pub tint: Rgb,
    /// Current world position, which differs from the cell while moving.
    pub position: Vec2,
    pub settled: bool,
}

/// Read-only copy of a session for presentation.
///
/// Reuse one instance with [`Session::snapshot_into`](crate::Session::snapshot_into)
/// to avoid reallocating the cell buffer every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    /// Row-major from the bottom row, like the grid.
    pub cells: Vec<Option<CellSnapshot>>,
    pub score: u32,
    pub target: u32,
    pub time_left: f32,
    pub outcome: Option<Outcome>,
    pub selected: Option<Coord>,
    pub phase: Phase,
    pub level_id: u32,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            tile_size: 1.0,
            cells: Vec::new(),
            score: 0,
            target: 0,
            time_left: 0.0,
            outcome: None,
            selected: None,
            phase: Phase::Idle,
            level_id: 0,
        }
    }
}

impl SessionSnapshot {
    pub fn cell(&self, c: Coord) -> Option<&CellSnapshot> {
        if c.x < 0 || c.y < 0 || c.x as usize >= self.width || c.y as usize >= self.height {
            return None;
        }
        self.cells[c.y as usize * self.width + c.x as usize].as_ref()
    }

    /// Fractional cell coordinates of a world position (inverse of the grid transform).
    pub fn world_to_cell(&self, p: Vec2) -> (f32, f32) {
        let t = self.tile_size;
        (
            (p.x + (self.width as f32 - 1.0) * t / 2.0) / t,
            (p.y + (self.height as f32 - 1.0) * t / 2.0) / t,
        )
    }

    /// Chain step currently being played out, 0 between cascades.
    pub fn chain(&self) -> u32 {
        match self.phase {
            Phase::Resolving { chain, .. }
            | Phase::Settling { chain, .. }
            | Phase::Rechecking { chain } => chain,
            Phase::Idle | Phase::Validating { .. } => 0,
        }
    }

    /// True when the board accepts a selection: idle and not yet decided.
    pub fn playable(&self) -> bool {
        self.outcome.is_none() && self.phase == Phase::Idle
    }
}
