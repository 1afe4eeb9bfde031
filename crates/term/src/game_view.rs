//! BoardView: maps a `core::SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{Coord, Outcome, Rgb, HIGHLIGHT_GAIN};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Whole seconds left (rounded up), as minutes and seconds.
pub fn clock_parts(seconds_remaining: f32) -> (u32, u32) {
    let total = seconds_remaining.max(0.0).ceil() as u32;
    (total / 60, total % 60)
}

/// `mm:ss`, rounding partial seconds up so `0:00` only shows at the very end.
pub fn format_clock(seconds_remaining: f32) -> String {
    let (m, s) = clock_parts(seconds_remaining);
    format!("{:02}:{:02}", m, s)
}

/// Result banner for a decided level.
pub fn outcome_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "Win!",
        Outcome::Lost => "Lose...",
    }
}

/// A lightweight terminal renderer for the match-3 board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Three columns leave room for the cursor brackets around the glyph.
        Self { cell_w: 3 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: Option<Coord>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        // Boards wider or taller than a terminal can address are clipped.
        let (cols, rows) = (clamp_u16(snap.width), clamp_u16(snap.height));
        let board_px_w = cols.saturating_mul(self.cell_w);
        let board_px_h = rows;
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::fg(Rgb::new(200, 200, 200), PANEL_BG);
        let empty = CellStyle {
            dim: true,
            ..CellStyle::fg(Rgb::new(90, 90, 100), BOARD_BG)
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', empty);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..rows {
            for x in 0..cols {
                let (px, py) = self.cell_origin(rows, start_x, start_y, x, y);
                if px >= viewport.width {
                    break;
                }
                fb.put_char(px.saturating_add(self.cell_w / 2), py, '·', empty);
            }
        }

        // Tokens are drawn where they are, not where they belong, so falls animate.
        for cell in snap.cells.iter().flatten() {
            let (fx, fy) = snap.world_to_cell(cell.position);
            let (x, y) = (fx.round(), fy.round());
            if x < 0.0 || y < 0.0 || x >= cols as f32 || y >= rows as f32 {
                continue;
            }
            let (x, y) = (x as u16, y as u16);
            let here = Coord::new(x as i32, y as i32);
            let selected = cell.settled && snap.selected == Some(here);
            let style = CellStyle {
                fg: if selected {
                    cell.tint.scaled(HIGHLIGHT_GAIN)
                } else {
                    cell.tint
                },
                bg: BOARD_BG,
                bold: selected,
                dim: false,
            };
            let (px, py) = self.cell_origin(rows, start_x, start_y, x, y);
            fb.put_char(px.saturating_add(self.cell_w / 2), py, cell.glyph, style);
        }

        if let Some(c) = cursor {
            if c.x >= 0 && c.y >= 0 && (c.x as u32) < cols as u32 && (c.y as u32) < rows as u32 {
                let style = CellStyle {
                    bold: true,
                    ..CellStyle::fg(Rgb::new(255, 255, 255), BOARD_BG)
                };
                let (px, py) = self.cell_origin(rows, start_x, start_y, c.x as u16, c.y as u16);
                if self.cell_w >= 3 {
                    fb.put_char(px, py, '[', style);
                    fb.put_char(px.saturating_add(self.cell_w - 1), py, ']', style);
                }
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        if let Some(outcome) = snap.outcome {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, outcome_text(outcome));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, cursor: Option<Coord>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    /// Top-left terminal cell of board cell `(x, y)`; row 0 is at the bottom.
    fn cell_origin(&self, rows: u16, start_x: u16, start_y: u16, x: u16, y: u16) -> (u16, u16) {
        let row_from_top = rows.saturating_sub(1).saturating_sub(y);
        (
            start_x.saturating_add(1).saturating_add(x.saturating_mul(self.cell_w)),
            start_y.saturating_add(1).saturating_add(row_from_top),
        )
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::fg(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        let x = fb.put_str(panel_x, y, "Score: ", label);
        fb.put_u32(x, y, snap.score, 1, value);
        y = y.saturating_add(1);

        let x = fb.put_str(panel_x, y, "Target: ", label);
        fb.put_u32(x, y, snap.target, 1, value);
        y = y.saturating_add(1);

        let (m, s) = clock_parts(snap.time_left);
        let x = fb.put_str(panel_x, y, "Time: ", label);
        let x = fb.put_u32(x, y, m, 2, value);
        let x = fb.put_str(x, y, ":", value);
        fb.put_u32(x, y, s, 2, value);
        y = y.saturating_add(2);

        let chain = snap.chain();
        if chain > 1 {
            let x = fb.put_str(panel_x, y, "Chain x", value);
            fb.put_u32(x, y, chain, 1, value);
        }
        y = y.saturating_add(2);

        let hint = CellStyle { dim: true, ..value };
        for line in ["arrows: move", "space: select", "esc: cancel", "r: restart", "q: quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    // Edges past the framebuffer are dropped by put_char; stop there.
    for dx in 1..(w - 1).min(fb.width()) {
        fb.put_char(x.saturating_add(dx), y, '─', style);
        fb.put_char(x.saturating_add(dx), bottom, '─', style);
    }
    for dy in 1..(h - 1).min(fb.height()) {
        fb.put_char(x, y.saturating_add(dy), '│', style);
        fb.put_char(right, y.saturating_add(dy), '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, frame_h: u16, text: &str) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::fg(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x, mid_y, text, style);
}
