//! Grid module - owns the board's token slots
//!
//! The grid is a `width x height` array of optional tokens stored as a flat
//! vector in row-major order (`y * width + x`), with `y = 0` as the bottom row.
//! A slot is empty only while a turn is being resolved; at rest every slot is
//! filled.
//!
//! Checked accessors return [`GridError::OutOfBounds`]. Hot paths (the match
//! scan) use [`Grid::kind_at`], which treats out-of-bounds as "no token".

use crate::error::GridError;
use crate::token::Token;
use crate::types::{Coord, TokenTypeId, Vec2};

/// The board's slots plus the grid-to-world transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: Vec<Option<Token>>,
}

impl Grid {
    /// Create an empty grid. Dimensions are validated by the config layer.
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline(always)]
    fn index(&self, c: Coord) -> Option<usize> {
        if self.in_bounds(c) {
            Some(c.y as usize * self.width + c.x as usize)
        } else {
            None
        }
    }

    fn checked_index(&self, c: Coord) -> Result<usize, GridError> {
        self.index(c).ok_or(GridError::OutOfBounds {
            coord: c,
            width: self.width,
            height: self.height,
        })
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    /// World position of a cell's centre; the board is centred on the origin.
    ///
    /// Defined for any coordinate, including rows above the board where refills
    /// spawn.
    pub fn to_world(&self, c: Coord) -> Vec2 {
        let t = self.tile_size;
        Vec2::new(
            c.x as f32 * t - (self.width as f32 - 1.0) * t / 2.0,
            c.y as f32 * t - (self.height as f32 - 1.0) * t / 2.0,
        )
    }

    pub fn get(&self, c: Coord) -> Result<Option<&Token>, GridError> {
        let i = self.checked_index(c)?;
        Ok(self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, c: Coord) -> Result<Option<&mut Token>, GridError> {
        let i = self.checked_index(c)?;
        Ok(self.cells[i].as_mut())
    }

    /// Store `token` at `c`, returning whatever was there.
    pub fn set(&mut self, c: Coord, token: Option<Token>) -> Result<Option<Token>, GridError> {
        let i = self.checked_index(c)?;
        Ok(std::mem::replace(&mut self.cells[i], token))
    }

    /// Unchecked slot access for loops that already iterate `0..width` / `0..height`.
    #[inline(always)]
    pub(crate) fn slot_mut(&mut self, x: usize, y: usize) -> &mut Option<Token> {
        debug_assert!(x < self.width && y < self.height);
        &mut self.cells[y * self.width + x]
    }

    /// Remove and return the token at `c`.
    pub fn take(&mut self, c: Coord) -> Result<Option<Token>, GridError> {
        self.set(c, None)
    }

    /// Exchange the occupants of two cells.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), GridError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Type of the token at `c`; `None` for empty or out-of-bounds cells.
    #[inline]
    pub fn kind_at(&self, c: Coord) -> Option<TokenTypeId> {
        self.index(c)
            .and_then(|i| self.cells[i].as_ref())
            .map(Token::kind_id)
    }

    /// All coordinates, row by row from the bottom.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let w = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..w).map(move |x| Coord::new(x, y)))
    }

    /// Occupied cells with their tokens, row by row from the bottom.
    pub fn tokens(&self) -> impl Iterator<Item = (Coord, &Token)> + '_ {
        let w = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|t| (Coord::new((i % w) as i32, (i / w) as i32), t))
        })
    }

    pub fn tokens_mut(&mut self) -> impl Iterator<Item = &mut Token> + '_ {
        self.cells.iter_mut().flatten()
    }

    /// True when no slot is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// True when every token has reached its cell.
    pub fn all_settled(&self) -> bool {
        self.cells.iter().flatten().all(|t| t.motion.is_settled())
    }

    /// Advance every token's motion by `dt` seconds.
    pub fn advance_motion(&mut self, dt: f32) {
        for token in self.tokens_mut() {
            token.motion.advance(dt);
        }
    }

    /// Move every token straight onto its cell.
    pub fn snap_motion(&mut self) {
        for token in self.tokens_mut() {
            token.motion.snap();
        }
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Type ids as rows, top row first (matching how boards are drawn).
    pub fn kind_rows(&self) -> Vec<Vec<Option<TokenTypeId>>> {
        (0..self.height as i32)
            .rev()
            .map(|y| {
                (0..self.width as i32)
                    .map(|x| self.kind_at(Coord::new(x, y)))
                    .collect()
            })
            .collect()
    }
}
