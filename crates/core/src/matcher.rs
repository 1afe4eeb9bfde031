//! Match detection
//!
//! [`find_matches`] scans the whole board for runs of `min_match` or more
//! same-type tokens. Rows are scanned left to right (bottom row first), then
//! columns bottom to top (left column first), so the output order is fixed for
//! a given board.
//!
//! A cell can belong to both a horizontal and a vertical run (L and T shapes).
//! Raw runs are folded through a `seen` set so each coordinate is reported in
//! exactly one group, the first run that claimed it. This keeps scoring from
//! counting the corner of an L twice.

use std::collections::HashSet;

use crate::grid::Grid;
use crate::types::{Coord, TokenTypeId};

/// Coordinates cleared together in one chain step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchGroup {
    pub cells: Vec<Coord>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }
}

/// All deduplicated match groups on the board.
pub fn find_matches(grid: &Grid, min_match: u32) -> Vec<MatchGroup> {
    let min = min_match as usize;
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let mut runs: Vec<Vec<Coord>> = Vec::new();

    for y in 0..h {
        collect_runs((0..w).map(|x| Coord::new(x, y)), grid, min, &mut runs);
    }
    for x in 0..w {
        collect_runs((0..h).map(|y| Coord::new(x, y)), grid, min, &mut runs);
    }

    let mut seen: HashSet<Coord> = HashSet::new();
    runs.into_iter()
        .filter_map(|run| {
            let cells: Vec<Coord> = run.into_iter().filter(|c| seen.insert(*c)).collect();
            if cells.is_empty() {
                None
            } else {
                Some(MatchGroup { cells })
            }
        })
        .collect()
}

/// Walk one line of cells and push every run of at least `min` equal types.
fn collect_runs(
    line: impl Iterator<Item = Coord>,
    grid: &Grid,
    min: usize,
    out: &mut Vec<Vec<Coord>>,
) {
    let mut run: Vec<Coord> = Vec::new();
    let mut run_kind: Option<TokenTypeId> = None;

    for c in line {
        let kind = grid.kind_at(c);
        if kind.is_some() && kind == run_kind {
            run.push(c);
            continue;
        }
        if run.len() >= min {
            out.push(std::mem::take(&mut run));
        }
        run.clear();
        run_kind = kind;
        if kind.is_some() {
            run.push(c);
        }
    }

    if run.len() >= min {
        out.push(run);
    }
}

/// Does the token at `c` sit in a horizontal or vertical run of `min_match`?
///
/// The two axes are counted independently. Empty neighbours break the count,
/// which is what makes this usable while the board is still being filled.
pub fn has_match_at(grid: &Grid, c: Coord, min_match: u32) -> bool {
    let Some(kind) = grid.kind_at(c) else {
        return false;
    };
    let min = min_match as usize;

    let count_dir = |dx: i32, dy: i32| -> usize {
        let mut n = 0;
        let mut p = c.offset(dx, dy);
        while grid.kind_at(p) == Some(kind) {
            n += 1;
            p = p.offset(dx, dy);
        }
        n
    };

    let horizontal = 1 + count_dir(-1, 0) + count_dir(1, 0);
    if horizontal >= min {
        return true;
    }
    let vertical = 1 + count_dir(0, -1) + count_dir(0, 1);
    vertical >= min
}
