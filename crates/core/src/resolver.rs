//! Resolution engine - one player turn from swap to stable board
//!
//! The resolver owns the grid and drives it through a small state machine:
//!
//! ```text
//! Idle -> Validating -> Resolving -> Settling -> Rechecking -+-> Idle
//!              |             ^                              |
//!              |             +------------------------------+  (new matches)
//!              +-> (no match: swap back, wait, Idle)
//! ```
//!
//! Token movement is animated, so progress is made in [`Resolver::tick`]: the
//! resolver waits in `Validating` and `Settling` until every token has reached
//! its cell, and in `Resolving` for the configured clear pause. Swap requests
//! are only accepted while `Idle`.
//!
//! Chain steps are scored with [`award_points`]; once the scoreboard reaches
//! its target the current step is the last one. The board is still collapsed
//! and refilled so no cell is left empty, but nothing further is cleared.
//!
//! Randomness comes from the injected [`RandomSource`], never from global state.

use tracing::{debug, info, warn};

use crate::config::{GameConfig, Rules};
use crate::error::{ConfigError, GridError, SwapRejected};
use crate::grid::Grid;
use crate::matcher::{find_matches, has_match_at, MatchGroup};
use crate::motion::Motion;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{award_points, Scoreboard};
use crate::token::{Token, TokenPalette};
use crate::types::{
    Coord, GameEvent, TokenId, TokenType, TokenTypeId, Vec2, BUILD_RETRY_LIMIT,
    SPAWN_OFFSET_TILES,
};

/// Where the resolver is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between turns; swap requests are accepted.
    Idle,
    /// Swapped tokens are moving; matches are checked once they arrive.
    /// `reverting` is set while an unproductive swap is being undone.
    Validating { a: Coord, b: Coord, reverting: bool },
    /// A chain step was cleared and scored; waiting out the clear pause.
    Resolving { chain: u32, finishing: bool },
    /// Columns collapsed and refilled; waiting for tokens to land.
    Settling { chain: u32, finishing: bool },
    /// Board is still; scanning for cascades.
    Rechecking { chain: u32 },
}

/// One cleared and scored chain step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep {
    pub chain: u32,
    pub groups: Vec<MatchGroup>,
    /// Sum of the cleared tokens' score values.
    pub base_score: u32,
    /// Points after the cascade multiplier.
    pub awarded: u32,
}

impl ChainStep {
    pub fn cleared(&self) -> impl Iterator<Item = Coord> + '_ {
        self.groups.iter().flat_map(|g| g.cells.iter().copied())
    }
}

/// Everything that happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub swap: (Coord, Coord),
    /// The swap made no match and was undone.
    pub reverted: bool,
    pub steps: Vec<ChainStep>,
    /// The target score was reached during this turn.
    pub target_reached: bool,
    /// The turn stopped at the chain limit with matches still on the board.
    pub capped: bool,
}

impl TurnReport {
    fn new(a: Coord, b: Coord) -> Self {
        Self {
            swap: (a, b),
            reverted: false,
            steps: Vec::new(),
            target_reached: false,
            capped: false,
        }
    }

    pub fn total_awarded(&self) -> u32 {
        self.steps.iter().map(|s| s.awarded).sum()
    }

    pub fn chains(&self) -> u32 {
        self.steps.len() as u32
    }
}

enum Step {
    Continue,
    Wait,
}

/// The board resolution engine.
#[derive(Debug, Clone)]
pub struct Resolver<R: RandomSource = SimpleRng> {
    rules: Rules,
    palette: TokenPalette,
    grid: Grid,
    rng: R,
    phase: Phase,
    pause_left: f32,
    next_token_id: u32,
    turn: Option<TurnReport>,
    last_turn: Option<TurnReport>,
    events: Vec<GameEvent>,
}

impl<R: RandomSource> Resolver<R> {
    /// Validate `config` and build a random board with no starting matches.
    pub fn new(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        let mut resolver = Self::empty(config, rng)?;
        resolver.build_board();
        Ok(resolver)
    }

    /// Build a board from glyph rows, top row first.
    ///
    /// Each character must be the glyph of a palette type. The layout is taken
    /// as-is; starting matches are not removed.
    pub fn with_layout(config: &GameConfig, rng: R, rows: &[&str]) -> Result<Self, ConfigError> {
        let mut resolver = Self::empty(config, rng)?;
        let (w, h) = (resolver.rules.width, resolver.rules.height);
        if rows.len() != h {
            return Err(ConfigError::LayoutHeight {
                expected: h,
                got: rows.len(),
            });
        }
        for (r, row) in rows.iter().enumerate() {
            let glyphs: Vec<char> = row.chars().collect();
            if glyphs.len() != w {
                return Err(ConfigError::LayoutWidth {
                    row: r,
                    expected: w,
                    got: glyphs.len(),
                });
            }
            let y = h - 1 - r;
            for (x, glyph) in glyphs.into_iter().enumerate() {
                let kind = resolver
                    .palette
                    .by_glyph(glyph)
                    .ok_or(ConfigError::UnknownGlyph(glyph))?;
                let c = Coord::new(x as i32, y as i32);
                let token = resolver.mint(kind, Motion::at(resolver.grid.to_world(c)));
                *resolver.grid.slot_mut(x, y) = Some(token);
            }
        }
        Ok(resolver)
    }

    fn empty(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        let (rules, palette) = config.validate()?;
        Ok(Self {
            grid: Grid::new(rules.width, rules.height, rules.tile_size),
            rules,
            palette,
            rng,
            phase: Phase::Idle,
            pause_left: 0.0,
            next_token_id: 0,
            turn: None,
            last_turn: None,
            events: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &TokenPalette {
        &self.palette
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Report of the most recently completed turn.
    pub fn last_turn(&self) -> Option<&TurnReport> {
        self.last_turn.as_ref()
    }

    /// Take all events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Discard the current board and build a fresh one.
    ///
    /// Any turn in flight is abandoned.
    pub fn rebuild(&mut self) {
        self.phase = Phase::Idle;
        self.pause_left = 0.0;
        self.turn = None;
        self.last_turn = None;
        self.events.clear();
        self.build_board();
    }

    fn mint(&mut self, kind: TokenType, motion: Motion) -> Token {
        let id = TokenId(self.next_token_id);
        self.next_token_id = self.next_token_id.wrapping_add(1);
        Token::new(id, kind, motion.scaled_to(self.rules.tile_size))
    }

    fn place_random(&mut self, c: Coord) {
        let kind = self.palette.pick(&mut self.rng);
        let token = self.mint(kind, Motion::at(self.grid.to_world(c)));
        *self.grid.slot_mut(c.x as usize, c.y as usize) = Some(token);
    }

    /// Fill every cell, re-rolling a cell while it completes a run.
    ///
    /// Each cell gets at most `BUILD_RETRY_LIMIT` re-rolls, so tiny palettes
    /// still terminate (possibly with starting matches).
    fn build_board(&mut self) {
        self.grid.clear();
        let min = self.rules.min_match;
        let mut unresolved = 0usize;

        for x in 0..self.rules.width as i32 {
            for y in 0..self.rules.height as i32 {
                let c = Coord::new(x, y);
                self.place_random(c);
                let mut guard = 0;
                while has_match_at(&self.grid, c, min) && guard < BUILD_RETRY_LIMIT {
                    self.place_random(c);
                    guard += 1;
                }
                if guard == BUILD_RETRY_LIMIT && has_match_at(&self.grid, c, min) {
                    unresolved += 1;
                }
            }
        }

        if unresolved > 0 {
            warn!(
                cells = unresolved,
                palette = self.palette.len(),
                "board built with starting runs; palette too small to avoid them"
            );
        }
        debug!(
            width = self.rules.width,
            height = self.rules.height,
            "board built"
        );
    }

    /// Start a turn by swapping two adjacent tokens.
    ///
    /// Rejections leave the board untouched. On success the tokens start moving
    /// and the match check happens in a later [`tick`](Self::tick).
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> Result<(), SwapRejected> {
        if !self.is_idle() {
            return Err(SwapRejected::Busy);
        }
        for c in [a, b] {
            if !self.grid.in_bounds(c) {
                return Err(SwapRejected::OutOfBounds(c));
            }
        }
        if !a.is_adjacent(b) {
            return Err(SwapRejected::NotAdjacent(a, b));
        }

        self.exchange(a, b);
        self.turn = Some(TurnReport::new(a, b));
        self.phase = Phase::Validating {
            a,
            b,
            reverting: false,
        };
        debug!(%a, %b, "swap accepted");
        Ok(())
    }

    /// Swap two in-bounds cells and send both tokens toward their new cells.
    fn exchange(&mut self, a: Coord, b: Coord) {
        if self.grid.swap(a, b).is_err() {
            return;
        }
        let speed = self.rules.fall_speed;
        for (to, from) in [(a, b), (b, a)] {
            let target = self.grid.to_world(to);
            if let Ok(Some(token)) = self.grid.get_mut(to) {
                token.motion.retarget(target, speed);
                let id = token.id();
                self.events.push(GameEvent::TokenMoved { token: id, from, to });
            }
        }
    }

    /// Advance animation by `dt` seconds and make as much progress as possible.
    pub fn tick(&mut self, dt: f32, scoreboard: &mut Scoreboard) {
        self.grid.advance_motion(dt);
        if matches!(self.phase, Phase::Resolving { .. }) {
            self.pause_left -= dt;
        }

        while let Step::Continue = self.step(scoreboard) {}
    }

    fn step(&mut self, scoreboard: &mut Scoreboard) -> Step {
        match self.phase {
            Phase::Idle => Step::Wait,

            Phase::Validating { a, b, reverting } => {
                if !self.grid.all_settled() {
                    return Step::Wait;
                }
                if reverting {
                    self.finish_turn();
                    return Step::Continue;
                }
                let groups = find_matches(&self.grid, self.rules.min_match);
                if groups.is_empty() {
                    self.exchange(a, b);
                    if let Some(turn) = self.turn.as_mut() {
                        turn.reverted = true;
                    }
                    self.events.push(GameEvent::SwapReverted { a, b });
                    self.phase = Phase::Validating {
                        a,
                        b,
                        reverting: true,
                    };
                    debug!(%a, %b, "swap made no match; reverting");
                } else {
                    self.begin_chain(&groups, 1, scoreboard);
                }
                Step::Continue
            }

            Phase::Resolving { chain, finishing } => {
                if self.pause_left > 0.0 {
                    return Step::Wait;
                }
                self.collapse_and_refill();
                self.phase = Phase::Settling { chain, finishing };
                Step::Continue
            }

            Phase::Settling { chain, finishing } => {
                if !self.grid.all_settled() {
                    return Step::Wait;
                }
                if finishing {
                    self.finish_turn();
                } else {
                    self.phase = Phase::Rechecking { chain };
                }
                Step::Continue
            }

            Phase::Rechecking { chain } => {
                let groups = find_matches(&self.grid, self.rules.min_match);
                if groups.is_empty() {
                    self.finish_turn();
                } else if chain >= self.rules.max_chain {
                    warn!(
                        chain,
                        groups = groups.len(),
                        "chain limit reached; leaving remaining matches"
                    );
                    if let Some(turn) = self.turn.as_mut() {
                        turn.capped = true;
                    }
                    self.finish_turn();
                } else {
                    self.begin_chain(&groups, chain + 1, scoreboard);
                }
                Step::Continue
            }
        }
    }

    fn begin_chain(&mut self, groups: &[MatchGroup], chain: u32, scoreboard: &mut Scoreboard) {
        let step = self.resolve_chain(groups, chain, scoreboard);
        let finishing = step.base_score > 0 && scoreboard.reached();
        if let Some(turn) = self.turn.as_mut() {
            turn.steps.push(step);
            turn.target_reached |= finishing;
        }
        if finishing {
            info!(chain, score = scoreboard.score(), "target reached");
        }
        self.pause_left = self.rules.clear_pause_secs;
        self.phase = Phase::Resolving { chain, finishing };
    }

    fn finish_turn(&mut self) {
        self.phase = Phase::Idle;
        if let Some(turn) = self.turn.take() {
            debug!(
                chains = turn.chains(),
                awarded = turn.total_awarded(),
                reverted = turn.reverted,
                "turn complete"
            );
            self.events.push(GameEvent::TurnCompleted {
                chains: turn.chains(),
            });
            self.last_turn = Some(turn);
        }
    }

    /// Clear every token in `groups` and score them at `chain`.
    ///
    /// Cells left empty are filled by [`collapse_and_refill`](Self::collapse_and_refill).
    /// Coordinates that are out of bounds or already empty are skipped.
    pub fn resolve_chain(
        &mut self,
        groups: &[MatchGroup],
        chain: u32,
        scoreboard: &mut Scoreboard,
    ) -> ChainStep {
        let mut base_score: u32 = 0;
        let mut cleared = Vec::new();

        for c in groups.iter().flat_map(|g| g.cells.iter().copied()) {
            if let Ok(Some(token)) = self.grid.take(c) {
                base_score = base_score.saturating_add(token.kind().score);
                cleared.push(c);
            }
        }

        let awarded = award_points(base_score, chain, self.rules.cascade_bonus_step);
        scoreboard.award(awarded);

        debug!(chain, tokens = cleared.len(), base_score, awarded, "chain cleared");
        self.events.push(GameEvent::TokensCleared {
            coords: cleared,
            chain,
        });
        if awarded > 0 {
            self.events.push(GameEvent::ScoreChanged {
                score: scoreboard.score(),
            });
        }

        ChainStep {
            chain,
            groups: groups.to_vec(),
            base_score,
            awarded,
        }
    }

    /// Let tokens fall into empty cells and refill each column from the top.
    ///
    /// Columns are compacted downward keeping the order of surviving tokens.
    /// New tokens get a random type and start above the board.
    pub fn collapse_and_refill(&mut self) {
        let (w, h) = (self.rules.width, self.rules.height);
        let speed = self.rules.fall_speed;
        let spawn_lift = Vec2::new(0.0, self.rules.tile_size * SPAWN_OFFSET_TILES);

        for x in 0..w {
            let mut write_y = 0;
            for y in 0..h {
                let Some(mut token) = self.grid.slot_mut(x, y).take() else {
                    continue;
                };
                if y != write_y {
                    let to = Coord::new(x as i32, write_y as i32);
                    token.motion.retarget(self.grid.to_world(to), speed);
                    self.events.push(GameEvent::TokenMoved {
                        token: token.id(),
                        from: Coord::new(x as i32, y as i32),
                        to,
                    });
                }
                *self.grid.slot_mut(x, write_y) = Some(token);
                write_y += 1;
            }

            let spawn = self.grid.to_world(Coord::new(x as i32, h as i32 - 1)) + spawn_lift;
            for y in write_y..h {
                let at = Coord::new(x as i32, y as i32);
                let kind = self.palette.pick(&mut self.rng);
                let token = self.mint(kind, Motion::toward(spawn, self.grid.to_world(at), speed));
                self.events.push(GameEvent::TokenSpawned {
                    token: token.id(),
                    at,
                    kind: kind.id,
                });
                *self.grid.slot_mut(x, y) = Some(token);
            }
        }
    }

    /// Change the type of the token at `c`.
    ///
    /// An id missing from the palette keeps the token as it was (with a
    /// warning) and returns `Ok(false)`; so does an empty cell.
    pub fn assign_type(&mut self, c: Coord, id: TokenTypeId) -> Result<bool, GridError> {
        let kind = self.palette.get(id);
        match self.grid.get_mut(c)? {
            Some(token) => {
                if kind.is_none() {
                    warn!(cell = %c, type_id = id.0, "unknown token type");
                }
                Ok(token.set_kind(kind))
            }
            None => Ok(false),
        }
    }

    /// Skip the animation: tick until the current turn is over.
    ///
    /// Returns the report of the finished turn, or `None` if nothing was in flight.
    pub fn run_until_idle(&mut self, scoreboard: &mut Scoreboard) -> Option<&TurnReport> {
        if self.is_idle() {
            return None;
        }
        // Every phase advances on a settled board and an expired pause.
        let bound = (self.rules.max_chain as usize + 2) * 4;
        for _ in 0..bound {
            if self.is_idle() {
                break;
            }
            self.grid.snap_motion();
            self.tick(f32::MAX, scoreboard);
        }
        self.last_turn()
    }
}
