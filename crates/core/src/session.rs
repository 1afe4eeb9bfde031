//! Session controller - score, countdown, selection and win/lose
//!
//! A [`Session`] wraps the [`Resolver`] with the rules of a timed level:
//!
//! - Reaching the target score wins immediately, even in the middle of a cascade.
//! - When the countdown hits zero the result is decided once the board is idle,
//!   never while a cascade is still playing out.
//! - Once decided, the outcome never changes until the next [`Session::start_level`].
//!
//! Call [`Session::tick`] every frame with the elapsed time in seconds and drain
//! the produced [`GameEvent`]s for presentation.

use tracing::info;

use crate::config::GameConfig;
use crate::error::{ConfigError, GridError, SwapRejected};
use crate::grid::Grid;
use crate::resolver::{Phase, Resolver};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::Scoreboard;
use crate::snapshot::{CellSnapshot, SessionSnapshot};
use crate::types::{Coord, GameEvent, Outcome};

/// Result of selecting a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing was selected; now `0` is.
    Selected(Coord),
    /// The selected cell was selected again and released.
    Deselected,
    /// A non-adjacent cell replaced the selection.
    Moved { from: Coord, to: Coord },
    /// Two adjacent cells were selected; the swap is under way.
    SwapRequested(Coord, Coord),
    /// The board is busy or the game is over.
    Ignored,
}

/// One timed level.
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = SimpleRng> {
    config: GameConfig,
    resolver: Resolver<R>,
    scoreboard: Scoreboard,
    time_left: f32,
    outcome: Option<Outcome>,
    selected: Option<Coord>,
    /// Incremented on every level start.
    level_id: u32,
    events: Vec<GameEvent>,
}

impl<R: RandomSource> Session<R> {
    /// Build the board and start the first level.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        let resolver = Resolver::new(&config, rng)?;
        Ok(Self::with_resolver(config, resolver))
    }

    /// Start a level on a prepared board (see [`Resolver::with_layout`]).
    ///
    /// Score and timer come from `config`; the board is kept as-is.
    pub fn with_resolver(config: GameConfig, resolver: Resolver<R>) -> Self {
        let mut session = Self {
            scoreboard: Scoreboard::new(config.target_score),
            time_left: config.time_limit_secs,
            config,
            resolver,
            outcome: None,
            selected: None,
            level_id: 0,
            events: Vec::new(),
        };
        session.reset_state();
        session
    }

    /// Reset score and timer and deal a fresh board.
    pub fn start_level(&mut self) {
        self.resolver.rebuild();
        self.reset_state();
    }

    fn reset_state(&mut self) {
        self.scoreboard = Scoreboard::new(self.config.target_score);
        self.time_left = self.config.time_limit_secs.max(0.0);
        self.outcome = None;
        self.selected = None;
        self.level_id = self.level_id.wrapping_add(1);
        self.events.clear();
        self.events.push(GameEvent::ScoreChanged { score: 0 });
        self.events.push(GameEvent::TimeChanged {
            seconds_remaining: self.time_left,
        });
        info!(
            level = self.level_id,
            target = self.scoreboard.target(),
            seconds = self.time_left,
            "level started"
        );
    }

    /// Advance the board and the countdown by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let score_before = self.scoreboard.score();

        self.resolver.tick(dt, &mut self.scoreboard);
        self.events.append(&mut self.resolver.take_events());

        // First crossing of the target wins on the spot.
        if self.scoreboard.score() > score_before && self.scoreboard.reached() {
            self.end_game(true);
        }

        if self.outcome.is_some() {
            return;
        }

        if self.time_left > 0.0 {
            self.time_left = (self.time_left - dt).max(0.0);
            self.events.push(GameEvent::TimeChanged {
                seconds_remaining: self.time_left,
            });
        }

        if self.time_left <= 0.0 && self.resolver.is_idle() {
            self.end_game(self.scoreboard.reached());
        }
    }

    /// Decide the level. Only the first call has any effect.
    pub fn end_game(&mut self, won: bool) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = Outcome::from_won(won);
        self.outcome = Some(outcome);
        self.selected = None;
        self.events.push(GameEvent::GameEnded { won });
        info!(
            level = self.level_id,
            won,
            score = self.scoreboard.score(),
            "game ended"
        );
    }

    /// Ask for two adjacent tokens to be swapped.
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> Result<(), SwapRejected> {
        if self.outcome.is_some() {
            return Err(SwapRejected::GameOver);
        }
        let result = self.resolver.request_swap(a, b);
        if result.is_ok() {
            self.selected = None;
        }
        self.events.append(&mut self.resolver.take_events());
        result
    }

    /// Select a cell; selecting a second, adjacent cell requests a swap.
    pub fn select(&mut self, c: Coord) -> Result<Selection, GridError> {
        self.resolver.grid().get(c)?;
        if self.outcome.is_some() || !self.resolver.is_idle() {
            return Ok(Selection::Ignored);
        }

        let selection = match self.selected {
            None => {
                self.selected = Some(c);
                Selection::Selected(c)
            }
            Some(s) if s == c => {
                self.selected = None;
                Selection::Deselected
            }
            Some(s) if s.is_adjacent(c) => match self.request_swap(s, c) {
                Ok(()) => Selection::SwapRequested(s, c),
                Err(_) => Selection::Ignored,
            },
            Some(s) => {
                self.selected = Some(c);
                Selection::Moved { from: s, to: c }
            }
        };
        Ok(selection)
    }

    pub fn cancel_selection(&mut self) {
        self.selected = None;
    }

    /// Take all events produced since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver<R> {
        &self.resolver
    }

    pub fn grid(&self) -> &Grid {
        self.resolver.grid()
    }

    pub fn phase(&self) -> Phase {
        self.resolver.phase()
    }

    pub fn is_busy(&self) -> bool {
        !self.resolver.is_idle()
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn target_score(&self) -> u32 {
        self.scoreboard.target()
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    /// Finish the current turn without animation.
    ///
    /// Applies the same win check as [`tick`](Self::tick) but leaves the timer alone.
    pub fn settle(&mut self) {
        let score_before = self.scoreboard.score();
        self.resolver.run_until_idle(&mut self.scoreboard);
        self.events.append(&mut self.resolver.take_events());
        if self.scoreboard.score() > score_before && self.scoreboard.reached() {
            self.end_game(true);
        }
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        let grid = self.resolver.grid();
        out.width = grid.width();
        out.height = grid.height();
        out.tile_size = grid.tile_size();
        out.cells.clear();
        out.cells.resize(grid.width() * grid.height(), None);
        for (c, token) in grid.tokens() {
            let kind = token.kind();
            out.cells[c.y as usize * grid.width() + c.x as usize] = Some(CellSnapshot {
                token: token.id(),
                kind: kind.id,
                glyph: kind.display.glyph,
                tint: kind.display.tint,
                position: token.motion.position(),
                settled: token.motion.is_settled(),
            });
        }
        out.score = self.scoreboard.score();
        out.target = self.scoreboard.target();
        out.time_left = self.time_left;
        out.outcome = self.outcome;
        out.selected = self.selected;
        out.phase = self.resolver.phase();
        out.level_id = self.level_id;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
