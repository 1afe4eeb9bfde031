//! Token motion - time-based interpolation toward a target position
//!
//! Swaps and falls are not instantaneous for the player: each token glides to
//! its cell at a fixed speed. The resolver polls [`Motion::is_settled`] every
//! tick and only moves on once every token on the board has arrived.

use crate::types::{Vec2, SETTLE_EPSILON_SQ};

/// Position of a token in world space and where it is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    position: Vec2,
    target: Vec2,
    speed: f32,
    /// Squared world distance that counts as arrived.
    settle_sq: f32,
}

impl Motion {
    /// A motion resting at `position`
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            target: position,
            speed: 0.0,
            settle_sq: SETTLE_EPSILON_SQ,
        }
    }

    /// A motion starting at `from` heading to `to`
    pub fn toward(from: Vec2, to: Vec2, speed: f32) -> Self {
        Self {
            position: from,
            target: to,
            speed,
            settle_sq: SETTLE_EPSILON_SQ,
        }
    }

    /// Measure the settle tolerance in tiles of `tile_size` world units, so
    /// small tiles still animate.
    pub fn scaled_to(mut self, tile_size: f32) -> Self {
        self.settle_sq = SETTLE_EPSILON_SQ * tile_size * tile_size;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Head for a new target from wherever the token currently is.
    pub fn retarget(&mut self, target: Vec2, speed: f32) {
        self.target = target;
        self.speed = speed;
    }

    /// Advance by `dt` seconds. Snaps onto the target once within epsilon.
    pub fn advance(&mut self, dt: f32) {
        if self.is_settled() {
            self.position = self.target;
            return;
        }
        let max_delta = (self.speed * dt.max(0.0)).max(0.0);
        self.position = move_towards(self.position, self.target, max_delta);
        if self.is_settled() {
            self.position = self.target;
        }
    }

    /// Jump straight to the target.
    pub fn snap(&mut self) {
        self.position = self.target;
    }

    pub fn is_settled(&self) -> bool {
        self.position.distance_sq(self.target) <= self.settle_sq
    }
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let dist_sq = delta.length_sq();
    if dist_sq == 0.0 || (max_delta >= 0.0 && dist_sq <= max_delta * max_delta) {
        return target;
    }
    let dist = dist_sq.sqrt();
    current + delta * (max_delta / dist)
}
