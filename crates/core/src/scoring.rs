//! Scoring module - chain-multiplied clear scores
//!
//! Every cleared token is worth its type's score value. A chain step's points
//! are the sum of those values times the cascade multiplier for the chain
//! index: chain 1 pays 1.0x, chain 2 pays `1 + step`, chain 3 `1 + 2 * step`,
//! and so on. Negative steps are treated as zero so the multiplier never
//! decreases with chain length.

/// Multiplier for a chain index (1-based).
pub fn cascade_multiplier(chain: u32, bonus_step: f32) -> f32 {
    1.0 + chain.saturating_sub(1) as f32 * bonus_step.max(0.0)
}

/// Points awarded for `base_score` worth of tokens at `chain`.
///
/// Rounds half to even, so 2.5 becomes 2 and 3.5 becomes 4. The product stays
/// in f32: widening the multiplier first turns `15 * 1.1` into 16.5000004
/// instead of the 16.5 tie.
pub fn award_points(base_score: u32, chain: u32, bonus_step: f32) -> u32 {
    let raw = base_score as f32 * cascade_multiplier(chain, bonus_step);
    raw.round_ties_even().clamp(0.0, u32::MAX as f32) as u32
}

/// Score and target for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    score: u32,
    target: u32,
}

impl Scoreboard {
    pub fn new(target: u32) -> Self {
        Self { score: 0, target }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Add points; returns true if this award reached the target.
    pub fn award(&mut self, points: u32) -> bool {
        let before = self.reached();
        self.score = self.score.saturating_add(points);
        !before && self.reached()
    }

    pub fn reached(&self) -> bool {
        self.score >= self.target
    }
}
