//! Progression ledger: experience accumulation and level thresholds.

use serde::{Deserialize, Serialize};

use crate::constants::{LEVEL_THRESHOLDS, LEVEL_THRESHOLD_INCREMENT, LEVEL_UP_ITERATION_GUARD};

/// Experience needed to leave each level.
///
/// Levels covered by `thresholds` read the table directly; later levels grow
/// linearly from the last entry by `increment` per level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCurve {
    pub thresholds: Vec<u32>,
    pub increment: u32,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            thresholds: LEVEL_THRESHOLDS.to_vec(),
            increment: LEVEL_THRESHOLD_INCREMENT,
        }
    }
}

impl LevelCurve {
    pub fn new(thresholds: Vec<u32>, increment: u32) -> Self {
        Self {
            thresholds,
            increment,
        }
    }

    /// Experience required to go from `level` to `level + 1`.
    pub fn threshold(&self, level: u32) -> u32 {
        let idx = level.saturating_sub(1) as usize;
        if let Some(&t) = self.thresholds.get(idx) {
            return t;
        }
        let last = self.thresholds.last().copied().unwrap_or(0);
        let past_table = (idx - self.thresholds.len() + 1) as u32;
        last.saturating_add(past_table.saturating_mul(self.increment))
    }
}

/// Plain level/exp pair handed to the persistence collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub level: u32,
    pub exp: u32,
}

/// Experience/level accumulator for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    level: u32,
    exp: u32,
    curve: LevelCurve,
    iteration_guard: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(LevelCurve::default())
    }
}

impl Progression {
    /// Level 1, zero experience.
    pub fn new(curve: LevelCurve) -> Self {
        Self {
            level: 1,
            exp: 0,
            curve,
            iteration_guard: LEVEL_UP_ITERATION_GUARD,
        }
    }

    pub fn with_iteration_guard(mut self, guard: u32) -> Self {
        self.iteration_guard = guard;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    pub fn exp_to_next(&self) -> u32 {
        self.curve.threshold(self.level)
    }

    /// Progress towards the next level in `0..=1`, for the exp bar.
    pub fn exp_ratio_to_next(&self) -> f64 {
        let to_next = self.exp_to_next();
        if to_next == 0 {
            return 1.0;
        }
        (self.exp as f64 / to_next as f64).clamp(0.0, 1.0)
    }

    /// Add experience and level up as many times as it covers.
    ///
    /// Returns the new level reached by each level-up, in order. Leftover
    /// experience carries over. Stops early on a zero threshold or when the
    /// iteration guard runs out.
    pub fn add_experience(&mut self, amount: u32) -> Vec<u32> {
        let mut level_ups = Vec::new();
        if amount == 0 {
            return level_ups;
        }

        self.exp = self.exp.saturating_add(amount);
        for _ in 0..self.iteration_guard {
            let to_next = self.exp_to_next();
            if to_next == 0 || self.exp < to_next {
                break;
            }
            self.exp -= to_next;
            self.level += 1;
            level_ups.push(self.level);
        }
        level_ups
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            level: self.level,
            exp: self.exp,
        }
    }

    /// Load a saved level/exp pair. Level is floored at 1; no level-ups fire.
    pub fn restore(&mut self, saved: ProgressionSnapshot) {
        self.level = saved.level.max(1);
        self.exp = saved.exp;
    }
}
