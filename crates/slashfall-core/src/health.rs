//! Health ledger: current/max health and the death transition for one entity.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_HEALTH, MIN_MAX_HEALTH};

/// Result of a single [`Health::take_damage`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Ledger already dead, or the amount was not positive.
    Ignored,
    /// Health went down; no death was reported.
    Wounded,
    /// Health crossed to zero and this ledger reports its death now.
    /// Returned at most once per ledger.
    Killed,
}

/// Authoritative current/max health record for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    max: f64,
    current: f64,
    /// Remove the owning entity from the world when it dies.
    destroy_on_death: bool,
    death_reported: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEALTH)
    }
}

impl Health {
    /// New ledger at full health. `max` is floored at 1.
    pub fn new(max: f64) -> Self {
        let max = sanitize_max(max);
        Self {
            max,
            current: max,
            destroy_on_death: true,
            death_reported: false,
        }
    }

    pub fn with_destroy_on_death(mut self, destroy: bool) -> Self {
        self.destroy_on_death = destroy;
        self
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn destroy_on_death(&self) -> bool {
        self.destroy_on_death
    }

    /// Subtract `amount`, clamping at zero.
    ///
    /// No-op on a dead ledger or a non-positive (or NaN) amount.
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        if self.is_dead() || !(amount > 0.0) {
            return DamageOutcome::Ignored;
        }

        self.current -= amount;
        if self.current > 0.0 {
            return DamageOutcome::Wounded;
        }

        self.current = 0.0;
        if self.death_reported {
            return DamageOutcome::Wounded;
        }
        self.death_reported = true;
        DamageOutcome::Killed
    }

    /// Add `amount`, clamping at max. No-op when dead or `amount <= 0`.
    pub fn heal(&mut self, amount: f64) {
        if self.is_dead() || !(amount > 0.0) {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    /// Set a new ceiling (minimum 1). With `fill_current` the ledger is
    /// refilled to the new max, which also revives a dead ledger; its death
    /// has already been reported and will not be reported again.
    pub fn set_max(&mut self, max: f64, fill_current: bool) {
        self.max = sanitize_max(max);
        if fill_current {
            self.current = self.max;
        } else {
            self.current = self.current.min(self.max);
        }
    }
}

fn sanitize_max(max: f64) -> f64 {
    if max.is_nan() {
        MIN_MAX_HEALTH
    } else {
        max.max(MIN_MAX_HEALTH)
    }
}
