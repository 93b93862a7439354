//! Cooldown-gated, layer-filtered damage emitter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_DAMAGE_AMOUNT, DEFAULT_DAMAGE_COOLDOWN_SECS};
use crate::enums::Layer;
use crate::health::{DamageOutcome, Health};
use crate::types::LayerMask;

/// Why a [`DamageSource::try_apply_to`] call did not land.
///
/// Neither case is a simulation failure; callers treat both as "no hit".
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ApplyRejected {
    #[error("target has no health ledger")]
    MissingTarget,
    #[error("source cooling down, {remaining_secs:.3}s remaining")]
    CoolingDown { remaining_secs: f64 },
}

/// What a successful application did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    pub outcome: DamageOutcome,
    /// The source's owning entity should be removed (`destroy_on_hit`).
    pub destroy_source: bool,
}

/// Damage emitter carried by contact bodies and projectiles.
///
/// The cooldown is per source: one application blocks every further
/// application, against any target, for `cooldown_secs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageSource {
    amount: f64,
    cooldown_secs: f64,
    target_layers: LayerMask,
    destroy_on_hit: bool,
    last_applied_secs: Option<f64>,
}

impl Default for DamageSource {
    fn default() -> Self {
        Self::new(DEFAULT_DAMAGE_AMOUNT, DEFAULT_DAMAGE_COOLDOWN_SECS)
    }
}

impl DamageSource {
    /// Negative amounts and cooldowns are clamped to zero.
    pub fn new(amount: f64, cooldown_secs: f64) -> Self {
        Self {
            amount: non_negative(amount),
            cooldown_secs: non_negative(cooldown_secs),
            target_layers: LayerMask::NONE,
            destroy_on_hit: false,
            last_applied_secs: None,
        }
    }

    pub fn with_target_layers(mut self, layers: LayerMask) -> Self {
        self.target_layers = layers;
        self
    }

    pub fn with_destroy_on_hit(mut self, destroy: bool) -> Self {
        self.destroy_on_hit = destroy;
        self
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = non_negative(amount);
    }

    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown_secs
    }

    pub fn set_cooldown_secs(&mut self, secs: f64) {
        self.cooldown_secs = non_negative(secs);
    }

    pub fn target_layers(&self) -> LayerMask {
        self.target_layers
    }

    pub fn destroy_on_hit(&self) -> bool {
        self.destroy_on_hit
    }

    /// Pure layer predicate for the overlap dispatcher. `try_apply_to`
    /// itself does not look at the target's layer.
    pub fn can_affect_layer(&self, layer: Layer) -> bool {
        self.target_layers.contains(layer)
    }

    /// Seconds left before the source may apply again (0 when ready).
    pub fn cooldown_remaining(&self, now_secs: f64) -> f64 {
        match self.last_applied_secs {
            Some(last) => (self.cooldown_secs - (now_secs - last)).max(0.0),
            None => 0.0,
        }
    }

    pub fn is_ready(&self, now_secs: f64) -> bool {
        match self.last_applied_secs {
            Some(last) => now_secs - last >= self.cooldown_secs,
            None => true,
        }
    }

    /// Apply `amount` to `target` if the cooldown has elapsed, stamping the
    /// cooldown clock on success.
    pub fn try_apply_to(
        &mut self,
        target: Option<&mut Health>,
        now_secs: f64,
    ) -> Result<HitReport, ApplyRejected> {
        let target = target.ok_or(ApplyRejected::MissingTarget)?;
        if !self.is_ready(now_secs) {
            return Err(ApplyRejected::CoolingDown {
                remaining_secs: self.cooldown_remaining(now_secs),
            });
        }

        let outcome = target.take_damage(self.amount);
        self.last_applied_secs = Some(now_secs);
        Ok(HitReport {
            outcome,
            destroy_source: self.destroy_on_hit,
        })
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_source() -> DamageSource {
        DamageSource::new(20.0, 0.5).with_target_layers(LayerMask::of(&[Layer::Player]))
    }

    #[test]
    fn test_layer_predicate() {
        let src = contact_source();
        assert!(src.can_affect_layer(Layer::Player));
        assert!(!src.can_affect_layer(Layer::Enemy));
        assert!(!src.can_affect_layer(Layer::Default));
    }

    #[test]
    fn test_missing_target_rejected_without_stamping() {
        let mut src = contact_source();
        assert_eq!(
            src.try_apply_to(None, 1.0),
            Err(ApplyRejected::MissingTarget)
        );
        assert!(src.is_ready(1.0));
    }

    #[test]
    fn test_cooldown_blocks_same_and_other_targets() {
        let mut src = contact_source();
        let mut a = Health::new(100.0);
        let mut b = Health::new(100.0);

        assert!(src.try_apply_to(Some(&mut a), 1.0).is_ok());
        assert_eq!(a.current(), 80.0);

        let again = src.try_apply_to(Some(&mut a), 1.2);
        assert!(matches!(again, Err(ApplyRejected::CoolingDown { .. })));
        assert_eq!(a.current(), 80.0);

        let other = src.try_apply_to(Some(&mut b), 1.3);
        assert!(matches!(other, Err(ApplyRejected::CoolingDown { .. })));
        assert_eq!(b.current(), 100.0);

        assert!(src.try_apply_to(Some(&mut b), 1.5).is_ok());
        assert_eq!(b.current(), 80.0);
    }

    #[test]
    fn test_cooldown_remaining_reported() {
        let mut src = contact_source();
        let mut h = Health::new(100.0);
        src.try_apply_to(Some(&mut h), 2.0).unwrap();
        match src.try_apply_to(Some(&mut h), 2.1) {
            Err(ApplyRejected::CoolingDown { remaining_secs }) => {
                assert!((remaining_secs - 0.4).abs() < 1e-9);
            }
            other => panic!("expected cooldown rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_destroy_on_hit_reported() {
        let mut src = contact_source().with_destroy_on_hit(true);
        let mut h = Health::new(10.0);
        let report = src.try_apply_to(Some(&mut h), 0.0).unwrap();
        assert!(report.destroy_source);
        assert_eq!(report.outcome, DamageOutcome::Killed);
    }

    #[test]
    fn test_negative_tunables_clamped() {
        let mut src = DamageSource::new(-4.0, -1.0);
        assert_eq!(src.amount(), 0.0);
        assert_eq!(src.cooldown_secs(), 0.0);
        src.set_amount(-2.0);
        src.set_cooldown_secs(f64::NAN);
        assert_eq!(src.amount(), 0.0);
        assert_eq!(src.cooldown_secs(), 0.0);
    }
}
