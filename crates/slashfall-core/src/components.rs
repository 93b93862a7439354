//! ECS components for hecs entities.
//!
//! Plain data. The ledgers with their own invariants ([`crate::health::Health`],
//! [`crate::damage::DamageSource`], [`crate::progression::Progression`]) live
//! in their own modules; cross-entity logic lives in systems.
//!
//! [`crate::enums::Layer`], [`crate::types::Position`] and
//! [`crate::types::Velocity`] are used as components directly.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::MeleeConfig;
use crate::types::{EntityId, LayerMask};

/// Marks the player-controlled entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a hostile entity created by a spawn controller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Circular collision body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Structural parent link. Melee swings skip every entity whose parent
/// chain reaches the wielder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Parent(pub EntityId);

/// Per-tick movement input from the input collaborator (may be zero).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MoveInput {
    pub direction: DVec2,
}

/// Constant-speed movement driven by [`MoveInput`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveSpeed(pub f64);

/// Periodic arc-sweep melee weapon, one per wielder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeWeapon {
    pub swing_interval_secs: f64,
    pub arc_degrees: f64,
    pub range: f64,
    pub forward_offset: f64,
    pub damage: f64,
    pub hit_layers: LayerMask,
    /// Added to `range` for the hit test.
    pub extra_range: f64,
    /// Added to `arc_degrees` for the hit test.
    pub extra_arc_degrees: f64,
    /// Swing perpendicular to the facing direction.
    pub swing_orthogonal: bool,
    pub snap_to_cardinal: bool,
    pub vfx: SlashVfxParams,
    /// Countdown to the next swing. Swings when it reaches zero.
    pub timer_secs: f64,
    /// Last facing used; never zero.
    pub last_aim: DVec2,
}

/// Cosmetic slash parameters. No gameplay effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlashVfxParams {
    pub color: [f32; 4],
    pub thickness: f64,
    pub duration_secs: f64,
    pub count: u32,
    /// Slashes fan across ±this many degrees around the swing direction.
    pub angle_spread_deg: f64,
    pub length_multiplier: f64,
    pub thickness_multiplier: f64,
}

impl MeleeWeapon {
    pub fn from_config(config: &MeleeConfig) -> Self {
        Self {
            swing_interval_secs: config.swing_interval_secs,
            arc_degrees: config.arc_degrees,
            range: config.range,
            forward_offset: config.forward_offset,
            damage: config.damage,
            hit_layers: config.hit_layers,
            extra_range: config.extra_range,
            extra_arc_degrees: config.extra_arc_degrees,
            swing_orthogonal: config.swing_orthogonal,
            snap_to_cardinal: config.snap_to_cardinal,
            vfx: config.vfx.clone(),
            timer_secs: 0.0,
            last_aim: DVec2::X,
        }
    }
}

/// Seek a target entity at constant speed (radial-spawned enemies).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Seek {
    pub target: EntityId,
    pub speed: f64,
}

/// Constant velocity drift (formation-spawned enemies drift downward).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Drift {
    pub velocity: DVec2,
}

/// Remove the entity once it leaves the camera view by more than `margin`.
/// Only armed after the entity has been inside the view, so bodies spawned
/// off-screen get a chance to drift in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundsKiller {
    pub margin: f64,
    #[serde(default)]
    pub entered: bool,
}

impl BoundsKiller {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            entered: false,
        }
    }
}

/// Remove the entity after `remaining_secs` (projectiles).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_secs: f64,
}

/// On death, leave an experience pickup worth `amount`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpDrop {
    pub amount: u32,
}

/// Experience orb waiting to be collected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpPickup {
    pub amount: u32,
    /// Set once a magnet catches the pickup.
    pub magnet_target: Option<EntityId>,
    pub magnet_speed: f64,
}

/// Pulls nearby experience pickups toward its owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Magnet {
    pub radius: f64,
    pub pull_speed: f64,
}
