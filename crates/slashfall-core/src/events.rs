//! Events emitted by the simulation for presentation (VFX, UI, audio).
//!
//! Drained into every snapshot in emission order.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{Layer, SpawnVariant};
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A spawn controller created an enemy.
    Spawned {
        entity: EntityId,
        variant: SpawnVariant,
        position: DVec2,
    },
    /// A health ledger lost health.
    Damaged {
        entity: EntityId,
        amount: f64,
        remaining: f64,
    },
    /// A health ledger reported its death. `layer` tells player deaths
    /// from enemy deaths.
    Died {
        entity: EntityId,
        layer: Layer,
        position: DVec2,
    },
    /// One cosmetic slash of a melee swing.
    Slash {
        center: DVec2,
        direction: DVec2,
        length: f64,
        thickness: f64,
        duration_secs: f64,
        color: [f32; 4],
    },
    /// Experience added to a progression ledger.
    ExpGained { amount: u32 },
    /// Progression ledger reached `level`.
    LevelUp { level: u32 },
    /// An experience pickup was absorbed.
    PickupCollected { entity: EntityId, amount: u32 },
    /// The player died; the run is over.
    GameOver,
}
