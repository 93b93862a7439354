//! Game state snapshot: the visible state handed to presentation each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::events::GameEvent;
use crate::types::{Camera, EntityId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub pickups: Vec<PickupView>,
    pub camera: Option<Camera>,
    pub kills: u32,
    pub events: Vec<GameEvent>,
}

/// Player status for the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub entity: EntityId,
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    /// Facing used by the last melee swing.
    pub aim: DVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub entity: EntityId,
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub entity: EntityId,
    pub position: DVec2,
    pub amount: u32,
}
