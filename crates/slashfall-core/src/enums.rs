//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Collision/damage category of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Enemy,
    Pickup,
}

impl Layer {
    /// Bit index of this layer inside a [`crate::types::LayerMask`].
    pub const fn index(self) -> u32 {
        match self {
            Layer::Default => 0,
            Layer::Player => 6,
            Layer::Enemy => 7,
            Layer::Pickup => 8,
        }
    }

    pub const fn bit(self) -> u32 {
        1 << self.index()
    }
}

/// Overall run phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine created, run not started.
    #[default]
    Idle,
    /// Simulation running.
    Active,
    /// Simulation paused by the player.
    Paused,
    /// Player died; systems no longer run.
    GameOver,
}

/// Placement rule used by a spawn controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnVariant {
    /// Random point on a ring around a tracked target.
    Radial,
    /// Random x inside a band, above the camera's top edge.
    Formation,
}
