//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Layer;

/// 2D position in world units. +x = right, +y = up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each active tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Stable, serializable handle for an entity, used in events and views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Bitset of [`Layer`]s a damage interaction may affect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

/// Axis-aligned camera view rectangle, supplied by the camera collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub center: DVec2,
    /// Half width / half height of the visible area.
    pub half_extents: DVec2,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing exactly the given layers.
    pub fn of(layers: &[Layer]) -> Self {
        Self(layers.iter().fold(0, |bits, layer| bits | layer.bit()))
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    pub fn union(self, other: LayerMask) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Camera {
    pub fn new(center: DVec2, half_extents: DVec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// World-space y of the top edge of the view.
    pub fn top(&self) -> f64 {
        self.center.y + self.half_extents.y
    }

    pub fn min(&self) -> DVec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> DVec2 {
        self.center + self.half_extents
    }

    /// Whether `point` lies outside the view by more than `margin` on any side.
    pub fn is_outside(&self, point: DVec2, margin: f64) -> bool {
        let min = self.min();
        let max = self.max();
        point.x < min.x - margin
            || point.x > max.x + margin
            || point.y < min.y - margin
            || point.y > max.y + margin
    }
}
