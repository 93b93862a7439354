//! Simulation engine for slashfall.
//!
//! Owns the hecs ECS world, runs systems once per frame tick,
//! and produces GameStateSnapshots for the presentation layer.

pub mod engine;
pub mod systems;
pub mod world_setup;

use hecs::Entity;

use slashfall_core::types::EntityId;

pub use engine::{SimConfig, SimulationEngine};
pub use slashfall_core as core;

/// Stable id for an entity, as carried in events, views and links.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Inverse of [`entity_id`]. `None` for ids that can never name an entity.
pub fn entity_from_id(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
