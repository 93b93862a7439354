//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::{Entity, World};

use slashfall_core::components::{Enemy, ExpPickup, MeleeWeapon};
use slashfall_core::enums::GamePhase;
use slashfall_core::events::GameEvent;
use slashfall_core::health::Health;
use slashfall_core::progression::Progression;
use slashfall_core::state::*;
use slashfall_core::types::{Camera, Position, SimTime};

use crate::entity_id;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    player: Option<Entity>,
    camera: Option<Camera>,
    kills: u32,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        player: player.and_then(|p| build_player(world, p)),
        enemies: build_enemies(world),
        pickups: build_pickups(world),
        camera,
        kills,
        events,
    }
}

fn build_player(world: &World, entity: Entity) -> Option<PlayerView> {
    let position = world.get::<&Position>(entity).ok()?.0;
    let (health, max_health) = world
        .get::<&Health>(entity)
        .map_or((0.0, 0.0), |h| (h.current(), h.max()));
    let (level, exp, exp_to_next) = world
        .get::<&Progression>(entity)
        .map_or((1, 0, 0), |p| (p.level(), p.exp(), p.exp_to_next()));
    let aim = world
        .get::<&MeleeWeapon>(entity)
        .map_or(glam::DVec2::X, |w| w.last_aim);

    Some(PlayerView {
        entity: entity_id(entity),
        position,
        health,
        max_health,
        level,
        exp,
        exp_to_next,
        aim,
    })
}

/// Enemies sorted by entity id so output is stable across runs.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .map(|(e, (_, pos, health))| EnemyView {
            entity: entity_id(e),
            position: pos.0,
            health: health.current(),
            max_health: health.max(),
        })
        .collect();

    enemies.sort_by_key(|e| e.entity.0);
    enemies
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&ExpPickup, &Position)>()
        .iter()
        .map(|(e, (pickup, pos))| PickupView {
            entity: entity_id(e),
            position: pos.0,
            amount: pickup.amount,
        })
        .collect();

    pickups.sort_by_key(|p| p.entity.0);
    pickups
}
