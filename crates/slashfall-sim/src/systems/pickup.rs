//! Experience pickups: magnet pull, collection, and progression updates.

use glam::DVec2;
use hecs::{Entity, World};
use log::info;

use slashfall_core::components::{ExpPickup, Magnet};
use slashfall_core::constants::PICKUP_MIN_MAGNET_SPEED;
use slashfall_core::events::GameEvent;
use slashfall_core::progression::Progression;
use slashfall_core::types::Position;

use crate::{entity_from_id, entity_id};

/// Pull, move and collect pickups for one tick. Collected pickups are
/// queued on `despawn_buffer`.
pub fn run(
    world: &mut World,
    dt: f64,
    pickup_radius: f64,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    attract(world);
    home(world, dt);
    collect(world, pickup_radius, events, despawn_buffer);
}

/// Every pickup inside a magnet's radius locks onto that magnet.
fn attract(world: &mut World) {
    let magnets: Vec<(Entity, DVec2, Magnet)> = world
        .query::<(&Magnet, &Position)>()
        .iter()
        .map(|(e, (magnet, pos))| (e, pos.0, *magnet))
        .collect();

    for (_entity, (pickup, pos)) in world.query_mut::<(&mut ExpPickup, &Position)>() {
        for (owner, center, magnet) in &magnets {
            if pos.0.distance(*center) <= magnet.radius {
                pickup.magnet_target = Some(entity_id(*owner));
                pickup.magnet_speed = magnet.pull_speed.max(PICKUP_MIN_MAGNET_SPEED);
            }
        }
    }
}

/// Move attracted pickups toward their magnet without overshooting.
fn home(world: &mut World, dt: f64) {
    let moves: Vec<(Entity, Option<DVec2>, f64)> = world
        .query::<(&ExpPickup, &Position)>()
        .iter()
        .filter_map(|(e, (pickup, _))| {
            let target = pickup.magnet_target?;
            let goal = entity_from_id(target).and_then(|t| world.get::<&Position>(t).ok().map(|p| p.0));
            Some((e, goal, pickup.magnet_speed))
        })
        .collect();

    for (entity, goal, speed) in moves {
        let Some(goal) = goal else {
            // Magnet owner is gone; stay put until another magnet claims it.
            if let Ok(mut pickup) = world.get::<&mut ExpPickup>(entity) {
                pickup.magnet_target = None;
            }
            continue;
        };
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            let to = goal - pos.0;
            let step = speed * dt;
            pos.0 = if to.length() <= step {
                goal
            } else {
                pos.0 + to.normalize() * step
            };
        }
    }
}

/// Pickups within `pickup_radius` of a progression holder are absorbed.
fn collect(
    world: &mut World,
    pickup_radius: f64,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let collectors: Vec<(Entity, DVec2)> = world
        .query::<(&Progression, &Position)>()
        .iter()
        .map(|(e, (_, pos))| (e, pos.0))
        .collect();
    let pickups: Vec<(Entity, DVec2, u32)> = world
        .query::<(&ExpPickup, &Position)>()
        .iter()
        .map(|(e, (pickup, pos))| (e, pos.0, pickup.amount))
        .collect();

    for (pickup, pos, amount) in pickups {
        if despawn_buffer.contains(&pickup) {
            continue;
        }
        let Some(&(collector, _)) = collectors
            .iter()
            .find(|(_, center)| center.distance(pos) <= pickup_radius)
        else {
            continue;
        };
        events.push(GameEvent::PickupCollected {
            entity: entity_id(pickup),
            amount,
        });
        grant_experience(world, collector, amount, events);
        despawn_buffer.push(pickup);
    }
}

/// Feed `amount` into `entity`'s progression ledger and announce the
/// result. Returns the levels reached.
pub fn grant_experience(
    world: &World,
    entity: Entity,
    amount: u32,
    events: &mut Vec<GameEvent>,
) -> Vec<u32> {
    if amount == 0 {
        return Vec::new();
    }
    let Ok(mut progression) = world.get::<&mut Progression>(entity) else {
        return Vec::new();
    };

    let level_ups = progression.add_experience(amount);
    events.push(GameEvent::ExpGained { amount });
    for &level in &level_ups {
        info!("level up: {level} ({} exp carried)", progression.exp());
        events.push(GameEvent::LevelUp { level });
    }
    level_ups
}
