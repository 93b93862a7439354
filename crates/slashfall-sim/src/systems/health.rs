//! Damage application and death resolution.
//!
//! Every health change in the simulation goes through [`apply_damage`] or
//! [`record_outcome`], so `Damaged`/`Died` events are emitted in one place.
//! Death follow-ups (experience drop, removal) are queued as [`Death`]s and
//! resolved once per tick by [`resolve_deaths`].

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;

use slashfall_core::components::{ExpDrop, ExpPickup};
use slashfall_core::constants::PICKUP_MIN_MAGNET_SPEED;
use slashfall_core::enums::Layer;
use slashfall_core::events::GameEvent;
use slashfall_core::health::{DamageOutcome, Health};
use slashfall_core::types::Position;

use crate::entity_id;

/// A death reported this tick, waiting for its follow-ups.
#[derive(Debug, Clone, Copy)]
pub struct Death {
    pub entity: Entity,
    pub layer: Layer,
    pub position: DVec2,
    /// Remove the entity (`Health::destroy_on_death`).
    pub destroy: bool,
    pub exp_drop: Option<u32>,
}

/// What [`resolve_deaths`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeathSummary {
    pub enemies_killed: u32,
    pub player_died: bool,
}

/// Apply `amount` directly to `target`'s health ledger.
///
/// Targets without a ledger are ignored.
pub fn apply_damage(
    world: &World,
    target: Entity,
    amount: f64,
    events: &mut Vec<GameEvent>,
    deaths: &mut Vec<Death>,
) -> DamageOutcome {
    let (outcome, before, after) = {
        let mut health = match world.get::<&mut Health>(target) {
            Ok(h) => h,
            Err(_) => return DamageOutcome::Ignored,
        };
        let before = health.current();
        let outcome = health.take_damage(amount);
        (outcome, before, health.current())
    };
    record_outcome(world, target, outcome, before - after, after, events, deaths);
    outcome
}

/// Emit events for a ledger change that already happened and queue the
/// death follow-ups when the ledger reported its death.
pub fn record_outcome(
    world: &World,
    target: Entity,
    outcome: DamageOutcome,
    applied: f64,
    remaining: f64,
    events: &mut Vec<GameEvent>,
    deaths: &mut Vec<Death>,
) {
    if outcome == DamageOutcome::Ignored {
        return;
    }

    events.push(GameEvent::Damaged {
        entity: entity_id(target),
        amount: applied,
        remaining,
    });

    if outcome != DamageOutcome::Killed {
        return;
    }

    let layer = world.get::<&Layer>(target).map(|l| *l).unwrap_or_default();
    let position = world
        .get::<&Position>(target)
        .map(|p| p.0)
        .unwrap_or_default();
    let destroy = world
        .get::<&Health>(target)
        .map(|h| h.destroy_on_death())
        .unwrap_or(true);
    let exp_drop = world.get::<&ExpDrop>(target).ok().map(|d| d.amount);

    debug!("entity {target:?} ({layer:?}) died at {position}");
    events.push(GameEvent::Died {
        entity: entity_id(target),
        layer,
        position,
    });
    deaths.push(Death {
        entity: target,
        layer,
        position,
        destroy,
        exp_drop,
    });
}

/// Run death follow-ups: drop experience pickups and queue removals.
pub fn resolve_deaths(
    world: &mut World,
    deaths: &mut Vec<Death>,
    despawn_buffer: &mut Vec<Entity>,
) -> DeathSummary {
    let mut summary = DeathSummary::default();

    for death in deaths.drain(..) {
        match death.layer {
            Layer::Player => summary.player_died = true,
            Layer::Enemy => summary.enemies_killed += 1,
            _ => {}
        }

        if let Some(amount) = death.exp_drop.filter(|&a| a > 0) {
            spawn_exp_pickup(world, death.position, amount);
        }

        if death.destroy {
            despawn_buffer.push(death.entity);
        }
    }

    summary
}

/// Place an experience pickup in the world.
pub fn spawn_exp_pickup(world: &mut World, position: DVec2, amount: u32) -> Entity {
    world.spawn((
        Position(position),
        Layer::Pickup,
        ExpPickup {
            amount,
            magnet_target: None,
            magnet_speed: PICKUP_MIN_MAGNET_SPEED,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_target(world: &mut World, max: f64, drop: Option<u32>) -> Entity {
        let e = world.spawn((Position::new(2.0, 3.0), Layer::Enemy, Health::new(max)));
        if let Some(amount) = drop {
            world.insert_one(e, ExpDrop { amount }).unwrap();
        }
        e
    }

    #[test]
    fn test_damage_then_death_events() {
        let mut world = World::new();
        let target = spawn_target(&mut world, 30.0, Some(1));
        let mut events = Vec::new();
        let mut deaths = Vec::new();

        apply_damage(&world, target, 12.0, &mut events, &mut deaths);
        assert!(deaths.is_empty());
        assert!(matches!(
            events[0],
            GameEvent::Damaged { amount, remaining, .. } if amount == 12.0 && remaining == 18.0
        ));

        let outcome = apply_damage(&world, target, 50.0, &mut events, &mut deaths);
        assert_eq!(outcome, DamageOutcome::Killed);
        assert_eq!(deaths.len(), 1);
        assert!(matches!(
            events[1],
            GameEvent::Damaged { amount, remaining, .. } if amount == 18.0 && remaining == 0.0
        ));
        assert!(matches!(events[2], GameEvent::Died { layer: Layer::Enemy, .. }));

        let outcome = apply_damage(&world, target, 5.0, &mut events, &mut deaths);
        assert_eq!(outcome, DamageOutcome::Ignored);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_missing_ledger_ignored() {
        let mut world = World::new();
        let e = world.spawn((Position::new(0.0, 0.0),));
        let mut events = Vec::new();
        let mut deaths = Vec::new();
        assert_eq!(
            apply_damage(&world, e, 10.0, &mut events, &mut deaths),
            DamageOutcome::Ignored
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_resolve_deaths_drops_exp_and_despawns() {
        let mut world = World::new();
        let target = spawn_target(&mut world, 5.0, Some(3));
        let mut events = Vec::new();
        let mut deaths = Vec::new();
        let mut despawn = Vec::new();

        apply_damage(&world, target, 5.0, &mut events, &mut deaths);
        let summary = resolve_deaths(&mut world, &mut deaths, &mut despawn);

        assert_eq!(summary.enemies_killed, 1);
        assert!(!summary.player_died);
        assert_eq!(despawn, vec![target]);

        let mut q = world.query::<(&ExpPickup, &Position)>();
        let pickups: Vec<_> = q.iter().map(|(_, (p, pos))| (p.amount, pos.0)).collect();
        assert_eq!(pickups, vec![(3, DVec2::new(2.0, 3.0))]);
    }

    #[test]
    fn test_keep_on_death_not_despawned() {
        let mut world = World::new();
        let player = world.spawn((
            Position::new(0.0, 0.0),
            Layer::Player,
            Health::new(10.0).with_destroy_on_death(false),
        ));
        let mut events = Vec::new();
        let mut deaths = Vec::new();
        let mut despawn = Vec::new();

        apply_damage(&world, player, 10.0, &mut events, &mut deaths);
        let summary = resolve_deaths(&mut world, &mut deaths, &mut despawn);
        assert!(summary.player_died);
        assert!(despawn.is_empty());
    }
}
