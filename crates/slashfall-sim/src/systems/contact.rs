//! Contact damage: overlap dispatch between damage sources and health ledgers.
//!
//! Stands in for the engine's trigger callbacks. Every tick each overlapping
//! (source, target) pair whose target layer the source can affect gets a
//! `try_apply_to`; the source's own cooldown decides whether it lands.

use glam::DVec2;
use hecs::{Entity, World};

use slashfall_core::components::Collider;
use slashfall_core::damage::DamageSource;
use slashfall_core::enums::Layer;
use slashfall_core::events::GameEvent;
use slashfall_core::health::Health;
use slashfall_core::types::Position;

use crate::systems::health::{record_outcome, Death};

struct Body {
    entity: Entity,
    position: DVec2,
    radius: f64,
    layer: Layer,
}

/// Resolve contact damage for this tick. `now_secs` is the simulation clock.
pub fn run(
    world: &World,
    now_secs: f64,
    events: &mut Vec<GameEvent>,
    deaths: &mut Vec<Death>,
    despawn_buffer: &mut Vec<Entity>,
) {
    // A source that died earlier this tick (e.g. to a melee swing) deals
    // nothing, even though its removal is only resolved after this pass.
    let sources: Vec<Body> = world
        .query::<(
            &DamageSource,
            &Position,
            Option<&Collider>,
            Option<&Layer>,
            Option<&Health>,
        )>()
        .iter()
        .filter(|(_, (_, _, _, _, health))| !health.is_some_and(|h| h.is_dead()))
        .map(|(entity, (_, pos, collider, layer, _))| Body {
            entity,
            position: pos.0,
            radius: collider.map_or(0.0, |c| c.radius),
            layer: layer.copied().unwrap_or_default(),
        })
        .collect();

    let targets: Vec<Body> = world
        .query::<(&Health, &Position, Option<&Collider>, Option<&Layer>)>()
        .iter()
        .map(|(entity, (_, pos, collider, layer))| Body {
            entity,
            position: pos.0,
            radius: collider.map_or(0.0, |c| c.radius),
            layer: layer.copied().unwrap_or_default(),
        })
        .collect();

    for source in &sources {
        for target in &targets {
            if target.entity == source.entity
                || despawn_buffer.contains(&source.entity)
                || despawn_buffer.contains(&target.entity)
            {
                continue;
            }
            if source.position.distance(target.position) > source.radius + target.radius {
                continue;
            }
            try_hit(world, source, target, now_secs, events, deaths, despawn_buffer);
        }
    }
}

fn try_hit(
    world: &World,
    source: &Body,
    target: &Body,
    now_secs: f64,
    events: &mut Vec<GameEvent>,
    deaths: &mut Vec<Death>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let (report, applied, remaining) = {
        let Ok(mut src) = world.get::<&mut DamageSource>(source.entity) else {
            return;
        };
        if !src.can_affect_layer(target.layer) {
            return;
        }
        let mut health = world.get::<&mut Health>(target.entity).ok();
        let before = health.as_ref().map_or(0.0, |h| h.current());
        let Ok(report) = src.try_apply_to(health.as_deref_mut(), now_secs) else {
            return;
        };
        let after = health.as_ref().map_or(0.0, |h| h.current());
        (report, before - after, after)
    };

    record_outcome(
        world,
        target.entity,
        report.outcome,
        applied,
        remaining,
        events,
        deaths,
    );

    if report.destroy_source {
        despawn_buffer.push(source.entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashfall_core::types::LayerMask;

    fn spawn_player(world: &mut World, x: f64) -> Entity {
        world.spawn((
            Position::new(x, 0.0),
            Layer::Player,
            Collider { radius: 0.4 },
            Health::new(100.0).with_destroy_on_death(false),
        ))
    }

    fn spawn_enemy(world: &mut World, x: f64, cooldown: f64) -> Entity {
        world.spawn((
            Position::new(x, 0.0),
            Layer::Enemy,
            Collider { radius: 0.3 },
            Health::new(20.0),
            DamageSource::new(10.0, cooldown).with_target_layers(LayerMask::of(&[Layer::Player])),
        ))
    }

    fn health_of(world: &World, e: Entity) -> f64 {
        world.get::<&Health>(e).unwrap().current()
    }

    #[test]
    fn test_overlap_applies_once_per_cooldown() {
        let mut world = World::new();
        let player = spawn_player(&mut world, 0.0);
        let _enemy = spawn_enemy(&mut world, 0.5, 0.2);
        let (mut events, mut deaths, mut despawn) = (Vec::new(), Vec::new(), Vec::new());

        run(&world, 0.0, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, player), 90.0);

        run(&world, 0.1, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, player), 90.0, "still cooling down");

        run(&world, 0.2, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, player), 80.0);
    }

    #[test]
    fn test_layer_filter_prevents_friendly_fire() {
        let mut world = World::new();
        let a = spawn_enemy(&mut world, 0.0, 0.0);
        let b = spawn_enemy(&mut world, 0.2, 0.0);
        let (mut events, mut deaths, mut despawn) = (Vec::new(), Vec::new(), Vec::new());

        run(&world, 0.0, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, a), 20.0);
        assert_eq!(health_of(&world, b), 20.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_overlap_no_damage() {
        let mut world = World::new();
        let player = spawn_player(&mut world, 0.0);
        let _enemy = spawn_enemy(&mut world, 0.8, 0.0);
        let (mut events, mut deaths, mut despawn) = (Vec::new(), Vec::new(), Vec::new());

        run(&world, 0.0, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, player), 100.0);
    }

    #[test]
    fn test_destroy_on_hit_queues_source() {
        let mut world = World::new();
        let player = spawn_player(&mut world, 0.0);
        let bullet = world.spawn((
            Position::new(0.1, 0.0),
            Collider { radius: 0.1 },
            DamageSource::new(5.0, 0.0)
                .with_target_layers(LayerMask::of(&[Layer::Player]))
                .with_destroy_on_hit(true),
        ));
        let (mut events, mut deaths, mut despawn) = (Vec::new(), Vec::new(), Vec::new());

        run(&world, 0.0, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, player), 95.0);
        assert_eq!(despawn, vec![bullet]);

        run(&world, 1.0, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, player), 95.0, "queued source is spent");
    }

    #[test]
    fn test_dead_source_deals_no_contact_damage() {
        let mut world = World::new();
        let player = spawn_player(&mut world, 0.0);
        let enemy = spawn_enemy(&mut world, 0.5, 0.0);
        world.get::<&mut Health>(enemy).unwrap().take_damage(20.0);
        let (mut events, mut deaths, mut despawn) = (Vec::new(), Vec::new(), Vec::new());

        run(&world, 0.0, &mut events, &mut deaths, &mut despawn);
        assert_eq!(health_of(&world, player), 100.0);
        assert!(events.is_empty());
        assert!(deaths.is_empty());
    }
}
