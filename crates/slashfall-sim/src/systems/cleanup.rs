//! Cleanup system: expires timed entities, removes bodies that left the
//! camera view, and flushes the despawn buffer.

use hecs::{Entity, World};
use log::debug;

use slashfall_core::components::{BoundsKiller, Lifetime};
use slashfall_core::types::{Camera, Position};

/// Queue entities whose lifetime ran out or that left the view by more than
/// their margin after having been inside it. Without a camera, bounds are
/// not checked.
pub fn run(world: &mut World, dt: f64, camera: Option<&Camera>, despawn_buffer: &mut Vec<Entity>) {
    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining_secs -= dt;
        if lifetime.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    if let Some(camera) = camera {
        for (entity, (pos, killer)) in world.query_mut::<(&Position, &mut BoundsKiller)>() {
            if !camera.is_outside(pos.0, 0.0) {
                killer.entered = true;
            } else if killer.entered && camera.is_outside(pos.0, killer.margin) {
                despawn_buffer.push(entity);
            }
        }
    }
}

/// Despawn everything queued this tick. Duplicates and already-removed
/// entities are harmless.
pub fn flush(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_ok() {
            debug!("despawned {entity:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_lifetime_expires() {
        let mut world = World::new();
        let e = world.spawn((Lifetime {
            remaining_secs: 0.5,
        },));
        let mut despawn = Vec::new();

        run(&mut world, 0.25, None, &mut despawn);
        assert!(despawn.is_empty());
        run(&mut world, 0.25, None, &mut despawn);
        assert_eq!(despawn, vec![e]);

        flush(&mut world, &mut despawn);
        assert!(!world.contains(e));
        assert!(despawn.is_empty());
    }

    #[test]
    fn test_bounds_killer_uses_margin() {
        let mut world = World::new();
        let camera = Camera::new(DVec2::ZERO, DVec2::new(5.0, 9.0));
        let armed = BoundsKiller {
            margin: 1.0,
            entered: true,
        };
        let inside_margin = world.spawn((Position::new(0.0, -9.5), armed));
        let beyond = world.spawn((Position::new(0.0, -10.5), armed));
        let unmanaged = world.spawn((Position::new(0.0, -50.0),));
        let mut despawn = Vec::new();

        run(&mut world, 0.1, Some(&camera), &mut despawn);
        assert_eq!(despawn, vec![beyond]);

        flush(&mut world, &mut despawn);
        assert!(world.contains(inside_margin));
        assert!(world.contains(unmanaged));
    }

    #[test]
    fn test_bounds_killer_arms_once_inside_view() {
        let mut world = World::new();
        let camera = Camera::new(DVec2::ZERO, DVec2::new(5.0, 9.0));
        // Spawned well above the view, like a formation enemy.
        let e = world.spawn((Position::new(0.0, 17.0), BoundsKiller::new(1.0)));
        let mut despawn = Vec::new();

        run(&mut world, 0.1, Some(&camera), &mut despawn);
        assert!(despawn.is_empty(), "never inside, not culled");
        assert!(!world.get::<&BoundsKiller>(e).unwrap().entered);

        world.get::<&mut Position>(e).unwrap().0 = DVec2::new(0.0, 9.0);
        run(&mut world, 0.1, Some(&camera), &mut despawn);
        assert!(despawn.is_empty());
        assert!(world.get::<&BoundsKiller>(e).unwrap().entered);

        world.get::<&mut Position>(e).unwrap().0 = DVec2::new(0.0, -10.5);
        run(&mut world, 0.1, Some(&camera), &mut despawn);
        assert_eq!(despawn, vec![e]);
    }

    #[test]
    fn test_flush_tolerates_duplicates() {
        let mut world = World::new();
        let e = world.spawn((Position::new(0.0, 0.0),));
        let mut despawn = vec![e, e];
        flush(&mut world, &mut despawn);
        assert_eq!(world.len(), 0);
    }
}
