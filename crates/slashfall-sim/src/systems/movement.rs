//! Kinematic integration system.
//!
//! Steers velocities (player input, seek, drift), then updates Position
//! from Velocity: position += velocity * dt. Also moves the camera.

use glam::DVec2;
use hecs::{Entity, World};

use slashfall_core::components::{Drift, MoveInput, MoveSpeed, Seek};
use slashfall_core::config::CameraConfig;
use slashfall_core::types::{Camera, Position, Velocity};

use crate::entity_from_id;

/// Steer and integrate every moving entity.
pub fn run(world: &mut World, dt: f64) {
    steer_input(world);
    steer_seek(world);
    steer_drift(world);

    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}

/// Input-driven bodies move at constant speed along the normalized input.
fn steer_input(world: &mut World) {
    for (_entity, (input, speed, vel)) in
        world.query_mut::<(&MoveInput, &MoveSpeed, &mut Velocity)>()
    {
        vel.0 = input.direction.normalize_or_zero() * speed.0;
    }
}

/// Seekers head straight for their target; they stop if it is gone.
fn steer_seek(world: &mut World) {
    let headings: Vec<(Entity, DVec2)> = world
        .query::<(&Seek, &Position)>()
        .iter()
        .map(|(entity, (seek, pos))| {
            let target = entity_from_id(seek.target)
                .and_then(|t| world.get::<&Position>(t).ok().map(|p| p.0));
            let heading = target.map_or(DVec2::ZERO, |t| (t - pos.0).normalize_or_zero());
            (entity, heading * seek.speed)
        })
        .collect();

    for (entity, velocity) in headings {
        if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
            vel.0 = velocity;
        }
    }
}

fn steer_drift(world: &mut World) {
    for (_entity, (drift, vel)) in world.query_mut::<(&Drift, &mut Velocity)>() {
        vel.0 = drift.velocity;
    }
}

/// Move the camera: follow `focus` when configured, otherwise auto-scroll
/// upward at `scroll_speed`.
pub fn update_camera(camera: &mut Camera, config: &CameraConfig, focus: Option<DVec2>, dt: f64) {
    match focus {
        Some(center) if config.follow_player => camera.center = center,
        _ => camera.center.y += config.scroll_speed * dt,
    }
}
