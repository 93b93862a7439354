//! Spawn controllers: timer- and population-cap-driven enemy creation.
//!
//! Two placement rules share one contract. Each tick the registry drops
//! entries that died or were removed, the timer counts down, and once it
//! has expired the controller spawns up to `burst_count` enemies while the
//! registry stays under `max_alive`.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use log::{debug, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use slashfall_core::config::{EnemyConfig, FormationSpawnerConfig, RadialSpawnerConfig};
use slashfall_core::enums::SpawnVariant;
use slashfall_core::events::GameEvent;
use slashfall_core::health::Health;
use slashfall_core::types::{Camera, Position};

use crate::entity_id;
use crate::world_setup;

/// Where a controller places new enemies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Uniformly random point on a circle around the target.
    Radial { radius: f64 },
    /// Uniformly random x in `area_x`, `y_offset` above the camera's top edge.
    Formation { area_x: (f64, f64), y_offset: f64 },
}

/// References a controller needs to place enemies. Either may be missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnAnchors {
    pub target: Option<Entity>,
    pub camera: Option<Camera>,
}

#[derive(Debug, Clone)]
pub struct SpawnController {
    placement: Placement,
    interval_secs: f64,
    max_alive: usize,
    burst_count: u32,
    timer_secs: f64,
    alive: Vec<Entity>,
    /// Set while the anchor is missing, so the warning fires once per gap.
    anchor_missing: bool,
}

impl SpawnController {
    pub fn new(placement: Placement, interval_secs: f64, max_alive: u32, burst_count: u32) -> Self {
        Self {
            placement,
            interval_secs: interval_secs.max(0.0),
            max_alive: max_alive as usize,
            burst_count,
            timer_secs: 0.0,
            alive: Vec::new(),
            anchor_missing: false,
        }
    }

    pub fn radial(config: &RadialSpawnerConfig) -> Self {
        Self::new(
            Placement::Radial {
                radius: config.radius,
            },
            config.interval_secs,
            config.max_alive,
            config.burst_count,
        )
    }

    pub fn formation(config: &FormationSpawnerConfig) -> Self {
        Self::new(
            Placement::Formation {
                area_x: config.area_x,
                y_offset: config.y_offset,
            },
            config.interval_secs,
            config.max_alive,
            config.burst_count,
        )
    }

    pub fn variant(&self) -> SpawnVariant {
        match self.placement {
            Placement::Radial { .. } => SpawnVariant::Radial,
            Placement::Formation { .. } => SpawnVariant::Formation,
        }
    }

    /// Registered entities, as of the last purge.
    pub fn alive(&self) -> &[Entity] {
        &self.alive
    }

    pub fn max_alive(&self) -> usize {
        self.max_alive
    }

    /// Advance the controller by `dt` seconds. Returns how many enemies
    /// were spawned.
    pub fn tick(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        dt: f64,
        anchors: SpawnAnchors,
        enemy: &EnemyConfig,
        events: &mut Vec<GameEvent>,
    ) -> usize {
        self.purge(world);

        let Some(origin) = self.origin(world, anchors) else {
            if !self.anchor_missing {
                warn!(
                    "{:?} spawner has no target or camera; skipping spawns",
                    self.variant()
                );
                self.anchor_missing = true;
            }
            return 0;
        };
        self.anchor_missing = false;

        self.timer_secs -= dt;
        if self.timer_secs > 0.0 || self.alive.len() >= self.max_alive {
            return 0;
        }

        let mut spawned = 0;
        for _ in 0..self.burst_count {
            if self.alive.len() >= self.max_alive {
                break;
            }
            let position = self.place(rng, origin);
            let entity = world_setup::spawn_enemy(world, enemy, self.variant(), position, anchors.target);
            debug!("spawned {:?} enemy {entity:?} at {position}", self.variant());
            events.push(GameEvent::Spawned {
                entity: entity_id(entity),
                variant: self.variant(),
                position,
            });
            self.alive.push(entity);
            spawned += 1;
        }
        self.timer_secs = self.interval_secs;
        spawned
    }

    /// Drop registry entries that were removed or whose ledger is dead.
    fn purge(&mut self, world: &World) {
        self.alive.retain(|&e| {
            world.contains(e)
                && world
                    .get::<&Health>(e)
                    .map_or(true, |health| !health.is_dead())
        });
    }

    /// Reference point for placement: target position (radial) or camera
    /// top edge (formation).
    fn origin(&self, world: &World, anchors: SpawnAnchors) -> Option<DVec2> {
        match self.placement {
            Placement::Radial { .. } => {
                let target = anchors.target?;
                world.get::<&Position>(target).ok().map(|p| p.0)
            }
            Placement::Formation { .. } => anchors.camera.map(|c| DVec2::new(c.center.x, c.top())),
        }
    }

    fn place(&self, rng: &mut ChaCha8Rng, origin: DVec2) -> DVec2 {
        match self.placement {
            Placement::Radial { radius } => {
                let angle = rng.gen_range(0.0..TAU);
                origin + DVec2::from_angle(angle) * radius
            }
            Placement::Formation { area_x, y_offset } => {
                let (min_x, max_x) = area_x;
                let x = if min_x < max_x {
                    rng.gen_range(min_x..=max_x)
                } else {
                    min_x
                };
                DVec2::new(x, origin.y + y_offset)
            }
        }
    }
}
