//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player and enemy entities with their component bundles.

use glam::DVec2;
use hecs::{Entity, EntityBuilder, World};

use slashfall_core::components::*;
use slashfall_core::config::{EnemyConfig, GameConfig};
use slashfall_core::damage::DamageSource;
use slashfall_core::enums::{Layer, SpawnVariant};
use slashfall_core::health::Health;
use slashfall_core::progression::{LevelCurve, Progression};
use slashfall_core::types::{LayerMask, Position, Velocity};

use crate::entity_id;

/// Set up the initial run world. Returns the player entity.
pub fn setup_run(world: &mut World, config: &GameConfig) -> Entity {
    world.clear();
    spawn_player(world, config, DVec2::ZERO)
}

/// Spawn the player with a melee weapon, magnet and progression ledger.
///
/// The player's ledger is kept on death so the run can report final stats.
pub fn spawn_player(world: &mut World, config: &GameConfig, position: DVec2) -> Entity {
    let player = &config.player;
    let progression = Progression::new(LevelCurve::new(
        config.progression.thresholds.clone(),
        config.progression.increment,
    ))
    .with_iteration_guard(config.progression.iteration_guard);

    let mut builder = EntityBuilder::new();
    builder
        .add(Player)
        .add(Position(position))
        .add(Velocity::default())
        .add(Layer::Player)
        .add(Collider {
            radius: player.collider_radius,
        })
        .add(Health::new(player.max_health).with_destroy_on_death(false))
        .add(MoveInput::default())
        .add(MoveSpeed(player.move_speed))
        .add(MeleeWeapon::from_config(&config.melee))
        .add(Magnet {
            radius: player.magnet_radius,
            pull_speed: player.magnet_pull_speed,
        })
        .add(progression);
    world.spawn(builder.build())
}

/// Spawn one enemy: health ledger, contact damage source aimed at the
/// player layer, and an experience drop. Movement depends on the variant:
/// radial enemies seek `target`, formation enemies drift down and die
/// off-screen.
pub fn spawn_enemy(
    world: &mut World,
    config: &EnemyConfig,
    variant: SpawnVariant,
    position: DVec2,
    target: Option<Entity>,
) -> Entity {
    let contact = DamageSource::new(config.contact_damage, config.contact_cooldown_secs)
        .with_target_layers(LayerMask::of(&[Layer::Player]));

    let mut builder = EntityBuilder::new();
    builder
        .add(Enemy)
        .add(Position(position))
        .add(Velocity::default())
        .add(Layer::Enemy)
        .add(Collider {
            radius: config.collider_radius,
        })
        .add(Health::new(config.max_health))
        .add(contact)
        .add(ExpDrop {
            amount: config.exp_drop,
        });

    match variant {
        SpawnVariant::Radial => {
            if let Some(target) = target {
                builder.add(Seek {
                    target: entity_id(target),
                    speed: config.seek_speed,
                });
            }
        }
        SpawnVariant::Formation => {
            builder
                .add(Drift {
                    velocity: DVec2::new(0.0, -config.drift_speed),
                })
                .add(BoundsKiller::new(config.bounds_margin));
        }
    }

    world.spawn(builder.build())
}
