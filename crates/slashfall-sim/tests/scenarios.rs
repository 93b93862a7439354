//! End-to-end combat and progression scenarios across the systems.

use glam::DVec2;
use hecs::World;

use slashfall_core::components::{Collider, MeleeWeapon};
use slashfall_core::config::MeleeConfig;
use slashfall_core::damage::{ApplyRejected, DamageSource};
use slashfall_core::enums::Layer;
use slashfall_core::events::GameEvent;
use slashfall_core::health::Health;
use slashfall_core::progression::{LevelCurve, Progression};
use slashfall_core::types::{LayerMask, Position};
use slashfall_sim::systems::{contact, health, melee, pickup};

fn forward_sword() -> MeleeWeapon {
    MeleeWeapon::from_config(&MeleeConfig {
        damage: 12.0,
        arc_degrees: 90.0,
        range: 1.5,
        forward_offset: 0.0,
        extra_range: 0.0,
        extra_arc_degrees: 0.0,
        swing_orthogonal: false,
        snap_to_cardinal: false,
        hit_layers: LayerMask::of(&[Layer::Enemy]),
        ..MeleeConfig::default()
    })
}

#[test]
fn melee_then_contact_kills_once_and_cooldown_blocks_repeat() {
    let mut world = World::new();
    world.spawn((Position::new(0.0, 0.0), Layer::Player, forward_sword()));
    let target = world.spawn((
        Position::new(1.0, 0.0),
        Layer::Enemy,
        Collider { radius: 0.3 },
        Health::new(30.0),
    ));
    let hazard = world.spawn((
        Position::new(1.0, 0.0),
        Collider { radius: 0.3 },
        DamageSource::new(20.0, 0.5).with_target_layers(LayerMask::of(&[Layer::Enemy])),
    ));

    let mut events = Vec::new();
    let mut deaths = Vec::new();
    let mut despawn = Vec::new();

    melee::run(&mut world, 0.1, &mut events, &mut deaths);
    assert_eq!(world.get::<&Health>(target).unwrap().current(), 18.0);

    contact::run(&world, 1.0, &mut events, &mut deaths, &mut despawn);
    assert_eq!(world.get::<&Health>(target).unwrap().current(), 0.0);
    assert_eq!(deaths.len(), 1);

    contact::run(&world, 1.1, &mut events, &mut deaths, &mut despawn);
    assert_eq!(world.get::<&Health>(target).unwrap().current(), 0.0);
    assert_eq!(deaths.len(), 1);

    let died = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Died { .. }))
        .count();
    assert_eq!(died, 1, "death reported exactly once");

    // The hazard itself reports the cooldown against any target.
    let mut fresh = Health::new(30.0);
    let rejected = world
        .get::<&mut DamageSource>(hazard)
        .unwrap()
        .try_apply_to(Some(&mut fresh), 1.1);
    match rejected {
        Err(ApplyRejected::CoolingDown { remaining_secs }) => {
            assert!((remaining_secs - 0.4).abs() < 1e-9)
        }
        other => panic!("expected cooldown rejection, got {other:?}"),
    }
    assert_eq!(fresh.current(), 30.0);

    let summary = health::resolve_deaths(&mut world, &mut deaths, &mut despawn);
    assert_eq!(summary.enemies_killed, 1);
    assert_eq!(despawn, vec![target]);
}

#[test]
fn swing_boundary_is_inclusive() {
    let weapon = forward_sword();
    let swing = melee::plan_swing(&weapon, DVec2::ZERO, DVec2::X);
    let at = |deg: f64| DVec2::from_angle(deg.to_radians());
    assert!(swing.reaches(at(45.0), 0.0));
    assert!(!swing.reaches(at(46.0), 0.0));
}

#[test]
fn forty_exp_crosses_three_thresholds() {
    let mut progression = Progression::new(LevelCurve::new(vec![5, 12, 22], 20));
    assert_eq!(progression.add_experience(40), vec![2, 3, 4]);
    assert_eq!(progression.level(), 4);
    assert_eq!(progression.exp(), 1);

    let mut world = World::new();
    let holder = world.spawn((Progression::new(LevelCurve::new(vec![5, 12, 22], 20)),));
    let mut events = Vec::new();
    pickup::grant_experience(&world, holder, 40, &mut events);
    let levels: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::LevelUp { level } => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![2, 3, 4]);
}

#[test]
fn dead_ledger_stays_dead_until_refilled() {
    let mut hp = Health::new(10.0);
    hp.take_damage(10.0);
    hp.heal(5.0);
    assert_eq!(hp.current(), 0.0);
    assert!(hp.is_dead());

    hp.set_max(20.0, true);
    assert_eq!(hp.current(), 20.0);
    assert!(!hp.is_dead());
}
