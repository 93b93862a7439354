use glam::DVec2;

use crate::commands::PlayerCommand;
use crate::config::{ConfigError, GameConfig};
use crate::constants::*;
use crate::enums::*;
use crate::events::GameEvent;
use crate::state::GameStateSnapshot;
use crate::types::{Camera, EntityId, LayerMask, SimTime};

#[test]
fn test_layer_mask_bits() {
    let mask = LayerMask::of(&[Layer::Enemy, Layer::Default]);
    assert!(mask.contains(Layer::Enemy));
    assert!(mask.contains(Layer::Default));
    assert!(!mask.contains(Layer::Player));
    assert_eq!(mask.0, (1 << 7) | 1);

    let both = mask.union(LayerMask::of(&[Layer::Player]));
    assert!(both.contains(Layer::Player));
    assert!(LayerMask::NONE.is_empty());
}

#[test]
fn test_camera_bounds() {
    let cam = Camera::new(DVec2::new(0.0, 10.0), DVec2::new(5.0, 9.0));
    assert_eq!(cam.top(), 19.0);
    assert!(!cam.is_outside(DVec2::new(5.5, 10.0), 1.0));
    assert!(cam.is_outside(DVec2::new(6.5, 10.0), 1.0));
    assert!(cam.is_outside(DVec2::new(0.0, -0.5), 0.0));
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    t.advance(0.25);
    t.advance(0.25);
    assert_eq!(t.tick, 2);
    assert!((t.elapsed_secs - 0.5).abs() < 1e-12);
}

#[test]
fn test_default_config_matches_constants() {
    let config = GameConfig::default();
    assert_eq!(config.melee.swing_interval_secs, MELEE_SWING_INTERVAL_SECS);
    assert_eq!(config.enemy.max_health, ENEMY_MAX_HEALTH);
    assert_eq!(config.progression.thresholds, LEVEL_THRESHOLDS.to_vec());
    assert!(config.radial_spawner.enabled);
    assert!(!config.formation_spawner.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_config_keeps_defaults() {
    let json = r#"{ "melee": { "damage": 30.0 }, "formation_spawner": { "enabled": true } }"#;
    let config = GameConfig::from_json_str(json).unwrap();
    assert_eq!(config.melee.damage, 30.0);
    assert_eq!(config.melee.range, MELEE_RANGE);
    assert!(config.formation_spawner.enabled);
    assert_eq!(config.formation_spawner.max_alive, FORMATION_MAX_ALIVE);
}

#[test]
fn test_invalid_config_rejected() {
    let json = r#"{ "enemy": { "max_health": 0.0 } }"#;
    match GameConfig::from_json_str(json) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "enemy.max_health"),
        other => panic!("expected Invalid, got {other:?}"),
    }

    let json = r#"{ "formation_spawner": { "area_x": [3.0, -3.0] } }"#;
    assert!(matches!(
        GameConfig::from_json_str(json),
        Err(ConfigError::Invalid {
            field: "formation_spawner.area_x",
            ..
        })
    ));

    assert!(matches!(
        GameConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let path = std::env::temp_dir().join("slashfall_missing_config_9f2c.json");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(
        GameConfig::from_json_file(&path),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_events_are_tagged() {
    let event = GameEvent::LevelUp { level: 3 };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""type":"LevelUp""#));

    let died = GameEvent::Died {
        entity: EntityId(7),
        layer: Layer::Enemy,
        position: DVec2::new(1.0, 2.0),
    };
    let back: GameEvent = serde_json::from_str(&serde_json::to_string(&died).unwrap()).unwrap();
    assert_eq!(back, died);
}

#[test]
fn test_command_parse_from_host_json() {
    let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"SetMoveInput","x":0.0,"y":1.0}"#).unwrap();
    assert!(matches!(cmd, PlayerCommand::SetMoveInput { x, y } if x == 0.0 && y == 1.0));
}

#[test]
fn test_default_snapshot_serializes() {
    let snapshot = GameStateSnapshot::default();
    assert_eq!(snapshot.phase, GamePhase::Idle);
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert!(back.player.is_none());
    assert!(back.events.is_empty());
}
