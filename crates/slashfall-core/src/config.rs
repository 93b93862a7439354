//! Tunable game configuration.
//!
//! Every field has a default taken from [`crate::constants`], so a JSON file
//! only needs to name what it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::SlashVfxParams;
use crate::constants::*;
use crate::enums::Layer;
use crate::types::LayerMask;

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// All gameplay tuning for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub melee: MeleeConfig,
    pub enemy: EnemyConfig,
    pub radial_spawner: RadialSpawnerConfig,
    pub formation_spawner: FormationSpawnerConfig,
    pub progression: ProgressionConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f64,
    pub move_speed: f64,
    pub collider_radius: f64,
    pub magnet_radius: f64,
    pub magnet_pull_speed: f64,
    pub pickup_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    pub swing_interval_secs: f64,
    pub arc_degrees: f64,
    pub range: f64,
    pub forward_offset: f64,
    pub damage: f64,
    pub hit_layers: LayerMask,
    pub extra_range: f64,
    pub extra_arc_degrees: f64,
    pub swing_orthogonal: bool,
    pub snap_to_cardinal: bool,
    pub vfx: SlashVfxParams,
}

/// Stats every spawned enemy starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: f64,
    pub contact_damage: f64,
    pub contact_cooldown_secs: f64,
    pub collider_radius: f64,
    pub seek_speed: f64,
    pub drift_speed: f64,
    pub exp_drop: u32,
    pub bounds_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialSpawnerConfig {
    pub enabled: bool,
    pub interval_secs: f64,
    pub max_alive: u32,
    pub burst_count: u32,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationSpawnerConfig {
    pub enabled: bool,
    pub interval_secs: f64,
    pub max_alive: u32,
    pub burst_count: u32,
    /// Inclusive x band (min, max) for spawn positions.
    pub area_x: (f64, f64),
    pub y_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub thresholds: Vec<u32>,
    pub increment: u32,
    pub iteration_guard: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub half_width: f64,
    pub half_height: f64,
    /// Upward auto-scroll speed; 0 disables scrolling.
    pub scroll_speed: f64,
    /// Re-center on the player each tick.
    pub follow_player: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            move_speed: PLAYER_MOVE_SPEED,
            collider_radius: PLAYER_COLLIDER_RADIUS,
            magnet_radius: MAGNET_RADIUS,
            magnet_pull_speed: MAGNET_PULL_SPEED,
            pickup_radius: PICKUP_RADIUS,
        }
    }
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            swing_interval_secs: MELEE_SWING_INTERVAL_SECS,
            arc_degrees: MELEE_ARC_DEGREES,
            range: MELEE_RANGE,
            forward_offset: MELEE_FORWARD_OFFSET,
            damage: MELEE_DAMAGE,
            hit_layers: LayerMask::of(&[Layer::Enemy, Layer::Default]),
            extra_range: MELEE_EXTRA_RANGE,
            extra_arc_degrees: MELEE_EXTRA_ARC_DEGREES,
            swing_orthogonal: true,
            snap_to_cardinal: true,
            vfx: SlashVfxParams::default(),
        }
    }
}

impl Default for SlashVfxParams {
    fn default() -> Self {
        Self {
            color: SLASH_COLOR,
            thickness: SLASH_THICKNESS,
            duration_secs: SLASH_DURATION_SECS,
            count: SLASH_VFX_COUNT,
            angle_spread_deg: SLASH_VFX_ANGLE_SPREAD_DEG,
            length_multiplier: SLASH_VFX_LENGTH_MULTIPLIER,
            thickness_multiplier: SLASH_VFX_THICKNESS_MULTIPLIER,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: ENEMY_MAX_HEALTH,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            contact_cooldown_secs: ENEMY_CONTACT_COOLDOWN_SECS,
            collider_radius: ENEMY_COLLIDER_RADIUS,
            seek_speed: ENEMY_SEEK_SPEED,
            drift_speed: ENEMY_DRIFT_SPEED,
            exp_drop: ENEMY_EXP_DROP,
            bounds_margin: ENEMY_BOUNDS_MARGIN,
        }
    }
}

impl Default for RadialSpawnerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: RADIAL_SPAWN_INTERVAL_SECS,
            max_alive: RADIAL_MAX_ALIVE,
            burst_count: RADIAL_BURST_COUNT,
            radius: RADIAL_SPAWN_RADIUS,
        }
    }
}

impl Default for FormationSpawnerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: FORMATION_SPAWN_INTERVAL_SECS,
            max_alive: FORMATION_MAX_ALIVE,
            burst_count: FORMATION_BURST_COUNT,
            area_x: FORMATION_SPAWN_AREA_X,
            y_offset: FORMATION_SPAWN_Y_OFFSET,
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            thresholds: LEVEL_THRESHOLDS.to_vec(),
            increment: LEVEL_THRESHOLD_INCREMENT,
            iteration_guard: LEVEL_UP_ITERATION_GUARD,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            half_width: CAMERA_HALF_WIDTH,
            half_height: CAMERA_HALF_HEIGHT,
            scroll_speed: 0.0,
            follow_player: true,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot interpret sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player.max_health", self.player.max_health)?;
        non_negative("player.move_speed", self.player.move_speed)?;
        non_negative("player.collider_radius", self.player.collider_radius)?;
        non_negative("player.magnet_radius", self.player.magnet_radius)?;
        non_negative("player.pickup_radius", self.player.pickup_radius)?;

        non_negative("melee.swing_interval_secs", self.melee.swing_interval_secs)?;
        non_negative("melee.range", self.melee.range)?;
        non_negative("melee.damage", self.melee.damage)?;
        if !(0.0..=360.0).contains(&self.melee.arc_degrees) {
            return Err(invalid(
                "melee.arc_degrees",
                format!("{} is outside 0..=360", self.melee.arc_degrees),
            ));
        }

        positive("enemy.max_health", self.enemy.max_health)?;
        non_negative("enemy.contact_damage", self.enemy.contact_damage)?;
        non_negative("enemy.contact_cooldown_secs", self.enemy.contact_cooldown_secs)?;
        non_negative("enemy.collider_radius", self.enemy.collider_radius)?;
        non_negative("enemy.bounds_margin", self.enemy.bounds_margin)?;

        non_negative("radial_spawner.interval_secs", self.radial_spawner.interval_secs)?;
        non_negative("radial_spawner.radius", self.radial_spawner.radius)?;
        non_negative(
            "formation_spawner.interval_secs",
            self.formation_spawner.interval_secs,
        )?;
        let (min_x, max_x) = self.formation_spawner.area_x;
        if !(min_x <= max_x) {
            return Err(invalid(
                "formation_spawner.area_x",
                format!("min {min_x} is greater than max {max_x}"),
            ));
        }

        positive("camera.half_width", self.camera.half_width)?;
        positive("camera.half_height", self.camera.half_height)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be >= 0")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be > 0")))
    }
}
