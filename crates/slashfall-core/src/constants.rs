//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind [`crate::config::GameConfig`]; a loaded
//! config may override any of them.

// --- Clock ---

/// Nominal tick rate used by the harness (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest frame delta accepted by a single tick (seconds).
/// Longer hitches are clamped so timers cannot skip several intervals at once.
pub const MAX_FRAME_DT: f64 = 0.25;

/// Upper bound for the time-scale command.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Health / damage ---

/// Default ceiling for a freshly created Health ledger.
pub const DEFAULT_MAX_HEALTH: f64 = 100.0;

/// Smallest ceiling `Health::set_max` accepts.
pub const MIN_MAX_HEALTH: f64 = 1.0;

/// Default Damage Source amount.
pub const DEFAULT_DAMAGE_AMOUNT: f64 = 10.0;

/// Default Damage Source cooldown (seconds).
pub const DEFAULT_DAMAGE_COOLDOWN_SECS: f64 = 0.5;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;
pub const PLAYER_MOVE_SPEED: f64 = 5.0;
pub const PLAYER_COLLIDER_RADIUS: f64 = 0.4;

/// Radius inside which experience pickups start homing on the player.
pub const MAGNET_RADIUS: f64 = 2.5;
/// Homing speed applied to pickups caught by the magnet.
pub const MAGNET_PULL_SPEED: f64 = 7.5;
/// Distance at which a pickup is absorbed into the progression ledger.
pub const PICKUP_RADIUS: f64 = 0.5;
/// Floor for any pickup homing speed.
pub const PICKUP_MIN_MAGNET_SPEED: f64 = 0.5;

// --- Melee ---

pub const MELEE_SWING_INTERVAL_SECS: f64 = 0.8;
pub const MELEE_ARC_DEGREES: f64 = 90.0;
pub const MELEE_RANGE: f64 = 1.4;
pub const MELEE_FORWARD_OFFSET: f64 = 0.7;
pub const MELEE_DAMAGE: f64 = 12.0;
pub const MELEE_EXTRA_RANGE: f64 = 0.6;
pub const MELEE_EXTRA_ARC_DEGREES: f64 = 30.0;

pub const SLASH_COLOR: [f32; 4] = [1.0, 1.0, 0.2, 0.85];
pub const SLASH_THICKNESS: f64 = 0.22;
pub const SLASH_DURATION_SECS: f64 = 0.12;
pub const SLASH_VFX_COUNT: u32 = 2;
pub const SLASH_VFX_ANGLE_SPREAD_DEG: f64 = 25.0;
pub const SLASH_VFX_LENGTH_MULTIPLIER: f64 = 1.4;
pub const SLASH_VFX_THICKNESS_MULTIPLIER: f64 = 1.75;

/// Squared length below which an input vector counts as "no input".
pub const AIM_INPUT_EPSILON_SQ: f64 = 0.0001;
/// Squared speed below which velocity is not used as a facing direction.
pub const AIM_VELOCITY_EPSILON_SQ: f64 = 0.01;
/// Slack (degrees) added to the half-arc test so boundary hits survive rounding.
pub const ARC_TOLERANCE_DEG: f64 = 1e-6;

// --- Enemies ---

pub const ENEMY_MAX_HEALTH: f64 = 20.0;
pub const ENEMY_CONTACT_DAMAGE: f64 = 10.0;
pub const ENEMY_CONTACT_COOLDOWN_SECS: f64 = 0.2;
pub const ENEMY_COLLIDER_RADIUS: f64 = 0.3;
pub const ENEMY_SEEK_SPEED: f64 = 2.5;
pub const ENEMY_DRIFT_SPEED: f64 = 2.5;
pub const ENEMY_EXP_DROP: u32 = 1;
/// How far outside the camera a drifting enemy may travel before removal.
pub const ENEMY_BOUNDS_MARGIN: f64 = 1.0;

// --- Spawners ---

pub const RADIAL_SPAWN_INTERVAL_SECS: f64 = 1.25;
pub const RADIAL_MAX_ALIVE: u32 = 15;
pub const RADIAL_SPAWN_RADIUS: f64 = 15.0;
pub const RADIAL_BURST_COUNT: u32 = 1;

pub const FORMATION_SPAWN_INTERVAL_SECS: f64 = 1.5;
pub const FORMATION_MAX_ALIVE: u32 = 25;
pub const FORMATION_SPAWN_AREA_X: (f64, f64) = (-4.5, 4.5);
/// Distance above the camera's top edge at which formation enemies appear.
pub const FORMATION_SPAWN_Y_OFFSET: f64 = 8.0;
pub const FORMATION_BURST_COUNT: u32 = 1;

// --- Progression ---

/// Experience needed to leave levels 1..=7.
pub const LEVEL_THRESHOLDS: [u32; 7] = [5, 12, 22, 36, 52, 70, 90];
/// Per-level growth past the end of the threshold table.
pub const LEVEL_THRESHOLD_INCREMENT: u32 = 20;
/// Maximum level-ups processed by one `add_experience` call.
pub const LEVEL_UP_ITERATION_GUARD: u32 = 64;

// --- Camera ---

pub const CAMERA_HALF_WIDTH: f64 = 5.0;
pub const CAMERA_HALF_HEIGHT: f64 = 9.0;
