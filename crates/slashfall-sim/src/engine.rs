//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use slashfall_core::commands::PlayerCommand;
use slashfall_core::components::MoveInput;
use slashfall_core::config::GameConfig;
use slashfall_core::constants::{MAX_FRAME_DT, MAX_TIME_SCALE};
use slashfall_core::enums::GamePhase;
use slashfall_core::events::GameEvent;
use slashfall_core::progression::{Progression, ProgressionSnapshot};
use slashfall_core::state::GameStateSnapshot;
use slashfall_core::types::{Camera, Position, SimTime};

use crate::systems;
use crate::systems::health::Death;
use crate::systems::spawner::{SpawnAnchors, SpawnController};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    deaths: Vec<Death>,
    events: Vec<GameEvent>,
    player: Option<Entity>,
    camera: Option<Camera>,
    /// Camera was placed by `SetCamera`; skip follow/scroll on the next tick.
    camera_pinned: bool,
    spawners: Vec<SpawnController>,
    kills: u32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            config: config.game,
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: clamp_time_scale(config.time_scale),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            deaths: Vec::new(),
            events: Vec::new(),
            player: None,
            camera: None,
            camera_pinned: false,
            spawners: Vec::new(),
            kills: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by `dt_secs` of frame time and return the
    /// resulting snapshot. Frame time is clamped to `0..=MAX_FRAME_DT`
    /// (non-finite counts as zero) and then scaled by the time scale.
    pub fn tick(&mut self, dt_secs: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = sanitize_dt(dt_secs) * self.time_scale;
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.player,
            self.camera,
            self.kills,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for hosts that place their own entities.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player entity, once a run has started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    /// Enemies killed this run.
    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn spawners(&self) -> &[SpawnController] {
        &self.spawners
    }

    /// Player level and experience, for the persistence collaborator.
    pub fn progression(&self) -> Option<ProgressionSnapshot> {
        let player = self.player?;
        let progression = self.world.get::<&Progression>(player).ok()?;
        Some(progression.snapshot())
    }

    /// Load saved level and experience into the player's ledger. Returns
    /// false when there is no player to load into.
    pub fn restore_progression(&mut self, saved: ProgressionSnapshot) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        match self.world.get::<&mut Progression>(player) {
            Ok(mut progression) => {
                progression.restore(saved);
                true
            }
            Err(_) => false,
        }
    }

    /// Grant experience to the player outside of pickups. Events are
    /// delivered with the next snapshot.
    pub fn grant_experience(&mut self, amount: u32) -> Vec<u32> {
        match self.player {
            Some(player) => {
                systems::pickup::grant_experience(&self.world, player, amount, &mut self.events)
            }
            None => Vec::new(),
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                if matches!(self.phase, GamePhase::Idle | GamePhase::GameOver) {
                    self.start_run();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = clamp_time_scale(scale);
            }
            PlayerCommand::SetMoveInput { x, y } => {
                let direction = DVec2::new(x, y);
                let direction = if direction.is_finite() {
                    direction
                } else {
                    DVec2::ZERO
                };
                for (_entity, input) in self.world.query_mut::<&mut MoveInput>() {
                    input.direction = direction;
                }
            }
            PlayerCommand::SetCamera { center_x, center_y } => {
                let center = DVec2::new(center_x, center_y);
                if !center.is_finite() {
                    return;
                }
                let half_extents = self.half_extents();
                self.camera
                    .get_or_insert_with(|| Camera::new(center, half_extents))
                    .center = center;
                self.camera_pinned = true;
            }
        }
    }

    fn start_run(&mut self) {
        let player = world_setup::setup_run(&mut self.world, &self.config);
        let center = self
            .world
            .get::<&Position>(player)
            .map_or(DVec2::ZERO, |p| p.0);

        self.player = Some(player);
        self.camera = Some(Camera::new(center, self.half_extents()));
        self.camera_pinned = false;
        self.spawners = self.build_spawners();
        self.despawn_buffer.clear();
        self.deaths.clear();
        self.kills = 0;
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        info!("run started with {} spawner(s)", self.spawners.len());
    }

    fn build_spawners(&self) -> Vec<SpawnController> {
        let mut spawners = Vec::new();
        if self.config.radial_spawner.enabled {
            spawners.push(SpawnController::radial(&self.config.radial_spawner));
        }
        if self.config.formation_spawner.enabled {
            spawners.push(SpawnController::formation(&self.config.formation_spawner));
        }
        spawners
    }

    fn half_extents(&self) -> DVec2 {
        DVec2::new(self.config.camera.half_width, self.config.camera.half_height)
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs + dt;

        // 1. Movement integration
        systems::movement::run(&mut self.world, dt);
        // 2. Camera follow / auto-scroll
        if let Some(camera) = self.camera.as_mut() {
            if self.camera_pinned {
                self.camera_pinned = false;
            } else {
                let focus = self
                    .player
                    .and_then(|p| self.world.get::<&Position>(p).ok().map(|pos| pos.0));
                systems::movement::update_camera(camera, &self.config.camera, focus, dt);
            }
        }
        // 3. Spawn controllers
        let anchors = SpawnAnchors {
            target: self.player,
            camera: self.camera,
        };
        for spawner in &mut self.spawners {
            spawner.tick(
                &mut self.world,
                &mut self.rng,
                dt,
                anchors,
                &self.config.enemy,
                &mut self.events,
            );
        }
        // 4. Melee swings
        systems::melee::run(&mut self.world, dt, &mut self.events, &mut self.deaths);
        // 5. Contact damage
        systems::contact::run(
            &self.world,
            now,
            &mut self.events,
            &mut self.deaths,
            &mut self.despawn_buffer,
        );
        // 6. Deaths (exp drops, despawn-on-death, game over)
        let summary = systems::health::resolve_deaths(
            &mut self.world,
            &mut self.deaths,
            &mut self.despawn_buffer,
        );
        self.kills += summary.enemies_killed;
        if summary.player_died {
            info!(
                "player died at {:.2}s after {} kill(s)",
                now, self.kills
            );
            self.events.push(GameEvent::GameOver);
            self.phase = GamePhase::GameOver;
        }
        // 7. Lifetime / out-of-bounds cleanup
        systems::cleanup::run(
            &mut self.world,
            dt,
            self.camera.as_ref(),
            &mut self.despawn_buffer,
        );
        // 8. Magnet + pickup collection
        systems::pickup::run(
            &mut self.world,
            dt,
            self.config.player.pickup_radius,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 9. Despawn flush
        systems::cleanup::flush(&mut self.world, &mut self.despawn_buffer);
    }
}

fn sanitize_dt(dt_secs: f64) -> f64 {
    if dt_secs.is_finite() {
        dt_secs.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

fn clamp_time_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(0.0, MAX_TIME_SCALE)
    } else {
        1.0
    }
}
