//! sim-harness: run the slashfall simulation headless and print a summary.
//!
//! Usage:
//!   sim-harness --ticks 3600 --seed 7 --variant both
//!   sim-harness --config tuning.json --dt 0.0333

use std::path::PathBuf;
use std::process;

use log::{info, warn};
use serde::Serialize;

use slashfall_core::commands::PlayerCommand;
use slashfall_core::config::GameConfig;
use slashfall_core::constants::DT;
use slashfall_core::enums::GamePhase;
use slashfall_core::events::GameEvent;
use slashfall_sim::{SimConfig, SimulationEngine};

/// Radians per second the scripted input turns through.
const INPUT_TURN_RATE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Radial,
    Formation,
    Both,
}

struct Args {
    ticks: u64,
    seed: u64,
    dt: f64,
    config: Option<PathBuf>,
    variant: Option<Variant>,
}

#[derive(Debug, Serialize)]
struct Summary {
    ticks: u64,
    elapsed_secs: f64,
    phase: GamePhase,
    level: u32,
    exp: u32,
    kills: u32,
    health: f64,
    max_health: f64,
    enemies_alive: usize,
    enemies_spawned: u32,
    swings: u32,
    level_ups: u32,
}

fn main() {
    env_logger::init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut game = match &args.config {
        Some(path) => match GameConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    if let Some(variant) = args.variant {
        game.radial_spawner.enabled = matches!(variant, Variant::Radial | Variant::Both);
        game.formation_spawner.enabled = matches!(variant, Variant::Formation | Variant::Both);
    }

    let summary = run(&args, game);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to serialize summary: {e}");
            process::exit(1);
        }
    }
}

fn run(args: &Args, game: GameConfig) -> Summary {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        time_scale: 1.0,
        game,
    });
    engine.queue_command(PlayerCommand::StartRun);

    let mut summary = Summary {
        ticks: 0,
        elapsed_secs: 0.0,
        phase: GamePhase::Idle,
        level: 1,
        exp: 0,
        kills: 0,
        health: 0.0,
        max_health: 0.0,
        enemies_alive: 0,
        enemies_spawned: 0,
        swings: 0,
        level_ups: 0,
    };

    for i in 0..args.ticks {
        // Walk in a slow circle so the swing direction keeps changing.
        let angle = i as f64 * args.dt * INPUT_TURN_RATE;
        engine.queue_command(PlayerCommand::SetMoveInput {
            x: angle.cos(),
            y: angle.sin(),
        });

        let snapshot = engine.tick(args.dt);
        for event in &snapshot.events {
            match event {
                GameEvent::Spawned { .. } => summary.enemies_spawned += 1,
                GameEvent::LevelUp { .. } => summary.level_ups += 1,
                _ => {}
            }
        }
        // Slashes per swing come from the VFX count; count swings once.
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Slash { .. }))
        {
            summary.swings += 1;
        }

        summary.ticks = snapshot.time.tick;
        summary.elapsed_secs = snapshot.time.elapsed_secs;
        summary.phase = snapshot.phase;
        summary.kills = snapshot.kills;
        summary.enemies_alive = snapshot.enemies.len();
        if let Some(player) = &snapshot.player {
            summary.level = player.level;
            summary.exp = player.exp;
            summary.health = player.health;
            summary.max_health = player.max_health;
        }

        if snapshot.phase == GamePhase::GameOver {
            warn!("player died after {} ticks", summary.ticks);
            break;
        }
    }

    info!(
        "finished: level {} with {} kill(s) in {:.1}s",
        summary.level, summary.kills, summary.elapsed_secs
    );
    summary
}

fn print_usage() {
    eprintln!(
        "sim-harness: headless slashfall simulation runner\n\
         \n\
         Options:\n\
         \n\
           --ticks <N>        Number of ticks to run (default: 3600)\n\
           --seed <S>         RNG seed (default: 42)\n\
           --dt <secs>        Frame time per tick (default: 1/60)\n\
           --config <path>    GameConfig JSON file (optional)\n\
           --variant <name>   radial | formation | both (default: from config)\n\
         \n\
         Set RUST_LOG=debug for per-event logging.\n"
    );
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        ticks: 3600,
        seed: 42,
        dt: DT,
        config: None,
        variant: None,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{flag} needs a value"))?;
        match flag {
            "--ticks" => parsed.ticks = parse_number(flag, value)?,
            "--seed" => parsed.seed = parse_number(flag, value)?,
            "--dt" => {
                let dt: f64 = parse_number(flag, value)?;
                if !(dt > 0.0 && dt.is_finite()) {
                    return Err(format!("--dt must be a positive number, got {value}"));
                }
                parsed.dt = dt;
            }
            "--config" => parsed.config = Some(PathBuf::from(value)),
            "--variant" => {
                parsed.variant = Some(match value.as_str() {
                    "radial" => Variant::Radial,
                    "formation" => Variant::Formation,
                    "both" => Variant::Both,
                    other => return Err(format!("unknown variant: {other}")),
                })
            }
            other => return Err(format!("unknown option: {other}")),
        }
        i += 2;
    }
    Ok(parsed)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag} expects a number, got {value}"))
}
