//! Commands sent from the host (input, camera, run control) to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Set up the world and start the run.
    StartRun,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },

    // --- Input ---
    /// Movement/aim direction from the input device. May be zero.
    SetMoveInput { x: f64, y: f64 },

    // --- Camera ---
    /// Move the camera center (overrides follow/scroll for this tick).
    SetCamera { center_x: f64, center_y: f64 },
}
