//! Player commands sent from the front end to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- In-run input ---
    /// Flap upward.
    Flap,
    /// Release a carried football.
    DropFootball,

    // --- Setup (ignored while a run is active) ---
    SelectMode { mode: GameMode },
    SetDifficulty { difficulty: Difficulty },
    SetGameDayDifficulty { difficulty: GameDayDifficulty },

    // --- Session control ---
    /// Start (or restart) a run with a full reset.
    StartRun,
    Pause,
    Resume,
    /// Abandon the run and clear the field.
    ReturnToMenu,

    // --- Live tuning broadcasts ---
    SetScrollSpeed { speed: f64 },
    SetSpawnRate { rate: f64 },
}
