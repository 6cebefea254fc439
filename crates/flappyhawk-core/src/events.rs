//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Audio/UI cues produced during a tick and handed out with the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Flap,
    CornCollected,
    HelmetCollected { health: u32 },
    WindBoost,
    /// Player scored with the ball carried through a goal post.
    Touchdown,
    /// Loose ball sailed through a goal post.
    FieldGoal,
    OpponentScored { points: u32 },
    DefenseStarted { round_id: u64 },
    DefenseEnded { round_id: u64, won: bool },
    FootballSpawned,
    FootballCarried,
    BallCarrierSpawned,
    WaveSpawned { formation: Formation, count: u32 },
    PlayerDamaged { health: u32 },
    PlayerHealed { health: u32 },
    GameOver,
}
