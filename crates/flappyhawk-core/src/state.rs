//! Game state snapshot: the complete visible state handed to the front end each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: GameMode,
    /// GameDay round status; `None` in Iowa mode.
    pub round: Option<RoundView>,
    pub score: ScoreView,
    pub player: Option<PlayerView>,
    pub actors: Vec<ActorView>,
    pub scroll_speed: f64,
    pub spawn_rate: f64,
    pub events: Vec<GameEvent>,
}

/// GameDay round status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundView {
    pub state: RoundState,
    pub difficulty: GameDayDifficulty,
    /// Id of the current (or most recent) defense round.
    pub defense_round_id: u64,
    /// Seconds until the defense round times out (0 on offense).
    pub defense_remaining_secs: f64,
    pub spawning_paused: bool,
    pub ball_carrier_active: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    /// Iowa score, or the player's GameDay score.
    pub player: u32,
    /// Opponent's GameDay score (always 0 in Iowa).
    pub opponent: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    pub has_helmet: bool,
    pub carrying_ball: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub kind: ActorKind,
    pub position: Position,
}

/// Per-run statistics, one CSV row minus run id and player name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub game_mode: GameMode,
    /// Human-readable difficulty of the active mode.
    pub difficulty: String,
    /// Headline score: Iowa score, or player minus opponent floored at 0 in GameDay.
    pub score: u32,
    pub player_score: u32,
    pub enemy_score: u32,
    pub round_seconds: f64,
    pub obstacles_spawned: u32,
    pub jumps: u32,
    pub helmets_collected: u32,
    pub offense_drives: u32,
    pub defense_rounds_won: u32,
    pub defense_rounds_failed: u32,
}
