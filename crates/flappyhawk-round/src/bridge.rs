//! Mode bridge: one handle the world talks to regardless of mode.
//!
//! Actors report scores and ask for rates through [`ModeManager`]; it
//! forwards to the Iowa keeper or the GameDay round machine. Calls that
//! only make sense in GameDay are no-ops in Iowa.

use flappyhawk_core::config::Tuning;
use flappyhawk_core::enums::{Difficulty, GameDayDifficulty, GameMode};

use crate::broadcast::RateChange;
use crate::iowa::IowaManager;
use crate::manager::RoundManager;
use crate::profiles::{game_day_label, game_day_profile, iowa_label, DifficultyProfile};

#[derive(Debug, Clone)]
pub enum ModeManager {
    Iowa(IowaManager),
    GameDay(RoundManager),
}

impl ModeManager {
    pub fn new(
        mode: GameMode,
        tuning: Tuning,
        difficulty: Difficulty,
        game_day_difficulty: GameDayDifficulty,
    ) -> Self {
        match mode {
            GameMode::Iowa => ModeManager::Iowa(IowaManager::new(tuning, difficulty)),
            GameMode::GameDay => {
                ModeManager::GameDay(RoundManager::new(tuning, game_day_difficulty))
            }
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            ModeManager::Iowa(_) => GameMode::Iowa,
            ModeManager::GameDay(_) => GameMode::GameDay,
        }
    }

    pub fn game_day(&self) -> Option<&RoundManager> {
        match self {
            ModeManager::GameDay(round) => Some(round),
            ModeManager::Iowa(_) => None,
        }
    }

    pub fn game_day_mut(&mut self) -> Option<&mut RoundManager> {
        match self {
            ModeManager::GameDay(round) => Some(round),
            ModeManager::Iowa(_) => None,
        }
    }

    pub fn profile(&self, tuning: &Tuning) -> DifficultyProfile {
        match self {
            ModeManager::Iowa(iowa) => iowa.profile(),
            ModeManager::GameDay(round) => game_day_profile(round.difficulty(), tuning),
        }
    }

    pub fn difficulty_label(&self) -> &'static str {
        match self {
            ModeManager::Iowa(iowa) => iowa_label(iowa.difficulty()),
            ModeManager::GameDay(round) => game_day_label(round.difficulty()),
        }
    }

    pub fn increase_score(&mut self, amount: u32) {
        match self {
            ModeManager::Iowa(iowa) => iowa.increase_score(amount),
            ModeManager::GameDay(round) => round.increase_score(amount),
        }
    }

    /// Record the chosen difficulties; the active mode keeps the one it uses.
    /// Takes effect on the next `apply_difficulty`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty, game_day: GameDayDifficulty) {
        match self {
            ModeManager::Iowa(iowa) => iowa.set_difficulty(difficulty),
            ModeManager::GameDay(round) => round.set_difficulty(game_day),
        }
    }

    pub fn player_score(&self) -> u32 {
        match self {
            ModeManager::Iowa(iowa) => iowa.score(),
            ModeManager::GameDay(round) => round.player_score(),
        }
    }

    pub fn opponent_score(&self) -> u32 {
        match self {
            ModeManager::Iowa(_) => 0,
            ModeManager::GameDay(round) => round.opponent_score(),
        }
    }

    pub fn scroll_speed(&self) -> f64 {
        match self {
            ModeManager::Iowa(iowa) => iowa.scroll_speed(),
            ModeManager::GameDay(round) => round.scroll_speed(),
        }
    }

    pub fn spawn_rate(&self) -> f64 {
        match self {
            ModeManager::Iowa(iowa) => iowa.spawn_rate(),
            ModeManager::GameDay(round) => round.spawn_rate(),
        }
    }

    pub fn set_scroll_speed(&mut self, speed: f64) {
        match self {
            ModeManager::Iowa(iowa) => iowa.set_scroll_speed(speed),
            ModeManager::GameDay(round) => round.set_scroll_speed(speed),
        }
    }

    pub fn set_spawn_rate(&mut self, rate: f64) {
        match self {
            ModeManager::Iowa(iowa) => iowa.set_spawn_rate(rate),
            ModeManager::GameDay(round) => round.set_spawn_rate(rate),
        }
    }

    pub fn apply_difficulty(&mut self) {
        match self {
            ModeManager::Iowa(iowa) => iowa.apply_difficulty(),
            ModeManager::GameDay(round) => round.apply_difficulty(),
        }
    }

    pub fn drain_broadcasts(&mut self) -> Vec<RateChange> {
        match self {
            ModeManager::Iowa(iowa) => iowa.drain_broadcasts(),
            ModeManager::GameDay(round) => round.drain_broadcasts(),
        }
    }

    /// Scores back to zero for a new run after death.
    pub fn reset_for_new_run(&mut self) {
        match self {
            ModeManager::Iowa(iowa) => iowa.reset_score(),
            ModeManager::GameDay(round) => round.on_player_death_reset(),
        }
    }
}
