//! Difficulty profiles: what each difficulty publishes to the world.

use flappyhawk_core::config::Tuning;
use flappyhawk_core::constants::{
    BALLOON_BOB_SPEED, COLLEGE_GOAL_HALF_HEIGHT, PRO_GOAL_HALF_HEIGHT,
};
use flappyhawk_core::enums::{Difficulty, GameDayDifficulty};

/// Parameters derived from the selected difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Seconds between spawns.
    pub spawn_rate: f64,
    /// World scroll speed.
    pub scroll_speed: f64,
    /// Whether tornadoes join the obstacle pool and the parent tornado appears.
    pub tornadoes: bool,
    /// Peak vertical displacement of balloons (0 = no bob).
    pub balloon_bob_amplitude: f64,
    /// Half height of the goal-post opening.
    pub goal_opening_half_height: f64,
}

/// Balloons bob by integrating `sin(t * speed) * amount * 60` as a
/// per-second velocity, which peaks at `amount * 60 / speed`.
fn balloon_amplitude(amount: f64) -> f64 {
    amount * 60.0 / BALLOON_BOB_SPEED
}

pub fn iowa_profile(difficulty: Difficulty, tuning: &Tuning) -> DifficultyProfile {
    let (bob_amount, tornadoes) = match difficulty {
        Difficulty::Easy => (0.0, false),
        Difficulty::Normal => (0.05, false),
        Difficulty::Hard => (0.1, true),
    };
    DifficultyProfile {
        spawn_rate: tuning.iowa_spawn_rate(difficulty),
        scroll_speed: tuning.scroll_speed,
        tornadoes,
        balloon_bob_amplitude: balloon_amplitude(bob_amount),
        goal_opening_half_height: COLLEGE_GOAL_HALF_HEIGHT,
    }
}

pub fn game_day_profile(difficulty: GameDayDifficulty, tuning: &Tuning) -> DifficultyProfile {
    DifficultyProfile {
        spawn_rate: tuning.game_day_spawn_rate(difficulty),
        scroll_speed: tuning.scroll_speed,
        tornadoes: false,
        balloon_bob_amplitude: 0.0,
        goal_opening_half_height: match difficulty {
            GameDayDifficulty::College => COLLEGE_GOAL_HALF_HEIGHT,
            GameDayDifficulty::Pro => PRO_GOAL_HALF_HEIGHT,
        },
    }
}

/// Label written to the run log.
pub fn iowa_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy",
        Difficulty::Normal => "Normal",
        Difficulty::Hard => "Hard",
    }
}

pub fn game_day_label(difficulty: GameDayDifficulty) -> &'static str {
    match difficulty {
        GameDayDifficulty::College => "College",
        GameDayDifficulty::Pro => "Pro",
    }
}
