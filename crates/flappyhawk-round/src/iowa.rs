//! Iowa (endless) mode score keeper.

use log::info;

use flappyhawk_core::config::Tuning;
use flappyhawk_core::constants::{MIN_PUBLISHED_SPAWN_RATE, MIN_SCROLL_SPEED};
use flappyhawk_core::enums::Difficulty;

use crate::broadcast::{RateBroadcaster, RateChange};
use crate::profiles::{iowa_profile, DifficultyProfile};

#[derive(Debug, Clone)]
pub struct IowaManager {
    tuning: Tuning,
    difficulty: Difficulty,
    score: u32,
    scroll_speed: f64,
    spawn_rate: f64,
    rates: RateBroadcaster,
}

impl IowaManager {
    pub fn new(tuning: Tuning, difficulty: Difficulty) -> Self {
        let profile = iowa_profile(difficulty, &tuning);
        Self {
            tuning,
            difficulty,
            score: 0,
            scroll_speed: profile.scroll_speed,
            spawn_rate: profile.spawn_rate,
            rates: RateBroadcaster::default(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> DifficultyProfile {
        iowa_profile(self.difficulty, &self.tuning)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    pub fn spawn_rate(&self) -> f64 {
        self.spawn_rate
    }

    pub fn increase_score(&mut self, amount: u32) {
        self.score += amount;
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn apply_difficulty(&mut self) {
        let profile = self.profile();
        info!(
            "Iowa difficulty {:?}: spawn every {:.2}s, tornadoes {}",
            self.difficulty, profile.spawn_rate, profile.tornadoes
        );
        self.set_scroll_speed(profile.scroll_speed);
        self.set_spawn_rate(profile.spawn_rate);
    }

    pub fn set_scroll_speed(&mut self, speed: f64) {
        self.scroll_speed = speed.max(MIN_SCROLL_SPEED);
        self.rates.publish(RateChange::ScrollSpeed(self.scroll_speed));
    }

    pub fn set_spawn_rate(&mut self, rate: f64) {
        self.spawn_rate = rate.max(MIN_PUBLISHED_SPAWN_RATE);
        self.rates.publish(RateChange::SpawnRate(self.spawn_rate));
    }

    pub fn drain_broadcasts(&mut self) -> Vec<RateChange> {
        self.rates.drain()
    }
}
