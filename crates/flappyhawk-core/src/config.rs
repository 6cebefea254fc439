//! Runtime tuning: every designer-facing knob, with defaults from `constants`.
//!
//! Loaded from JSON by the app; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CollectibleKind, Difficulty, GameDayDifficulty, ObstacleKind};
use crate::error::FlappyError;

/// Relative spawn weights for obstacles and collectibles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnWeights {
    pub obstacle_spawn_chance: f64,
    pub pipe: f64,
    pub balloon: f64,
    pub silo: f64,
    pub turbine: f64,
    pub cyclone_bird: f64,
    pub tornado: f64,
    pub corn_kernel: f64,
    pub helmet: f64,
    pub wind_boost: f64,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        Self {
            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            pipe: PIPE_WEIGHT,
            balloon: BALLOON_WEIGHT,
            silo: SILO_WEIGHT,
            turbine: TURBINE_WEIGHT,
            cyclone_bird: CYCLONE_BIRD_WEIGHT,
            tornado: TORNADO_WEIGHT,
            corn_kernel: CORN_KERNEL_WEIGHT,
            helmet: HELMET_WEIGHT,
            wind_boost: WIND_BOOST_WEIGHT,
        }
    }
}

impl SpawnWeights {
    pub fn obstacle(&self, kind: ObstacleKind) -> f64 {
        match kind {
            ObstacleKind::Pipe => self.pipe,
            ObstacleKind::Balloon => self.balloon,
            ObstacleKind::Silo => self.silo,
            ObstacleKind::Turbine => self.turbine,
            ObstacleKind::CycloneBird => self.cyclone_bird,
            ObstacleKind::Tornado => self.tornado,
        }
    }

    pub fn collectible(&self, kind: CollectibleKind) -> f64 {
        match kind {
            CollectibleKind::CornKernel => self.corn_kernel,
            CollectibleKind::Helmet => self.helmet,
            CollectibleKind::WindBoost => self.wind_boost,
        }
    }

    fn all(&self) -> [(&'static str, f64); 10] {
        [
            ("obstacle_spawn_chance", self.obstacle_spawn_chance),
            ("pipe", self.pipe),
            ("balloon", self.balloon),
            ("silo", self.silo),
            ("turbine", self.turbine),
            ("cyclone_bird", self.cyclone_bird),
            ("tornado", self.tornado),
            ("corn_kernel", self.corn_kernel),
            ("helmet", self.helmet),
            ("wind_boost", self.wind_boost),
        ]
    }
}

/// All tunable gameplay parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub scroll_speed: f64,
    pub easy_spawn_rate: f64,
    pub normal_spawn_rate: f64,
    pub hard_spawn_rate: f64,
    pub college_spawn_rate: f64,
    pub pro_spawn_rate: f64,
    pub defense_round_duration: f64,
    pub defense_carrier_delay: f64,
    pub goal_post_spawn_rate: f64,
    pub max_goal_posts_per_drive: u32,
    pub offense_kickstart_secs: f64,
    pub offense_to_defense_delay: f64,
    pub defense_to_offense_delay: f64,
    pub wave_spawn_delay: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub weights: SpawnWeights,
    /// Kinds that are never spawned (missing art, playtest cuts).
    pub disabled_obstacles: Vec<ObstacleKind>,
    pub disabled_collectibles: Vec<CollectibleKind>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_speed: DEFAULT_SCROLL_SPEED,
            easy_spawn_rate: EASY_SPAWN_RATE,
            normal_spawn_rate: NORMAL_SPAWN_RATE,
            hard_spawn_rate: HARD_SPAWN_RATE,
            college_spawn_rate: COLLEGE_SPAWN_RATE,
            pro_spawn_rate: PRO_SPAWN_RATE,
            defense_round_duration: DEFENSE_ROUND_DURATION,
            defense_carrier_delay: DEFENSE_CARRIER_DELAY,
            goal_post_spawn_rate: GOAL_POST_SPAWN_RATE,
            max_goal_posts_per_drive: MAX_GOAL_POSTS_PER_DRIVE,
            offense_kickstart_secs: OFFENSE_KICKSTART_SECS,
            offense_to_defense_delay: OFFENSE_TO_DEFENSE_DELAY,
            defense_to_offense_delay: DEFENSE_TO_OFFENSE_DELAY,
            wave_spawn_delay: WAVE_SPAWN_DELAY,
            half_width: SCREEN_HALF_WIDTH,
            half_height: SCREEN_HALF_HEIGHT,
            weights: SpawnWeights::default(),
            disabled_obstacles: Vec::new(),
            disabled_collectibles: Vec::new(),
        }
    }
}

impl Tuning {
    /// Read a JSON tuning file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, FlappyError> {
        let json = std::fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn iowa_spawn_rate(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy_spawn_rate,
            Difficulty::Normal => self.normal_spawn_rate,
            Difficulty::Hard => self.hard_spawn_rate,
        }
    }

    pub fn game_day_spawn_rate(&self, difficulty: GameDayDifficulty) -> f64 {
        match difficulty {
            GameDayDifficulty::College => self.college_spawn_rate,
            GameDayDifficulty::Pro => self.pro_spawn_rate,
        }
    }

    pub fn validate(&self) -> Result<(), FlappyError> {
        let positive = [
            ("easy_spawn_rate", self.easy_spawn_rate),
            ("normal_spawn_rate", self.normal_spawn_rate),
            ("hard_spawn_rate", self.hard_spawn_rate),
            ("college_spawn_rate", self.college_spawn_rate),
            ("pro_spawn_rate", self.pro_spawn_rate),
            ("defense_round_duration", self.defense_round_duration),
            ("goal_post_spawn_rate", self.goal_post_spawn_rate),
            ("half_width", self.half_width),
            ("half_height", self.half_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(FlappyError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("scroll_speed", self.scroll_speed),
            ("defense_carrier_delay", self.defense_carrier_delay),
            ("offense_kickstart_secs", self.offense_kickstart_secs),
            ("offense_to_defense_delay", self.offense_to_defense_delay),
            ("defense_to_offense_delay", self.defense_to_offense_delay),
            ("wave_spawn_delay", self.wave_spawn_delay),
        ];
        for (name, value) in non_negative.into_iter().chain(self.weights.all()) {
            if !(value >= 0.0) {
                return Err(FlappyError::InvalidTuning(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.weights.obstacle_spawn_chance > 1.0 {
            return Err(FlappyError::InvalidTuning(
                "obstacle_spawn_chance is a probability and must be <= 1".into(),
            ));
        }
        Ok(())
    }
}
