//! Spawner: decides what to create and when.
//!
//! The spawner never touches the world. Each tick it reads a
//! [`SpawnContext`] (the round state after this tick's transitions) and
//! returns [`SpawnRequest`]s that `world_setup` materialises. All
//! randomness comes from the engine's seeded RNG.

use log::debug;
use rand::Rng;

use flappyhawk_core::config::Tuning;
use flappyhawk_core::constants::{
    HELMET_CHANCE, MAX_WAVE_SIZE, MIN_SPAWNER_RATE, MIN_WAVE_SIZE, SPAWNER_X, SPAWN_MAX_HEIGHT,
    SPAWN_MIN_HEIGHT, WAVES_PER_HELMET_CHANCE,
};
use flappyhawk_core::enums::{CollectibleKind, Formation, GameMode, ObstacleKind, RoundState};
use flappyhawk_core::types::{Position, ScreenBounds};

use crate::formation::formation_positions;
use crate::selection::{collectible_table, obstacle_table, WeightedTable};

/// Round state as seen by the spawner for one tick.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    pub mode: GameMode,
    pub round_state: RoundState,
    pub spawning_paused: bool,
    pub ball_carrier_active: bool,
    /// Iowa Hard: spawn the parent tornado.
    pub tornadoes: bool,
    pub bounds: ScreenBounds,
}

/// Something the spawner wants created this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnRequest {
    Obstacle(ObstacleKind),
    Collectible(CollectibleKind),
    /// GameDay helmet, placed just inside the right edge.
    Helmet,
    Football { y: f64 },
    GoalPost,
    BallCarrier { position: Position },
    Wave {
        formation: Formation,
        positions: Vec<Position>,
    },
    ParentTornado,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    tuning: Tuning,
    obstacles: WeightedTable<ObstacleKind>,
    collectibles: WeightedTable<CollectibleKind>,
    spawn_rate: f64,
    timer: f64,
    parent_tornado_spawned: bool,

    // GameDay drive/round bookkeeping
    prev_in_defense: bool,
    mode_swap_delay: f64,
    ball_spawned: bool,
    goal_post_timer: f64,
    goal_posts_this_drive: u32,
    wave_cooldown: f64,
    waves_since_helmet: u32,
    waves_completed: u32,
    kickstart: f64,
    defense_timer: f64,
    carrier_spawned: bool,
}

impl Spawner {
    pub fn new(tuning: Tuning, tornadoes: bool, spawn_rate: f64) -> Self {
        let obstacles = obstacle_table(&tuning, tornadoes);
        let collectibles = collectible_table(&tuning);
        Self {
            tuning,
            obstacles,
            collectibles,
            spawn_rate: spawn_rate.max(MIN_SPAWNER_RATE),
            timer: 0.0,
            parent_tornado_spawned: false,
            prev_in_defense: true,
            mode_swap_delay: 0.0,
            ball_spawned: false,
            goal_post_timer: 0.0,
            goal_posts_this_drive: 0,
            wave_cooldown: 0.0,
            waves_since_helmet: 0,
            waves_completed: 0,
            kickstart: 0.0,
            defense_timer: 0.0,
            carrier_spawned: false,
        }
    }

    pub fn spawn_rate(&self) -> f64 {
        self.spawn_rate
    }

    pub fn ball_spawned(&self) -> bool {
        self.ball_spawned
    }

    pub fn carrier_spawned(&self) -> bool {
        self.carrier_spawned
    }

    pub fn goal_posts_this_drive(&self) -> u32 {
        self.goal_posts_this_drive
    }

    pub fn waves_since_helmet(&self) -> u32 {
        self.waves_since_helmet
    }

    pub fn waves_completed(&self) -> u32 {
        self.waves_completed
    }

    /// Rate-change notification. Restarts the cadence accumulator.
    pub fn on_spawn_rate_changed(&mut self, rate: f64) {
        self.spawn_rate = rate.max(MIN_SPAWNER_RATE);
        self.timer = 0.0;
    }

    /// Every counter, timer and flag back to its initial value.
    pub fn reset_spawner(&mut self) {
        self.timer = 0.0;
        self.parent_tornado_spawned = false;
        self.prev_in_defense = true;
        self.mode_swap_delay = 0.0;
        self.ball_spawned = false;
        self.goal_post_timer = 0.0;
        self.goal_posts_this_drive = 0;
        self.wave_cooldown = 0.0;
        self.waves_since_helmet = 0;
        self.waves_completed = 0;
        self.kickstart = 0.0;
        self.defense_timer = 0.0;
        self.carrier_spawned = false;
    }

    /// Allow the next offense drive to get a football.
    pub fn reset_game_day_ball(&mut self) {
        self.ball_spawned = false;
    }

    /// Per-drive goal-post and wave bookkeeping back to zero. Runs on every
    /// offense/defense transition.
    pub fn reset_drive_counters(&mut self) {
        self.goal_posts_this_drive = 0;
        self.goal_post_timer = 0.0;
        self.waves_since_helmet = 0;
        self.waves_completed = 0;
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        ctx: &SpawnContext,
        rng: &mut R,
    ) -> Vec<SpawnRequest> {
        let mut out = Vec::new();
        match ctx.mode {
            GameMode::Iowa => self.tick_iowa(dt, ctx, rng, &mut out),
            GameMode::GameDay => self.tick_game_day(dt, ctx, rng, &mut out),
        }
        out
    }

    fn tick_iowa<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        ctx: &SpawnContext,
        rng: &mut R,
        out: &mut Vec<SpawnRequest>,
    ) {
        if !self.parent_tornado_spawned {
            if ctx.tornadoes {
                out.push(SpawnRequest::ParentTornado);
            }
            self.parent_tornado_spawned = true;
        }

        self.timer += dt;
        if self.timer >= self.spawn_rate {
            self.timer = 0.0;
            let request = if rng.gen::<f64>() < self.tuning.weights.obstacle_spawn_chance {
                self.obstacles.sample(rng).map(SpawnRequest::Obstacle)
            } else {
                self.collectibles.sample(rng).map(SpawnRequest::Collectible)
            };
            out.extend(request);
        }
    }

    fn tick_game_day<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        ctx: &SpawnContext,
        rng: &mut R,
        out: &mut Vec<SpawnRequest>,
    ) {
        let in_defense = ctx.round_state == RoundState::Defense;
        if in_defense != self.prev_in_defense {
            if in_defense {
                self.mode_swap_delay = self.tuning.offense_to_defense_delay;
                self.carrier_spawned = false;
                self.defense_timer = 0.0;
            } else {
                self.mode_swap_delay = self.tuning.defense_to_offense_delay;
                self.ball_spawned = false;
                self.timer = 0.0;
                self.wave_cooldown = self.tuning.wave_spawn_delay;
                self.kickstart = self.tuning.offense_kickstart_secs;
            }
            self.reset_drive_counters();
            self.prev_in_defense = in_defense;
            debug!(
                "spawner entered {}",
                if in_defense { "defense" } else { "offense" }
            );
        }

        if self.mode_swap_delay > 0.0 {
            self.mode_swap_delay -= dt;
            return;
        }

        if in_defense {
            if !self.carrier_spawned {
                self.timer += dt;
                if self.timer >= self.spawn_rate {
                    self.timer = 0.0;
                    out.push(self.wave(rng));
                }
                self.defense_timer += dt;
                if self.defense_timer >= self.tuning.defense_carrier_delay {
                    let position = Position::new(
                        ctx.bounds.despawn_right(1.0),
                        ctx.bounds.mid_y(),
                    );
                    out.push(SpawnRequest::BallCarrier { position });
                    self.carrier_spawned = true;
                }
            }
            return;
        }

        if !ctx.spawning_paused
            && self.goal_posts_this_drive < self.tuning.max_goal_posts_per_drive
        {
            self.goal_post_timer += dt;
            if self.goal_post_timer >= self.tuning.goal_post_spawn_rate {
                out.push(SpawnRequest::GoalPost);
                self.goal_posts_this_drive += 1;
                self.goal_post_timer = 0.0;
            }
        }

        if !ctx.spawning_paused && !self.ball_spawned {
            let y = rng.gen_range(SPAWN_MIN_HEIGHT..SPAWN_MAX_HEIGHT);
            out.push(SpawnRequest::Football { y });
            self.ball_spawned = true;
            self.wave_cooldown = self.tuning.wave_spawn_delay;
            return;
        }

        if self.kickstart > 0.0 {
            // Stale pause flags are ignored until the kickstart runs out.
            self.kickstart -= dt;
        } else if ctx.spawning_paused || ctx.ball_carrier_active {
            return;
        }

        if self.wave_cooldown > 0.0 {
            self.wave_cooldown -= dt;
            return;
        }

        self.timer += dt;
        if self.timer >= self.spawn_rate {
            self.timer = 0.0;
            if self.waves_since_helmet >= WAVES_PER_HELMET_CHANCE
                && rng.gen::<f64>() < HELMET_CHANCE
            {
                out.push(SpawnRequest::Helmet);
                self.waves_since_helmet = 0;
                self.wave_cooldown = self.tuning.wave_spawn_delay;
            } else {
                out.push(self.wave(rng));
                self.waves_since_helmet += 1;
            }
        }
    }

    fn wave<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpawnRequest {
        let count = rng.gen_range(MIN_WAVE_SIZE..=MAX_WAVE_SIZE);
        let formation = Formation::ALL[rng.gen_range(0..Formation::ALL.len())];
        let base = Position::new(SPAWNER_X, 0.0);
        let positions = formation_positions(formation, count, base, rng);
        self.waves_completed += 1;
        self.wave_cooldown = self.tuning.wave_spawn_delay;
        SpawnRequest::Wave {
            formation,
            positions,
        }
    }
}
