//! GameDay round state machine.
//!
//! Alternates Offense and Defense, owns both scores, and funnels every way
//! a defense round can end (carrier caught, carrier escaped, timer expired)
//! through [`RoundManager::end_defense_round`]. Each defense round gets a
//! fresh id; stale timers and late actor reports carrying an old id are
//! ignored, which is what keeps the opponent from ever scoring twice for
//! one round.

use log::{debug, info};
use rand::Rng;

use flappyhawk_core::config::Tuning;
use flappyhawk_core::constants::{
    FIELD_GOAL_POINTS, MIN_PUBLISHED_SPAWN_RATE, MIN_SCROLL_SPEED, OPPONENT_FIELD_GOAL_CHANCE,
    TOUCHDOWN_POINTS,
};
use flappyhawk_core::enums::{GameDayDifficulty, RoundState};
use flappyhawk_core::state::RoundView;

use crate::broadcast::{RateBroadcaster, RateChange};
use crate::profiles::game_day_profile;

/// A defense round that just began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenseRound {
    pub round_id: u64,
    /// Sim time at which the round times out as a loss.
    pub expires_at: f64,
}

/// How a defense round resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenseOutcome {
    pub round_id: u64,
    pub won: bool,
    /// Points awarded to the opponent (0 on a win).
    pub opponent_points: u32,
}

/// Per-run counters written to the run log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    pub offense_drives: u32,
    pub defense_rounds_won: u32,
    pub defense_rounds_failed: u32,
}

#[derive(Debug, Clone)]
pub struct RoundManager {
    tuning: Tuning,
    difficulty: GameDayDifficulty,
    state: RoundState,
    player_score: u32,
    opponent_score: u32,
    defense_round_id: u64,
    defense_started_at: f64,
    spawning_paused: bool,
    ball_carrier_active: bool,
    scroll_speed: f64,
    spawn_rate: f64,
    stats: RoundStats,
    rates: RateBroadcaster,
}

impl RoundManager {
    pub fn new(tuning: Tuning, difficulty: GameDayDifficulty) -> Self {
        let profile = game_day_profile(difficulty, &tuning);
        Self {
            tuning,
            difficulty,
            state: RoundState::Offense,
            player_score: 0,
            opponent_score: 0,
            defense_round_id: 0,
            defense_started_at: 0.0,
            spawning_paused: false,
            ball_carrier_active: false,
            scroll_speed: profile.scroll_speed,
            spawn_rate: profile.spawn_rate,
            stats: RoundStats::default(),
            rates: RateBroadcaster::default(),
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_defense(&self) -> bool {
        self.state == RoundState::Defense
    }

    pub fn difficulty(&self) -> GameDayDifficulty {
        self.difficulty
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    pub fn defense_round_id(&self) -> u64 {
        self.defense_round_id
    }

    pub fn spawning_paused(&self) -> bool {
        self.spawning_paused
    }

    pub fn ball_carrier_active(&self) -> bool {
        self.ball_carrier_active
    }

    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    pub fn spawn_rate(&self) -> f64 {
        self.spawn_rate
    }

    pub fn stats(&self) -> RoundStats {
        self.stats
    }

    /// Seconds left on the defense clock, or `None` outside Defense.
    pub fn defense_remaining(&self, now: f64) -> Option<f64> {
        self.is_defense().then(|| {
            (self.defense_started_at + self.tuning.defense_round_duration - now).max(0.0)
        })
    }

    /// Enter Defense. Returns `None` if a defense round is already running.
    pub fn start_defense_round(&mut self, now: f64) -> Option<DefenseRound> {
        if self.is_defense() {
            debug!("start_defense_round ignored: already in defense");
            return None;
        }
        self.state = RoundState::Defense;
        self.defense_round_id += 1;
        self.defense_started_at = now;
        self.spawning_paused = false;
        self.ball_carrier_active = false;
        info!(
            "Defense round {} started at {:.2}s",
            self.defense_round_id, now
        );
        Some(DefenseRound {
            round_id: self.defense_round_id,
            expires_at: now + self.tuning.defense_round_duration,
        })
    }

    /// The single path out of Defense. A loss awards the opponent a field
    /// goal (3) or touchdown (7); a win awards nothing. No-op outside Defense.
    pub fn end_defense_round<R: Rng + ?Sized>(
        &mut self,
        won: bool,
        rng: &mut R,
    ) -> Option<DefenseOutcome> {
        if !self.is_defense() {
            debug!("end_defense_round ignored: not in defense");
            return None;
        }
        let opponent_points = if won {
            self.stats.defense_rounds_won += 1;
            0
        } else {
            self.stats.defense_rounds_failed += 1;
            roll_opponent_points(rng)
        };
        self.increase_opponent_score(opponent_points);
        self.state = RoundState::Offense;
        self.spawning_paused = false;
        self.ball_carrier_active = false;
        info!(
            "Defense round {} {} (opponent +{}, score {}-{})",
            self.defense_round_id,
            if won { "won" } else { "lost" },
            opponent_points,
            self.player_score,
            self.opponent_score
        );
        Some(DefenseOutcome {
            round_id: self.defense_round_id,
            won,
            opponent_points,
        })
    }

    /// End the given round only if it is the one still running.
    pub fn end_defense_round_for<R: Rng + ?Sized>(
        &mut self,
        round_id: u64,
        won: bool,
        rng: &mut R,
    ) -> Option<DefenseOutcome> {
        if round_id != self.defense_round_id {
            debug!(
                "stale defense result for round {} (current {})",
                round_id, self.defense_round_id
            );
            return None;
        }
        self.end_defense_round(won, rng)
    }

    /// The defense clock for `round_id` ran out: a loss, unless that round
    /// already ended some other way.
    pub fn on_defense_timeout<R: Rng + ?Sized>(
        &mut self,
        round_id: u64,
        rng: &mut R,
    ) -> Option<DefenseOutcome> {
        self.end_defense_round_for(round_id, false, rng)
    }

    /// The spawner produced this drive's ball carrier.
    pub fn on_ball_carrier_spawned(&mut self) {
        self.spawning_paused = true;
        self.ball_carrier_active = true;
    }

    /// A football entered play for a new offensive drive.
    pub fn on_offense_drive_started(&mut self) {
        self.stats.offense_drives += 1;
    }

    pub fn increase_score(&mut self, amount: u32) {
        self.player_score += amount;
    }

    pub fn increase_opponent_score(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.opponent_score += amount;
    }

    pub fn reset_scores(&mut self) {
        self.player_score = 0;
        self.opponent_score = 0;
    }

    /// Back to a fresh Offense after the player died. Bumps the round id so
    /// any timer from the abandoned defense round is dead.
    pub fn on_player_death_reset(&mut self) {
        if self.is_defense() {
            self.defense_round_id += 1;
        }
        self.state = RoundState::Offense;
        self.spawning_paused = false;
        self.ball_carrier_active = false;
        self.stats = RoundStats::default();
        self.reset_scores();
    }

    pub fn set_difficulty(&mut self, difficulty: GameDayDifficulty) {
        self.difficulty = difficulty;
    }

    /// Publish the current difficulty's scroll speed and spawn rate.
    pub fn apply_difficulty(&mut self) {
        let profile = game_day_profile(self.difficulty, &self.tuning);
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

    pub fn view(&self, now: f64) -> RoundView {
        RoundView {
            state: self.state,
            difficulty: self.difficulty,
            defense_round_id: self.defense_round_id,
            defense_remaining_secs: self.defense_remaining(now).unwrap_or(0.0),
            spawning_paused: self.spawning_paused,
            ball_carrier_active: self.ball_carrier_active,
        }
    }
}

/// Opponent scores a field goal 70% of the time, otherwise a touchdown.
pub fn roll_opponent_points<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen::<f64>() < OPPONENT_FIELD_GOAL_CHANCE {
        FIELD_GOAL_POINTS
    } else {
        TOUCHDOWN_POINTS
    }
}
