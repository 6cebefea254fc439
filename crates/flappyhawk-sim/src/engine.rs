//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the mode manager, the
//! spawner and the timer queue. It processes player commands, runs one
//! fixed-order tick (round phase, then spawner, then actors), and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::{BTreeSet, VecDeque};

use hecs::World;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flappyhawk_core::commands::PlayerCommand;
use flappyhawk_core::components::{BallCarrier, Football, Player, WaveBird};
use flappyhawk_core::config::Tuning;
use flappyhawk_core::constants::{DT, MAX_TIME_SCALE, PLAYER_START_HEALTH, TOUCHDOWN_POINTS};
use flappyhawk_core::enums::{Difficulty, GameDayDifficulty, GameMode, GamePhase, RoundState};
use flappyhawk_core::events::GameEvent;
use flappyhawk_core::state::{GameStateSnapshot, RunSummary};
use flappyhawk_core::types::{ScreenBounds, SimTime};
use flappyhawk_round::{DefenseOutcome, ModeManager, RateChange};

use crate::actor_events::ActorEvent;
use crate::spawner::{SpawnContext, SpawnRequest, Spawner};
use crate::systems;
use crate::systems::collision::Contact;
use crate::timers::{ScheduledTask, TimerQueue};
use crate::world_setup::{self, SpawnEnv};

/// Configuration for starting a new simulation.
///
/// Serialisable so a run can be replayed from its recorded configuration;
/// missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub tuning: Tuning,
    /// Reaching zero health does not end the run.
    pub practice_mode: bool,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub game_day_difficulty: GameDayDifficulty,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tuning: Tuning::default(),
            practice_mode: false,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            game_day_difficulty: GameDayDifficulty::default(),
        }
    }
}

/// Clamp a requested time scale into `[0, MAX_TIME_SCALE]`. Non-finite
/// values fall back to normal speed.
pub fn sanitize_time_scale(scale: f64) -> f64 {
    if !scale.is_finite() {
        warn!("Time scale {} is not finite, using 1.0", scale);
        return 1.0;
    }
    scale.clamp(0.0, MAX_TIME_SCALE)
}

/// Per-run counters that no manager owns.
#[derive(Debug, Clone, Copy, Default)]
struct RunStats {
    obstacles_spawned: u32,
    jumps: u32,
    helmets_collected: u32,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    tuning: Tuning,
    bounds: ScreenBounds,
    practice_mode: bool,
    mode: GameMode,
    difficulty: Difficulty,
    game_day_difficulty: GameDayDifficulty,
    manager: ModeManager,
    spawner: Spawner,
    timers: TimerQueue<ScheduledTask>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    contacts: BTreeSet<Contact>,
    actor_events: Vec<ActorEvent>,
    game_events: Vec<GameEvent>,
    stats: RunStats,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let bounds = ScreenBounds::centered(config.tuning.half_width, config.tuning.half_height);
        let manager = ModeManager::new(
            config.mode,
            config.tuning.clone(),
            config.difficulty,
            config.game_day_difficulty,
        );
        let profile = manager.profile(&config.tuning);
        let spawner = Spawner::new(config.tuning.clone(), profile.tornadoes, profile.spawn_rate);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: sanitize_time_scale(config.time_scale),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning: config.tuning,
            bounds,
            practice_mode: config.practice_mode,
            mode: config.mode,
            difficulty: config.difficulty,
            game_day_difficulty: config.game_day_difficulty,
            manager,
            spawner,
            timers: TimerQueue::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            contacts: BTreeSet::new(),
            actor_events: Vec::new(),
            game_events: Vec::new(),
            stats: RunStats::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = DT * self.time_scale;
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.game_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.manager,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn manager(&self) -> &ModeManager {
        &self.manager
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Statistics for the current (or just finished) run.
    pub fn run_summary(&self) -> RunSummary {
        let round_stats = self
            .manager
            .game_day()
            .map(|round| round.stats())
            .unwrap_or_default();
        let player_score = self.manager.player_score();
        let enemy_score = self.manager.opponent_score();
        RunSummary {
            game_mode: self.manager.mode(),
            difficulty: self.manager.difficulty_label().to_string(),
            score: match self.manager.mode() {
                GameMode::Iowa => player_score,
                GameMode::GameDay => player_score.saturating_sub(enemy_score),
            },
            player_score,
            enemy_score,
            round_seconds: self.time.elapsed_secs,
            obstacles_spawned: self.stats.obstacles_spawned,
            jumps: self.stats.jumps,
            helmets_collected: self.stats.helmets_collected,
            offense_drives: round_stats.offense_drives,
            defense_rounds_won: round_stats.defense_rounds_won,
            defense_rounds_failed: round_stats.defense_rounds_failed,
        }
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn-request injection for tests that need a specific actor.
    #[cfg(test)]
    pub fn spawn_test_actor(&mut self, request: SpawnRequest) -> Vec<hecs::Entity> {
        let env = self.spawn_env();
        let entities = world_setup::materialise(&mut self.world, &request, &env, &mut self.rng);
        self.on_spawned(&request);
        entities
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Flap => {
                if self.phase == GamePhase::Active && systems::player::flap(&mut self.world) {
                    self.stats.jumps += 1;
                    self.game_events.push(GameEvent::Flap);
                }
            }
            PlayerCommand::DropFootball => {
                if self.phase == GamePhase::Active
                    && systems::football::drop_football(&mut self.world, self.manager.scroll_speed())
                {
                    debug!("Football dropped");
                }
            }
            PlayerCommand::SelectMode { mode } => {
                if self.in_setup("SelectMode") {
                    self.mode = mode;
                    self.rebuild_manager();
                }
            }
            PlayerCommand::SetDifficulty { difficulty } => {
                if self.in_setup("SetDifficulty") {
                    self.difficulty = difficulty;
                    self.manager
                        .set_difficulty(self.difficulty, self.game_day_difficulty);
                }
            }
            PlayerCommand::SetGameDayDifficulty { difficulty } => {
                if self.in_setup("SetGameDayDifficulty") {
                    self.game_day_difficulty = difficulty;
                    self.manager
                        .set_difficulty(self.difficulty, self.game_day_difficulty);
                }
            }
            PlayerCommand::StartRun => self.start_run(),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.clear_field();
                self.phase = GamePhase::Ready;
            }
            PlayerCommand::SetScrollSpeed { speed } => self.manager.set_scroll_speed(speed),
            PlayerCommand::SetSpawnRate { rate } => self.manager.set_spawn_rate(rate),
        }
    }

    /// Difficulty and mode are fixed for the duration of a run.
    fn in_setup(&self, command: &str) -> bool {
        let setup = !matches!(self.phase, GamePhase::Active | GamePhase::Paused);
        if !setup {
            warn!("{} ignored while a run is in progress", command);
        }
        setup
    }

    fn rebuild_manager(&mut self) {
        self.manager = ModeManager::new(
            self.mode,
            self.tuning.clone(),
            self.difficulty,
            self.game_day_difficulty,
        );
    }

    fn clear_field(&mut self) {
        self.world.clear();
        self.timers.clear();
        self.contacts.clear();
        self.actor_events.clear();
    }

    /// Full reset: scores, round flags, spawner, actors, difficulty
    /// broadcast, run stats and a fresh player.
    fn start_run(&mut self) {
        self.clear_field();
        self.time = SimTime::default();
        self.stats = RunStats::default();
        self.manager.reset_for_new_run();
        self.manager.apply_difficulty();
        let profile = self.manager.profile(&self.tuning);
        self.spawner = Spawner::new(self.tuning.clone(), profile.tornadoes, profile.spawn_rate);
        self.spawner.reset_spawner();
        world_setup::spawn_player(&mut self.world);
        self.phase = GamePhase::Active;
        info!(
            "Run started: {:?} ({}), spawn every {:.2}s",
            self.manager.mode(),
            self.manager.difficulty_label(),
            profile.spawn_rate
        );
    }

    /// Run one tick in strict order: round transitions, then the spawner
    /// reacts to the settled round state, then actors move and report.
    fn run_systems(&mut self, dt: f64) {
        self.run_round_phase();
        self.run_spawner_phase(dt);
        self.run_actor_phase(dt);
    }

    fn run_round_phase(&mut self) {
        let now = self.time.elapsed_secs;

        // 1. Due timers
        for task in self.timers.pop_due(now) {
            match task {
                ScheduledTask::DefenseTimeout { round_id } => {
                    let outcome = self
                        .manager
                        .game_day_mut()
                        .and_then(|round| round.on_defense_timeout(round_id, &mut self.rng));
                    if let Some(outcome) = outcome {
                        info!("Defense round {} timed out", round_id);
                        self.finish_defense(outcome);
                    }
                }
                ScheduledTask::Despawn { entity } => {
                    let _ = self.world.despawn(entity);
                }
            }
        }

        // 2. Actor reports from the previous tick
        for event in std::mem::take(&mut self.actor_events) {
            self.apply_actor_event(event);
        }

        // 3. Rate broadcasts
        for change in self.manager.drain_broadcasts() {
            match change {
                RateChange::ScrollSpeed(speed) => {
                    let updated = systems::movement::set_scroll_speed(&mut self.world, speed);
                    debug!("Scroll speed {:.2} pushed to {} actors", speed, updated);
                }
                RateChange::SpawnRate(rate) => self.spawner.on_spawn_rate_changed(rate),
            }
        }
    }

    fn apply_actor_event(&mut self, event: ActorEvent) {
        match event {
            ActorEvent::StartDefense => self.start_defense(),
            ActorEvent::GoalScored { points } => {
                self.manager.increase_score(points);
                self.game_events.push(if points == TOUCHDOWN_POINTS {
                    GameEvent::Touchdown
                } else {
                    GameEvent::FieldGoal
                });
                self.start_defense();
            }
            ActorEvent::DefenseResolved { round_id, won } => self.resolve_defense(round_id, won),
            ActorEvent::FootballLost { defense_round } => match defense_round {
                Some(round_id) => self.resolve_defense(round_id, false),
                None => self.start_defense(),
            },
            ActorEvent::Points(points) => self.manager.increase_score(points),
        }
    }

    fn start_defense(&mut self) {
        let now = self.time.elapsed_secs;
        let Some(round) = self.manager.game_day_mut() else {
            return;
        };
        let Some(defense) = round.start_defense_round(now) else {
            return;
        };
        self.timers.schedule(
            defense.expires_at,
            ScheduledTask::DefenseTimeout {
                round_id: defense.round_id,
            },
        );
        self.despawn_all::<Football>();
        self.spawner.reset_drive_counters();
        self.game_events.push(GameEvent::DefenseStarted {
            round_id: defense.round_id,
        });
    }

    fn resolve_defense(&mut self, round_id: u64, won: bool) {
        let outcome = self
            .manager
            .game_day_mut()
            .and_then(|round| round.end_defense_round_for(round_id, won, &mut self.rng));
        if let Some(outcome) = outcome {
            self.finish_defense(outcome);
        }
    }

    /// Aftermath of a defense round, whichever way it ended.
    fn finish_defense(&mut self, outcome: DefenseOutcome) {
        if outcome.opponent_points > 0 {
            self.game_events.push(GameEvent::OpponentScored {
                points: outcome.opponent_points,
            });
        }
        self.game_events.push(GameEvent::DefenseEnded {
            round_id: outcome.round_id,
            won: outcome.won,
        });
        self.despawn_all::<WaveBird>();
        self.despawn_all::<BallCarrier>();
        self.spawner.reset_game_day_ball();
        self.spawner.reset_drive_counters();
    }

    fn despawn_all<T: hecs::Component>(&mut self) {
        self.despawn_buffer.clear();
        self.despawn_buffer
            .extend(self.world.query_mut::<&T>().into_iter().map(|(entity, _)| entity));
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
    }

    fn spawn_env(&self) -> SpawnEnv {
        let profile = self.manager.profile(&self.tuning);
        SpawnEnv {
            scroll_speed: self.manager.scroll_speed(),
            bounds: self.bounds,
            balloon_bob_amplitude: profile.balloon_bob_amplitude,
            goal_opening_half_height: profile.goal_opening_half_height,
            score_gates: self.manager.mode() == GameMode::Iowa,
            defense_round_id: self
                .manager
                .game_day()
                .map(|round| round.defense_round_id())
                .unwrap_or_default(),
        }
    }

    fn run_spawner_phase(&mut self, dt: f64) {
        let round = self.manager.game_day();
        let ctx = SpawnContext {
            mode: self.manager.mode(),
            round_state: round.map(|r| r.state()).unwrap_or(RoundState::Offense),
            spawning_paused: round.is_some_and(|r| r.spawning_paused()),
            ball_carrier_active: round.is_some_and(|r| r.ball_carrier_active()),
            tornadoes: self.manager.profile(&self.tuning).tornadoes,
            bounds: self.bounds,
        };
        let requests = self.spawner.tick(dt, &ctx, &mut self.rng);
        if requests.is_empty() {
            return;
        }
        let env = self.spawn_env();
        for request in &requests {
            world_setup::materialise(&mut self.world, request, &env, &mut self.rng);
            self.on_spawned(request);
        }
    }

    /// Round bookkeeping and cues for freshly spawned actors.
    fn on_spawned(&mut self, request: &SpawnRequest) {
        match request {
            SpawnRequest::Obstacle(_) => self.stats.obstacles_spawned += 1,
            SpawnRequest::Wave {
                formation,
                positions,
            } => {
                self.stats.obstacles_spawned += positions.len() as u32;
                self.game_events.push(GameEvent::WaveSpawned {
                    formation: *formation,
                    count: positions.len() as u32,
                });
            }
            SpawnRequest::Football { .. } => {
                if let Some(round) = self.manager.game_day_mut() {
                    round.on_offense_drive_started();
                }
                info!("Football spawned for a new drive");
                self.game_events.push(GameEvent::FootballSpawned);
            }
            SpawnRequest::BallCarrier { .. } => {
                if let Some(round) = self.manager.game_day_mut() {
                    round.on_ball_carrier_spawned();
                    info!("Ball carrier spawned (round {})", round.defense_round_id());
                }
                self.game_events.push(GameEvent::BallCarrierSpawned);
            }
            SpawnRequest::Collectible(_)
            | SpawnRequest::Helmet
            | SpawnRequest::GoalPost
            | SpawnRequest::ParentTornado => {}
        }
    }

    fn run_actor_phase(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;
        let mode = self.manager.mode();
        let defense_round = self
            .manager
            .game_day()
            .filter(|round| round.is_defense())
            .map(|round| round.defense_round_id());

        // 1. Player physics
        systems::player::run(&mut self.world, dt, &self.bounds, mode, &mut self.actor_events);
        // 2. Scroll and drift
        systems::movement::run(&mut self.world, dt);
        // 3. Bobbing
        systems::movement::bob(&mut self.world, dt);
        // 4. Football carry, fall and loss
        systems::football::run(
            &mut self.world,
            dt,
            &self.bounds,
            defense_round,
            &mut self.actor_events,
            &mut self.despawn_buffer,
        );
        // 5. Tornado emission
        systems::tornado::run(&mut self.world, dt, &self.bounds, &mut self.rng);
        // 6. Goal posts
        systems::goal::run(
            &mut self.world,
            now,
            &mut self.timers,
            &mut self.actor_events,
            &mut self.despawn_buffer,
        );
        // 7. Ball carrier escape
        systems::carrier::run(
            &mut self.world,
            &self.bounds,
            &mut self.actor_events,
            &mut self.despawn_buffer,
        );
        // 8. Player contacts
        let outcome = systems::collision::run(
            &mut self.world,
            &self.bounds,
            &mut self.contacts,
            &mut self.actor_events,
            &mut self.game_events,
            &mut self.despawn_buffer,
        );
        self.stats.helmets_collected += outcome.helmets_collected;
        // 9. Iowa pass scoring
        if mode == GameMode::Iowa {
            systems::collision::score_passed_obstacles(&mut self.world, &mut self.actor_events);
        }
        // 10. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        if outcome.died {
            self.on_player_died();
        }
    }

    fn on_player_died(&mut self) {
        if self.practice_mode {
            for (_entity, player) in self.world.query_mut::<&mut Player>() {
                player.health = PLAYER_START_HEALTH;
            }
            info!("Practice mode: health restored");
            return;
        }
        // Reports from the final tick still count toward the result.
        for event in std::mem::take(&mut self.actor_events) {
            self.apply_actor_event(event);
        }
        self.phase = GamePhase::GameOver;
        self.game_events.push(GameEvent::GameOver);
        info!(
            "Game over at {:.2}s: {} - {}",
            self.time.elapsed_secs,
            self.manager.player_score(),
            self.manager.opponent_score()
        );
    }
}
