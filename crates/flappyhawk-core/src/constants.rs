//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Fastest allowed simulation speed multiplier.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Screen ---

/// Half the visible world width (orthographic camera, 16:9, size 5).
pub const SCREEN_HALF_WIDTH: f64 = 8.9;

/// Half the visible world height.
pub const SCREEN_HALF_HEIGHT: f64 = 5.0;

/// Margin past the screen edge at which most actors despawn.
pub const DESPAWN_MARGIN: f64 = 1.0;

/// Larger margin used by wide obstacles (pipes, balloons, silos).
pub const WIDE_DESPAWN_MARGIN: f64 = 2.5;

/// X coordinate of the spawner (just off the right edge).
pub const SPAWNER_X: f64 = 10.0;

/// Vertical band for airborne spawns.
pub const SPAWN_MIN_HEIGHT: f64 = -1.0;
pub const SPAWN_MAX_HEIGHT: f64 = 2.0;

/// Y of ground-level obstacles (silos, goal posts).
pub const GROUND_SPAWN_HEIGHT: f64 = -1.25;

/// Y of turbine hubs.
pub const TURBINE_SPAWN_HEIGHT: f64 = 0.4;

// --- World scroll ---

/// Default horizontal scroll speed (units/s).
pub const DEFAULT_SCROLL_SPEED: f64 = 5.0;

/// Floor applied to broadcast scroll speeds.
pub const MIN_SCROLL_SPEED: f64 = 0.0;

/// Floor applied by the round managers when publishing spawn rates.
pub const MIN_PUBLISHED_SPAWN_RATE: f64 = 0.05;

/// Floor the spawner applies to any spawn rate it receives.
pub const MIN_SPAWNER_RATE: f64 = 0.2;

// --- Iowa mode ---

pub const EASY_SPAWN_RATE: f64 = 1.15;
pub const NORMAL_SPAWN_RATE: f64 = 1.00;
pub const HARD_SPAWN_RATE: f64 = 0.85;

/// Probability that a normal-cadence spawn is an obstacle rather than a collectible.
pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.8;

// --- GameDay mode ---

pub const COLLEGE_SPAWN_RATE: f64 = 1.10;
pub const PRO_SPAWN_RATE: f64 = 0.90;

/// Length of a defense round before it times out as a loss (seconds).
pub const DEFENSE_ROUND_DURATION: f64 = 10.0;

/// Delay between defense start and the ball-carrier spawn (seconds).
pub const DEFENSE_CARRIER_DELAY: f64 = 3.0;

/// Seconds between goal posts while on offense.
pub const GOAL_POST_SPAWN_RATE: f64 = 10.0;

/// Goal posts allowed per offensive drive.
pub const MAX_GOAL_POSTS_PER_DRIVE: u32 = 4;

/// Window after defense→offense during which stale pause flags are ignored.
pub const OFFENSE_KICKSTART_SECS: f64 = 1.5;

/// Spawning suppression after offense→defense.
pub const OFFENSE_TO_DEFENSE_DELAY: f64 = 0.0;

/// Spawning suppression after defense→offense.
pub const DEFENSE_TO_OFFENSE_DELAY: f64 = 1.0;

/// Breathing room after a football, wave or helmet spawn.
pub const WAVE_SPAWN_DELAY: f64 = 0.5;

/// Waves between helmet chances.
pub const WAVES_PER_HELMET_CHANCE: u32 = 5;

/// Chance of a helmet replacing a wave once the wave count is reached.
pub const HELMET_CHANCE: f64 = 0.5;

/// Inclusive bounds on birds per wave.
pub const MIN_WAVE_SIZE: u32 = 1;
pub const MAX_WAVE_SIZE: u32 = 5;

/// Probability a lost defense round concedes a field goal (3) rather than a touchdown (7).
pub const OPPONENT_FIELD_GOAL_CHANCE: f64 = 0.7;

pub const TOUCHDOWN_POINTS: u32 = 7;
pub const FIELD_GOAL_POINTS: u32 = 3;

/// Delay before a goal post that produced a score is removed (seconds).
pub const GOAL_POST_DESPAWN_DELAY: f64 = 0.1;

/// Offset of a carried football relative to the player.
pub const CARRY_OFFSET_Y: f64 = -0.35;

// --- Player ---

/// Fixed horizontal home of the player.
pub const PLAYER_HOME_X: f64 = -4.0;

pub const GRAVITY: f64 = -9.8;
pub const FLAP_STRENGTH: f64 = 5.0;
pub const PLAYER_START_HEALTH: u32 = 1;
pub const PLAYER_MAX_HEALTH: u32 = 3;

/// Wind boost horizontal push.
pub const BOOST_DISTANCE: f64 = 1.5;
pub const BOOST_DURATION: f64 = 0.5;

/// Rate at which the player drifts back to its home x after a boost.
pub const BOOST_RETURN_SPEED: f64 = 1.0;

// --- Actor motion ---

pub const CYCLONE_BOB_AMPLITUDE: f64 = 0.5;
pub const CYCLONE_BOB_FREQUENCY: f64 = 2.0;
pub const CARRIER_BOB_AMPLITUDE: f64 = 0.5;
pub const CARRIER_BOB_FREQUENCY: f64 = 1.0;
pub const BALLOON_BOB_SPEED: f64 = 1.5;

// --- Tornado (Iowa, Hard) ---

pub const PARENT_TORNADO_X: f64 = -9.0;
pub const PARENT_TORNADO_MIN_Y: f64 = -0.5;
pub const PARENT_TORNADO_MAX_Y: f64 = 1.5;
pub const PARENT_TORNADO_BOB_SPEED: f64 = 0.5;
pub const TORNADO_MIN_EMISSION_INTERVAL: f64 = 3.0;
pub const TORNADO_MAX_EMISSION_INTERVAL: f64 = 5.0;
pub const SMALL_TORNADO_MIN_SPEED: f64 = 3.0;
pub const SMALL_TORNADO_MAX_SPEED: f64 = 6.0;

// --- Default spawn weights ---

pub const PIPE_WEIGHT: f64 = 0.2;
pub const BALLOON_WEIGHT: f64 = 0.2;
pub const SILO_WEIGHT: f64 = 0.2;
pub const TURBINE_WEIGHT: f64 = 0.2;
pub const CYCLONE_BIRD_WEIGHT: f64 = 0.2;
pub const TORNADO_WEIGHT: f64 = 0.2;
pub const CORN_KERNEL_WEIGHT: f64 = 0.7;
pub const HELMET_WEIGHT: f64 = 0.3;
pub const WIND_BOOST_WEIGHT: f64 = 0.1;

// --- Pipe geometry ---

/// Half height of the opening between the two pipe halves.
pub const PIPE_GAP_HALF_HEIGHT: f64 = 1.5;

/// Half height of the scoring opening of College goal posts.
pub const COLLEGE_GOAL_HALF_HEIGHT: f64 = 1.2;

/// Half height of the scoring opening of Pro goal posts.
pub const PRO_GOAL_HALF_HEIGHT: f64 = 0.8;
