//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems; the only
//! behaviour kept here is the player's health bookkeeping, which every
//! collectible effect goes through.

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_MAX_HEALTH, PLAYER_START_HEALTH};
use crate::enums::{CollectibleKind, ObstacleKind};

/// Moves left at the shared world scroll speed.
///
/// `speed` is pushed by the engine whenever a scroll-speed broadcast is
/// drained; actors never poll for it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scroller {
    pub speed: f64,
}

/// Horizontal motion at an actor-specific speed (positive = right).
/// Not bound to the world scroll speed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Drift {
    pub speed: f64,
}

/// Precomputed camera-relative despawn line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DespawnBoundary {
    /// Removed once x drops below the value.
    LeftOf(f64),
    /// Removed once x exceeds the value.
    RightOf(f64),
}

/// Sinusoidal vertical motion around `base_y`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bobbing {
    pub amplitude: f64,
    /// Radians of phase advanced per second.
    pub angular_rate: f64,
    pub elapsed: f64,
    pub base_y: f64,
}

/// Axis-aligned collision box centred on the entity position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub half_w: f64,
    pub half_h: f64,
}

/// Damages the player on contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
}

/// Pipe pair: only the area outside the opening is solid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PipeGap {
    pub half_height: f64,
}

/// Awards an Iowa point once the actor scrolls past the player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreGate {
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
}

/// The GameDay football. Free footballs scroll; carried ones follow the player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Football {
    pub carried: bool,
}

/// Free fall for a dropped football.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Falling {
    pub velocity_y: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalPost {
    /// Set once the post produced a score; later overlaps are ignored.
    pub scored: bool,
    pub opening_half_height: f64,
}

/// The opponent's ball-carrier during a defense round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallCarrier {
    /// Defense round this carrier belongs to.
    pub round_id: u64,
    /// Set once the carrier was caught or escaped.
    pub resolved: bool,
}

/// A bird spawned as part of a formation wave.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaveBird;

/// Stationary Hard-mode tornado that emits small right-moving tornadoes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParentTornado {
    pub emission_timer: f64,
    pub next_emission: f64,
}

/// The player-controlled hawk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub velocity_y: f64,
    pub health: u32,
    pub max_health: u32,
    /// Seconds of wind boost remaining.
    pub boost_remaining: f64,
    /// Whether the player is currently beyond the screen edge.
    pub off_screen: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            velocity_y: 0.0,
            health: PLAYER_START_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            boost_remaining: 0.0,
            off_screen: false,
        }
    }
}

impl Player {
    /// Helmet is worn while health exceeds the starting value.
    pub fn has_helmet(&self) -> bool {
        self.health > PLAYER_START_HEALTH
    }

    pub fn is_at_max_health(&self) -> bool {
        self.health >= self.max_health
    }

    pub fn gain_health(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Returns the remaining health.
    pub fn take_damage(&mut self) -> u32 {
        self.health = self.health.saturating_sub(1);
        self.health
    }
}
