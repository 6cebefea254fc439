//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::{SCREEN_HALF_HEIGHT, SCREEN_HALF_WIDTH};

/// 2D position in world units. x grows to the right, y grows upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Camera-relative visible area in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self::centered(SCREEN_HALF_WIDTH, SCREEN_HALF_HEIGHT)
    }
}

impl ScreenBounds {
    pub fn centered(half_width: f64, half_height: f64) -> Self {
        Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
        }
    }

    /// X past which left-moving actors are removed.
    pub fn despawn_left(&self, margin: f64) -> f64 {
        self.left - margin
    }

    /// X past which right-moving actors are removed.
    pub fn despawn_right(&self, margin: f64) -> f64 {
        self.right + margin
    }

    /// Vertical center of the screen.
    pub fn mid_y(&self) -> f64 {
        (self.bottom + self.top) / 2.0
    }

    /// Whether `pos` lies within the screen grown by `margin` on every side.
    pub fn contains(&self, pos: &Position, margin: f64) -> bool {
        pos.x >= self.left - margin
            && pos.x <= self.right + margin
            && pos.y >= self.bottom - margin
            && pos.y <= self.top + margin
    }
}
