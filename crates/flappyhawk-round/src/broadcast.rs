//! Rate-change notifications published by the round managers.
//!
//! Managers queue changes here; the engine drains the queue once per tick
//! and pushes each value to the spawner and every live scrolling actor.

/// A published world-rate change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateChange {
    /// New world scroll speed (units/s).
    ScrollSpeed(f64),
    /// New spawn interval (seconds between spawns).
    SpawnRate(f64),
}

/// Outbox of pending rate changes.
#[derive(Debug, Clone, Default)]
pub struct RateBroadcaster {
    pending: Vec<RateChange>,
}

impl RateBroadcaster {
    pub fn publish(&mut self, change: RateChange) {
        self.pending.push(change);
    }

    /// Take every change published since the last drain, in publish order.
    pub fn drain(&mut self) -> Vec<RateChange> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
