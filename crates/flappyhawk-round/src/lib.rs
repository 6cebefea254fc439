//! Round and mode state machines for FlappyHawk.
//!
//! Pure bookkeeping for the two game modes: the GameDay offense/defense
//! round machine, the Iowa score keeper, the bridge that multiplexes calls
//! to whichever is active, and the difficulty profiles both publish.
//! No ECS dependency; operates on plain data.

pub mod bridge;
pub mod broadcast;
pub mod iowa;
pub mod manager;
pub mod profiles;

pub use bridge::ModeManager;
pub use broadcast::{RateBroadcaster, RateChange};
pub use iowa::IowaManager;
pub use manager::{DefenseOutcome, DefenseRound, RoundManager, RoundStats};

pub use flappyhawk_core as core;

#[cfg(test)]
mod tests;
