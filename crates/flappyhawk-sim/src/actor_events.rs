//! Reports actors make to the round manager.
//!
//! Systems queue these during the actor phase; the engine applies them at
//! the start of the next tick's round phase, before the spawner looks at
//! round state. Anything that can end a defense round names the round it
//! refers to, so a report about a finished round does nothing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorEvent {
    /// The player (or the carried ball) left the field.
    StartDefense,
    /// A football went through a goal post.
    GoalScored { points: u32 },
    /// The ball carrier was caught (`won`) or got away.
    DefenseResolved { round_id: u64, won: bool },
    /// A loose football left the field. `defense_round` is the running
    /// defense round at the time, if any.
    FootballLost { defense_round: Option<u64> },
    /// Points for the active mode's player score.
    Points(u32),
}
