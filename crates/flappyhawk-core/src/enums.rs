//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which game is being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Endless flappy-style run over the cornfields.
    #[default]
    Iowa,
    /// Alternating offense/defense football rounds.
    GameDay,
}

/// Iowa mode difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

/// GameDay mode difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameDayDifficulty {
    #[default]
    College,
    Pro,
}

/// GameDay round phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// The player carries the ball toward goal posts.
    #[default]
    Offense,
    /// The player must intercept the opponent's ball-carrier.
    Defense,
}

/// Top-level session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a run to start (menu / ready screen).
    #[default]
    Ready,
    Active,
    Paused,
    GameOver,
}

/// Obstacle archetypes. Contact costs the player one health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Pipe,
    Balloon,
    Silo,
    Turbine,
    CycloneBird,
    Tornado,
}

/// Collectible archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    CornKernel,
    Helmet,
    WindBoost,
}

/// Geometric layout of a wave of cyclone birds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    /// Vertical column, evenly spaced.
    Line,
    /// Horizontal row with small vertical jitter.
    Staggered,
    /// Random spread around the spawner.
    Scatter,
    /// Rising diagonal.
    Diagonal,
    /// Tight x jitter, full-height random y.
    Random,
}

impl Formation {
    pub const ALL: [Formation; 5] = [
        Formation::Line,
        Formation::Staggered,
        Formation::Scatter,
        Formation::Diagonal,
        Formation::Random,
    ];
}

/// Snapshot tag for a live actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Obstacle(ObstacleKind),
    Collectible(CollectibleKind),
    Football { carried: bool },
    GoalPost,
    BallCarrier,
    ParentTornado,
}
