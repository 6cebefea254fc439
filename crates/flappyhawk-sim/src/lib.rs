//! Simulation engine for FlappyHawk.
//!
//! Owns the hecs ECS world, runs the round, spawner and actor phases at a
//! fixed tick rate, and produces GameStateSnapshots for the front end.

pub mod actor_events;
pub mod engine;
pub mod formation;
pub mod selection;
pub mod spawner;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use flappyhawk_core as core;
