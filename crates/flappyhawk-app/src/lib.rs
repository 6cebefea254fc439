//! FlappyHawk headless application.
//!
//! This crate wires the simulation to a fixed-rate game loop thread, an
//! autopilot controller, the command line and on-disk persistence.

pub mod autopilot;
pub mod cli;
pub mod error;
pub mod game_loop;
pub mod session;
pub mod state;

pub use error::AppError;
pub use flappyhawk_core as core;
