//! Core types and definitions for the FlappyHawk simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, tuning and constants.
//! It has no dependency on a runtime framework.

pub mod collect;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::FlappyError;

#[cfg(test)]
mod tests;
