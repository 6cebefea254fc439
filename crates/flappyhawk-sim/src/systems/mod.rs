//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World`. They keep no state of
//! their own; anything that must outlive a tick lives in components or is
//! passed in by the engine.

pub mod carrier;
pub mod cleanup;
pub mod collision;
pub mod football;
pub mod goal;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod tornado;

use flappyhawk_core::components::Hitbox;
use flappyhawk_core::types::Position;

/// Axis-aligned overlap test between two centred boxes.
pub(crate) fn overlaps(a: &Position, ah: &Hitbox, b: &Position, bh: &Hitbox) -> bool {
    (a.x - b.x).abs() < ah.half_w + bh.half_w && (a.y - b.y).abs() < ah.half_h + bh.half_h
}
