//! Cleanup system: removes actors that crossed their despawn line.

use hecs::{Entity, World};

use flappyhawk_core::components::DespawnBoundary;
use flappyhawk_core::types::Position;

/// Remove every actor past its boundary.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (pos, boundary)) in world.query_mut::<(&Position, &DespawnBoundary)>() {
        let gone = match *boundary {
            DespawnBoundary::LeftOf(x) => pos.x < x,
            DespawnBoundary::RightOf(x) => pos.x > x,
        };
        if gone {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
