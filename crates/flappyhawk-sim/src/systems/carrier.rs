//! Ball carrier escape check.

use hecs::{Entity, World};

use flappyhawk_core::components::BallCarrier;
use flappyhawk_core::constants::DESPAWN_MARGIN;
use flappyhawk_core::types::{Position, ScreenBounds};

use crate::actor_events::ActorEvent;

/// A carrier that crosses the left despawn line uncaught has escaped:
/// reported once as a loss for its round, then removed.
pub fn run(
    world: &mut World,
    bounds: &ScreenBounds,
    actor_events: &mut Vec<ActorEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let left = bounds.despawn_left(DESPAWN_MARGIN);
    for (entity, (carrier, pos)) in world.query_mut::<(&mut BallCarrier, &Position)>() {
        if pos.x < left && !carrier.resolved {
            carrier.resolved = true;
            log::info!("Ball carrier escaped (round {})", carrier.round_id);
            actor_events.push(ActorEvent::DefenseResolved {
                round_id: carrier.round_id,
                won: false,
            });
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
