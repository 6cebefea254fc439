//! Football carry, drop and loss.

use hecs::{Entity, World};

use flappyhawk_core::components::{Falling, Football, Player, Scroller};
use flappyhawk_core::constants::{CARRY_OFFSET_Y, DESPAWN_MARGIN, GRAVITY};
use flappyhawk_core::types::{Position, ScreenBounds};

use crate::actor_events::ActorEvent;

/// Release any carried football. It falls and scrolls from where it was.
pub fn drop_football(world: &mut World, scroll_speed: f64) -> bool {
    let carried: Vec<Entity> = world
        .query_mut::<&Football>()
        .into_iter()
        .filter(|(_, ball)| ball.carried)
        .map(|(entity, _)| entity)
        .collect();
    for &entity in &carried {
        if let Ok(mut ball) = world.get::<&mut Football>(entity) {
            ball.carried = false;
        }
        let _ = world.insert(
            entity,
            (
                Falling::default(),
                Scroller {
                    speed: scroll_speed,
                },
            ),
        );
    }
    !carried.is_empty()
}

/// Start carrying `ball`: it stops scrolling and follows the player.
pub fn carry(world: &mut World, ball: Entity) {
    if let Ok(mut football) = world.get::<&mut Football>(ball) {
        football.carried = true;
    }
    let _ = world.remove_one::<Falling>(ball);
    let _ = world.remove_one::<Scroller>(ball);
}

/// Whether the player currently holds a football.
pub fn player_has_ball(world: &World) -> bool {
    world.query::<&Football>().iter().any(|(_, ball)| ball.carried)
}

/// Move carried and falling balls, then report and remove balls that left
/// the field. A carried ball leaving hands the ball over; a loose one is
/// lost (a defense loss if a defense round is running).
pub fn run(
    world: &mut World,
    dt: f64,
    bounds: &ScreenBounds,
    defense_round: Option<u64>,
    actor_events: &mut Vec<ActorEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let player_pos = world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos);

    for (_entity, (ball, pos)) in world.query_mut::<(&Football, &mut Position)>() {
        if let (true, Some(holder)) = (ball.carried, player_pos) {
            *pos = holder.offset(0.0, CARRY_OFFSET_Y);
        }
    }
    for (_entity, (falling, pos)) in world.query_mut::<(&mut Falling, &mut Position)>() {
        falling.velocity_y += GRAVITY * dt;
        pos.y += falling.velocity_y * dt;
    }

    despawn_buffer.clear();
    for (entity, (ball, pos)) in world.query_mut::<(&Football, &Position)>() {
        if ball.carried {
            if !bounds.contains(pos, DESPAWN_MARGIN) {
                actor_events.push(ActorEvent::StartDefense);
                despawn_buffer.push(entity);
            }
        } else if pos.x < bounds.despawn_left(DESPAWN_MARGIN)
            || pos.y < bounds.bottom - DESPAWN_MARGIN
        {
            actor_events.push(ActorEvent::FootballLost { defense_round });
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
