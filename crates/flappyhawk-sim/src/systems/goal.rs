//! Goal posts: scoring footballs and stray ball carriers.

use hecs::{Entity, World};

use flappyhawk_core::components::{BallCarrier, Football, GoalPost, Hitbox};
use flappyhawk_core::constants::{FIELD_GOAL_POINTS, GOAL_POST_DESPAWN_DELAY, TOUCHDOWN_POINTS};
use flappyhawk_core::types::Position;

use crate::actor_events::ActorEvent;
use crate::timers::{ScheduledTask, TimerQueue};

/// Whether something centred at `pos` is passing through the opening.
fn through_opening(post: &Position, opening: &Hitbox, pos: &Position, hitbox: &Hitbox) -> bool {
    (post.x - pos.x).abs() < opening.half_w + hitbox.half_w
        && (post.y - pos.y).abs() < opening.half_h
}

/// Each post scores at most once. A carried ball is a touchdown, a loose
/// one a field goal. A ball carrier flying through counts as it getting
/// away. Scored posts linger briefly before removal.
pub fn run(
    world: &mut World,
    now: f64,
    timers: &mut TimerQueue<ScheduledTask>,
    actor_events: &mut Vec<ActorEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let posts: Vec<(Entity, Position, Hitbox)> = world
        .query::<(&GoalPost, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (post, _, _))| !post.scored)
        .map(|(entity, (_, pos, hitbox))| (entity, *pos, *hitbox))
        .collect();
    if posts.is_empty() {
        return;
    }
    let mut balls: Vec<(Entity, Position, Hitbox, bool)> = world
        .query::<(&Football, &Position, &Hitbox)>()
        .iter()
        .map(|(entity, (ball, pos, hitbox))| (entity, *pos, *hitbox, ball.carried))
        .collect();
    let mut carriers: Vec<(Entity, Position, Hitbox, u64)> = world
        .query::<(&BallCarrier, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (carrier, _, _))| !carrier.resolved)
        .map(|(entity, (carrier, pos, hitbox))| (entity, *pos, *hitbox, carrier.round_id))
        .collect();

    despawn_buffer.clear();
    for (post_entity, post_pos, opening) in posts {
        let mut used = false;

        if let Some(i) = balls
            .iter()
            .position(|(_, pos, hitbox, _)| through_opening(&post_pos, &opening, pos, hitbox))
        {
            let (ball, _, _, carried) = balls.swap_remove(i);
            let points = if carried {
                TOUCHDOWN_POINTS
            } else {
                FIELD_GOAL_POINTS
            };
            log::info!("Goal post scored: {} points", points);
            actor_events.push(ActorEvent::GoalScored { points });
            despawn_buffer.push(ball);
            used = true;
        } else if let Some(i) = carriers
            .iter()
            .position(|(_, pos, hitbox, _)| through_opening(&post_pos, &opening, pos, hitbox))
        {
            let (carrier, _, _, round_id) = carriers.swap_remove(i);
            if let Ok(mut state) = world.get::<&mut BallCarrier>(carrier) {
                state.resolved = true;
            }
            actor_events.push(ActorEvent::DefenseResolved {
                round_id,
                won: false,
            });
            despawn_buffer.push(carrier);
            used = true;
        }

        if used {
            if let Ok(mut post) = world.get::<&mut GoalPost>(post_entity) {
                post.scored = true;
            }
            timers.schedule(
                now + GOAL_POST_DESPAWN_DELAY,
                ScheduledTask::Despawn {
                    entity: post_entity,
                },
            );
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
