//! Player physics: flap, gravity, wind boost and the screen edges.

use hecs::World;

use flappyhawk_core::components::Player;
use flappyhawk_core::constants::{
    BOOST_DISTANCE, BOOST_DURATION, BOOST_RETURN_SPEED, DESPAWN_MARGIN, FLAP_STRENGTH, GRAVITY,
    PLAYER_HOME_X,
};
use flappyhawk_core::enums::GameMode;
use flappyhawk_core::types::{Position, ScreenBounds};

use crate::actor_events::ActorEvent;

/// Set the upward flap velocity. Returns false if there is no player.
pub fn flap(world: &mut World) -> bool {
    let mut flapped = false;
    for (_entity, player) in world.query_mut::<&mut Player>() {
        player.velocity_y = FLAP_STRENGTH;
        flapped = true;
    }
    flapped
}

/// Integrate the player for one tick.
///
/// The ground is solid (contact damage is the collision system's job). In
/// Iowa the sky has a ceiling just above the screen; in GameDay flying off
/// the screen hands the ball over, reported once per exit.
pub fn run(
    world: &mut World,
    dt: f64,
    bounds: &ScreenBounds,
    mode: GameMode,
    actor_events: &mut Vec<ActorEvent>,
) {
    for (_entity, (player, pos)) in world.query_mut::<(&mut Player, &mut Position)>() {
        player.velocity_y += GRAVITY * dt;
        pos.y += player.velocity_y * dt;

        if player.boost_remaining > 0.0 {
            let step = dt.min(player.boost_remaining);
            pos.x += BOOST_DISTANCE / BOOST_DURATION * step;
            player.boost_remaining -= step;
        } else if pos.x > PLAYER_HOME_X {
            pos.x = (pos.x - BOOST_RETURN_SPEED * dt).max(PLAYER_HOME_X);
        }

        if pos.y < bounds.bottom {
            pos.y = bounds.bottom;
            player.velocity_y = player.velocity_y.max(0.0);
        }

        match mode {
            GameMode::Iowa => {
                let ceiling = bounds.top + DESPAWN_MARGIN;
                if pos.y > ceiling {
                    pos.y = ceiling;
                    player.velocity_y = player.velocity_y.min(0.0);
                }
            }
            GameMode::GameDay => {
                let off_screen = !bounds.contains(pos, DESPAWN_MARGIN);
                if off_screen && !player.off_screen {
                    log::info!("Player left the field at ({:.2}, {:.2})", pos.x, pos.y);
                    actor_events.push(ActorEvent::StartDefense);
                }
                player.off_screen = off_screen;
            }
        }
    }
}
