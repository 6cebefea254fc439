//! Snapshot system: queries the ECS world and builds a GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::{Entity, World};

use flappyhawk_core::components::*;
use flappyhawk_core::enums::{ActorKind, GamePhase, ObstacleKind};
use flappyhawk_core::events::GameEvent;
use flappyhawk_core::state::*;
use flappyhawk_core::types::{Position, SimTime};
use flappyhawk_round::ModeManager;

use crate::systems::football;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    manager: &ModeManager,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        mode: manager.mode(),
        round: manager.game_day().map(|round| round.view(time.elapsed_secs)),
        score: ScoreView {
            player: manager.player_score(),
            opponent: manager.opponent_score(),
        },
        player: build_player(world),
        actors: build_actors(world),
        scroll_speed: manager.scroll_speed(),
        spawn_rate: manager.spawn_rate(),
        events,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    let carrying_ball = football::player_has_ball(world);
    world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (player, pos))| PlayerView {
            position: *pos,
            health: player.health,
            max_health: player.max_health,
            has_helmet: player.has_helmet(),
            carrying_ball,
        })
}

/// Classify an entity for display. `None` for the player and anything
/// without a visible role.
fn actor_kind(world: &World, entity: Entity) -> Option<ActorKind> {
    if let Ok(obstacle) = world.get::<&Obstacle>(entity) {
        return Some(ActorKind::Obstacle(obstacle.kind));
    }
    if let Ok(collectible) = world.get::<&Collectible>(entity) {
        return Some(ActorKind::Collectible(collectible.kind));
    }
    if let Ok(ball) = world.get::<&Football>(entity) {
        return Some(ActorKind::Football {
            carried: ball.carried,
        });
    }
    if world.get::<&GoalPost>(entity).is_ok() {
        return Some(ActorKind::GoalPost);
    }
    if world.get::<&BallCarrier>(entity).is_ok() {
        return Some(ActorKind::BallCarrier);
    }
    if world.get::<&ParentTornado>(entity).is_ok() {
        return Some(ActorKind::ParentTornado);
    }
    None
}

fn build_actors(world: &World) -> Vec<ActorView> {
    let mut actors: Vec<(u32, ActorView)> = world
        .query::<&Position>()
        .iter()
        .filter_map(|(entity, pos)| {
            actor_kind(world, entity).map(|kind| {
                (
                    entity.id(),
                    ActorView {
                        kind,
                        position: *pos,
                    },
                )
            })
        })
        .collect();

    actors.sort_by_key(|(id, _)| *id);
    actors.into_iter().map(|(_, view)| view).collect()
}

/// Count live obstacles of one kind (used by tests and the autopilot).
pub fn count_obstacles(world: &World, kind: ObstacleKind) -> usize {
    world
        .query::<&Obstacle>()
        .iter()
        .filter(|(_, obstacle)| obstacle.kind == kind)
        .count()
}
