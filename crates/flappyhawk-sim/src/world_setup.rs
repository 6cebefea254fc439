//! Entity spawn factories for the simulation world.
//!
//! Each factory builds one actor's component bundle. Scrolling actors get
//! the current scroll speed at birth and are kept in sync afterwards by the
//! engine's rate broadcasts.

use std::f64::consts::PI;

use hecs::{Entity, World};
use rand::Rng;

use flappyhawk_core::components::*;
use flappyhawk_core::constants::*;
use flappyhawk_core::enums::{CollectibleKind, ObstacleKind};
use flappyhawk_core::types::{Position, ScreenBounds};

use crate::spawner::SpawnRequest;

/// World parameters a factory needs at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct SpawnEnv {
    pub scroll_speed: f64,
    pub bounds: ScreenBounds,
    pub balloon_bob_amplitude: f64,
    pub goal_opening_half_height: f64,
    /// Obstacles award a point when passed (Iowa).
    pub score_gates: bool,
    /// Round the next ball carrier belongs to.
    pub defense_round_id: u64,
}

impl SpawnEnv {
    fn scroller(&self) -> Scroller {
        Scroller {
            speed: self.scroll_speed,
        }
    }

    fn left_boundary(&self, margin: f64) -> DespawnBoundary {
        DespawnBoundary::LeftOf(self.bounds.despawn_left(margin))
    }
}

fn obstacle_hitbox(kind: ObstacleKind) -> Hitbox {
    let (half_w, half_h) = match kind {
        ObstacleKind::Pipe => (0.5, 20.0),
        ObstacleKind::Balloon => (0.4, 0.5),
        ObstacleKind::Silo => (0.6, 1.5),
        ObstacleKind::Turbine => (0.3, 1.6),
        ObstacleKind::CycloneBird => (0.35, 0.3),
        ObstacleKind::Tornado => (0.5, 0.9),
    };
    Hitbox { half_w, half_h }
}

/// Materialise a spawn request. Returns the entities created.
pub fn materialise<R: Rng + ?Sized>(
    world: &mut World,
    request: &SpawnRequest,
    env: &SpawnEnv,
    rng: &mut R,
) -> Vec<Entity> {
    match request {
        SpawnRequest::Obstacle(kind) => vec![spawn_obstacle(world, *kind, env, rng)],
        SpawnRequest::Collectible(kind) => {
            let y = rng.gen_range(SPAWN_MIN_HEIGHT..SPAWN_MAX_HEIGHT);
            vec![spawn_collectible(world, *kind, Position::new(SPAWNER_X, y), env)]
        }
        SpawnRequest::Helmet => {
            let y = rng.gen_range(SPAWN_MIN_HEIGHT..SPAWN_MAX_HEIGHT);
            let x = env.bounds.right - 1.0;
            vec![spawn_collectible(world, CollectibleKind::Helmet, Position::new(x, y), env)]
        }
        SpawnRequest::Football { y } => vec![spawn_football(world, *y, env)],
        SpawnRequest::GoalPost => vec![spawn_goal_post(world, env)],
        SpawnRequest::BallCarrier { position } => vec![spawn_ball_carrier(world, *position, env)],
        SpawnRequest::Wave { positions, .. } => positions
            .iter()
            .map(|pos| spawn_wave_bird(world, *pos, env))
            .collect(),
        SpawnRequest::ParentTornado => vec![spawn_parent_tornado(world, rng)],
    }
}

/// The player-controlled hawk at its home position.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        Player::default(),
        Position::new(PLAYER_HOME_X, 0.0),
        Hitbox {
            half_w: 0.35,
            half_h: 0.3,
        },
    ))
}

pub fn spawn_obstacle<R: Rng + ?Sized>(
    world: &mut World,
    kind: ObstacleKind,
    env: &SpawnEnv,
    rng: &mut R,
) -> Entity {
    let y = match kind {
        ObstacleKind::Silo => GROUND_SPAWN_HEIGHT,
        ObstacleKind::Turbine => TURBINE_SPAWN_HEIGHT,
        _ => rng.gen_range(SPAWN_MIN_HEIGHT..SPAWN_MAX_HEIGHT),
    };
    let margin = match kind {
        ObstacleKind::Pipe | ObstacleKind::Silo | ObstacleKind::Turbine => WIDE_DESPAWN_MARGIN,
        _ => DESPAWN_MARGIN,
    };

    let entity = world.spawn((
        Obstacle { kind },
        Position::new(SPAWNER_X, y),
        obstacle_hitbox(kind),
        env.scroller(),
        env.left_boundary(margin),
    ));

    let bob = match kind {
        ObstacleKind::Balloon if env.balloon_bob_amplitude > 0.0 => {
            Some((env.balloon_bob_amplitude, BALLOON_BOB_SPEED))
        }
        ObstacleKind::CycloneBird => Some((CYCLONE_BOB_AMPLITUDE, CYCLONE_BOB_FREQUENCY * PI)),
        _ => None,
    };
    if let Some((amplitude, angular_rate)) = bob {
        let _ = world.insert_one(
            entity,
            Bobbing {
                amplitude,
                angular_rate,
                elapsed: 0.0,
                base_y: y,
            },
        );
    }
    if kind == ObstacleKind::Pipe {
        let _ = world.insert_one(
            entity,
            PipeGap {
                half_height: PIPE_GAP_HALF_HEIGHT,
            },
        );
    }
    if env.score_gates {
        let _ = world.insert_one(entity, ScoreGate::default());
    }
    entity
}

pub fn spawn_collectible(
    world: &mut World,
    kind: CollectibleKind,
    position: Position,
    env: &SpawnEnv,
) -> Entity {
    world.spawn((
        Collectible { kind },
        position,
        Hitbox {
            half_w: 0.3,
            half_h: 0.3,
        },
        env.scroller(),
        env.left_boundary(DESPAWN_MARGIN),
    ))
}

/// A free football at the spawner. Leaving the field is handled by the
/// football system, which reports it, so no despawn boundary.
pub fn spawn_football(world: &mut World, y: f64, env: &SpawnEnv) -> Entity {
    world.spawn((
        Football::default(),
        Position::new(SPAWNER_X, y),
        Hitbox {
            half_w: 0.3,
            half_h: 0.25,
        },
        env.scroller(),
    ))
}

/// Goal posts enter just past the right edge; the hitbox is the opening.
pub fn spawn_goal_post(world: &mut World, env: &SpawnEnv) -> Entity {
    world.spawn((
        GoalPost {
            scored: false,
            opening_half_height: env.goal_opening_half_height,
        },
        Position::new(env.bounds.right + 0.5, SPAWN_MIN_HEIGHT + 1.25),
        Hitbox {
            half_w: 0.3,
            half_h: env.goal_opening_half_height,
        },
        env.scroller(),
        env.left_boundary(WIDE_DESPAWN_MARGIN),
    ))
}

pub fn spawn_ball_carrier(world: &mut World, position: Position, env: &SpawnEnv) -> Entity {
    world.spawn((
        BallCarrier {
            round_id: env.defense_round_id,
            resolved: false,
        },
        position,
        Hitbox {
            half_w: 0.4,
            half_h: 0.4,
        },
        env.scroller(),
        Bobbing {
            amplitude: CARRIER_BOB_AMPLITUDE,
            angular_rate: CARRIER_BOB_FREQUENCY * PI,
            elapsed: 0.0,
            base_y: position.y,
        },
    ))
}

pub fn spawn_wave_bird(world: &mut World, position: Position, env: &SpawnEnv) -> Entity {
    world.spawn((
        Obstacle {
            kind: ObstacleKind::CycloneBird,
        },
        WaveBird,
        position,
        obstacle_hitbox(ObstacleKind::CycloneBird),
        env.scroller(),
        env.left_boundary(DESPAWN_MARGIN),
        Bobbing {
            amplitude: CYCLONE_BOB_AMPLITUDE,
            angular_rate: CYCLONE_BOB_FREQUENCY * PI,
            elapsed: 0.0,
            base_y: position.y,
        },
    ))
}

/// Stationary Hard-mode tornado at the far left. Harmless itself.
pub fn spawn_parent_tornado<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Entity {
    let mid = (PARENT_TORNADO_MIN_Y + PARENT_TORNADO_MAX_Y) / 2.0;
    world.spawn((
        ParentTornado {
            emission_timer: 0.0,
            next_emission: rng
                .gen_range(TORNADO_MIN_EMISSION_INTERVAL..TORNADO_MAX_EMISSION_INTERVAL),
        },
        Position::new(PARENT_TORNADO_X, mid),
        Bobbing {
            amplitude: (PARENT_TORNADO_MAX_Y - PARENT_TORNADO_MIN_Y) / 2.0,
            angular_rate: PARENT_TORNADO_BOB_SPEED,
            elapsed: 0.0,
            base_y: mid,
        },
    ))
}

/// Small tornado thrown off by the parent. Travels right at its own speed.
pub fn spawn_small_tornado<R: Rng + ?Sized>(
    world: &mut World,
    origin: Position,
    bounds: &ScreenBounds,
    rng: &mut R,
) -> Entity {
    world.spawn((
        Obstacle {
            kind: ObstacleKind::Tornado,
        },
        origin,
        Hitbox {
            half_w: 0.4,
            half_h: 0.6,
        },
        Drift {
            speed: rng.gen_range(SMALL_TORNADO_MIN_SPEED..SMALL_TORNADO_MAX_SPEED),
        },
        DespawnBoundary::RightOf(bounds.despawn_right(DESPAWN_MARGIN)),
    ))
}
