//! A simple scripted pilot so runs can be played without an input device.
//!
//! Each tick it picks a target altitude from the snapshot and flaps when the
//! hawk is below it and not already climbing.

use flappyhawk_core::commands::PlayerCommand;
use flappyhawk_core::constants::DT;
use flappyhawk_core::enums::{ActorKind, GameMode, GamePhase, ObstacleKind, RoundState};
use flappyhawk_core::state::{ActorView, GameStateSnapshot};

/// Anything that turns snapshots into player input.
pub trait Controller: Send {
    fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// Obstacles further ahead than this are ignored.
const LOOKAHEAD: f64 = 4.0;
/// Vertical distance kept from non-pipe obstacles.
const DODGE_CLEARANCE: f64 = 1.5;
/// No flap while rising faster than this.
const MAX_CLIMB_SPEED: f64 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    cruise_altitude: f64,
    last_y: Option<f64>,
}

impl Autopilot {
    pub fn new(cruise_altitude: f64) -> Self {
        Self {
            cruise_altitude,
            last_y: None,
        }
    }

    /// Altitude the pilot wants to hold given what is on screen.
    pub fn target_altitude(&self, snapshot: &GameStateSnapshot) -> f64 {
        let Some(player) = &snapshot.player else {
            return self.cruise_altitude;
        };
        let px = player.position.x;
        let py = player.position.y;

        if snapshot.mode == GameMode::GameDay {
            let defending = snapshot
                .round
                .as_ref()
                .is_some_and(|round| round.state == RoundState::Defense);
            let objective = |kind: &ActorKind| match kind {
                ActorKind::BallCarrier => defending,
                ActorKind::Football { carried: false } => !defending,
                ActorKind::GoalPost => player.carrying_ball,
                _ => false,
            };
            if let Some(actor) = nearest_ahead(&snapshot.actors, px, objective) {
                return actor.position.y;
            }
        }

        let threat = nearest_ahead(&snapshot.actors, px, |kind| {
            matches!(kind, ActorKind::Obstacle(_) | ActorKind::ParentTornado)
        });
        match threat {
            Some(ActorView {
                kind: ActorKind::Obstacle(ObstacleKind::Pipe),
                position,
            }) => position.y,
            Some(actor) if (actor.position.y - py).abs() < DODGE_CLEARANCE => {
                if actor.position.y > py {
                    actor.position.y - DODGE_CLEARANCE
                } else {
                    actor.position.y + DODGE_CLEARANCE
                }
            }
            _ => self.cruise_altitude,
        }
    }
}

fn nearest_ahead(
    actors: &[ActorView],
    x: f64,
    wanted: impl Fn(&ActorKind) -> bool,
) -> Option<&ActorView> {
    actors
        .iter()
        .filter(|actor| wanted(&actor.kind))
        .filter(|actor| actor.position.x >= x && actor.position.x - x <= LOOKAHEAD)
        .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
}

impl Controller for Autopilot {
    fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != GamePhase::Active {
            self.last_y = None;
            return Vec::new();
        }
        let Some(player) = &snapshot.player else {
            return Vec::new();
        };
        let y = player.position.y;
        let climb = self.last_y.map_or(0.0, |last| (y - last) / DT);
        self.last_y = Some(y);

        if y < self.target_altitude(snapshot) && climb <= MAX_CLIMB_SPEED {
            vec![PlayerCommand::Flap]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flappyhawk_core::enums::GameDayDifficulty;
    use flappyhawk_core::state::{PlayerView, RoundView};
    use flappyhawk_core::types::Position;

    fn snapshot_at(y: f64) -> GameStateSnapshot {
        GameStateSnapshot {
            phase: GamePhase::Active,
            player: Some(PlayerView {
                position: Position::new(-4.0, y),
                health: 1,
                max_health: 3,
                has_helmet: false,
                carrying_ball: false,
            }),
            ..Default::default()
        }
    }

    fn actor(kind: ActorKind, x: f64, y: f64) -> ActorView {
        ActorView {
            kind,
            position: Position::new(x, y),
        }
    }

    #[test]
    fn flaps_below_cruise_altitude() {
        let mut pilot = Autopilot::new(0.0);
        let commands = pilot.decide(&snapshot_at(-1.0));
        assert!(matches!(commands.as_slice(), [PlayerCommand::Flap]));
    }

    #[test]
    fn holds_when_above_target() {
        let mut pilot = Autopilot::new(0.0);
        assert!(pilot.decide(&snapshot_at(1.0)).is_empty());
    }

    #[test]
    fn does_not_flap_while_climbing() {
        let mut pilot = Autopilot::new(2.0);
        pilot.decide(&snapshot_at(-1.0));
        assert!(pilot.decide(&snapshot_at(-0.5)).is_empty());
    }

    #[test]
    fn idle_outside_active_phase() {
        let mut pilot = Autopilot::new(0.0);
        let mut snapshot = snapshot_at(-3.0);
        snapshot.phase = GamePhase::Paused;
        assert!(pilot.decide(&snapshot).is_empty());
    }

    #[test]
    fn aims_for_pipe_gap() {
        let pilot = Autopilot::new(0.0);
        let mut snapshot = snapshot_at(0.0);
        snapshot.actors = vec![
            actor(ActorKind::Obstacle(ObstacleKind::Pipe), -2.0, 1.2),
            actor(ActorKind::Obstacle(ObstacleKind::Pipe), 2.0, -2.0),
        ];
        assert_eq!(pilot.target_altitude(&snapshot), 1.2);
    }

    #[test]
    fn dodges_obstacle_in_path() {
        let pilot = Autopilot::new(0.0);
        let mut snapshot = snapshot_at(0.0);
        snapshot.actors = vec![actor(ActorKind::Obstacle(ObstacleKind::Balloon), -1.0, 0.5)];
        assert_eq!(pilot.target_altitude(&snapshot), 0.5 - DODGE_CLEARANCE);
    }

    #[test]
    fn ignores_actors_behind() {
        let pilot = Autopilot::new(0.25);
        let mut snapshot = snapshot_at(0.0);
        snapshot.actors = vec![actor(ActorKind::Obstacle(ObstacleKind::Pipe), -6.0, 2.0)];
        assert_eq!(pilot.target_altitude(&snapshot), 0.25);
    }

    #[test]
    fn chases_carrier_on_defense() {
        let pilot = Autopilot::new(0.0);
        let mut snapshot = snapshot_at(0.0);
        snapshot.mode = GameMode::GameDay;
        snapshot.round = Some(RoundView {
            state: RoundState::Defense,
            difficulty: GameDayDifficulty::College,
            ..Default::default()
        });
        snapshot.actors = vec![
            actor(ActorKind::Football { carried: false }, -3.0, 2.0),
            actor(ActorKind::BallCarrier, -1.0, -1.5),
        ];
        assert_eq!(pilot.target_altitude(&snapshot), -1.5);
    }

    #[test]
    fn carries_ball_to_goal_post() {
        let pilot = Autopilot::new(0.0);
        let mut snapshot = snapshot_at(0.0);
        snapshot.mode = GameMode::GameDay;
        snapshot.round = Some(RoundView::default());
        if let Some(player) = snapshot.player.as_mut() {
            player.carrying_ball = true;
        }
        snapshot.actors = vec![actor(ActorKind::GoalPost, 0.0, -2.75)];
        assert_eq!(pilot.target_altitude(&snapshot), -2.75);
    }
}
