//! Player contact resolution.
//!
//! Contacts use enter semantics: only pairs that start overlapping this
//! tick have an effect, so sitting inside an obstacle costs one health,
//! not one per tick. The set of last tick's contacts is owned by the engine.

use std::collections::BTreeSet;

use hecs::{Entity, World};

use flappyhawk_core::components::*;
use flappyhawk_core::events::GameEvent;
use flappyhawk_core::types::{Position, ScreenBounds};

use crate::actor_events::ActorEvent;
use crate::systems::football;
use crate::systems::overlaps;

/// Something the player can be touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Contact {
    Ground,
    Actor(Entity),
}

/// What the engine must act on after contacts resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Health reached zero this tick.
    pub died: bool,
    pub helmets_collected: u32,
}

/// Pipes are solid everywhere except the gap around their centre.
fn touches(
    player_pos: &Position,
    player_box: &Hitbox,
    pos: &Position,
    hitbox: &Hitbox,
    gap: Option<&PipeGap>,
) -> bool {
    if !overlaps(player_pos, player_box, pos, hitbox) {
        return false;
    }
    match gap {
        Some(gap) => (player_pos.y - pos.y).abs() + player_box.half_h > gap.half_height,
        None => true,
    }
}

pub fn run(
    world: &mut World,
    bounds: &ScreenBounds,
    contacts: &mut BTreeSet<Contact>,
    actor_events: &mut Vec<ActorEvent>,
    game_events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    let Some((player, player_pos, player_box)) = world
        .query::<(&Player, &Position, &Hitbox)>()
        .iter()
        .next()
        .map(|(entity, (_, pos, hitbox))| (entity, *pos, *hitbox))
    else {
        contacts.clear();
        return outcome;
    };

    let mut current = BTreeSet::new();
    if player_pos.y - player_box.half_h <= bounds.bottom {
        current.insert(Contact::Ground);
    }
    for (entity, (pos, hitbox, gap)) in world
        .query::<(&Position, &Hitbox, Option<&PipeGap>)>()
        .iter()
    {
        if entity != player && touches(&player_pos, &player_box, pos, hitbox, gap) {
            current.insert(Contact::Actor(entity));
        }
    }

    let entered: Vec<Contact> = current.difference(contacts).copied().collect();
    despawn_buffer.clear();
    for contact in entered {
        let entity = match contact {
            Contact::Ground => {
                outcome.died |= damage(world, player, game_events);
                continue;
            }
            Contact::Actor(entity) => entity,
        };

        if world.get::<&Obstacle>(entity).is_ok() {
            outcome.died |= damage(world, player, game_events);
            continue;
        }

        let collectible = world.get::<&Collectible>(entity).map(|c| c.kind).ok();
        if let Some(kind) = collectible {
            let result = match world.get::<&mut Player>(player) {
                Ok(mut p) => {
                    let result = kind.apply_effect(&mut p);
                    if result.health_gained > 0 {
                        game_events.push(GameEvent::PlayerHealed { health: p.health });
                    }
                    if result.helmet {
                        game_events.push(GameEvent::HelmetCollected { health: p.health });
                    }
                    result
                }
                Err(_) => continue,
            };
            if result.points > 0 {
                game_events.push(GameEvent::CornCollected);
                actor_events.push(ActorEvent::Points(result.points));
            }
            if result.helmet {
                outcome.helmets_collected += 1;
            }
            if result.boost_started {
                game_events.push(GameEvent::WindBoost);
            }
            despawn_buffer.push(entity);
            continue;
        }

        let loose_ball = world.get::<&Football>(entity).map(|b| !b.carried).ok();
        if loose_ball == Some(true) {
            football::carry(world, entity);
            game_events.push(GameEvent::FootballCarried);
            continue;
        }

        let carrier = world.get::<&mut BallCarrier>(entity).ok().and_then(|mut c| {
            if c.resolved {
                None
            } else {
                c.resolved = true;
                Some(c.round_id)
            }
        });
        if let Some(round_id) = carrier {
            log::info!("Ball carrier caught (round {})", round_id);
            actor_events.push(ActorEvent::DefenseResolved { round_id, won: true });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        current.remove(&Contact::Actor(entity));
        let _ = world.despawn(entity);
    }
    *contacts = current;
    outcome
}

/// Returns true if this hit took the last point of health.
fn damage(world: &mut World, player: Entity, game_events: &mut Vec<GameEvent>) -> bool {
    let Ok(mut p) = world.get::<&mut Player>(player) else {
        return false;
    };
    if p.health == 0 {
        return false;
    }
    let health = p.take_damage();
    game_events.push(GameEvent::PlayerDamaged { health });
    health == 0
}

/// Iowa: an obstacle whose trailing edge passes the player scores once.
pub fn score_passed_obstacles(world: &mut World, actor_events: &mut Vec<ActorEvent>) {
    let Some(player_x) = world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.x)
    else {
        return;
    };
    for (_entity, (gate, pos, hitbox)) in
        world.query_mut::<(&mut ScoreGate, &Position, &Hitbox)>()
    {
        if !gate.passed && pos.x + hitbox.half_w < player_x {
            gate.passed = true;
            actor_events.push(ActorEvent::Points(1));
        }
    }
}
