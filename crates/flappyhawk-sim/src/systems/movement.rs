//! Kinematic integration for scrolling, drifting and bobbing actors.

use hecs::World;

use flappyhawk_core::components::{Bobbing, Drift, Scroller};
use flappyhawk_core::types::Position;

/// Scrollers move left at their pushed speed; drifters at their own.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, scroller)) in world.query_mut::<(&mut Position, &Scroller)>() {
        pos.x -= scroller.speed * dt;
    }
    for (_entity, (pos, drift)) in world.query_mut::<(&mut Position, &Drift)>() {
        pos.x += drift.speed * dt;
    }
}

/// Sinusoidal vertical motion around each actor's spawn height.
pub fn bob(world: &mut World, dt: f64) {
    for (_entity, (pos, bobbing)) in world.query_mut::<(&mut Position, &mut Bobbing)>() {
        bobbing.elapsed += dt;
        pos.y = bobbing.base_y + (bobbing.elapsed * bobbing.angular_rate).sin() * bobbing.amplitude;
    }
}

/// Push a new scroll speed to every live scrolling actor.
pub fn set_scroll_speed(world: &mut World, speed: f64) -> usize {
    let mut updated = 0;
    for (_entity, scroller) in world.query_mut::<&mut Scroller>() {
        scroller.speed = speed;
        updated += 1;
    }
    updated
}
