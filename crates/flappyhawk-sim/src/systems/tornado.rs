//! Parent tornado emission.

use hecs::World;
use rand::Rng;

use flappyhawk_core::components::ParentTornado;
use flappyhawk_core::constants::{TORNADO_MAX_EMISSION_INTERVAL, TORNADO_MIN_EMISSION_INTERVAL};
use flappyhawk_core::types::{Position, ScreenBounds};

use crate::world_setup;

/// Every 3–5 s the parent throws off a small right-moving tornado.
/// Returns how many were emitted.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    dt: f64,
    bounds: &ScreenBounds,
    rng: &mut R,
) -> usize {
    let mut origins = Vec::new();
    for (_entity, (parent, pos)) in world.query_mut::<(&mut ParentTornado, &Position)>() {
        parent.emission_timer += dt;
        if parent.emission_timer >= parent.next_emission {
            parent.emission_timer = 0.0;
            parent.next_emission =
                rng.gen_range(TORNADO_MIN_EMISSION_INTERVAL..TORNADO_MAX_EMISSION_INTERVAL);
            origins.push(*pos);
        }
    }
    for origin in &origins {
        world_setup::spawn_small_tornado(world, *origin, bounds, rng);
    }
    origins.len()
}
