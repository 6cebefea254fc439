//! Geometric layouts for cyclone-bird waves.

use rand::Rng;

use flappyhawk_core::constants::{SPAWN_MAX_HEIGHT, SPAWN_MIN_HEIGHT};
use flappyhawk_core::enums::Formation;
use flappyhawk_core::types::Position;

/// Positions for `count` birds laid out in `formation` around `base`.
pub fn formation_positions<R: Rng + ?Sized>(
    formation: Formation,
    count: u32,
    base: Position,
    rng: &mut R,
) -> Vec<Position> {
    let half = count as f64 / 2.0;
    (0..count)
        .map(|i| {
            let i = i as f64;
            match formation {
                Formation::Line => base.offset(0.0, (i - half) * 1.5),
                Formation::Staggered => {
                    base.offset((i - half) * 1.5, rng.gen_range(-0.4..0.4))
                }
                Formation::Scatter => {
                    base.offset(rng.gen_range(-2.0..2.0), rng.gen_range(-1.5..1.5))
                }
                Formation::Diagonal => {
                    let step = i * 0.7;
                    base.offset(step * 0.3, step * 0.6)
                }
                Formation::Random => base.offset(
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(SPAWN_MIN_HEIGHT..SPAWN_MAX_HEIGHT),
                ),
            }
        })
        .collect()
}
