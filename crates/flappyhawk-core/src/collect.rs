//! Collectible contract: what picking up each kind does to the player.

use serde::{Deserialize, Serialize};

use crate::components::Player;
use crate::constants::BOOST_DURATION;
use crate::enums::CollectibleKind;

/// Result of applying a collectible to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectOutcome {
    /// Points for the active mode's player score.
    pub points: u32,
    /// Health gained (0 when already at max).
    pub health_gained: u32,
    /// A helmet was picked up.
    pub helmet: bool,
    /// A wind boost started.
    pub boost_started: bool,
}

impl CollectibleKind {
    /// Apply this collectible's effect to `player`. The caller removes the
    /// collected entity regardless of the outcome.
    pub fn apply_effect(self, player: &mut Player) -> CollectOutcome {
        let before = player.health;
        match self {
            CollectibleKind::CornKernel => CollectOutcome {
                points: 1,
                ..Default::default()
            },
            CollectibleKind::Helmet => {
                player.gain_health(1);
                CollectOutcome {
                    health_gained: player.health - before,
                    helmet: true,
                    ..Default::default()
                }
            }
            CollectibleKind::WindBoost => {
                let was_full = player.is_at_max_health();
                player.gain_health(1);
                if !was_full {
                    player.boost_remaining = BOOST_DURATION;
                }
                CollectOutcome {
                    health_gained: player.health - before,
                    boost_started: !was_full,
                    ..Default::default()
                }
            }
        }
    }
}
