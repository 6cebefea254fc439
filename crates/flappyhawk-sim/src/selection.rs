//! Weighted discrete choice over a declared order.
//!
//! Weights are treated as unnormalised cumulative thresholds: one uniform
//! draw in [0, 1) walks the entries in order and the first entry whose
//! running total exceeds the draw wins. Entries may be empty (a disabled
//! kind); if the draw lands on one, or past the total, the first non-empty
//! entry is used instead.

use rand::Rng;

use flappyhawk_core::config::Tuning;
use flappyhawk_core::enums::{CollectibleKind, ObstacleKind};

#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(f64, Option<T>)>,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy> WeightedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, weight: f64, item: Option<T>) -> &mut Self {
        self.entries.push((weight, item));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a draw in [0, 1) against the table. `None` only when every
    /// entry is empty.
    pub fn pick(&self, draw: f64) -> Option<T> {
        let mut cumulative = 0.0;
        for (weight, item) in &self.entries {
            cumulative += weight;
            if draw < cumulative {
                if let Some(item) = item {
                    return Some(*item);
                }
            }
        }
        self.entries.iter().find_map(|(_, item)| *item)
    }

    /// Consume one draw from `rng` and pick.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        self.pick(rng.gen::<f64>())
    }
}

/// Obstacle pool in declared order. Tornadoes only join when `tornadoes`.
pub fn obstacle_table(tuning: &Tuning, tornadoes: bool) -> WeightedTable<ObstacleKind> {
    let mut kinds = vec![
        ObstacleKind::Pipe,
        ObstacleKind::Balloon,
        ObstacleKind::Silo,
        ObstacleKind::Turbine,
        ObstacleKind::CycloneBird,
    ];
    if tornadoes {
        kinds.push(ObstacleKind::Tornado);
    }
    let mut table = WeightedTable::new();
    for kind in kinds {
        let enabled = !tuning.disabled_obstacles.contains(&kind);
        table.push(tuning.weights.obstacle(kind), enabled.then_some(kind));
    }
    table
}

/// Collectible pool in declared order.
pub fn collectible_table(tuning: &Tuning) -> WeightedTable<CollectibleKind> {
    let mut table = WeightedTable::new();
    for kind in [
        CollectibleKind::CornKernel,
        CollectibleKind::Helmet,
        CollectibleKind::WindBoost,
    ] {
        let enabled = !tuning.disabled_collectibles.contains(&kind);
        table.push(tuning.weights.collectible(kind), enabled.then_some(kind));
    }
    table
}
