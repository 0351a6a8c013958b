//! Fish motion
//!
//! Species speeds are tuned per 50ms tick. Other timesteps scale linearly so
//! the swim speed on screen stays the same.

use super::spawn::{FishInstance, Population};
use crate::consts::*;

/// Advance one fish by `dt` seconds
///
/// Anything pushed past the right edge re-enters at `WRAP_REENTRY`, never at
/// its original spawn offset.
pub fn advance(fish: &FishInstance, dt: f32) -> FishInstance {
    debug_assert!(
        fish.within_spawn_ranges(),
        "fish {} outside spawn ranges: depth={} multiplier={}",
        fish.id,
        fish.depth_percent,
        fish.speed_multiplier
    );

    let delta = fish.velocity() * (dt / MOTION_DT);
    let mut position = fish.position_percent + delta;
    if position > VIEWPORT_EDGE {
        position = WRAP_REENTRY;
    }

    FishInstance {
        position_percent: position,
        ..*fish
    }
}

/// Advance a whole population by one tick
///
/// Every instance is computed from the pre-tick snapshot; fish never interact.
pub fn advance_population(population: &Population, dt: f32) -> Population {
    population.iter().map(|fish| advance(fish, dt)).collect()
}
