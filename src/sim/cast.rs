//! Catch resolution
//!
//! Pure geometry over the population: the line tip and each fish anchor live
//! in the same percent space, so no rendered view is consulted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawn::Population;
use super::species::Species;
use crate::clamp_point;
use crate::consts::CATCH_RADIUS;

/// Line-tip coordinate captured at the instant of reeling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastAttempt {
    pub line: Vec2,
}

impl CastAttempt {
    /// Build a cast, clamping the tip into the viewport
    pub fn new(line: Vec2) -> Self {
        Self {
            line: clamp_point(line),
        }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y))
    }
}

/// Outcome of one reel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CatchResult {
    Caught {
        fish_id: u32,
        species: Species,
        points: u32,
    },
    /// Nothing in range; `at` is where the splash goes
    Miss { at: Vec2 },
}

impl CatchResult {
    pub fn is_catch(&self) -> bool {
        matches!(self, CatchResult::Caught { .. })
    }

    pub fn points(&self) -> u32 {
        match self {
            CatchResult::Caught { points, .. } => *points,
            CatchResult::Miss { .. } => 0,
        }
    }
}

/// Resolve a cast with the default catch radius
pub fn resolve(cast: &CastAttempt, population: &Population) -> CatchResult {
    resolve_within(cast, population, CATCH_RADIUS)
}

/// Resolve a cast against a population snapshot
///
/// The first fish in spawn order strictly within `radius` is caught; at most
/// one fish per cast. The population is never modified.
pub fn resolve_within(cast: &CastAttempt, population: &Population, radius: f32) -> CatchResult {
    population
        .iter()
        .find(|fish| fish.anchor().distance(cast.line) < radius)
        .map(|fish| CatchResult::Caught {
            fish_id: fish.id,
            species: fish.species,
            points: fish.species.points,
        })
        .unwrap_or(CatchResult::Miss { at: cast.line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::FishInstance;
    use crate::sim::species::{SPECIES, SpeciesKind};

    fn single(x: f32, y: f32) -> Population {
        Population::from_fish(vec![FishInstance::new(0, SPECIES[2], y, x, 1.0)])
    }

    #[test]
    fn test_catch_in_range() {
        let result = resolve(&CastAttempt::at(51.0, 51.0), &single(50.0, 50.0));
        assert!(result.is_catch());
        assert_eq!(result.points(), 3);
    }

    #[test]
    fn test_miss_out_of_range() {
        let result = resolve(&CastAttempt::at(70.0, 50.0), &single(50.0, 50.0));
        assert_eq!(
            result,
            CatchResult::Miss {
                at: Vec2::new(70.0, 50.0)
            }
        );
    }

    #[test]
    fn test_radius_is_exclusive() {
        let result = resolve(&CastAttempt::at(60.0, 50.0), &single(50.0, 50.0));
        assert!(!result.is_catch());
    }

    #[test]
    fn test_empty_population_misses() {
        let result = resolve(&CastAttempt::at(50.0, 50.0), &Population::new());
        assert!(!result.is_catch());
        assert_eq!(result.points(), 0);
    }

    #[test]
    fn test_first_in_spawn_order_wins() {
        // Whale is closer but spawned later
        let population = Population::from_fish(vec![
            FishInstance::new(0, SPECIES[0], 50.0, 45.0, 1.0),
            FishInstance::new(1, SPECIES[4], 50.0, 50.0, 1.0),
        ]);
        match resolve(&CastAttempt::at(50.0, 50.0), &population) {
            CatchResult::Caught { fish_id, species, .. } => {
                assert_eq!(fish_id, 0);
                assert_eq!(species.kind, SpeciesKind::Fish);
            }
            other => panic!("expected catch, got {:?}", other),
        }
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn test_cast_clamped_at_boundary() {
        let cast = CastAttempt::at(-30.0, 140.0);
        assert_eq!(cast.line, Vec2::new(0.0, 100.0));
        let cast = CastAttempt::at(f32::NAN, 20.0);
        assert_eq!(cast.line, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_offscreen_fish_still_catchable() {
        // Transparent (left of -10) but still present
        let population = single(-15.0, 50.0);
        assert!(!population.get(0).is_some_and(|f| f.is_visible()));
        let result = resolve(&CastAttempt::at(0.0, 50.0), &population);
        assert!(!result.is_catch());
        let result = resolve_within(&CastAttempt::at(0.0, 50.0), &population, 20.0);
        assert!(result.is_catch());
    }
}
