//! Fish spawning
//!
//! A population is generated in one batch and fully replaced on the next
//! refresh. Nothing carries over between batches, ids included.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::species::{Species, SpeciesKind};
use crate::consts::*;

/// One spawned fish
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishInstance {
    /// Unique within the current population
    pub id: u32,
    pub species: Species,
    /// Vertical lane, fixed for the instance's lifetime
    pub depth_percent: f32,
    /// Horizontal position, advanced every motion tick
    pub position_percent: f32,
    /// Fixed speed variance applied to the species base speed
    pub speed_multiplier: f32,
}

impl FishInstance {
    pub fn new(
        id: u32,
        species: Species,
        depth_percent: f32,
        position_percent: f32,
        speed_multiplier: f32,
    ) -> Self {
        Self {
            id,
            species,
            depth_percent,
            position_percent,
            speed_multiplier,
        }
    }

    /// Signed displacement per reference motion tick
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.species.base_speed * self.speed_multiplier
    }

    /// On-screen anchor used for hit testing
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.position_percent, self.depth_percent)
    }

    pub fn is_visible(&self) -> bool {
        self.position_percent >= VISIBLE_FROM
    }

    /// Whether the lifetime-fixed fields are inside the ranges the spawner produces
    pub fn within_spawn_ranges(&self) -> bool {
        (DEPTH_MIN..=DEPTH_MAX).contains(&self.depth_percent)
            && (SPEED_MULTIPLIER_MIN..=SPEED_MULTIPLIER_MAX).contains(&self.speed_multiplier)
    }
}

/// All live fish, in spawn order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    fish: Vec<FishInstance>,
}

impl Population {
    pub fn new() -> Self {
        Self { fish: Vec::new() }
    }

    pub fn from_fish(fish: Vec<FishInstance>) -> Self {
        Self { fish }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FishInstance> {
        self.fish.iter()
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&FishInstance> {
        self.fish.iter().find(|f| f.id == id)
    }

    /// Number of live instances of a species
    pub fn count_of(&self, kind: SpeciesKind) -> usize {
        self.fish.iter().filter(|f| f.species.kind == kind).count()
    }

    /// Copy of this population with one fish taken out (order preserved)
    pub fn without(&self, id: u32) -> Self {
        Self {
            fish: self.fish.iter().filter(|f| f.id != id).copied().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a FishInstance;
    type IntoIter = std::slice::Iter<'a, FishInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.fish.iter()
    }
}

impl FromIterator<FishInstance> for Population {
    fn from_iter<I: IntoIterator<Item = FishInstance>>(iter: I) -> Self {
        Self {
            fish: iter.into_iter().collect(),
        }
    }
}

/// Generate a fresh population from a species table
///
/// Each species gets 1-3 candidate slots; each slot spawns a fish with
/// probability equal to the species rarity. Rarity is a per-candidate chance,
/// not a quota, so a refresh can legitimately contain no whales at all.
pub fn generate<R: Rng + ?Sized>(table: &[Species], rng: &mut R) -> Population {
    let mut fish = Vec::with_capacity(table.len() * MAX_INSTANCES_PER_SPECIES as usize);
    let mut next_id = 0u32;

    for species in table {
        let candidates = rng.random_range(1..=MAX_INSTANCES_PER_SPECIES);
        for _ in 0..candidates {
            if rng.random::<f32>() < species.rarity {
                let depth = rng.random::<f32>() * (DEPTH_MAX - DEPTH_MIN) + DEPTH_MIN;
                let position = -(rng.random::<f32>() * SPAWN_OFFSET_MAX);
                let multiplier = rng.random::<f32>()
                    * (SPEED_MULTIPLIER_MAX - SPEED_MULTIPLIER_MIN)
                    + SPEED_MULTIPLIER_MIN;

                fish.push(FishInstance::new(next_id, *species, depth, position, multiplier));
                next_id += 1;
            }
        }
    }

    Population::from_fish(fish)
}
