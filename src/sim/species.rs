//! Fish species table
//!
//! Species are process-wide constants. Instances copy the entry they were
//! spawned from, so a custom table from `Settings` works the same way.

use serde::{Deserialize, Serialize};

/// Opaque glyph id for a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesKind {
    Fish,
    Tropical,
    Puffer,
    Shark,
    Whale,
}

impl SpeciesKind {
    /// Glyph the presentation layer draws for this species
    pub fn glyph(&self) -> &'static str {
        match self {
            SpeciesKind::Fish => "🐟",
            SpeciesKind::Tropical => "🐠",
            SpeciesKind::Puffer => "🐡",
            SpeciesKind::Shark => "🦈",
            SpeciesKind::Whale => "🐋",
        }
    }
}

/// Horizontal facing, derived from the sign of a species' base speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Right,
    /// Sprite mirrored and rotated 180 degrees
    Left,
}

impl Facing {
    pub fn from_speed(speed: f32) -> Self {
        if speed > 0.0 { Facing::Right } else { Facing::Left }
    }

    /// Sprite rotation in degrees
    pub fn rotation_degrees(&self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::Left => 180.0,
        }
    }

    pub fn mirrored(&self) -> bool {
        *self == Facing::Left
    }
}

/// An immutable fish archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub kind: SpeciesKind,
    /// Score awarded per catch
    pub points: u32,
    /// Percent of viewport width per motion tick (sign = direction)
    pub base_speed: f32,
    /// Per-candidate spawn probability in (0, 1]
    pub rarity: f32,
}

impl Species {
    pub const fn new(kind: SpeciesKind, points: u32, base_speed: f32, rarity: f32) -> Self {
        Self {
            kind,
            points,
            base_speed,
            rarity,
        }
    }

    pub fn glyph(&self) -> &'static str {
        self.kind.glyph()
    }

    pub fn facing(&self) -> Facing {
        Facing::from_speed(self.base_speed)
    }
}

/// Built-in species table, common to rare
pub const SPECIES: [Species; 5] = [
    Species::new(SpeciesKind::Fish, 1, 2.0, 1.0),
    Species::new(SpeciesKind::Tropical, 2, 3.0, 0.8),
    Species::new(SpeciesKind::Puffer, 3, 1.0, 0.6),
    Species::new(SpeciesKind::Shark, 5, 4.0, 0.3),
    Species::new(SpeciesKind::Whale, 10, 1.0, 0.1),
];
