//! Game settings and tuning
//!
//! Persisted in LocalStorage on the web. Any field missing from stored JSON
//! falls back to its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::species::{SPECIES, Species, SpeciesKind};

/// What happens to a fish once it has been caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CatchPolicy {
    /// Caught fish keep swimming until the next spawn refresh and can be caught again
    #[default]
    Keep,
    /// Caught fish leave the population immediately
    RemoveOnCatch,
}

impl CatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatchPolicy::Keep => "Keep",
            CatchPolicy::RemoveOnCatch => "RemoveOnCatch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keep" => Some(CatchPolicy::Keep),
            "remove" | "removeoncatch" | "remove_on_catch" => Some(CatchPolicy::RemoveOnCatch),
            _ => None,
        }
    }
}

/// Invalid settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("catch radius must be positive and finite (got {0})")]
    CatchRadius(f32),
    #[error("species table is empty")]
    NoSpecies,
    #[error("{kind:?} rarity must be in (0, 1] (got {rarity})")]
    Rarity { kind: SpeciesKind, rarity: f32 },
    #[error("{kind:?} must be worth at least one point")]
    Points { kind: SpeciesKind },
    #[error("{kind:?} base speed must be finite (got {speed})")]
    Speed { kind: SpeciesKind, speed: f32 },
    #[error("could not store settings: {0}")]
    Storage(String),
}

/// Runtime game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of one game in seconds
    pub game_duration_secs: u32,

    // === Timer cadences ===
    /// Fish motion tick
    pub motion_tick_ms: u32,
    /// Full population replacement
    pub spawn_refresh_ms: u32,
    /// Countdown step (one game second)
    pub countdown_ms: u32,

    // === Catching ===
    /// Distance from the line tip within which a fish is caught
    pub catch_radius: f32,
    pub catch_policy: CatchPolicy,

    /// Species table, in spawn order
    pub species: Vec<Species>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,

            motion_tick_ms: MOTION_TICK_MS,
            spawn_refresh_ms: SPAWN_REFRESH_MS,
            countdown_ms: COUNTDOWN_MS,

            catch_radius: CATCH_RADIUS,
            catch_policy: CatchPolicy::Keep,

            species: SPECIES.to_vec(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("game_duration_secs", self.game_duration_secs),
            ("motion_tick_ms", self.motion_tick_ms),
            ("spawn_refresh_ms", self.spawn_refresh_ms),
            ("countdown_ms", self.countdown_ms),
        ] {
            if value == 0 {
                return Err(SettingsError::Zero { field });
            }
        }

        if !(self.catch_radius.is_finite() && self.catch_radius > 0.0) {
            return Err(SettingsError::CatchRadius(self.catch_radius));
        }

        if self.species.is_empty() {
            return Err(SettingsError::NoSpecies);
        }
        for species in &self.species {
            if !(species.rarity > 0.0 && species.rarity <= 1.0) {
                return Err(SettingsError::Rarity {
                    kind: species.kind,
                    rarity: species.rarity,
                });
            }
            if species.points == 0 {
                return Err(SettingsError::Points { kind: species.kind });
            }
            if !species.base_speed.is_finite() {
                return Err(SettingsError::Speed {
                    kind: species.kind,
                    speed: species.base_speed,
                });
            }
        }
        Ok(())
    }

    /// Motion timestep in seconds
    pub fn motion_dt(&self) -> f32 {
        self.motion_tick_ms as f32 / 1000.0
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ocean_fisher_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| SettingsError::Storage("LocalStorage unavailable".into()))?;

        let json = self.to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| SettingsError::Storage(format!("{:?}", e)))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), SettingsError> {
        // No-op for native
        Ok(())
    }

    /// Validate settings JSON and persist it
    ///
    /// Nothing is stored when validation fails.
    pub fn apply_json(json: &str) -> Result<Self, SettingsError> {
        let settings = Self::from_json(json)?;
        settings.save()?;
        Ok(settings)
    }
}
