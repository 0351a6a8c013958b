//! Ocean Fisher - A browser fishing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, catch resolution, game state)
//! - `settings`: Runtime tuning loaded from JSON / LocalStorage
//! - `web`: wasm-bindgen surface for the JS presentation layer

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{CatchPolicy, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// All positions are in percent-of-viewport space: x runs 0..100 left to
/// right, y runs 0..100 top to bottom.
pub mod consts {
    /// Motion tick cadence; species speeds are expressed per tick of this length
    pub const MOTION_TICK_MS: u32 = 50;
    /// Reference motion timestep in seconds
    pub const MOTION_DT: f32 = MOTION_TICK_MS as f32 / 1000.0;
    /// Full population replacement cadence
    pub const SPAWN_REFRESH_MS: u32 = 10_000;
    /// Countdown cadence
    pub const COUNTDOWN_MS: u32 = 1_000;
    /// Length of one game
    pub const GAME_DURATION_SECS: u32 = 120;

    /// Fish lanes stay between 20% and 80% of the viewport height
    pub const DEPTH_MIN: f32 = 20.0;
    pub const DEPTH_MAX: f32 = 80.0;
    /// Per-instance speed variance
    pub const SPEED_MULTIPLIER_MIN: f32 = 0.75;
    pub const SPEED_MULTIPLIER_MAX: f32 = 1.25;
    /// Spawn offset range (off-screen left)
    pub const SPAWN_OFFSET_MAX: f32 = 100.0;
    /// Candidate instances per species per refresh
    pub const MAX_INSTANCES_PER_SPECIES: u32 = 3;

    /// Right edge; anything past it wraps
    pub const VIEWPORT_EDGE: f32 = 100.0;
    /// Re-entry position after wrapping off the right edge
    pub const WRAP_REENTRY: f32 = -20.0;
    /// Fish left of this are drawn fully transparent (still catchable)
    pub const VISIBLE_FROM: f32 = -10.0;

    /// Catch radius around the line tip (percent units, exclusive)
    pub const CATCH_RADIUS: f32 = 10.0;

    /// Reel-back animation: 20 steps of 20ms
    pub const REEL_STEP_MS: u32 = 20;
    pub const REEL_STEPS: u32 = 20;

    /// Catches shown in the score panel
    pub const RECENT_CATCHES: usize = 5;

    /// Miss splash lifetime
    pub const SPLASH_MS: u32 = 1_000;

    /// Largest frame delta fed into the timers (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: u32 = 250;
}

/// Clamp a single percent-space axis into [0, 100]; NaN collapses to 0
#[inline]
pub fn clamp_percent(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

/// Clamp a percent-space point into the viewport square
#[inline]
pub fn clamp_point(p: Vec2) -> Vec2 {
    Vec2::new(clamp_percent(p.x), clamp_percent(p.y))
}
