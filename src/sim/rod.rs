//! Fishing rod: cast, aim, reel
//!
//! The reel-back is a steppable interpolation rather than a repeating
//! callback, so it can be advanced synchronously.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cast::CastAttempt;
use crate::clamp_point;
use crate::consts::{REEL_STEP_MS, REEL_STEPS};

/// Line retracting toward the surface after a reel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReelAnimation {
    /// Line depth when the reel began
    pub start_y: f32,
    /// Steps completed, 0..=REEL_STEPS
    pub step: u32,
}

impl ReelAnimation {
    pub fn new(start_y: f32) -> Self {
        Self { start_y, step: 0 }
    }

    /// Line depth after `step` steps
    pub fn y_at(&self, step: u32) -> f32 {
        if step >= REEL_STEPS {
            return 0.0;
        }
        let progress = step as f32 / REEL_STEPS as f32;
        self.start_y * (1.0 - progress)
    }

    /// Line depth `elapsed_ms` after the reel began
    pub fn sample(&self, elapsed_ms: u32) -> f32 {
        self.y_at(elapsed_ms / REEL_STEP_MS)
    }

    pub fn y(&self) -> f32 {
        self.y_at(self.step)
    }

    /// Advance one step; returns true once the line is fully in
    pub fn advance(&mut self) -> bool {
        self.step = (self.step + 1).min(REEL_STEPS);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.step >= REEL_STEPS
    }
}

/// Rod phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RodPhase {
    Idle,
    /// Line out, following the pointer
    Casting,
    Reeling(ReelAnimation),
}

/// The player's rod and line tip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rod {
    pub phase: RodPhase,
    /// Line tip in percent space
    pub tip: Vec2,
}

impl Default for Rod {
    fn default() -> Self {
        Self {
            phase: RodPhase::Idle,
            tip: Vec2::new(50.0, 0.0),
        }
    }
}

impl Rod {
    /// Put the line out; only accepted while idle
    pub fn cast(&mut self) -> bool {
        if self.phase != RodPhase::Idle {
            return false;
        }
        self.phase = RodPhase::Casting;
        true
    }

    /// Move the line tip while casting
    pub fn aim(&mut self, target: Vec2) {
        if self.phase == RodPhase::Casting {
            self.tip = clamp_point(target);
        }
    }

    /// Start reeling; returns the cast to resolve at the current tip
    pub fn reel(&mut self) -> Option<CastAttempt> {
        if self.phase != RodPhase::Casting {
            return None;
        }
        self.phase = RodPhase::Reeling(ReelAnimation::new(self.tip.y));
        Some(CastAttempt::new(self.tip))
    }

    /// Advance the reel animation by one step
    ///
    /// Returns true on the step that brings the line fully in.
    pub fn step_reel(&mut self) -> bool {
        let RodPhase::Reeling(mut anim) = self.phase else {
            return false;
        };
        if anim.advance() {
            self.phase = RodPhase::Idle;
            self.tip.y = 0.0;
            true
        } else {
            self.tip.y = anim.y();
            self.phase = RodPhase::Reeling(anim);
            false
        }
    }

    pub fn is_reeling(&self) -> bool {
        matches!(self.phase, RodPhase::Reeling(_))
    }

    /// Drop any in-flight reel and pull the line in
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
