//! Game state aggregate
//!
//! Passed into and returned from the reducers; the session holds the only
//! mutable copy.

use serde::{Deserialize, Serialize};

use super::cast::CatchResult;
use super::species::Species;

/// Score, countdown and catch log for one game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Never decreases within a game
    pub score: u64,
    pub time_left_secs: u32,
    /// Species caught, in catch order
    pub catches: Vec<Species>,
    pub running: bool,
}

impl GameState {
    /// Fold a catch result into the state
    ///
    /// Misses leave the state untouched, as does anything arriving after the
    /// game has ended.
    pub fn apply(mut self, result: &CatchResult) -> GameState {
        if !self.running {
            return self;
        }
        if let CatchResult::Caught { species, points, .. } = result {
            self.score = self.score.saturating_add(u64::from(*points));
            self.catches.push(*species);
        }
        self
    }

    pub fn is_over(&self) -> bool {
        !self.running && self.time_left_secs == 0
    }

    /// Most recent catches, oldest first
    pub fn recent_catches(&self, n: usize) -> &[Species] {
        let start = self.catches.len().saturating_sub(n);
        &self.catches[start..]
    }
}
