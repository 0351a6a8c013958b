//! Countdown clock

use super::state::GameState;

/// Fresh state for a new game of `duration_secs`
pub fn reset(duration_secs: u32) -> GameState {
    GameState {
        score: 0,
        time_left_secs: duration_secs,
        catches: Vec::new(),
        running: duration_secs > 0,
    }
}

/// One second of countdown
///
/// Terminal states come back unchanged; the counter never goes negative.
pub fn tick(mut state: GameState) -> GameState {
    if !state.running {
        return state;
    }
    state.time_left_secs = state.time_left_secs.saturating_sub(1);
    if state.time_left_secs == 0 {
        state.running = false;
        log::info!("Time up, final score {}", state.score);
    }
    state
}
