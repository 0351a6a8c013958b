//! wasm-bindgen surface for the JS presentation layer
//!
//! The page owns one `WebSession`, feeds it frame deltas and pointer
//! positions already converted to percent space, and renders `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::settings::{CatchPolicy, Settings};
use crate::sim::Session;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by the host page
        return;
    }
    log::info!("Ocean Fisher core loaded");
}

#[wasm_bindgen]
pub struct WebSession {
    inner: Session,
}

#[wasm_bindgen]
impl WebSession {
    /// New idle session; `seed` of 0 picks one from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebSession {
        let seed = if seed > 0.0 { seed as u64 } else { js_sys::Date::now() as u64 };
        log::info!("Session created with seed: {}", seed);
        WebSession {
            inner: Session::new(Settings::load(), seed),
        }
    }

    /// Validate, persist and apply settings JSON; the current game is discarded
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::apply_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner = Session::new(settings, self.inner.seed());
        Ok(())
    }

    /// Accepts "keep" or "remove"; returns false for anything else
    #[wasm_bindgen(js_name = setCatchPolicy)]
    pub fn set_catch_policy(&mut self, policy: &str) -> bool {
        match CatchPolicy::from_str(policy) {
            Some(policy) => {
                self.inner.set_catch_policy(policy);
                true
            }
            None => {
                log::warn!("Unknown catch policy: {}", policy);
                false
            }
        }
    }

    pub fn start(&mut self) {
        self.inner.start();
    }

    /// "Play Again" with a fresh clock seed
    pub fn restart(&mut self) {
        self.inner.restart(js_sys::Date::now() as u64);
    }

    /// Advance by a frame delta in milliseconds
    pub fn update(&mut self, dt_ms: f64) {
        let dt_ms = if dt_ms.is_finite() && dt_ms > 0.0 { dt_ms.round() as u32 } else { 0 };
        self.inner.update(dt_ms);
    }

    pub fn cast(&mut self) -> bool {
        self.inner.cast()
    }

    pub fn aim(&mut self, x: f32, y: f32) {
        self.inner.aim(x, y);
    }

    /// Returns true on a catch, false on a miss or when reeling was not possible
    pub fn reel(&mut self) -> bool {
        self.inner.reel().is_some_and(|r| r.is_catch())
    }

    pub fn running(&self) -> bool {
        self.inner.state().running
    }

    pub fn score(&self) -> f64 {
        self.inner.state().score as f64
    }

    #[wasm_bindgen(js_name = timeLeft)]
    pub fn time_left(&self) -> u32 {
        self.inner.state().time_left_secs
    }

    /// Current view as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.inner.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = eventsJson)]
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.inner.drain_events()).unwrap_or_else(|e| {
            log::error!("Event serialization failed: {}", e);
            String::from("[]")
        })
    }
}
