//! Game session
//!
//! Owns the game state, the population, the rod and the seeded RNG, and runs
//! the fixed-rate timers from elapsed frame time. This is the single mutator
//! the presentation layer talks to.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::cast::{CatchResult, resolve_within};
use super::clock;
use super::motion::advance_population;
use super::rod::{Rod, RodPhase};
use super::spawn::{Population, generate};
use super::species::Species;
use super::state::GameState;
use crate::consts::{MAX_FRAME_MS, RECENT_CATCHES, REEL_STEP_MS, SPLASH_MS};
use crate::settings::{CatchPolicy, Settings};

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEvent {
    Started { seed: u64 },
    PopulationRefreshed { count: usize },
    Caught { fish_id: u32, species: Species, score: u64 },
    Splash { at: Vec2 },
    GameOver { score: u64, catches: usize },
}

/// Transient miss marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Splash {
    pub at: Vec2,
    pub remaining_ms: u32,
}

/// Render-ready view of a fish
#[derive(Debug, Clone, Serialize)]
pub struct FishView {
    pub id: u32,
    pub glyph: &'static str,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub mirrored: bool,
    pub visible: bool,
}

/// Render-ready view of the whole session
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub time_left_secs: u32,
    pub running: bool,
    pub catches: Vec<&'static str>,
    /// Last few catches for the score panel, oldest first
    pub recent: Vec<&'static str>,
    pub fish: Vec<FishView>,
    pub line: Vec2,
    pub casting: bool,
    pub reeling: bool,
    pub splashes: Vec<Splash>,
}

/// One player's game, start to finish and again
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    population: Population,
    rod: Rod,
    splashes: Vec<Splash>,
    events: Vec<SessionEvent>,
    // Timer accumulators (ms)
    countdown_acc: u32,
    spawn_acc: u32,
    motion_acc: u32,
    reel_acc: u32,
}

impl Session {
    /// Create an idle session; nothing runs until `start`
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = GameState {
            time_left_secs: settings.game_duration_secs,
            ..GameState::default()
        };
        Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state,
            population: Population::new(),
            rod: Rod::default(),
            splashes: Vec::new(),
            events: Vec::new(),
            countdown_acc: 0,
            spawn_acc: 0,
            motion_acc: 0,
            reel_acc: 0,
        }
    }

    /// Start (or replay) a game, continuing the current RNG stream
    pub fn start(&mut self) {
        self.state = clock::reset(self.settings.game_duration_secs);
        self.rod.reset();
        self.splashes.clear();
        self.cancel_timers();
        self.refresh_population();

        log::info!(
            "Game started (seed {}, {}s, {} fish)",
            self.seed,
            self.state.time_left_secs,
            self.population.len()
        );
        self.events.push(SessionEvent::Started { seed: self.seed });
    }

    /// Start a fresh game from a new seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.start();
    }

    /// Advance all timers by `dt_ms` of wall time
    pub fn update(&mut self, dt_ms: u32) {
        if !self.state.running {
            return;
        }
        let dt_ms = dt_ms.min(MAX_FRAME_MS);

        self.decay_splashes(dt_ms);

        self.countdown_acc += dt_ms;
        while self.countdown_acc >= self.settings.countdown_ms {
            self.countdown_acc -= self.settings.countdown_ms;
            self.state = clock::tick(std::mem::take(&mut self.state));
            if !self.state.running {
                self.finish();
                return;
            }
        }

        self.spawn_acc += dt_ms;
        while self.spawn_acc >= self.settings.spawn_refresh_ms {
            self.spawn_acc -= self.settings.spawn_refresh_ms;
            self.refresh_population();
        }

        let dt = self.settings.motion_dt();
        self.motion_acc += dt_ms;
        while self.motion_acc >= self.settings.motion_tick_ms {
            self.motion_acc -= self.settings.motion_tick_ms;
            self.population = advance_population(&self.population, dt);
        }

        if self.rod.is_reeling() {
            self.reel_acc += dt_ms;
            while self.reel_acc >= REEL_STEP_MS {
                self.reel_acc -= REEL_STEP_MS;
                if self.rod.step_reel() {
                    self.reel_acc = 0;
                    break;
                }
            }
        }
    }

    /// Put the line out
    pub fn cast(&mut self) -> bool {
        self.state.running && self.rod.cast()
    }

    /// Move the line tip (percent space, clamped)
    pub fn aim(&mut self, x: f32, y: f32) {
        if self.state.running {
            self.rod.aim(Vec2::new(x, y));
        }
    }

    /// Reel in and resolve a catch at the current line tip
    ///
    /// Returns `None` when the rod is not casting or the game is not running.
    pub fn reel(&mut self) -> Option<CatchResult> {
        if !self.state.running {
            return None;
        }
        let attempt = self.rod.reel()?;
        self.reel_acc = 0;

        let result = resolve_within(&attempt, &self.population, self.settings.catch_radius);
        self.state = std::mem::take(&mut self.state).apply(&result);

        match result {
            CatchResult::Caught {
                fish_id, species, ..
            } => {
                log::trace!(
                    "Caught {} (+{}) at {:?}, score {}",
                    species.glyph(),
                    species.points,
                    attempt.line,
                    self.state.score
                );
                if self.settings.catch_policy == CatchPolicy::RemoveOnCatch {
                    self.population = self.population.without(fish_id);
                }
                self.events.push(SessionEvent::Caught {
                    fish_id,
                    species,
                    score: self.state.score,
                });
            }
            CatchResult::Miss { at } => {
                log::trace!("Missed at {:?}", at);
                self.splashes.push(Splash {
                    at,
                    remaining_ms: SPLASH_MS,
                });
                self.events.push(SessionEvent::Splash { at });
            }
        }

        Some(result)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn rod(&self) -> &Rod {
        &self.rod
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Switch catch policy; applies from the next reel
    pub fn set_catch_policy(&mut self, policy: CatchPolicy) {
        self.settings.catch_policy = policy;
        log::info!("Catch policy: {}", policy.as_str());
    }

    pub fn splashes(&self) -> &[Splash] {
        &self.splashes
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.state.score,
            time_left_secs: self.state.time_left_secs,
            running: self.state.running,
            catches: self.state.catches.iter().map(|s| s.glyph()).collect(),
            recent: self
                .state
                .recent_catches(RECENT_CATCHES)
                .iter()
                .map(|s| s.glyph())
                .collect(),
            fish: self
                .population
                .iter()
                .map(|f| {
                    let facing = f.species.facing();
                    FishView {
                        id: f.id,
                        glyph: f.species.glyph(),
                        x: f.position_percent,
                        y: f.depth_percent,
                        rotation: facing.rotation_degrees(),
                        mirrored: facing.mirrored(),
                        visible: f.is_visible(),
                    }
                })
                .collect(),
            line: self.rod.tip,
            casting: self.rod.phase == RodPhase::Casting,
            reeling: self.rod.is_reeling(),
            splashes: self.splashes.clone(),
        }
    }

    fn refresh_population(&mut self) {
        self.population = generate(&self.settings.species, &mut self.rng);
        log::debug!("Spawned {} fish", self.population.len());
        self.events.push(SessionEvent::PopulationRefreshed {
            count: self.population.len(),
        });
    }

    fn decay_splashes(&mut self, dt_ms: u32) {
        for splash in &mut self.splashes {
            splash.remaining_ms = splash.remaining_ms.saturating_sub(dt_ms);
        }
        self.splashes.retain(|s| s.remaining_ms > 0);
    }

    fn cancel_timers(&mut self) {
        self.countdown_acc = 0;
        self.spawn_acc = 0;
        self.motion_acc = 0;
        self.reel_acc = 0;
    }

    /// Game over: stop every timer and drop the fish
    fn finish(&mut self) {
        self.cancel_timers();
        self.rod.reset();
        self.splashes.clear();
        self.population = Population::new();

        log::info!(
            "Game over: {} points, {} fish",
            self.state.score,
            self.state.catches.len()
        );
        self.events.push(SessionEvent::GameOver {
            score: self.state.score,
            catches: self.state.catches.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MOTION_TICK_MS, REEL_STEPS};
    use crate::sim::spawn::FishInstance;
    use crate::sim::species::SPECIES;

    fn started(seed: u64) -> Session {
        let mut session = Session::new(Settings::default(), seed);
        session.start();
        session
    }

    fn lone_fish(session: &mut Session, x: f32, y: f32) {
        session.population =
            Population::from_fish(vec![FishInstance::new(0, SPECIES[1], y, x, 1.0)]);
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = Session::new(Settings::default(), 1);
        assert!(!session.state().running);
        assert_eq!(session.state().time_left_secs, 120);
        assert!(!session.cast());
        session.update(1000);
        assert_eq!(session.state().time_left_secs, 120);
        assert!(session.population().is_empty());
    }

    #[test]
    fn test_start_spawns_population() {
        let mut session = started(11);
        assert!(session.state().running);
        assert!(!session.population().is_empty());
        let events = session.drain_events();
        assert!(matches!(events[0], SessionEvent::PopulationRefreshed { .. }));
        assert_eq!(events[1], SessionEvent::Started { seed: 11 });
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_full_game_ends_once() {
        let mut session = started(5);
        for _ in 0..(120_000 / MOTION_TICK_MS) {
            session.update(MOTION_TICK_MS);
        }
        assert!(!session.state().running);
        assert_eq!(session.state().time_left_secs, 0);
        assert!(session.population().is_empty());

        let game_overs = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        // Timers are cancelled
        session.update(10_000);
        assert!(session.drain_events().is_empty());
        assert!(session.population().is_empty());
    }

    #[test]
    fn test_spawn_refresh_replaces_population() {
        let mut session = started(8);
        session.drain_events();
        for _ in 0..(10_000 / MOTION_TICK_MS) {
            session.update(MOTION_TICK_MS);
        }
        let refreshes = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SessionEvent::PopulationRefreshed { .. }))
            .count();
        assert_eq!(refreshes, 1);
        // Fresh batch: ids restart, and the first fish has moved at most one tick
        let first = session.population().get(0).copied();
        assert!(first.is_some_and(|f| f.position_percent <= 2.5));
    }

    #[test]
    fn test_motion_ticks() {
        let mut session = started(2);
        lone_fish(&mut session, 10.0, 50.0);
        session.update(MOTION_TICK_MS * 3);
        let fish = session.population().get(0).copied();
        assert_eq!(fish.map(|f| f.position_percent), Some(19.0));
    }

    #[test]
    fn test_reel_catch_updates_score() {
        let mut session = started(3);
        lone_fish(&mut session, 40.0, 60.0);
        assert!(session.cast());
        session.aim(42.0, 61.0);
        let result = session.reel().expect("rod was casting");
        assert!(result.is_catch());
        assert_eq!(session.state().score, 2);
        assert_eq!(session.state().catches, vec![SPECIES[1]]);
        // Kept by default
        assert_eq!(session.population().len(), 1);
    }

    #[test]
    fn test_remove_on_catch_policy() {
        let settings = Settings {
            catch_policy: CatchPolicy::RemoveOnCatch,
            ..Default::default()
        };
        let mut session = Session::new(settings, 3);
        session.start();
        lone_fish(&mut session, 40.0, 60.0);
        session.cast();
        session.aim(40.0, 60.0);
        assert!(session.reel().is_some_and(|r| r.is_catch()));
        assert!(session.population().is_empty());
    }

    #[test]
    fn test_miss_leaves_splash() {
        let mut session = started(4);
        lone_fish(&mut session, 10.0, 30.0);
        session.cast();
        session.aim(90.0, 90.0);
        let result = session.reel();
        assert_eq!(
            result,
            Some(CatchResult::Miss {
                at: Vec2::new(90.0, 90.0)
            })
        );
        assert_eq!(session.state().score, 0);
        assert_eq!(session.splashes().len(), 1);

        session.update(SPLASH_MS / 2);
        assert_eq!(session.splashes().len(), 1);
        session.update(SPLASH_MS / 2);
        assert!(session.splashes().is_empty());
    }

    #[test]
    fn test_no_cast_until_reel_finishes() {
        let mut session = started(6);
        session.cast();
        session.aim(50.0, 80.0);
        session.reel();
        assert!(!session.cast());
        assert!(session.reel().is_none());

        for _ in 0..(REEL_STEPS - 1) {
            session.update(REEL_STEP_MS);
        }
        assert!(session.rod().is_reeling());
        session.update(REEL_STEP_MS);
        assert!(!session.rod().is_reeling());
        assert_eq!(session.rod().tip.y, 0.0);
        assert!(session.cast());
    }

    #[test]
    fn test_restart_cancels_reel_and_resets_state() {
        let mut session = started(9);
        lone_fish(&mut session, 40.0, 60.0);
        session.cast();
        session.aim(40.0, 60.0);
        session.reel();
        assert!(session.state().score > 0);

        session.restart(9);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().time_left_secs, 120);
        assert!(!session.rod().is_reeling());
        assert!(session.cast());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = started(1234);
        let mut b = started(1234);
        for _ in 0..500 {
            a.update(33);
            b.update(33);
        }
        assert_eq!(a.population(), b.population());
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = started(77);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.fish.len(), session.population().len());
        assert!(snapshot.running);

        let json = serde_json::to_string(&snapshot).expect("snapshot should serialize");
        assert!(json.contains("\"time_left_secs\":120"));
    }

    #[test]
    fn test_snapshot_recent_catches() {
        let mut session = started(21);
        for _ in 0..(RECENT_CATCHES + 2) {
            lone_fish(&mut session, 40.0, 60.0);
            session.cast();
            session.aim(40.0, 60.0);
            assert!(session.reel().is_some_and(|r| r.is_catch()));
            for _ in 0..REEL_STEPS {
                session.update(REEL_STEP_MS);
            }
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.catches.len(), RECENT_CATCHES + 2);
        assert_eq!(snapshot.recent.len(), RECENT_CATCHES);
        assert!(snapshot.recent.iter().all(|g| *g == SPECIES[1].glyph()));
    }

    #[test]
    fn test_set_catch_policy() {
        let mut session = started(13);
        lone_fish(&mut session, 40.0, 60.0);
        session.set_catch_policy(CatchPolicy::from_str("remove").unwrap_or_default());
        assert_eq!(session.settings().catch_policy, CatchPolicy::RemoveOnCatch);

        session.cast();
        session.aim(40.0, 60.0);
        assert!(session.reel().is_some_and(|r| r.is_catch()));
        assert!(session.population().is_empty());
    }
}
