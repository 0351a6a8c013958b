//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timesteps only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod cast;
pub mod clock;
pub mod motion;
pub mod rod;
pub mod session;
pub mod spawn;
pub mod species;
pub mod state;

pub use cast::{CastAttempt, CatchResult, resolve, resolve_within};
pub use motion::{advance, advance_population};
pub use rod::{ReelAnimation, Rod, RodPhase};
pub use session::{FishView, Session, SessionEvent, Snapshot, Splash};
pub use spawn::{FishInstance, Population, generate};
pub use species::{Facing, SPECIES, Species, SpeciesKind};
pub use state::GameState;
