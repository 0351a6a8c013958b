//! Ocean Fisher entry point
//!
//! The web build is driven from JS through `ocean_fisher::web`. Natively this
//! runs a headless game with an autoplay angler and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ocean_fisher::Settings;
    use ocean_fisher::consts::MOTION_TICK_MS;
    use ocean_fisher::sim::{Session, SessionEvent};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

    log::info!("Ocean Fisher (native) starting with seed {}", seed);

    let mut session = Session::new(Settings::load(), seed);
    let mut angler = autoplay::Angler::new(seed);
    session.start();

    while session.state().running {
        angler.play(&mut session);
        session.update(MOTION_TICK_MS);
    }

    for event in session.drain_events() {
        if let SessionEvent::GameOver { score, catches } = event {
            let glyphs: String = session.state().catches.iter().map(|s| s.glyph()).collect();
            println!("Game over! {} points from {} fish {}", score, catches, glyphs);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is ocean_fisher::web::init, this is just to satisfy the compiler
}

/// Idle/demo player for headless runs
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use ocean_fisher::sim::Session;

    /// Motion ticks between reels (~1.5s)
    const PATIENCE_TICKS: u32 = 30;
    /// Aim error in percent units
    const SHAKY_HANDS: f32 = 12.0;

    pub struct Angler {
        rng: Pcg32,
        wait: u32,
    }

    impl Angler {
        pub fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed ^ 0x5EED_F15B),
                wait: PATIENCE_TICKS,
            }
        }

        pub fn play(&mut self, session: &mut Session) {
            if session.rod().is_reeling() {
                return;
            }
            if self.wait > 0 {
                self.wait -= 1;
                return;
            }
            self.wait = PATIENCE_TICKS;

            // Go for the most valuable fish currently on screen
            let target = session
                .population()
                .iter()
                .filter(|f| f.is_visible() && f.position_percent >= 0.0)
                .max_by_key(|f| f.species.points)
                .map(|f| f.anchor());

            let Some(target) = target else {
                return;
            };
            let dx = (self.rng.random::<f32>() - 0.5) * SHAKY_HANDS * 2.0;
            let dy = (self.rng.random::<f32>() - 0.5) * SHAKY_HANDS * 2.0;

            session.cast();
            session.aim(target.x + dx, target.y + dy);
            session.reel();
        }
    }
}
