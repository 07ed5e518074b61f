//! Cricket Hop entry point
//!
//! Headless runner: loads settings and levels in the background, then drives
//! the simulation at a fixed rate with a scripted hop pattern. Rendering and
//! device input belong to a frontend.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use cricket_hop::consts::{LEVELS_PATH, TICK};
use cricket_hop::sim::{GameEvent, KeyState, TickInput};
use cricket_hop::{Game, Loader, Settings};

/// Ticks a direction is held before release
const HOLD_TICKS: u64 = 30;
/// Ticks between the start of one hop and the next
const HOP_PERIOD: u64 = 120;

/// Keeps the loop at a fixed rate by sleeping until each tick's deadline
struct Pacer {
    next: Instant,
}

impl Pacer {
    fn new(start: Instant) -> Self {
        Self { next: start }
    }

    /// Move the deadline one tick on and return it
    fn advance(&mut self) -> Instant {
        self.next += TICK;
        self.next
    }

    fn wait(&mut self) {
        let deadline = self.advance();
        if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }
}

/// Alternate left and right hops
fn scripted_input(frame: u64, advance: bool) -> TickInput {
    let holding = frame % HOP_PERIOD < HOLD_TICKS;
    let left = (frame / HOP_PERIOD) % 2 == 0;
    TickInput {
        keys: KeyState {
            left: holding && left,
            right: holding && !left,
        },
        advance,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();
    log::info!("Cricket Hop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let levels = args.next().unwrap_or_else(|| LEVELS_PATH.to_string());
    let max_frames: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60 * u64::from(cricket_hop::consts::TICK_HZ));

    let settings = Settings::load(Settings::FILE_NAME);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(settings, seed, Loader::from_file(levels));
    let mut pacer = Pacer::new(Instant::now());
    let mut advance = false;

    for frame in 0..max_frames {
        let input = scripted_input(frame, advance);
        let result = match game.update(&input) {
            Ok(result) => result,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };
        if result.quit {
            break;
        }

        advance = false;
        for event in &result.events {
            match event {
                GameEvent::Won { jumps } => {
                    log::info!("YOU WIN! {} JUMPS", jumps);
                    advance = true;
                }
                GameEvent::LevelChanged { level } => log::info!("Now on level {}", level),
                other => log::debug!("{:?}", other),
            }
        }

        pacer.wait();
    }

    let snapshot = game.snapshot();
    log::info!(
        "Stopped on level {} at {:?} after {} jumps",
        snapshot.level,
        snapshot.position,
        snapshot.jumps
    );
}
