//! Cricket Hop - a charge-and-release platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jumping, physics, tile collisions, camera)
//! - `loader`: Background level pack loading
//! - `game`: Loading lifecycle and per-frame update
//! - `settings`: Data-driven tuning

pub mod game;
pub mod loader;
pub mod settings;
pub mod sim;

pub use game::{Game, Lifecycle};
pub use loader::{LoadError, Loader};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Simulation rate, one tick per rendered frame
    pub const TICK_HZ: u32 = 60;
    /// Wall-clock length of a tick
    pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / TICK_HZ as u64);

    /// Default level pack location
    pub const LEVELS_PATH: &str = "assets/levels.json";
}
