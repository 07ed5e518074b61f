//! Game settings and tuning
//!
//! Read once at startup from a JSON file and passed by reference into the
//! simulation. Nothing here is mutated during play.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tuning values for the jump, physics and overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Settings {
    // === Jump ===
    /// Divisor turning ticks held into jump strength
    pub velocity_denominator: i32,
    /// Horizontal impulse as a multiple of the vertical one
    pub velocity_x_multiplier: i32,
    /// Weakest jump, so a short tap still hops
    pub min_prime: i32,
    /// Strongest jump, keeps the cricket on screen
    pub max_prime: i32,

    // === Physics ===
    /// Decimation period: decay and idle animation run every `wait_time` ticks
    pub wait_time: u32,

    // === Overlay ===
    /// Jumps per doubling of the blackness spread
    pub blackness_factor: u32,

    // === Screen ===
    pub viewport_width: i32,
    pub viewport_height: i32,

    // === Debug ===
    /// Enables debug controls and the debug snapshot
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            velocity_denominator: 10,
            velocity_x_multiplier: 2,
            min_prime: 1,
            max_prime: 5,

            wait_time: 10,

            blackness_factor: 10,

            viewport_width: 640,
            viewport_height: 480,

            debug_mode: false,
        }
    }
}

impl Settings {
    /// Default config file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "cricket-hop.json";

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        log::info!("Looking for settings file {}...", path.display());

        let settings = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        };

        settings.sanitized()
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Clamp values that would otherwise divide by zero or invert a range
    pub fn sanitized(mut self) -> Self {
        if self.velocity_denominator < 1 {
            log::warn!("VelocityDenominator {} raised to 1", self.velocity_denominator);
            self.velocity_denominator = 1;
        }
        if self.wait_time < 1 {
            log::warn!("WaitTime {} raised to 1", self.wait_time);
            self.wait_time = 1;
        }
        if self.blackness_factor < 1 {
            log::warn!("BlacknessFactor {} raised to 1", self.blackness_factor);
            self.blackness_factor = 1;
        }
        if self.min_prime > self.max_prime {
            log::warn!(
                "MinPrime {} above MaxPrime {}, using MaxPrime for both",
                self.min_prime,
                self.max_prime
            );
            self.min_prime = self.max_prime;
        }
        self.viewport_width = self.viewport_width.max(1);
        self.viewport_height = self.viewport_height.max(1);
        self
    }
}
