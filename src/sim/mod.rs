//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, speeds in pixels per tick
//! - Seeded RNG only
//! - Stable iteration order (tiles in authoring order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod cricket;
pub mod input;
pub mod jump;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{Contact, detect, respond};
pub use cricket::{Cricket, CricketState, Facing};
pub use input::{JumpPress, KeyState, TickInput, resolve_press};
pub use level::{Entity, Layer, LayerKind, Level, LevelPack, Rect, Tile, TileTables};
pub use state::{DebugInfo, GameState, Snapshot};
pub use tick::{GameEvent, TickResult, tick};
