//! Level session state
//!
//! Owns the cricket, camera, blackness overlay and the current level. All
//! resets go through here so every transition rebuilds the same things.

use std::collections::HashSet;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::cricket::{Cricket, CricketState, Facing};
use super::level::{LayerKind, Level, LevelPack, Rect, Tile};
use crate::settings::Settings;

/// Size of a blackness cell in screen pixels
pub const BLACKNESS_CELL: i32 = 16;

/// Cells darkened by jump number `jumps`: doubles every `factor` jumps,
/// never more than `cells`
pub fn blackness_spread(jumps: u32, factor: u32, cells: u32) -> u32 {
    let doublings = jumps / factor.max(1);
    1u32.checked_shl(doublings).unwrap_or(u32::MAX).min(cells)
}

/// Everything a presentation layer needs for one frame, read-only
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub position: IVec2,
    pub velocity: IVec2,
    pub hitbox: Rect,
    pub frame: u32,
    pub state: CricketState,
    pub facing: Facing,
    pub camera: IVec2,
    pub blackness: Vec<IVec2>,
    pub level: usize,
    pub bg_color: [u8; 4],
    pub jumps: u32,
    pub win: bool,
    pub loading: bool,
    /// Ticks simulated since start
    pub time_ticks: u64,
}

impl Snapshot {
    /// Snapshot shown while levels are still loading
    pub fn loading() -> Self {
        Self {
            position: IVec2::ZERO,
            velocity: IVec2::ZERO,
            hitbox: Rect::default(),
            frame: 0,
            state: CricketState::Idle,
            facing: Facing::Left,
            camera: IVec2::ZERO,
            blackness: Vec::new(),
            level: 0,
            bg_color: [0, 0, 0, 255],
            jumps: 0,
            win: false,
            loading: true,
            time_ticks: 0,
        }
    }
}

/// Values for the debug overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    pub position: IVec2,
    pub velocity: IVec2,
    pub hitbox: Rect,
    /// Tile on the tile layer at the cricket's position
    pub tile_under: Option<Tile>,
    pub last_jump_strength: i32,
    pub charge: u32,
    pub jumps: u32,
    pub level: usize,
    pub state: &'static str,
}

/// A running game over a loaded level pack
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub pack: LevelPack,
    /// Index into `pack.levels`
    pub level: usize,
    pub cricket: Cricket,
    pub camera: Camera,
    /// Darkened screen cells
    pub blackness: HashSet<IVec2>,
    /// Jumps made on this level
    pub jumps: u32,
    pub last_jump_strength: i32,
    /// Decimation counter, cycles `0..settings.wait_time`
    pub wait: u32,
    /// Exit reached; simulation frozen until advanced
    pub win: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Start on the first level. `pack` must hold at least one level.
    pub fn new(pack: LevelPack, settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let viewport = IVec2::new(settings.viewport_width, settings.viewport_height);
        let mut state = Self {
            settings,
            pack,
            level: 0,
            cricket: Cricket::new(IVec2::ZERO),
            camera: Camera::new(viewport),
            blackness: HashSet::new(),
            jumps: 0,
            last_jump_strength: 0,
            wait: 0,
            win: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset(0);
        state
    }

    pub fn current_level(&self) -> &Level {
        &self.pack.levels[self.level]
    }

    pub fn level_count(&self) -> usize {
        self.pack.levels.len()
    }

    /// Switch to `level` (wrapping) and rebuild the cricket, camera and overlay
    pub fn reset(&mut self, level: usize) {
        self.level = level % self.level_count().max(1);
        log::info!("Switching to level {}", self.level);

        let level = self.current_level();
        let spawn = level.spawn();
        let extent = level.size();

        self.cricket = Cricket::new(spawn);
        self.camera.follow(self.cricket.focus(), extent);
        self.blackness.clear();
        self.jumps = 0;
        self.last_jump_strength = 0;
    }

    /// Move on to the next level, leaving the win screen
    pub fn advance_level(&mut self) {
        self.win = false;
        self.reset(self.level + 1);
    }

    /// Record a jump and spread the blackness
    ///
    /// The number of new cells doubles every `blackness_factor` jumps.
    pub fn record_jump(&mut self, strength: i32) {
        self.jumps += 1;
        self.last_jump_strength = strength;

        let cols = (self.settings.viewport_width / BLACKNESS_CELL).max(1);
        let rows = (self.settings.viewport_height / BLACKNESS_CELL).max(1);
        let cells = (cols * rows) as u32;
        let count = blackness_spread(self.jumps, self.settings.blackness_factor, cells);

        for _ in 0..count {
            let cell = IVec2::new(self.rng.random_range(0..cols), self.rng.random_range(0..rows));
            self.blackness.insert(cell);
        }
        log::debug!(
            "Jump {} with strength {}, {} dark cells",
            self.jumps,
            strength,
            self.blackness.len()
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut blackness: Vec<IVec2> = self.blackness.iter().copied().collect();
        blackness.sort_by_key(|c| (c.y, c.x));
        Snapshot {
            position: self.cricket.position,
            velocity: self.cricket.velocity,
            hitbox: self.cricket.hitbox(),
            frame: self.cricket.frame,
            state: self.cricket.state,
            facing: self.cricket.facing,
            camera: self.camera.position,
            blackness,
            level: self.level,
            bg_color: self.current_level().bg_color,
            jumps: self.jumps,
            win: self.win,
            loading: false,
            time_ticks: self.time_ticks,
        }
    }

    /// Debug overlay values, only in debug mode
    pub fn debug_info(&self) -> Option<DebugInfo> {
        if !self.settings.debug_mode {
            return None;
        }
        let level = self.current_level();
        let cell = level.to_grid(self.cricket.position);
        Some(DebugInfo {
            position: self.cricket.position,
            velocity: self.cricket.velocity,
            hitbox: self.cricket.hitbox(),
            tile_under: level.tile_at(LayerKind::Tiles, cell).copied(),
            last_jump_strength: self.last_jump_strength,
            charge: self.cricket.charge,
            jumps: self.jumps,
            level: self.level,
            state: self.cricket.state.as_str(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::level::{Entity, Layer, TileTables, EXIT_MARKER, SPAWN_MARKER};

    /// A small level with a floor of earth and markers at `spawn` and `exit`
    pub(crate) fn test_level(spawn: IVec2, exit: IVec2) -> Level {
        let mut entities = Layer::new(LayerKind::Entities);
        entities.entities = vec![
            Entity { identifier: SPAWN_MARKER.into(), position: spawn },
            Entity { identifier: EXIT_MARKER.into(), position: exit },
        ];
        let mut tiles = Layer::new(LayerKind::Tiles);
        tiles.tiles = (0..50)
            .map(|i| Tile { id: 0, position: IVec2::new(i * 16, 464) })
            .collect();
        Level {
            width: 800,
            height: 480,
            bg_color: [10, 20, 30, 255],
            grid_size: 16,
            layers: vec![entities, Layer::new(LayerKind::AutoTiles), tiles],
        }
    }

    pub(crate) fn test_pack() -> LevelPack {
        LevelPack {
            levels: vec![
                test_level(IVec2::new(100, 400), IVec2::new(700, 448)),
                test_level(IVec2::new(200, 400), IVec2::new(16, 448)),
            ],
            tiles: TileTables::default(),
        }
    }

    #[test]
    fn test_new_starts_at_spawn() {
        let state = GameState::new(test_pack(), Settings::default(), 1);
        assert_eq!(state.level, 0);
        assert_eq!(state.cricket.position, IVec2::new(100, 400));
        assert!(state.blackness.is_empty());
        assert!(!state.win);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut state = GameState::new(test_pack(), Settings::default(), 1);
        state.cricket.position = IVec2::new(333, 12);
        state.cricket.velocity = IVec2::new(4, -5);
        state.cricket.charge = 17;
        state.cricket.state = CricketState::Landing;
        state.record_jump(3);
        assert!(!state.blackness.is_empty());

        state.reset(state.level);
        assert_eq!(state.cricket.position, IVec2::new(100, 400));
        assert_eq!(state.cricket.velocity, IVec2::ZERO);
        assert_eq!(state.cricket.charge, 0);
        assert_eq!(state.cricket.state, CricketState::Idle);
        assert!(state.blackness.is_empty());
        assert_eq!(state.jumps, 0);
    }

    #[test]
    fn test_level_index_wraps() {
        let mut state = GameState::new(test_pack(), Settings::default(), 1);
        state.win = true;
        state.advance_level();
        assert_eq!(state.level, 1);
        assert!(!state.win);
        assert_eq!(state.cricket.position, IVec2::new(200, 400));
        state.advance_level();
        assert_eq!(state.level, 0);
        state.reset(7);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_blackness_doubles() {
        let settings = Settings {
            blackness_factor: 2,
            ..Default::default()
        };
        let mut state = GameState::new(test_pack(), settings, 42);
        state.record_jump(1);
        assert_eq!(state.blackness.len(), 1);
        // Jumps 2 and 3 add two cells each, jump 4 adds four
        state.record_jump(1);
        state.record_jump(1);
        state.record_jump(1);
        assert!(state.blackness.len() <= 1 + 2 + 2 + 4);
        assert!(state.blackness.len() >= 2);
        for cell in &state.blackness {
            assert!(cell.x >= 0 && cell.x < 640 / BLACKNESS_CELL);
            assert!(cell.y >= 0 && cell.y < 480 / BLACKNESS_CELL);
        }
    }

    #[test]
    fn test_blackness_spread_per_jump() {
        let counts: Vec<u32> = (1..=7).map(|jumps| blackness_spread(jumps, 2, 1200)).collect();
        assert_eq!(counts, vec![1, 2, 2, 4, 4, 8, 8]);
        assert_eq!(blackness_spread(9, 10, 1200), 1);
        assert_eq!(blackness_spread(10, 10, 1200), 2);
        assert_eq!(blackness_spread(40, 1, 4), 4);
        assert_eq!(blackness_spread(3, 0, 1200), 8);
    }

    #[test]
    fn test_blackness_saturates() {
        let settings = Settings {
            blackness_factor: 1,
            viewport_width: 32,
            viewport_height: 32,
            ..Default::default()
        };
        let mut state = GameState::new(test_pack(), settings, 7);
        for _ in 0..200 {
            state.record_jump(1);
        }
        assert!(state.blackness.len() <= 4);
    }

    #[test]
    fn test_same_seed_same_blackness() {
        let mut a = GameState::new(test_pack(), Settings::default(), 99);
        let mut b = GameState::new(test_pack(), Settings::default(), 99);
        for _ in 0..25 {
            a.record_jump(2);
            b.record_jump(2);
        }
        assert_eq!(a.snapshot().blackness, b.snapshot().blackness);
    }

    #[test]
    fn test_debug_info_gated() {
        let state = GameState::new(test_pack(), Settings::default(), 1);
        assert!(state.debug_info().is_none());

        let settings = Settings {
            debug_mode: true,
            ..Default::default()
        };
        let mut state = GameState::new(test_pack(), settings, 1);
        state.cricket.position = IVec2::new(20, 470);
        let info = state.debug_info().unwrap();
        assert_eq!(info.tile_under.map(|t| t.position), Some(IVec2::new(16, 464)));
        assert_eq!(info.state, "idle");
    }
}
