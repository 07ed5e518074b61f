//! The cricket: position, motion state and animation frames

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::level::Rect;

/// Sprite frame size in pixels (frames are square)
pub const SPRITE_SIZE: i32 = 37;
/// Hitbox relative to the sprite's top-left
pub const HITBOX_OFFSET: Rect = Rect::new(7, 24, 30, 36).inset(1);

/// Idle animation cycles frames 0..IDLE_FRAMES
pub const IDLE_FRAMES: u32 = 5;
pub const JUMP_FIRST_FRAME: u32 = 5;
pub const JUMP_LAST_FRAME: u32 = 8;
pub const LAND_FIRST_FRAME: u32 = 9;
pub const LAND_LAST_FRAME: u32 = 12;

/// Animation / motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CricketState {
    /// Standing, or not yet settled after spawn
    #[default]
    Idle,
    /// On the way up
    Jumping,
    /// On the way down
    Landing,
}

impl CricketState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CricketState::Idle => "idle",
            CricketState::Jumping => "jumping",
            CricketState::Landing => "landing",
        }
    }
}

/// Facing direction
///
/// Velocity is subtracted from position, so facing left carries +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(&self) -> i32 {
        match self {
            Facing::Left => 1,
            Facing::Right => -1,
        }
    }
}

/// The jumping character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cricket {
    /// Top-left of the sprite, in level pixels
    pub position: IVec2,
    /// Per-tick displacement, subtracted from position (+y is up)
    pub velocity: IVec2,
    pub facing: Facing,
    /// Ticks a direction has been held while grounded
    pub charge: u32,
    /// Sprite sheet frame index
    pub frame: u32,
    pub state: CricketState,
    /// In flight; only then does the cricket move, and only then can't it charge
    pub airborne: bool,
}

impl Cricket {
    /// A fresh cricket at a spawn position, falling until it lands
    pub fn new(spawn: IVec2) -> Self {
        log::info!("Cricket starting position {:?}", spawn);
        Self {
            position: spawn,
            velocity: IVec2::ZERO,
            facing: Facing::Left,
            charge: 0,
            frame: 1,
            state: CricketState::Idle,
            airborne: true,
        }
    }

    /// Hitbox in level pixels
    pub fn hitbox(&self) -> Rect {
        HITBOX_OFFSET.translate(self.position)
    }

    /// Horizontal extent used when clamping to the level
    pub fn width(&self) -> i32 {
        HITBOX_OFFSET.width()
    }

    /// Keep the cricket horizontally inside a level of the given width
    pub fn clamp_x(&mut self, level_width: i32) {
        let max_x = (level_width - self.width()).max(0);
        self.position.x = self.position.x.clamp(0, max_x);
    }

    /// Point the camera follows
    pub fn focus(&self) -> IVec2 {
        self.hitbox().center()
    }

    /// Advance the animation frame for the current state
    ///
    /// `decay_tick` is true on ticks where the decimation counter wraps.
    pub fn animate(&mut self, decay_tick: bool) {
        match self.state {
            CricketState::Idle => {
                if decay_tick {
                    self.frame = (self.frame + 1) % IDLE_FRAMES;
                }
            }
            CricketState::Jumping => {
                if !(JUMP_FIRST_FRAME..=JUMP_LAST_FRAME).contains(&self.frame) {
                    self.frame = JUMP_FIRST_FRAME - 1;
                }
                if self.frame < JUMP_LAST_FRAME {
                    self.frame += 1;
                }
            }
            CricketState::Landing => {
                if self.frame < LAND_FIRST_FRAME {
                    self.frame = LAND_FIRST_FRAME - 1;
                }
                if self.frame < LAND_LAST_FRAME {
                    self.frame += 1;
                }
            }
        }
    }
}
