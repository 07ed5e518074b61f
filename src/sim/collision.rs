//! Tile collision detection and response
//!
//! The cricket's hitbox is tested against the tile layer first and the
//! auto-tile layer second. The first overlapping tile in authoring order wins.

use glam::IVec2;

use super::cricket::{Cricket, CricketState, SPRITE_SIZE};
use super::level::{LayerKind, Level, Rect, Tile, TileTables};

/// Outcome of colliding with a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Touched water; the level restarts
    Drowned,
    /// Reached the exit
    Won,
    /// Hit something while rising; vertical velocity inverted
    Bounced,
    /// Came down on something
    Landed,
}

/// First tile on `kind` whose cell overlaps `hitbox`
pub fn overlapping_tile<'a>(level: &'a Level, kind: LayerKind, hitbox: &Rect) -> Option<&'a Tile> {
    level
        .layer(kind)?
        .tiles
        .iter()
        .find(|tile| level.tile_rect(tile).overlaps(hitbox))
}

/// Tile the hitbox is touching, tile layer taking precedence over auto-tiles
pub fn detect<'a>(level: &'a Level, hitbox: &Rect) -> Option<&'a Tile> {
    overlapping_tile(level, LayerKind::Tiles, hitbox)
        .or_else(|| overlapping_tile(level, LayerKind::AutoTiles, hitbox))
}

/// Respond to touching `tile`
///
/// `before` is the cricket's position at the start of this tick's motion.
/// Water and exit short-circuit without touching the cricket. Otherwise the
/// cricket bounces or lands, then squishy snapping and impassible reversion
/// are applied in that order.
pub fn respond(
    cricket: &mut Cricket,
    tile: &Tile,
    before: IVec2,
    level: &Level,
    tables: &TileTables,
) -> Contact {
    if tables.is_water(tile) {
        return Contact::Drowned;
    }

    if let Some(exit) = level.exit_box() {
        if exit.overlaps(&cricket.hitbox()) {
            return Contact::Won;
        }
    }

    let contact = if cricket.velocity.y > 0 {
        cricket.velocity.y = -cricket.velocity.y;
        Contact::Bounced
    } else {
        cricket.airborne = false;
        cricket.state = CricketState::Idle;
        Contact::Landed
    };

    if tables.is_squishy(tile) {
        cricket.position = IVec2::new(
            tile.position.x + level.grid_size / 2 - SPRITE_SIZE / 2,
            tile.position.y - SPRITE_SIZE,
        );
        cricket.clamp_x(level.width);
    }

    if tables.is_impassible(tile) {
        cricket.position = before;
    }

    contact
}
