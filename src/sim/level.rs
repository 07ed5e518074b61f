//! Level data and tile grid queries
//!
//! A level is a stack of layers on a fixed-size grid. Tiles are addressed by
//! pixel position (top-left of their cell) and classified by ID.

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Identifier of the spawn marker entity
pub const SPAWN_MARKER: &str = "Cricket";
/// Identifier of the exit marker entity
pub const EXIT_MARKER: &str = "Exit";

/// Axis-aligned integer rectangle, half-open: `min` inclusive, `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: IVec2::new(x0, y0),
            max: IVec2::new(x1, y1),
        }
    }

    /// Square cell of `size` pixels with its top-left at `pos`
    pub fn cell(pos: IVec2, size: i32) -> Self {
        Self {
            min: pos,
            max: pos + IVec2::splat(size),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Shrink by `n` on every side
    pub const fn inset(self, n: i32) -> Self {
        Rect::new(self.min.x + n, self.min.y + n, self.max.x - n, self.max.y - n)
    }

    pub fn translate(&self, by: IVec2) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    pub fn center(&self) -> IVec2 {
        (self.min + self.max) / 2
    }

    /// True if both rectangles are non-empty and share at least one pixel
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    /// Top-left of the tile's cell, in pixels
    pub position: IVec2,
}

/// A placed entity marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub identifier: String,
    pub position: IVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Entities,
    AutoTiles,
    Tiles,
}

/// One layer of a level, tiles kept in authoring order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    #[serde(default)]
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            tiles: Vec::new(),
            entities: Vec::new(),
        }
    }
}

/// An immutable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub width: i32,
    pub height: i32,
    /// Background colour, RGBA
    #[serde(default = "default_bg_color")]
    pub bg_color: [u8; 4],
    /// Cell size in pixels
    pub grid_size: i32,
    pub layers: Vec<Layer>,
}

fn default_bg_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

impl Level {
    /// First layer of the given kind
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Entity marker by identifier, searched on the entity layer
    pub fn entity(&self, identifier: &str) -> Option<&Entity> {
        self.layer(LayerKind::Entities)?
            .entities
            .iter()
            .find(|e| e.identifier == identifier)
    }

    /// Pixel position to grid cell
    pub fn to_grid(&self, px: IVec2) -> IVec2 {
        px.div_euclid(IVec2::splat(self.grid_size))
    }

    /// Pixel rectangle covered by a tile
    pub fn tile_rect(&self, tile: &Tile) -> Rect {
        Rect::cell(tile.position, self.grid_size)
    }

    /// Tile whose cell is `cell` on the given layer
    pub fn tile_at(&self, kind: LayerKind, cell: IVec2) -> Option<&Tile> {
        self.layer(kind)?
            .tiles
            .iter()
            .find(|t| self.to_grid(t.position) == cell)
    }

    /// Tiles on the given layer overlapping the pixel rectangle of `cell`
    pub fn tiles_in_cell(&self, kind: LayerKind, cell: IVec2) -> Vec<&Tile> {
        let area = Rect::cell(cell * self.grid_size, self.grid_size);
        match self.layer(kind) {
            Some(layer) => layer
                .tiles
                .iter()
                .filter(|t| self.tile_rect(t).overlaps(&area))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Spawn marker position
    pub fn spawn(&self) -> IVec2 {
        self.entity(SPAWN_MARKER)
            .map(|e| e.position)
            .unwrap_or(IVec2::ZERO)
    }

    /// One-cell box at the exit marker, if the level has one
    pub fn exit_box(&self) -> Option<Rect> {
        self.entity(EXIT_MARKER)
            .map(|e| Rect::cell(e.position, self.grid_size))
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

/// Tile ID classification. A tile may belong to several sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileTables {
    /// Blocks motion; the cricket stops at contact
    pub impassible: HashSet<u32>,
    /// Restarts the level on contact
    pub water: HashSet<u32>,
    /// Soft ground; the cricket is placed on top
    pub squishy: HashSet<u32>,
}

impl Default for TileTables {
    fn default() -> Self {
        Self {
            impassible: [
                0,  // Earth top
                1,  // Earth top slope right
                2,  // Earth top slope left
                3,  // Stone
                10, // Water bank
                11, // Water pool
                12, // Water plant
                13, // Water stone
                32, // Earth middle
                33, // Earth middle slope right
                34, // Earth middle slope left
            ]
            .into_iter()
            .collect(),
            water: [114].into_iter().collect(),
            squishy: [15].into_iter().collect(), // Mushroom
        }
    }
}

impl TileTables {
    pub fn is_impassible(&self, tile: &Tile) -> bool {
        self.impassible.contains(&tile.id)
    }

    pub fn is_water(&self, tile: &Tile) -> bool {
        self.water.contains(&tile.id)
    }

    pub fn is_squishy(&self, tile: &Tile) -> bool {
        self.squishy.contains(&tile.id)
    }
}

/// Everything the simulation needs from level authoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<Level>,
    #[serde(default)]
    pub tiles: TileTables,
}
