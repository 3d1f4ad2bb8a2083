//! Static tile grid of the current level.
//!
//! The grid is immutable once a level is loaded. Columns outside the grid are
//! solid so nothing walks off either side; rows outside it are empty so
//! creatures can jump above the top or fall through the bottom.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

/// Edge length of a tile in pixels.
pub const TILE_SIZE: i32 = 64;

/// Index into the tile image set (`A` is 0).
pub type TileId = u8;

/// Cell coordinate in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel to tile: round to the nearest pixel, then floor-divide.
pub fn pixels_to_tiles(pixels: f32) -> i32 {
    (pixels.round() as i32).div_euclid(TILE_SIZE)
}

pub fn tiles_to_pixels(tiles: i32) -> i32 {
    tiles * TILE_SIZE
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Option<TileId>>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Height of the grid in pixels.
    pub fn pixel_height(&self) -> i32 {
        tiles_to_pixels(self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Place (or clear) a tile. Coordinates outside the grid are ignored.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Option<TileId>) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<TileId> {
        self.index(x, y).and_then(|i| self.tiles[i])
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width {
            return true;
        }
        self.tile(x, y).is_some()
    }
}
