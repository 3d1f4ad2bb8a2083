use bevy_ecs::prelude::Resource;

use crate::resources::tilegrid::tiles_to_pixels;

/// Visible window over the level, in world pixels.
///
/// Only `left` scrolls. It follows the player and stays inside the level;
/// a renderer draws from the same value.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Centre on `focus_x`, clamped to a level `grid_width` tiles wide.
    pub fn follow(&mut self, focus_x: f32, grid_width: i32) {
        let level_width = tiles_to_pixels(grid_width) as f32;
        let max_left = (level_width - self.width).max(0.0);
        self.left = (focus_x - self.width / 2.0).round().clamp(0.0, max_left);
    }

    /// True if any part of the span `[x, x + width)` is on screen.
    pub fn shows(&self, x: f32, width: f32) -> bool {
        x + width > self.left && x < self.right()
    }
}
