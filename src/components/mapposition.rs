use bevy_ecs::prelude::Component;

/// Top-left corner of an entity in world pixels (sub-pixel precision).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position rounded to whole pixels, the way overlap tests see it.
    pub fn rounded(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}
