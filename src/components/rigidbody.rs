//! Kinematic body component.
//!
//! The [`RigidBody`] stores the velocity of an entity in pixels per
//! millisecond. There is no mass and no impulse resolution: gravity is added
//! straight into `vy` and tile collisions either zero or reverse a single axis.

use bevy_ecs::prelude::Component;

/// Velocity in pixels per millisecond.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub vx: f32,
    pub vy: f32,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }

    /// Accelerate downwards. `gravity` is in px/ms², `elapsed` in ms.
    pub fn apply_gravity(&mut self, gravity: f32, elapsed: f32) {
        self.vy += gravity * elapsed;
    }

    /// Stop all motion.
    pub fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }

    pub fn is_still(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0
    }
}
