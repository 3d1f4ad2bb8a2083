//! Per-step input resource.
//!
//! The input provider owns the keyboard (or a script, or a replay) and writes
//! into [`InputState`] once per step before the simulation runs. The
//! simulation only reads it; it does no debouncing of its own.
use bevy_ecs::prelude::*;

/// Boolean action state with edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the action is currently held.
    pub active: bool,
    /// Whether the action went down this step.
    pub just_pressed: bool,
    /// Whether the action went up this step.
    pub just_released: bool,
}

impl BoolState {
    /// Record the held state for this step and derive both edges from the
    /// previous one.
    pub fn set(&mut self, pressed: bool) {
        self.just_pressed = pressed && !self.active;
        self.just_released = !pressed && self.active;
        self.active = pressed;
    }
}

/// Actions the simulation reacts to.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
    pub fire: BoolState,
    pub pause: BoolState,
    pub restart: BoolState,
}
