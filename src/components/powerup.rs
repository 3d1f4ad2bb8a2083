use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Score and one extra shot.
    Star,
    /// Toggles the drum track.
    Music,
    /// Ends the level.
    Goal,
}

impl PowerUpKind {
    /// Clip played while the power-up sits in the level.
    pub fn clip_key(self) -> &'static str {
        match self {
            PowerUpKind::Star => "powerup/star",
            PowerUpKind::Music => "powerup/music",
            PowerUpKind::Goal => "powerup/goal",
        }
    }
}

/// Stationary pickup. Touching it consumes it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind) -> Self {
        Self { kind }
    }
}
