//! Counters and flow state of one play session.
//!
//! Score, lives and ammo used to be scattered globals; here they are one
//! resource that systems borrow. Level changes requested during a step are
//! parked in [`GameSession::pending_level`] and applied by the
//! [`Game`](crate::game::Game) once the schedule has finished.

use bevy_ecs::prelude::Resource;
use log::info;

use crate::resources::gameconfig::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Playing,
    GameOver,
    /// The last level's goal was reached.
    Won,
}

/// A level change to carry out after the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRequest {
    Reload,
    Next,
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub score: u32,
    pub lives: u32,
    pub ammo: u32,
    pub status: SessionStatus,
    pub paused: bool,
    pub level: u32,
    /// Set once the final score has been handed to the score board.
    pub score_recorded: bool,
    pub pending_level: Option<LevelRequest>,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            lives: config.lives,
            ammo: config.ammo,
            status: SessionStatus::Playing,
            paused: false,
            level: 1,
            score_recorded: false,
            pending_level: None,
        }
    }

    /// Back to a fresh game on level 1.
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Lose a life. Ends the game when none are left.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && self.status == SessionStatus::Playing {
            info!("game over with score {}", self.score);
            self.status = SessionStatus::GameOver;
        }
    }

    /// Spend one shot if any are left.
    pub fn take_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    pub fn request_level(&mut self, request: LevelRequest) {
        // a goal wins over a reload requested earlier in the same step
        if self.pending_level != Some(LevelRequest::Next) {
            self.pending_level = Some(request);
        }
    }

    /// Whether the session has ended and the score is still to be recorded.
    pub fn needs_score_recording(&self) -> bool {
        self.status != SessionStatus::Playing && !self.score_recorded
    }
}
