//! Game configuration resource.
//!
//! Tunables for physics, the player, shots, the viewport and scoring. Defaults
//! are safe to run with; an INI file can override any subset of them.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! gravity = 0.002
//! jump_speed = -0.95
//! die_time_ms = 2080
//!
//! [player]
//! lives = 3
//! ammo = 3
//! fire_delay_ms = 250
//!
//! [projectile]
//! speed = 0.4
//! radius = 6
//!
//! [viewport]
//! width = 800
//! height = 600
//!
//! [scoring]
//! kill_bonus = 100
//! star_bonus = 50
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_GRAVITY: f32 = 0.002;
const DEFAULT_JUMP_SPEED: f32 = -0.95;
const DEFAULT_DIE_TIME_MS: f32 = 2080.0;
const DEFAULT_LIVES: u32 = 3;
const DEFAULT_AMMO: u32 = 3;
const DEFAULT_FIRE_DELAY_MS: f32 = 250.0;
const DEFAULT_PROJECTILE_SPEED: f32 = 0.4;
const DEFAULT_PROJECTILE_RADIUS: f32 = 6.0;
const DEFAULT_VIEWPORT_WIDTH: u32 = 800;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;
const DEFAULT_KILL_BONUS: u32 = 100;
const DEFAULT_STAR_BONUS: u32 = 50;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Downward acceleration in px/ms².
    pub gravity: f32,
    /// Vertical velocity set by a jump, px/ms (negative is up).
    pub jump_speed: f32,
    /// Time a creature spends dying before it is removed.
    pub die_time_ms: f32,
    pub lives: u32,
    /// Shots available at the start of a game and after each goal.
    pub ammo: u32,
    pub fire_delay_ms: f32,
    /// Projectile speed in px/ms.
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub kill_bonus: u32,
    pub star_bonus: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            jump_speed: DEFAULT_JUMP_SPEED,
            die_time_ms: DEFAULT_DIE_TIME_MS,
            lives: DEFAULT_LIVES,
            ammo: DEFAULT_AMMO,
            fire_delay_ms: DEFAULT_FIRE_DELAY_MS,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            projectile_radius: DEFAULT_PROJECTILE_RADIUS,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            kill_bonus: DEFAULT_KILL_BONUS,
            star_bonus: DEFAULT_STAR_BONUS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();

        // [physics]
        if let Some(v) = float("physics", "gravity") {
            self.gravity = v as f32;
        }
        if let Some(v) = float("physics", "jump_speed") {
            self.jump_speed = v as f32;
        }
        if let Some(v) = float("physics", "die_time_ms") {
            self.die_time_ms = v as f32;
        }

        // [player]
        if let Some(v) = uint("player", "lives") {
            self.lives = v as u32;
        }
        if let Some(v) = uint("player", "ammo") {
            self.ammo = v as u32;
        }
        if let Some(v) = float("player", "fire_delay_ms") {
            self.fire_delay_ms = v as f32;
        }

        // [projectile]
        if let Some(v) = float("projectile", "speed") {
            self.projectile_speed = v as f32;
        }
        if let Some(v) = float("projectile", "radius") {
            self.projectile_radius = v as f32;
        }

        // [viewport]
        if let Some(v) = uint("viewport", "width") {
            self.viewport_width = v as u32;
        }
        if let Some(v) = uint("viewport", "height") {
            self.viewport_height = v as u32;
        }

        // [scoring]
        if let Some(v) = uint("scoring", "kill_bonus") {
            self.kill_bonus = v as u32;
        }
        if let Some(v) = uint("scoring", "star_bonus") {
            self.star_bonus = v as u32;
        }

        info!(
            "Loaded config: gravity={}, jump={}, lives={}, ammo={}, viewport={}x{}",
            self.gravity,
            self.jump_speed,
            self.lives,
            self.ammo,
            self.viewport_width,
            self.viewport_height
        );

        Ok(())
    }

    /// Save configuration to the INI file. Creates the file if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "jump_speed", Some(self.jump_speed.to_string()));
        config.set("physics", "die_time_ms", Some(self.die_time_ms.to_string()));

        config.set("player", "lives", Some(self.lives.to_string()));
        config.set("player", "ammo", Some(self.ammo.to_string()));
        config.set("player", "fire_delay_ms", Some(self.fire_delay_ms.to_string()));

        config.set("projectile", "speed", Some(self.projectile_speed.to_string()));
        config.set("projectile", "radius", Some(self.projectile_radius.to_string()));

        config.set("viewport", "width", Some(self.viewport_width.to_string()));
        config.set("viewport", "height", Some(self.viewport_height.to_string()));

        config.set("scoring", "kill_bonus", Some(self.kill_bonus.to_string()));
        config.set("scoring", "star_bonus", Some(self.star_bonus.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width as f32, self.viewport_height as f32)
    }
}
