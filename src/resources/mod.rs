//! ECS resources made available to systems.
//!
//! Long-lived data injected into the world and shared by the systems of one
//! step: the level, the session counters, timing, input and asset stores.
//!
//! Overview
//! - `animationstore` – shared clip definitions, frame sizes and durations
//! - `audio` – bridge to the audio collaborator
//! - `gameconfig` – tunables loaded from an INI file
//! - `gamesession` – score, lives, ammo and pending level changes
//! - `input` – per-step action state written by the input provider
//! - `levels` – level provider trait, text map parser and providers
//! - `roster` – ordered list of the level's entities
//! - `scores` – high-score persistence
//! - `tilegrid` – solid/empty cells of the current level
//! - `viewport` – the visible window over the level
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod gameconfig;
pub mod gamesession;
pub mod input;
pub mod levels;
pub mod roster;
pub mod scores;
pub mod tilegrid;
pub mod viewport;
pub mod worldtime;
