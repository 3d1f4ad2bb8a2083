//! Simulation systems.
//!
//! Submodules overview
//! - [`animation`] – clip selection for creatures and frame stepping for sprites
//! - [`arena`] – the [`Arena`] system parameter shared by gameplay systems
//! - [`audio`] – bridge with the audio thread
//! - [`collision`] – tile sweeps, entity overlap and contact resolution
//! - [`gamestate`] – run conditions and end-of-game bookkeeping
//! - [`input`] – translate [`crate::resources::input::InputState`] into player intent
//! - [`physics`] – gravity and per-axis movement of creatures
//! - [`projectile`] – straight-line shot motion and culling
//! - [`time`] – advance [`crate::resources::worldtime::WorldTime`]
//! - [`viewport`] – scroll the viewport and wake visible creatures

pub mod animation;
pub mod arena;
pub mod audio;
pub mod collision;
pub mod gamestate;
pub mod input;
pub mod physics;
pub mod projectile;
pub mod time;
pub mod viewport;

pub use arena::Arena;
