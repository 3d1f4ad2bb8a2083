//! Tilestep library.
//!
//! Simulation core of a side-scrolling tile platformer: ECS components,
//! resources, systems and messages, plus the [`game::Game`] driver that ties
//! them into a fixed per-step schedule. Rendering, input capture and sound
//! playback are left to the host.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod spawn;
pub mod systems;
