//! Messages exchanged between the simulation and its collaborators.
//!
//! Submodules:
//! - [`audio`] – fire-and-forget commands for the audio sink
pub mod audio;
