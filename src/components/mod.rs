//! ECS components for entities.
//!
//! Every simulated thing in a level is an entity carrying a subset of these
//! components. Creatures (player, grubs, flies) carry the full physics set;
//! power-ups and projectiles carry position, collider and animation only,
//! plus their tag.
//!
//! Submodules overview:
//! - [`animation`] – per-entity clip clock and the clip keys a creature picks from
//! - [`boxcollider`] – axis-aligned box used for tile and overlap tests
//! - [`creature`] – life cycle, facing, health and per-kind capability table
//! - [`mapposition`] – world-space top-left corner of an entity
//! - [`player`] – pounce flag and fire cooldown of the player
//! - [`powerup`] – pickups consumed on contact
//! - [`projectile`] – straight-flying player shots
//! - [`rigidbody`] – velocity in pixels per millisecond

pub mod animation;
pub mod boxcollider;
pub mod creature;
pub mod mapposition;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod rigidbody;
