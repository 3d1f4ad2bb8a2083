//! Projectile motion.
//!
//! Shots move in a straight line at their launch velocity, scaled by the
//! step's elapsed time, and are dropped once they are more than their radius
//! outside the viewport.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::mapposition::MapPosition;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::Arena;

/// Outside the viewport by more than `radius` on any side.
pub fn outside_view(position: &MapPosition, radius: f32, viewport: &Viewport) -> bool {
    position.x < viewport.left - radius
        || position.x > viewport.right() + radius
        || position.y < -radius
        || position.y > viewport.height + radius
}

pub fn move_projectiles(time: Res<WorldTime>, viewport: Res<Viewport>, mut arena: Arena) {
    let elapsed = time.delta;
    for entity in arena.roster.snapshot() {
        if !arena.roster.is_live(entity) {
            continue;
        }
        let Ok(projectile) = arena.projectiles.get(entity) else {
            continue;
        };
        let radius = projectile.radius;
        let Ok(body) = arena.rigid_bodies.get(entity) else {
            continue;
        };
        let (vx, vy) = (body.vx, body.vy);
        let Ok(mut position) = arena.positions.get_mut(entity) else {
            continue;
        };
        position.x += vx * elapsed;
        position.y += vy * elapsed;
        if outside_view(&position, radius, &viewport) {
            debug!("projectile {:?} left the view", entity);
            arena.roster.mark_removed(entity);
        }
    }
    arena.sweep();
}
