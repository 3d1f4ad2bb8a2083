//! Viewport tracking and creature wake-up.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::creature::Creature;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::roster::Roster;
use crate::resources::tilegrid::TileGrid;
use crate::resources::viewport::Viewport;

/// Scroll the viewport so the player stays centred, within the level.
pub fn follow_player(
    mut viewport: ResMut<Viewport>,
    grid: Res<TileGrid>,
    roster: Res<Roster>,
    positions: Query<&MapPosition>,
) {
    if let Ok(position) = positions.get(roster.player) {
        viewport.follow(position.x, grid.width());
    }
}

/// Creatures standing still start walking once they scroll into view.
pub fn wake_visible_creatures(
    viewport: Res<Viewport>,
    roster: Res<Roster>,
    mut query: Query<(&MapPosition, &BoxCollider, &Creature, &mut RigidBody)>,
) {
    for entity in roster.entities() {
        if let Ok((position, collider, creature, mut body)) = query.get_mut(*entity)
            && viewport.shows(position.x, collider.width)
        {
            creature.wake_up(&mut body);
        }
    }
}
