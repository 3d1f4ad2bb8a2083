//! Animation systems.
//!
//! - [`select_creature_clip`] is the creature state machine: it maps physical
//!   state (ground contact, horizontal velocity, health, life state) to one
//!   of the creature's eight clips. The physics pass calls it per creature.
//! - [`play_clip`] switches to or advances a clip and keeps the collider in
//!   step with the clip's frame size.
//! - [`animate_sprites`] advances the clocks of everything that is not a
//!   creature (power-ups, shots).

use bevy_ecs::prelude::*;

use crate::components::animation::{Animation, CreatureClips};
use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{Creature, Facing, LifeState, MAX_HEALTH};
use crate::components::rigidbody::RigidBody;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Pick the clip for a creature, first match wins:
///
/// 1. dying: dying clip on the facing side
/// 2. airborne: jumping clip on the side it moves to (or faces, when still)
/// 3. grounded and still: standing clip
/// 4. grounded and moving: the walking clip at full health, the standing clip
///    at two points, the jumping clip at one
///
/// Moving sideways also turns the creature that way.
pub fn select_creature_clip<'a>(
    creature: &mut Creature,
    body: &RigidBody,
    clips: &'a CreatureClips,
) -> &'a str {
    if creature.state() == LifeState::Dying {
        return clips.dying(creature.facing);
    }

    if body.vx < 0.0 {
        creature.facing = Facing::Left;
    } else if body.vx > 0.0 {
        creature.facing = Facing::Right;
    }
    let facing = creature.facing;

    if !creature.on_ground {
        return clips.jumping(facing);
    }
    if body.vx == 0.0 {
        return clips.standing(facing);
    }
    match creature.health {
        h if h >= MAX_HEALTH => clips.moving(facing),
        2 => clips.standing(facing),
        _ => clips.jumping(facing),
    }
}

/// Play `key` on `animation`. A different clip starts from its first frame
/// and resizes `collider`; the same clip moves on by `elapsed`.
pub fn play_clip(
    animation: &mut Animation,
    collider: &mut BoxCollider,
    store: &AnimationStore,
    key: &str,
    elapsed: f32,
) {
    if animation.switch_to(key) {
        if let Some(clip) = store.get(key) {
            collider.width = clip.width;
            collider.height = clip.height;
        }
        return;
    }
    advance(animation, store, elapsed);
}

fn advance(animation: &mut Animation, store: &AnimationStore, elapsed: f32) {
    if let Some(clip) = store.get(&animation.animation_key) {
        animation.elapsed_time = clip.wrap(animation.elapsed_time + elapsed);
        animation.frame_index = clip.frame_at(animation.elapsed_time);
    }
}

/// Advance the clip clocks of non-creature entities.
pub fn animate_sprites(
    mut query: Query<&mut Animation, Without<Creature>>,
    store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for mut animation in query.iter_mut() {
        advance(&mut animation, &store, time.delta);
    }
}
