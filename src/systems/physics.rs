//! Creature physics.
//!
//! Each step every creature, the player first and then the roster in order:
//!
//! 1. falls, unless it flies
//! 2. moves along x, snapping to the tile it runs into
//! 3. (player only) touches whatever it now overlaps, without pounce
//! 4. moves along y the same way
//! 5. picks its clip and advances it
//! 6. ages in its life state; dying long enough makes it dead
//!
//! Dead creatures leave the roster during the same pass.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::{Animation, CreatureClips};
use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{Creature, LifeState};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::animationstore::AnimationStore;
use crate::resources::tilegrid::{TileGrid, tiles_to_pixels};
use crate::resources::worldtime::WorldTime;
use crate::systems::Arena;
use crate::systems::animation::{play_clip, select_creature_clip};
use crate::systems::collision::{check_player_collision, tile_collision};

/// Working copy of one creature's physical state.
#[derive(Debug, Clone)]
pub struct Kinematics {
    pub position: MapPosition,
    pub body: RigidBody,
    pub collider: BoxCollider,
    pub creature: Creature,
}

impl Kinematics {
    pub fn new(position: MapPosition, body: RigidBody, collider: BoxCollider, creature: Creature) -> Self {
        Self {
            position,
            body,
            collider,
            creature,
        }
    }

    fn read(arena: &Arena, entity: Entity) -> Option<Self> {
        Some(Self {
            position: *arena.positions.get(entity).ok()?,
            body: *arena.rigid_bodies.get(entity).ok()?,
            collider: *arena.box_colliders.get(entity).ok()?,
            creature: arena.creatures.get(entity).ok()?.clone(),
        })
    }

    fn write(&self, arena: &mut Arena, entity: Entity) {
        if let Ok(mut position) = arena.positions.get_mut(entity) {
            *position = self.position;
        }
        if let Ok(mut body) = arena.rigid_bodies.get_mut(entity) {
            *body = self.body;
        }
        if let Ok(mut collider) = arena.box_colliders.get_mut(entity) {
            *collider = self.collider;
        }
        if let Ok(mut creature) = arena.creatures.get_mut(entity) {
            *creature = self.creature.clone();
        }
    }
}

/// Gravity for anything that does not fly.
pub fn apply_gravity(k: &mut Kinematics, gravity: f32, elapsed: f32) {
    if !k.creature.is_flying() {
        k.body.apply_gravity(gravity, elapsed);
    }
}

/// Horizontal pass. On a tile hit the box is lined up against the tile on
/// the side it came from and the kind's horizontal reaction runs.
pub fn move_horizontal(grid: &TileGrid, k: &mut Kinematics, elapsed: f32) {
    let dx = k.body.vx;
    let new_x = k.position.x + dx * elapsed;
    match tile_collision(grid, &k.position, &k.collider, new_x, k.position.y) {
        None => k.position.x = new_x,
        Some(tile) => {
            if dx > 0.0 {
                k.position.x = tiles_to_pixels(tile.x) as f32 - k.collider.width;
            } else if dx < 0.0 {
                k.position.x = tiles_to_pixels(tile.x + 1) as f32;
            }
            k.creature.collide_horizontal(&mut k.body);
        }
    }
}

/// Vertical pass. Returns whether the box ended lower (in whole pixels) than
/// it started.
pub fn move_vertical(grid: &TileGrid, k: &mut Kinematics, elapsed: f32) -> bool {
    let dy = k.body.vy;
    let old_y = k.position.y;
    let new_y = old_y + dy * elapsed;
    let tile = tile_collision(grid, &k.position, &k.collider, k.position.x, new_y);

    let target = match tile {
        None => new_y,
        Some(tile) if dy > 0.0 => tiles_to_pixels(tile.y) as f32 - k.collider.height,
        Some(tile) if dy < 0.0 => tiles_to_pixels(tile.y + 1) as f32,
        Some(_) => old_y,
    };

    let moved_down = target.round() > old_y.round();
    if moved_down && k.creature.traits().tracks_falling {
        k.creature.on_ground = false;
    }
    k.position.y = target;

    if tile.is_some() {
        k.creature.collide_vertical(&mut k.body);
    }
    moved_down
}

fn update_creature(
    entity: Entity,
    elapsed: f32,
    grid: &TileGrid,
    store: &AnimationStore,
    animations: &mut Query<(&mut Animation, &CreatureClips)>,
    arena: &mut Arena,
) {
    let Some(mut k) = Kinematics::read(arena, entity) else {
        return;
    };
    let is_player = k.creature.is_player();

    apply_gravity(&mut k, arena.config.gravity, elapsed);
    move_horizontal(grid, &mut k, elapsed);

    if is_player {
        k.write(arena, entity);
        check_player_collision(arena, false);
        match Kinematics::read(arena, entity) {
            Some(fresh) => k = fresh,
            None => return,
        }
    }

    let moved_down = move_vertical(grid, &mut k, elapsed);
    if is_player && let Ok(mut player) = arena.players.get_mut(entity) {
        player.can_kill = moved_down;
    }

    if let Ok((mut animation, clips)) = animations.get_mut(entity) {
        let key = select_creature_clip(&mut k.creature, &k.body, clips);
        play_clip(&mut animation, &mut k.collider, store, key, elapsed);
    }

    let die_time = arena.config.die_time_ms;
    if k.creature.tick_state(elapsed, die_time, &mut k.body) {
        debug!("{:?} {:?} is dead", k.creature.kind, entity);
    }
    k.write(arena, entity);

    let below_world = k.position.y > grid.pixel_height() as f32;
    if is_player && below_world && k.creature.is_alive() {
        debug!("player fell out of the level");
        arena.kill_player();
    }
}

pub fn creature_physics(
    time: Res<WorldTime>,
    grid: Res<TileGrid>,
    store: Res<AnimationStore>,
    mut animations: Query<(&mut Animation, &CreatureClips)>,
    mut arena: Arena,
) {
    let elapsed = time.delta;
    let player = arena.roster.player;
    update_creature(player, elapsed, &grid, &store, &mut animations, &mut arena);

    for entity in arena.roster.snapshot() {
        if !arena.roster.is_live(entity) {
            continue;
        }
        let state = match arena.creatures.get(entity) {
            Ok(creature) => creature.state(),
            Err(_) => continue,
        };
        if state != LifeState::Dead {
            update_creature(entity, elapsed, &grid, &store, &mut animations, &mut arena);
        }
        if arena
            .creatures
            .get(entity)
            .is_ok_and(|c| c.state() == LifeState::Dead)
        {
            arena.roster.mark_removed(entity);
        }
    }

    arena.sweep();
}
