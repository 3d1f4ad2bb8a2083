//! Entity factories.
//!
//! Each kind of level entity is built fresh from the shared clip definitions
//! in the [`AnimationStore`]; nothing is cloned from a template entity. The
//! bundle builders work with both `World::spawn` and `Commands::spawn`.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::animation::{Animation, CreatureClips};
use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{Creature, CreatureKind, Facing};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::powerup::{PowerUp, PowerUpKind};
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::levels::{LevelData, SpawnKind};
use crate::resources::roster::Roster;
use crate::resources::tilegrid::{TILE_SIZE, TileCoord, tiles_to_pixels};

pub type CreatureBundle = (MapPosition, RigidBody, BoxCollider, Animation, CreatureClips, Creature);
pub type SpriteBundle<T> = (MapPosition, RigidBody, BoxCollider, Animation, T);

/// Top-left corner that centres a `width × height` sprite on a tile and
/// stands it on the tile's bottom edge.
pub fn tile_anchor(tile: TileCoord, width: f32, height: f32) -> (f32, f32) {
    let x = tiles_to_pixels(tile.x) as f32 + (TILE_SIZE as f32 - width) / 2.0;
    let y = tiles_to_pixels(tile.y + 1) as f32 - height;
    (x.floor(), y)
}

fn sprite_parts(store: &AnimationStore, key: &str, x: f32, y: f32) -> (MapPosition, BoxCollider, Animation) {
    let (width, height) = store.size_of(key);
    (
        MapPosition::new(x, y),
        BoxCollider::new(width, height),
        Animation::new(key),
    )
}

pub fn creature_bundle(kind: CreatureKind, skin: &str, store: &AnimationStore, x: f32, y: f32) -> CreatureBundle {
    let clips = CreatureClips::for_skin(skin);
    let (position, collider, animation) = sprite_parts(store, clips.moving(Facing::Right), x, y);
    (
        position,
        RigidBody::new(),
        collider,
        animation,
        clips,
        Creature::new(kind),
    )
}

pub fn player_bundle(store: &AnimationStore, x: f32, y: f32) -> (CreatureBundle, Player) {
    (
        creature_bundle(CreatureKind::Player, "player", store, x, y),
        Player::default(),
    )
}

pub fn power_up_bundle(kind: PowerUpKind, store: &AnimationStore, x: f32, y: f32) -> SpriteBundle<PowerUp> {
    let (position, collider, animation) = sprite_parts(store, kind.clip_key(), x, y);
    (position, RigidBody::new(), collider, animation, PowerUp::new(kind))
}

pub fn projectile_bundle(
    facing: Facing,
    store: &AnimationStore,
    config: &GameConfig,
    x: f32,
    y: f32,
) -> SpriteBundle<Projectile> {
    let (position, collider, animation) = sprite_parts(store, Projectile::clip_key(facing), x, y);
    (
        position,
        Projectile::launch(Projectile::angle_for(facing), config.projectile_speed),
        collider,
        animation,
        Projectile::new(config.projectile_radius),
    )
}

pub fn spawn_creature(world: &mut World, kind: CreatureKind, skin: &str, x: f32, y: f32) -> Entity {
    let bundle = creature_bundle(kind, skin, world.resource::<AnimationStore>(), x, y);
    world.spawn(bundle).id()
}

pub fn spawn_player(world: &mut World, x: f32, y: f32) -> Entity {
    let bundle = player_bundle(world.resource::<AnimationStore>(), x, y);
    world.spawn(bundle).id()
}

pub fn spawn_power_up(world: &mut World, kind: PowerUpKind, x: f32, y: f32) -> Entity {
    let bundle = power_up_bundle(kind, world.resource::<AnimationStore>(), x, y);
    world.spawn(bundle).id()
}

pub fn spawn_projectile(world: &mut World, facing: Facing, x: f32, y: f32) -> Entity {
    let bundle = projectile_bundle(
        facing,
        world.resource::<AnimationStore>(),
        world.resource::<GameConfig>(),
        x,
        y,
    );
    world.spawn(bundle).id()
}

/// Populate the world from a level and build its roster. Spawns are added in
/// map order; the player is spawned first and kept out of the list.
pub fn spawn_level(world: &mut World, level: &LevelData) -> Roster {
    let start = level.player_start;
    let player = spawn_player(world, tiles_to_pixels(start.x) as f32, tiles_to_pixels(start.y) as f32);
    let mut roster = Roster::new(player);

    for spawn in &level.spawns {
        let entity = match spawn.kind {
            SpawnKind::Creature { kind, skin } => {
                let key = CreatureClips::for_skin(skin).right;
                let (w, h) = world.resource::<AnimationStore>().size_of(&key);
                let (x, y) = tile_anchor(spawn.tile, w, h);
                spawn_creature(world, kind, skin, x, y)
            }
            SpawnKind::PowerUp(kind) => {
                let (w, h) = world.resource::<AnimationStore>().size_of(kind.clip_key());
                let (x, y) = tile_anchor(spawn.tile, w, h);
                spawn_power_up(world, kind, x, y)
            }
        };
        roster.push(entity);
    }

    info!(
        "spawned level: {}x{} tiles, {} entities",
        level.grid.width(),
        level.grid.height(),
        roster.len()
    );
    roster
}
