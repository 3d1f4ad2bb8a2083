//! Tile and entity collision.
//!
//! - [`tile_collision`] answers "which solid tile does this single-axis move
//!   run into first".
//! - [`is_collision`] and [`first_colliding`] test entity overlap on rounded
//!   pixel coordinates.
//! - [`projectile_hits`] and [`player_contacts`] are the systems that act on
//!   overlaps; [`check_player_collision`] is shared with the physics pass.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::creature::LifeState;
use crate::components::mapposition::MapPosition;
use crate::components::powerup::PowerUpKind;
use crate::events::audio::{AudioCmd, FX_BOOP, FX_PRIZE, TRACK_DRUMS};
use crate::resources::gamesession::LevelRequest;
use crate::resources::tilegrid::{TileCoord, TileGrid, pixels_to_tiles};
use crate::systems::Arena;

/// First solid tile touched by moving a box from `position` to
/// `(new_x, new_y)`.
///
/// The box is swept from the old to the new position and the covered cells
/// are scanned column by column (x outer, y inner, both ascending).
///
/// # Panics
///
/// If both axes change. Callers move one axis at a time.
pub fn tile_collision(
    grid: &TileGrid,
    position: &MapPosition,
    collider: &BoxCollider,
    new_x: f32,
    new_y: f32,
) -> Option<TileCoord> {
    assert!(
        position.x == new_x || position.y == new_y,
        "tile_collision called with a two-axis move: ({}, {}) -> ({}, {})",
        position.x,
        position.y,
        new_x,
        new_y
    );

    let from_x = position.x.min(new_x);
    let from_y = position.y.min(new_y);
    let to_x = position.x.max(new_x);
    let to_y = position.y.max(new_y);

    // every column past an edge is solid; the one next to the grid stands in
    // for all of them so a long move still stops at the edge
    let from_tile_x = pixels_to_tiles(from_x).clamp(-1, grid.width());
    let from_tile_y = pixels_to_tiles(from_y);
    let to_tile_x = pixels_to_tiles(to_x + collider.width - 1.0).clamp(-1, grid.width());
    let to_tile_y = pixels_to_tiles(to_y + collider.height - 1.0);

    for x in from_tile_x..=to_tile_x {
        for y in from_tile_y..=to_tile_y {
            if grid.is_solid(x, y) {
                return Some(TileCoord::new(x, y));
            }
        }
    }
    None
}

/// What an overlap candidate is, for the code acting on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRole {
    Creature,
    PowerUp(PowerUpKind),
    Projectile,
}

/// Copy of the collision-relevant data of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub entity: Entity,
    pub position: MapPosition,
    pub collider: BoxCollider,
    /// False for creatures that are dying or dead.
    pub alive: bool,
    pub role: HitRole,
}

/// Overlap test between two entities.
///
/// Never true for an entity against itself or when either side is a creature
/// that is no longer alive.
pub fn is_collision(a: &Hitbox, b: &Hitbox) -> bool {
    if a.entity == b.entity || !a.alive || !b.alive {
        return false;
    }
    a.collider.overlaps(&a.position, &b.collider, &b.position)
}

/// First candidate overlapping `subject`, in candidate order.
pub fn first_colliding<'a>(subject: &Hitbox, candidates: &'a [Hitbox]) -> Option<&'a Hitbox> {
    candidates.iter().find(|c| is_collision(subject, c))
}

/// Resolve the player touching something.
///
/// With `can_kill` a creature contact is a pounce: the creature starts dying
/// and the player bounces off it. Without it the contact costs a life.
/// Power-ups are consumed either way.
pub fn check_player_collision(arena: &mut Arena, can_kill: bool) {
    let player = arena.roster.player;
    let Some(subject) = arena.hitbox(player) else {
        return;
    };
    if !subject.alive {
        return;
    }

    let candidates = arena.live_hitboxes(|h| h.role != HitRole::Projectile);
    let Some(hit) = first_colliding(&subject, &candidates).copied() else {
        return;
    };

    match hit.role {
        HitRole::PowerUp(kind) => acquire_power_up(arena, hit.entity, kind),
        HitRole::Creature if can_kill => {
            let killed = match (
                arena.creatures.get_mut(hit.entity),
                arena.rigid_bodies.get_mut(hit.entity),
            ) {
                (Ok(mut badguy), Ok(mut body)) => badguy.set_state(LifeState::Dying, &mut body),
                _ => false,
            };
            if !killed {
                return;
            }
            debug!("pounced on {:?}", hit.entity);
            arena.audio_cmds.write(AudioCmd::fx(FX_BOOP));
            let bonus = arena.config.kill_bonus;
            arena.session.add_score(bonus);

            let jump_speed = arena.config.jump_speed;
            if let Ok(mut position) = arena.positions.get_mut(player) {
                position.y = hit.position.y - subject.collider.height;
            }
            if let (Ok(mut creature), Ok(mut body)) =
                (arena.creatures.get_mut(player), arena.rigid_bodies.get_mut(player))
            {
                creature.jump(&mut body, true, jump_speed);
            }
        }
        HitRole::Creature => {
            info!("player hit by {:?}", hit.entity);
            arena.kill_player();
        }
        HitRole::Projectile => {}
    }
}

fn acquire_power_up(arena: &mut Arena, entity: Entity, kind: PowerUpKind) {
    if !arena.roster.mark_removed(entity) {
        return;
    }
    info!("picked up {:?}", kind);
    match kind {
        PowerUpKind::Star => {
            let bonus = arena.config.star_bonus;
            arena.session.add_score(bonus);
            arena.session.ammo += 1;
            arena.audio_cmds.write(AudioCmd::fx(FX_PRIZE));
        }
        PowerUpKind::Music => {
            arena.audio_cmds.write(AudioCmd::fx(FX_PRIZE));
            arena.audio_cmds.write(AudioCmd::ToggleTrack { track: TRACK_DRUMS });
        }
        PowerUpKind::Goal => {
            arena.audio_cmds.write(AudioCmd::PlayFxEcho {
                id: FX_PRIZE.to_string(),
            });
            arena.session.ammo = arena.config.ammo;
            arena.session.request_level(LevelRequest::Next);
        }
    }
}

/// Shots against creatures. A hit costs the creature one point of health and
/// uses up the shot; the hit that empties its health starts it dying and
/// scores the kill bonus.
pub fn projectile_hits(mut arena: Arena) {
    let shots = arena.live_hitboxes(|h| h.role == HitRole::Projectile);
    for shot in shots {
        // creatures change as shots land, so take a fresh look each time
        let targets = arena.live_hitboxes(|h| h.role == HitRole::Creature);
        let Some(target) = first_colliding(&shot, &targets).copied() else {
            continue;
        };
        arena.roster.mark_removed(shot.entity);

        let killed = match (
            arena.creatures.get_mut(target.entity),
            arena.rigid_bodies.get_mut(target.entity),
        ) {
            (Ok(mut creature), Ok(mut body)) => creature.take_hit(&mut body),
            _ => false,
        };
        if killed {
            info!("shot down {:?}", target.entity);
            let bonus = arena.config.kill_bonus;
            arena.session.add_score(bonus);
            arena.audio_cmds.write(AudioCmd::fx(FX_BOOP));
        }
    }
    arena.sweep();
}

/// Second contact check of the step, after every creature has moved. A
/// player that moved down during its vertical pass pounces.
pub fn player_contacts(mut arena: Arena) {
    let player = arena.roster.player;
    let can_kill = arena.players.get(player).map(|p| p.can_kill).unwrap_or(false);
    check_player_collision(&mut arena, can_kill);
    arena.sweep();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_floor(width: i32, height: i32, floor_row: i32) -> TileGrid {
        let mut grid = TileGrid::new(width, height);
        for x in 0..width {
            grid.set_tile(x, floor_row, Some(0));
        }
        grid
    }

    fn hitbox(world: &mut World, x: f32, y: f32, alive: bool) -> Hitbox {
        Hitbox {
            entity: world.spawn_empty().id(),
            position: MapPosition::new(x, y),
            collider: BoxCollider::new(10.0, 10.0),
            alive,
            role: HitRole::Creature,
        }
    }

    #[test]
    fn test_tile_collision_falling() {
        let grid = grid_with_floor(10, 10, 5);
        let pos = MapPosition::new(100.0, 0.0);
        let collider = BoxCollider::new(48.0, 96.0);
        assert_eq!(
            tile_collision(&grid, &pos, &collider, 100.0, 500.0),
            Some(TileCoord::new(1, 5))
        );
        // stops short of the floor
        assert_eq!(tile_collision(&grid, &pos, &collider, 100.0, 224.0), None);
        // one pixel further touches it
        assert!(tile_collision(&grid, &pos, &collider, 100.0, 225.0).is_some());
    }

    #[test]
    fn test_tile_collision_scan_order() {
        let mut grid = TileGrid::new(10, 10);
        grid.set_tile(3, 2, Some(0));
        grid.set_tile(2, 3, Some(0));
        let pos = MapPosition::new(64.0, 128.0);
        let collider = BoxCollider::new(64.0, 128.0);
        // sweeps columns 1..=3 and rows 2..=3; column 2 comes first
        assert_eq!(
            tile_collision(&grid, &pos, &collider, 192.0, 128.0),
            Some(TileCoord::new(2, 3))
        );
    }

    #[test]
    fn test_tile_collision_side_walls() {
        let grid = TileGrid::new(4, 4);
        let collider = BoxCollider::new(32.0, 32.0);
        let pos = MapPosition::new(10.0, 0.0);
        assert_eq!(
            tile_collision(&grid, &pos, &collider, -20.0, 0.0),
            Some(TileCoord::new(-1, 0))
        );
        let pos = MapPosition::new(200.0, 0.0);
        assert_eq!(
            tile_collision(&grid, &pos, &collider, 240.0, 0.0),
            Some(TileCoord::new(4, 0))
        );
        // far past the left edge still reports the column next to the grid
        let pos = MapPosition::new(100.0, 0.0);
        assert_eq!(
            tile_collision(&grid, &pos, &collider, -900.0, 0.0),
            Some(TileCoord::new(-1, 0))
        );
    }

    #[test]
    #[should_panic(expected = "two-axis move")]
    fn test_tile_collision_rejects_diagonal_moves() {
        let grid = TileGrid::new(4, 4);
        let pos = MapPosition::new(0.0, 0.0);
        tile_collision(&grid, &pos, &BoxCollider::new(8.0, 8.0), 5.0, 5.0);
    }

    #[test]
    fn test_is_collision_rules() {
        let mut world = World::new();
        let a = hitbox(&mut world, 0.0, 0.0, true);
        let b = hitbox(&mut world, 5.0, 5.0, true);
        let dead = hitbox(&mut world, 5.0, 5.0, false);
        assert!(is_collision(&a, &b));
        assert!(!is_collision(&a, &a));
        assert!(!is_collision(&a, &dead));
        assert!(!is_collision(&dead, &a));
    }

    #[test]
    fn test_first_colliding_uses_candidate_order() {
        let mut world = World::new();
        let subject = hitbox(&mut world, 0.0, 0.0, true);
        let far = hitbox(&mut world, 50.0, 0.0, true);
        let first = hitbox(&mut world, 4.0, 0.0, true);
        let second = hitbox(&mut world, 2.0, 0.0, true);
        let candidates = [subject, far, first, second];
        let hit = first_colliding(&subject, &candidates).unwrap();
        assert_eq!(hit.entity, first.entity);
        assert!(first_colliding(&subject, &[far]).is_none());
    }
}
