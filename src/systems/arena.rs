//! Shared system parameter for gameplay systems.
//!
//! Every system that moves, hits or removes level entities needs roughly the
//! same set of queries and resources. [`Arena`] bundles them, with one query
//! per component so that any two of them can be borrowed mutably at once.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{Creature, LifeState};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::powerup::PowerUp;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::AudioCmd;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamesession::GameSession;
use crate::resources::roster::Roster;
use crate::systems::collision::{HitRole, Hitbox};

#[derive(SystemParam)]
pub struct Arena<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub roster: ResMut<'w, Roster>,
    pub session: ResMut<'w, GameSession>,
    pub config: Res<'w, GameConfig>,
    pub audio_cmds: MessageWriter<'w, AudioCmd>,
    pub positions: Query<'w, 's, &'static mut MapPosition>,
    pub rigid_bodies: Query<'w, 's, &'static mut RigidBody>,
    pub box_colliders: Query<'w, 's, &'static mut BoxCollider>,
    pub creatures: Query<'w, 's, &'static mut Creature>,
    pub players: Query<'w, 's, &'static mut Player>,
    pub power_ups: Query<'w, 's, &'static PowerUp>,
    pub projectiles: Query<'w, 's, &'static Projectile>,
}

impl Arena<'_, '_> {
    /// Collision data for one entity, if it takes part in overlap tests.
    pub fn hitbox(&self, entity: Entity) -> Option<Hitbox> {
        let position = *self.positions.get(entity).ok()?;
        let collider = *self.box_colliders.get(entity).ok()?;
        let (role, alive) = if let Ok(creature) = self.creatures.get(entity) {
            (HitRole::Creature, creature.is_alive())
        } else if let Ok(power_up) = self.power_ups.get(entity) {
            (HitRole::PowerUp(power_up.kind), true)
        } else if self.projectiles.contains(entity) {
            (HitRole::Projectile, true)
        } else {
            return None;
        };
        Some(Hitbox {
            entity,
            position,
            collider,
            alive,
            role,
        })
    }

    /// Hitboxes of live roster entities in roster order.
    pub fn live_hitboxes(&self, keep: impl Fn(&Hitbox) -> bool) -> Vec<Hitbox> {
        self.roster
            .entities()
            .iter()
            .filter(|e| self.roster.is_live(**e))
            .filter_map(|e| self.hitbox(*e))
            .filter(|h| keep(h))
            .collect()
    }

    /// Lethal contact: one life less and the player starts dying.
    pub fn kill_player(&mut self) {
        let player = self.roster.player;
        let (Ok(mut creature), Ok(mut body)) =
            (self.creatures.get_mut(player), self.rigid_bodies.get_mut(player))
        else {
            return;
        };
        if creature.set_state(LifeState::Dying, &mut body) {
            self.session.lose_life();
            debug!("player dying, {} lives left", self.session.lives);
        }
    }

    /// Drop everything marked for removal and despawn it.
    pub fn sweep(&mut self) {
        for entity in self.roster.compact() {
            self.commands.entity(entity).try_despawn();
        }
    }
}
