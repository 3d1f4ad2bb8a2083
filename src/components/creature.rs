//! Creatures: gravity-affected entities with a life cycle.
//!
//! A [`Creature`] goes through [`LifeState::Normal`] → [`LifeState::Dying`] →
//! [`LifeState::Dead`] and never back. Behaviour that differs per kind (top
//! speed, flying, how a tile collision is answered) comes from a static
//! [`CreatureTraits`] record looked up through [`CreatureKind::traits`].

use bevy_ecs::prelude::Component;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::components::rigidbody::RigidBody;

/// Health every creature starts with.
pub const MAX_HEALTH: i32 = 3;

/// Ordered life cycle. `Ord` follows the only legal direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Normal,
    Dying,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    Player,
    Grub,
    Fly,
}

/// Reaction to a tile hit on one axis.
pub type CollideCallback = fn(creature: &mut Creature, body: &mut RigidBody);

/// Per-kind capability record.
#[derive(Debug)]
pub struct CreatureTraits {
    /// Horizontal speed in px/ms.
    pub max_speed: f32,
    /// Initial value of [`Creature::on_ground`].
    pub spawns_grounded: bool,
    /// Starts walking left the first time it is seen on screen.
    pub wakes_up: bool,
    /// Moving down a whole pixel clears `on_ground`.
    pub tracks_falling: bool,
    pub flying: fn(&Creature) -> bool,
    pub collide_horizontal: CollideCallback,
    pub collide_vertical: CollideCallback,
}

fn never_flies(_: &Creature) -> bool {
    false
}

fn flies_while_alive(creature: &Creature) -> bool {
    creature.is_alive()
}

fn bounce_horizontal(_: &mut Creature, body: &mut RigidBody) {
    body.vx = -body.vx;
}

fn stop_horizontal(_: &mut Creature, body: &mut RigidBody) {
    body.vx = 0.0;
}

fn stop_vertical(_: &mut Creature, body: &mut RigidBody) {
    body.vy = 0.0;
}

fn land_vertical(creature: &mut Creature, body: &mut RigidBody) {
    if body.vy > 0.0 {
        creature.on_ground = true;
    }
    body.vy = 0.0;
}

static PLAYER_TRAITS: CreatureTraits = CreatureTraits {
    max_speed: 0.5,
    spawns_grounded: false,
    wakes_up: false,
    tracks_falling: true,
    flying: never_flies,
    collide_horizontal: stop_horizontal,
    collide_vertical: land_vertical,
};

static GRUB_TRAITS: CreatureTraits = CreatureTraits {
    max_speed: 0.05,
    spawns_grounded: true,
    wakes_up: true,
    tracks_falling: false,
    flying: never_flies,
    collide_horizontal: bounce_horizontal,
    collide_vertical: stop_vertical,
};

static FLY_TRAITS: CreatureTraits = CreatureTraits {
    max_speed: 0.2,
    spawns_grounded: false,
    wakes_up: true,
    tracks_falling: false,
    flying: flies_while_alive,
    collide_horizontal: bounce_horizontal,
    collide_vertical: stop_vertical,
};

impl CreatureKind {
    pub fn traits(self) -> &'static CreatureTraits {
        match self {
            CreatureKind::Player => &PLAYER_TRAITS,
            CreatureKind::Grub => &GRUB_TRAITS,
            CreatureKind::Fly => &FLY_TRAITS,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Creature {
    pub kind: CreatureKind,
    state: LifeState,
    state_time: f32,
    pub on_ground: bool,
    pub facing: Facing,
    pub health: i32,
}

impl Creature {
    pub fn new(kind: CreatureKind) -> Self {
        Self {
            kind,
            state: LifeState::Normal,
            state_time: 0.0,
            on_ground: kind.traits().spawns_grounded,
            facing: Facing::Right,
            health: MAX_HEALTH,
        }
    }

    pub fn traits(&self) -> &'static CreatureTraits {
        self.kind.traits()
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    /// Milliseconds spent in the current state.
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Normal
    }

    pub fn is_flying(&self) -> bool {
        (self.traits().flying)(self)
    }

    pub fn is_player(&self) -> bool {
        self.kind == CreatureKind::Player
    }

    /// Move forward in the life cycle.
    ///
    /// Requests to stay put or go backwards are ignored and return false.
    /// Entering [`LifeState::Dying`] stops the body.
    pub fn set_state(&mut self, state: LifeState, body: &mut RigidBody) -> bool {
        if state <= self.state {
            if state < self.state {
                debug!("ignoring {:?} -> {:?} for {:?}", self.state, state, self.kind);
            }
            return false;
        }
        self.state = state;
        self.state_time = 0.0;
        if state == LifeState::Dying {
            body.stop();
        }
        true
    }

    /// Advance the state clock. Returns true when this call finished dying.
    pub fn tick_state(&mut self, elapsed: f32, die_time: f32, body: &mut RigidBody) -> bool {
        self.state_time += elapsed;
        if self.state == LifeState::Dying && self.state_time >= die_time {
            return self.set_state(LifeState::Dead, body);
        }
        false
    }

    /// Take one point of damage. Returns true if this hit started dying.
    pub fn take_hit(&mut self, body: &mut RigidBody) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - 1).max(0);
        self.health == 0 && self.set_state(LifeState::Dying, body)
    }

    /// Start walking left if standing idle.
    pub fn wake_up(&self, body: &mut RigidBody) {
        if self.traits().wakes_up && self.is_alive() && body.vx == 0.0 {
            body.vx = -self.traits().max_speed;
        }
    }

    /// Jump if standing on something, or unconditionally when `force` is set
    /// (bouncing off a defeated enemy).
    pub fn jump(&mut self, body: &mut RigidBody, force: bool, jump_speed: f32) -> bool {
        if self.on_ground || force {
            self.on_ground = false;
            body.vy = jump_speed;
            return true;
        }
        false
    }

    pub fn collide_horizontal(&mut self, body: &mut RigidBody) {
        (self.traits().collide_horizontal)(self, body);
    }

    pub fn collide_vertical(&mut self, body: &mut RigidBody) {
        (self.traits().collide_vertical)(self, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_only_moves_forward() {
        let mut c = Creature::new(CreatureKind::Grub);
        let mut body = RigidBody::with_velocity(-0.05, 0.1);
        assert!(c.set_state(LifeState::Dying, &mut body));
        assert!(body.is_still());
        assert!(!c.set_state(LifeState::Normal, &mut body));
        assert_eq!(c.state(), LifeState::Dying);
        assert!(c.set_state(LifeState::Dead, &mut body));
        assert!(!c.set_state(LifeState::Dying, &mut body));
        assert_eq!(c.state(), LifeState::Dead);
    }

    #[test]
    fn test_state_time_resets_on_transition() {
        let mut c = Creature::new(CreatureKind::Grub);
        let mut body = RigidBody::new();
        c.tick_state(500.0, 2080.0, &mut body);
        assert_eq!(c.state_time(), 500.0);
        c.set_state(LifeState::Dying, &mut body);
        assert_eq!(c.state_time(), 0.0);
    }

    #[test]
    fn test_dying_becomes_dead_after_die_time() {
        let mut c = Creature::new(CreatureKind::Fly);
        let mut body = RigidBody::new();
        c.set_state(LifeState::Dying, &mut body);
        assert!(!c.tick_state(2000.0, 2080.0, &mut body));
        assert_eq!(c.state(), LifeState::Dying);
        assert!(c.tick_state(80.0, 2080.0, &mut body));
        assert_eq!(c.state(), LifeState::Dead);
        assert_eq!(c.state_time(), 0.0);
    }

    #[test]
    fn test_three_hits_kill() {
        let mut c = Creature::new(CreatureKind::Grub);
        let mut body = RigidBody::with_velocity(-0.05, 0.0);
        assert!(!c.take_hit(&mut body));
        assert!(!c.take_hit(&mut body));
        assert_eq!(c.health, 1);
        assert_eq!(c.state(), LifeState::Normal);
        assert!(c.take_hit(&mut body));
        assert_eq!(c.health, 0);
        assert_eq!(c.state(), LifeState::Dying);
        assert!(!c.take_hit(&mut body));
        assert_eq!(c.health, 0);
    }

    #[test]
    fn test_kind_behaviour() {
        let mut grub = Creature::new(CreatureKind::Grub);
        let mut body = RigidBody::with_velocity(0.05, 0.3);
        grub.collide_horizontal(&mut body);
        assert_eq!(body.vx, -0.05);
        grub.collide_vertical(&mut body);
        assert_eq!(body.vy, 0.0);
        assert!(grub.on_ground);

        let mut player = Creature::new(CreatureKind::Player);
        let mut body = RigidBody::with_velocity(0.5, -0.3);
        player.collide_horizontal(&mut body);
        assert_eq!(body.vx, 0.0);
        // hitting a ceiling does not ground the player
        player.collide_vertical(&mut body);
        assert!(!player.on_ground);
        body.vy = 0.4;
        player.collide_vertical(&mut body);
        assert!(player.on_ground);
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn test_fly_only_flies_while_alive() {
        let mut fly = Creature::new(CreatureKind::Fly);
        let mut body = RigidBody::new();
        assert!(fly.is_flying());
        fly.set_state(LifeState::Dying, &mut body);
        assert!(!fly.is_flying());
    }

    #[test]
    fn test_jump_needs_ground_unless_forced() {
        let mut player = Creature::new(CreatureKind::Player);
        let mut body = RigidBody::new();
        assert!(!player.jump(&mut body, false, -0.95));
        assert_eq!(body.vy, 0.0);
        assert!(player.jump(&mut body, true, -0.95));
        assert_eq!(body.vy, -0.95);
        player.on_ground = true;
        body.vy = 0.0;
        assert!(player.jump(&mut body, false, -0.95));
        assert!(!player.on_ground);
    }

    #[test]
    fn test_wake_up_walks_left() {
        let grub = Creature::new(CreatureKind::Grub);
        let mut body = RigidBody::new();
        grub.wake_up(&mut body);
        assert_eq!(body.vx, -0.05);
        // already moving: unchanged
        body.vx = 0.05;
        grub.wake_up(&mut body);
        assert_eq!(body.vx, 0.05);

        let player = Creature::new(CreatureKind::Player);
        let mut body = RigidBody::new();
        player.wake_up(&mut body);
        assert_eq!(body.vx, 0.0);
    }
}
