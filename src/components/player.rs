use bevy_ecs::prelude::Component;

/// Marks the player-controlled creature.
///
/// Lives next to a [`Creature`](crate::components::creature::Creature) of kind
/// `Player`; only state that no other creature needs is kept here.
#[derive(Component, Debug, Clone, Default)]
pub struct Player {
    /// Set by the vertical pass when the player moved down this step. A
    /// contact resolved afterwards is a pounce instead of a lethal hit.
    pub can_kill: bool,
    /// Milliseconds until the next shot is allowed.
    pub fire_cooldown: f32,
}

impl Player {
    pub fn ready_to_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    pub fn cool_down(&mut self, elapsed: f32) {
        self.fire_cooldown = (self.fire_cooldown - elapsed).max(0.0);
    }

    pub fn rearm(&mut self, delay_ms: f32) {
        self.fire_cooldown = delay_ms;
    }
}
