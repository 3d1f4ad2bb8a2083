//! Ordered collection of the level's live entities.
//!
//! The roster is the single source of truth for "what is in the level" and
//! its order is the iteration order for physics and overlap scans. Entities
//! are never removed while a pass walks the list: they are marked with
//! [`Roster::mark_removed`] and dropped in one go by [`Roster::compact`],
//! which keeps the survivors in their original relative order.

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

#[derive(Resource, Debug, Clone)]
pub struct Roster {
    /// The player is updated on its own, before everything else.
    pub player: Entity,
    entities: Vec<Entity>,
    doomed: SmallVec<[Entity; 8]>,
}

impl Roster {
    pub fn new(player: Entity) -> Self {
        Self {
            player,
            entities: Vec::new(),
            doomed: SmallVec::new(),
        }
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in iteration order, including ones marked this step.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Owned copy of the current order, for passes that also need `&mut self`.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    /// Flag an entity for removal at the next [`compact`](Self::compact).
    /// Returns false if it was already flagged.
    pub fn mark_removed(&mut self, entity: Entity) -> bool {
        if self.doomed.contains(&entity) {
            return false;
        }
        self.doomed.push(entity);
        true
    }

    /// Neither removed nor waiting to be.
    pub fn is_live(&self, entity: Entity) -> bool {
        !self.doomed.contains(&entity) && self.entities.contains(&entity)
    }

    /// Drop every flagged entity and return them for despawning.
    pub fn compact(&mut self) -> SmallVec<[Entity; 8]> {
        if self.doomed.is_empty() {
            return SmallVec::new();
        }
        let doomed = std::mem::take(&mut self.doomed);
        self.entities.retain(|e| !doomed.contains(e));
        doomed
    }
}
