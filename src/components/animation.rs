use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::creature::Facing;

/// Per-entity playback state for a clip in the
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
///
/// Frame data is shared; only the clock lives here, so two grubs spawned
/// from the same definitions animate independently.
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    /// Milliseconds into the current loop of the clip.
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Switch to another clip and rewind it. Returns false if `key` was
    /// already playing (nothing changes in that case).
    pub fn switch_to(&mut self, key: &str) -> bool {
        if self.animation_key == key {
            return false;
        }
        self.animation_key = key.to_string();
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        true
    }
}

/// The eight clip variants a creature chooses between.
///
/// Kinds with fewer distinct clips repeat keys (a fly's airborne clips are its
/// standing clips).
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct CreatureClips {
    pub left: String,
    pub right: String,
    pub dying_left: String,
    pub dying_right: String,
    pub standing_left: String,
    pub standing_right: String,
    pub jumping_left: String,
    pub jumping_right: String,
}

impl CreatureClips {
    /// Clip keys following the `<skin>/<variant>` naming of the store.
    pub fn for_skin(skin: &str) -> Self {
        Self {
            left: format!("{skin}/left"),
            right: format!("{skin}/right"),
            dying_left: format!("{skin}/dying_left"),
            dying_right: format!("{skin}/dying_right"),
            standing_left: format!("{skin}/standing_left"),
            standing_right: format!("{skin}/standing_right"),
            jumping_left: format!("{skin}/jumping_left"),
            jumping_right: format!("{skin}/jumping_right"),
        }
    }

    pub fn moving(&self, facing: Facing) -> &str {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }

    pub fn dying(&self, facing: Facing) -> &str {
        match facing {
            Facing::Left => &self.dying_left,
            Facing::Right => &self.dying_right,
        }
    }

    pub fn standing(&self, facing: Facing) -> &str {
        match facing {
            Facing::Left => &self.standing_left,
            Facing::Right => &self.standing_right,
        }
    }

    pub fn jumping(&self, facing: Facing) -> &str {
        match facing {
            Facing::Left => &self.jumping_left,
            Facing::Right => &self.jumping_right,
        }
    }
}
