//! Animation clip registry.
//!
//! Clips are shared, read-only frame lists keyed by string ids such as
//! `"grub/left"`. Entities only carry a playback clock
//! ([`Animation`](crate::components::animation::Animation)); every frame size
//! and duration is looked up here. The frame size of the clip an entity is
//! playing is also its collision box.
//!
//! [`AnimationStore::builtin`] provides the stock catalogue for the player,
//! three grub skins, the fly, the power-ups and the shots. A JSON file can add
//! to or replace entries:
//!
//! ```json
//! { "grub/left": { "width": 56, "height": 56,
//!                  "frames": [ { "image": "sucio1.png", "duration_ms": 80 } ] } }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Image id handed to the renderer.
    pub image: String,
    pub duration_ms: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub width: f32,
    pub height: f32,
    pub frames: Vec<Frame>,
}

impl AnimationClip {
    pub fn total_duration(&self) -> f32 {
        self.frames.iter().map(|f| f.duration_ms).sum()
    }

    /// Index of the frame showing `elapsed` ms into one loop of the clip.
    pub fn frame_at(&self, elapsed: f32) -> usize {
        let mut t = 0.0;
        for (i, frame) in self.frames.iter().enumerate() {
            t += frame.duration_ms;
            if elapsed < t {
                return i;
            }
        }
        self.frames.len().saturating_sub(1)
    }

    /// Wrap a running clock into `[0, total_duration)`. Looping clips only.
    pub fn wrap(&self, elapsed: f32) -> f32 {
        let total = self.total_duration();
        if total <= 0.0 { 0.0 } else { elapsed.rem_euclid(total) }
    }

    pub fn image(&self, frame_index: usize) -> Option<&str> {
        self.frames.get(frame_index).map(|f| f.image.as_str())
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationClip>,
}

fn strip(prefix: &str, count: usize, duration_ms: f32) -> Vec<Frame> {
    (1..=count)
        .map(|i| Frame {
            image: format!("{prefix}{i}"),
            duration_ms,
        })
        .collect()
}

fn sequence(prefix: &str, order: &[usize], duration_ms: f32) -> Vec<Frame> {
    order
        .iter()
        .map(|i| Frame {
            image: format!("{prefix}{i}"),
            duration_ms,
        })
        .collect()
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, clip: AnimationClip) {
        self.animations.insert(key.into(), clip);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationClip> {
        self.animations.get(key)
    }

    /// Frame size of a clip, or zero for unknown keys.
    pub fn size_of(&self, key: &str) -> (f32, f32) {
        self.get(key).map(|c| (c.width, c.height)).unwrap_or((0.0, 0.0))
    }

    /// Insert the same frames under `<skin>/left` and a mirrored copy under
    /// `<skin>/right`.
    fn insert_pair(&mut self, skin: &str, variant: &str, size: (f32, f32), frames: Vec<Frame>) {
        let mirror = frames
            .iter()
            .map(|f| Frame {
                image: format!("{}@mirror", f.image),
                duration_ms: f.duration_ms,
            })
            .collect();
        let (left, right) = if variant.is_empty() {
            (format!("{skin}/left"), format!("{skin}/right"))
        } else {
            (format!("{skin}/{variant}_left"), format!("{skin}/{variant}_right"))
        };
        self.insert(left, AnimationClip { width: size.0, height: size.1, frames });
        self.insert(right, AnimationClip { width: size.0, height: size.1, frames: mirror });
    }

    /// Dying clips are the moving clips flipped upside down.
    fn insert_dying(&mut self, skin: &str) {
        for side in ["left", "right"] {
            if let Some(clip) = self.get(&format!("{skin}/{side}")).cloned() {
                let frames = clip
                    .frames
                    .into_iter()
                    .map(|f| Frame {
                        image: format!("{}@flip", f.image),
                        duration_ms: f.duration_ms,
                    })
                    .collect();
                self.insert(
                    format!("{skin}/dying_{side}"),
                    AnimationClip { frames, ..clip },
                );
            }
        }
    }

    /// The stock catalogue.
    pub fn builtin() -> Self {
        let mut store = Self::new();

        let player = (48.0, 96.0);
        store.insert_pair("player", "", player, strip("player", 10, 80.0));
        store.insert_dying("player");
        store.insert_pair("player", "standing", player, strip("standing", 2, 250.0));
        store.insert_pair("player", "jumping", player, strip("salto", 6, 200.0));

        // grub skins: walking, dying, and two damage variants
        let grub = (56.0, 56.0);
        for (skin, dir) in [("grub", ""), ("conny", "conny/"), ("tonny", "tonny/")] {
            store.insert_pair(skin, "", grub, strip(&format!("{dir}sucio"), 26, 80.0));
            store.insert_pair(skin, "dying", grub, strip(&format!("{dir}salvado"), 26, 80.0));
            store.insert_pair(skin, "standing", grub, strip(&format!("{dir}menossucio"), 26, 80.0));
            store.insert_pair(skin, "jumping", grub, strip(&format!("{dir}mmenossucio"), 26, 80.0));
        }

        let fly = (48.0, 40.0);
        store.insert_pair("fly", "", fly, sequence("fly", &[1, 2, 3, 2], 50.0));
        store.insert_dying("fly");
        store.insert_pair("fly", "standing", fly, sequence("fly", &[1, 1], 250.0));
        store.insert_pair("fly", "jumping", fly, sequence("fly", &[1, 2, 3, 2], 50.0));

        store.insert(
            "powerup/star",
            AnimationClip {
                width: 32.0,
                height: 48.0,
                frames: sequence("bottle", &[1, 1], 100.0),
            },
        );
        store.insert(
            "powerup/music",
            AnimationClip {
                width: 40.0,
                height: 40.0,
                frames: sequence("music", &[1, 2, 3, 2], 150.0),
            },
        );
        store.insert(
            "powerup/goal",
            AnimationClip {
                width: 48.0,
                height: 48.0,
                frames: sequence("heart", &[1, 2, 3, 2], 150.0),
            },
        );

        let bullet = strip("bullet", 3, 50.0);
        store.insert(
            "bullet/left",
            AnimationClip { width: 12.0, height: 12.0, frames: bullet.clone() },
        );
        store.insert(
            "bullet/right",
            AnimationClip {
                width: 12.0,
                height: 12.0,
                frames: bullet
                    .into_iter()
                    .map(|f| Frame { image: format!("{}@mirror", f.image), ..f })
                    .collect(),
            },
        );

        store
    }

    /// Merge clips from a JSON file, replacing entries with the same key.
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<usize, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read clip file {}: {}", path.display(), e))?;
        let count = self.merge_json(&text)?;
        info!("Loaded {count} clips from {}", path.display());
        Ok(count)
    }

    pub fn merge_json(&mut self, text: &str) -> Result<usize, String> {
        let clips: FxHashMap<String, AnimationClip> =
            serde_json::from_str(text).map_err(|e| format!("Failed to parse clips: {}", e))?;
        let count = clips.len();
        self.animations.extend(clips);
        Ok(count)
    }
}
