//! The simulation driver.
//!
//! [`Game`] owns the ECS world and the step schedule. The host fills
//! [`InputState`] each frame, calls [`Game::step`] with the measured elapsed
//! milliseconds, and reads [`Game::snapshot`] to draw.
//!
//! Level changes never happen inside the schedule. Systems park them in
//! [`GameSession::pending_level`] and the driver applies them once the step
//! has finished, so nothing observes a half-loaded level.

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use serde::Serialize;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::creature::{Creature, Facing, LifeState};
use crate::components::mapposition::MapPosition;
use crate::events::audio::{AudioCmd, MUSIC_BACKGROUND};
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamesession::{GameSession, LevelRequest, SessionStatus};
use crate::resources::input::InputState;
use crate::resources::levels::{LevelError, LevelProvider};
use crate::resources::roster::Roster;
use crate::resources::scores::{ScoreBoard, ScoreKeeper};
use crate::resources::tilegrid::TileGrid;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::spawn::spawn_level;
use crate::systems::animation::animate_sprites;
use crate::systems::audio::{forward_audio_cmds, update_bevy_audio_cmds};
use crate::systems::collision::{player_contacts, projectile_hits};
use crate::systems::gamestate::{not_paused, record_final_score, session_is_playing};
use crate::systems::input::player_input;
use crate::systems::physics::creature_physics;
use crate::systems::projectile::move_projectiles;
use crate::systems::time::update_world_time;
use crate::systems::viewport::{follow_player, wake_visible_creatures};

/// What a renderer needs to draw one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub clip: String,
    pub frame: usize,
    /// Image name of the current frame, if the clip is known.
    pub image: Option<String>,
    /// Set for creatures.
    pub facing: Option<Facing>,
}

/// Read-only view of the world after a step.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub grid: &'a TileGrid,
    pub viewport_left: f32,
    /// Player first, then the roster in order.
    pub sprites: Vec<SpriteView>,
}

pub struct Game {
    world: World,
    schedule: Schedule,
    levels: Box<dyn LevelProvider>,
}

impl Game {
    pub fn new(
        config: GameConfig,
        store: AnimationStore,
        levels: Box<dyn LevelProvider>,
        scores: Box<dyn ScoreBoard>,
    ) -> Self {
        let mut world = World::new();
        let (width, height) = config.viewport_size();
        world.insert_resource(GameSession::new(&config));
        world.insert_resource(config);
        world.insert_resource(store);
        world.insert_resource(InputState::default());
        world.insert_resource(WorldTime::default());
        world.insert_resource(Viewport::new(width, height));
        world.insert_resource(TileGrid::default());
        world.insert_resource(ScoreKeeper(scores));
        world.init_resource::<Messages<AudioCmd>>();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                player_input.run_if(session_is_playing),
                (
                    follow_player,
                    wake_visible_creatures,
                    creature_physics,
                    animate_sprites,
                    move_projectiles,
                    projectile_hits,
                    player_contacts,
                )
                    .chain()
                    .run_if(not_paused),
                record_final_score,
                forward_audio_cmds,
                update_bevy_audio_cmds,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            levels,
        }
    }

    /// Load the first level.
    pub fn start(&mut self) -> Result<(), LevelError> {
        self.load_level(1)
    }

    /// Replace every level entity with a fresh copy of level `id`.
    pub fn load_level(&mut self, id: u32) -> Result<(), LevelError> {
        let level = self.levels.load_level(id)?;

        let stale: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<MapPosition>>()
            .iter(&self.world)
            .collect();
        for entity in stale {
            self.world.despawn(entity);
        }

        let roster = spawn_level(&mut self.world, &level);
        self.world.insert_resource(roster);
        self.world.insert_resource(level.grid);
        self.world.resource_mut::<Viewport>().left = 0.0;
        {
            let mut session = self.world.resource_mut::<GameSession>();
            session.level = id;
            session.pending_level = None;
        }
        self.world.write_message(AudioCmd::PlayMusic {
            id: MUSIC_BACKGROUND.to_string(),
            looped: true,
        });
        info!("level {id} loaded");
        Ok(())
    }

    /// Run one simulation step of `elapsed` milliseconds.
    pub fn step(&mut self, elapsed: f32) {
        if !self.world.contains_resource::<Roster>() {
            warn!("step called before a level was loaded");
            return;
        }

        let restart = self.world.resource::<InputState>().restart.just_pressed;
        let playing = self.world.resource::<GameSession>().is_playing();
        if restart && !playing {
            self.restart_game();
            return;
        }
        if playing && self.player_state() == Some(LifeState::Dead) {
            self.world
                .resource_mut::<GameSession>()
                .request_level(LevelRequest::Reload);
            self.apply_level_request();
            return;
        }

        update_world_time(&mut self.world, elapsed);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
        self.apply_level_request();
    }

    /// Fresh session on level 1.
    pub fn restart_game(&mut self) {
        let config = self.world.resource::<GameConfig>().clone();
        self.world.resource_mut::<GameSession>().reset(&config);
        info!("restarting");
        if let Err(e) = self.load_level(1) {
            error!("cannot restart: {e}");
            self.end_game(SessionStatus::GameOver);
        }
    }

    fn reload_level(&mut self) {
        let id = self.world.resource::<GameSession>().level;
        if let Err(e) = self.load_level(id) {
            error!("cannot reload level {id}: {e}");
            self.end_game(SessionStatus::GameOver);
        }
    }

    fn apply_level_request(&mut self) {
        let Some(request) = self.world.resource_mut::<GameSession>().pending_level.take() else {
            return;
        };
        let current = self.world.resource::<GameSession>().level;
        match request {
            LevelRequest::Reload => self.reload_level(),
            LevelRequest::Next => match self.load_level(current + 1) {
                Ok(()) => {}
                Err(LevelError::NotFound(id)) => {
                    info!("no level {id}, game won");
                    self.end_game(SessionStatus::Won);
                }
                Err(e) => {
                    error!("cannot load next level: {e}");
                    self.end_game(SessionStatus::GameOver);
                }
            },
        }
    }

    fn end_game(&mut self, status: SessionStatus) {
        self.world.resource_mut::<GameSession>().status = status;
        if let Err(e) = self.world.run_system_cached(record_final_score) {
            error!("score recording did not run: {e}");
        }
    }

    fn player_state(&self) -> Option<LifeState> {
        let player = self.player()?;
        self.world.get::<Creature>(player).map(|c| c.state())
    }

    /// Draw list for the current world, or `None` before the first level.
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        let roster = self.world.get_resource::<Roster>()?;
        let store = self.world.resource::<AnimationStore>();
        let sprites = std::iter::once(roster.player)
            .chain(roster.entities().iter().copied())
            .filter_map(|entity| {
                let position = self.world.get::<MapPosition>(entity)?;
                let collider = self.world.get::<BoxCollider>(entity)?;
                let animation = self.world.get::<Animation>(entity)?;
                let image = store
                    .get(&animation.animation_key)
                    .and_then(|clip| clip.image(animation.frame_index))
                    .map(str::to_string);
                Some(SpriteView {
                    x: position.x,
                    y: position.y,
                    width: collider.width,
                    height: collider.height,
                    clip: animation.animation_key.clone(),
                    frame: animation.frame_index,
                    image,
                    facing: self.world.get::<Creature>(entity).map(|c| c.facing),
                })
            })
            .collect();
        Some(Snapshot {
            grid: self.world.resource::<TileGrid>(),
            viewport_left: self.world.resource::<Viewport>().left,
            sprites,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn input_mut(&mut self) -> Mut<'_, InputState> {
        self.world.resource_mut::<InputState>()
    }

    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    pub fn player(&self) -> Option<Entity> {
        self.world.get_resource::<Roster>().map(|r| r.player)
    }
}
