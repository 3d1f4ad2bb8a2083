//! Player input.
//!
//! [`player_input`] turns the [`InputState`] written by the input provider
//! into player intent: horizontal velocity, jumps, shots and the pause
//! toggle. Everything except pausing is ignored while the player is not
//! alive or the game is paused.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::creature::Facing;
use crate::events::audio::{AudioCmd, FX_FIRE, MUSIC_BACKGROUND};
use crate::resources::animationstore::AnimationStore;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::spawn::projectile_bundle;
use crate::systems::Arena;

pub fn player_input(
    input: Res<InputState>,
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    mut arena: Arena,
) {
    if input.pause.just_pressed {
        arena.session.paused = !arena.session.paused;
        info!("paused: {}", arena.session.paused);
        let cmd = if arena.session.paused {
            AudioCmd::StopMusic {
                id: MUSIC_BACKGROUND.to_string(),
            }
        } else {
            AudioCmd::PlayMusic {
                id: MUSIC_BACKGROUND.to_string(),
                looped: true,
            }
        };
        arena.audio_cmds.write(cmd);
    }

    let player = arena.roster.player;
    let paused = arena.session.paused;
    let jump_speed = arena.config.jump_speed;

    let (Ok(mut creature), Ok(mut body)) =
        (arena.creatures.get_mut(player), arena.rigid_bodies.get_mut(player))
    else {
        return;
    };
    if !creature.is_alive() {
        return;
    }

    let max_speed = creature.traits().max_speed;
    let mut vx = 0.0;
    if input.left.active {
        vx -= max_speed;
    }
    if input.right.active {
        vx += max_speed;
    }
    body.vx = vx;

    if input.jump.just_pressed && !paused {
        creature.jump(&mut body, false, jump_speed);
    }
    // facing itself changes in clip selection; shots follow the new heading
    let facing = match vx {
        v if v < 0.0 => Facing::Left,
        v if v > 0.0 => Facing::Right,
        _ => creature.facing,
    };

    let Ok(mut shooter) = arena.players.get_mut(player) else {
        return;
    };
    shooter.cool_down(time.delta);
    if !input.fire.active || paused || !shooter.ready_to_fire() {
        return;
    }
    if !arena.session.take_ammo() {
        return;
    }
    shooter.rearm(arena.config.fire_delay_ms);

    let (Ok(position), Ok(collider)) = (arena.positions.get(player), arena.box_colliders.get(player))
    else {
        return;
    };
    let offset = match facing {
        Facing::Left => 0.0,
        Facing::Right => collider.width / 2.0,
    };
    let x = position.x + offset;
    let y = position.y + collider.height / 2.0 - 16.0;

    let shot = arena
        .commands
        .spawn(projectile_bundle(facing, &store, &arena.config, x, y))
        .id();
    arena.roster.push(shot);
    arena.audio_cmds.write(AudioCmd::fx(FX_FIRE));
    debug!("fired {:?} from ({x}, {y}), {} shots left", shot, arena.session.ammo);
}
