//! Whole-step tests: a `Game` built over in-memory maps, ticked with chosen
//! elapsed times, and inspected through its world.

use bevy_ecs::prelude::*;

use tilestep::components::boxcollider::BoxCollider;
use tilestep::components::creature::{Creature, CreatureKind, Facing, LifeState};
use tilestep::components::mapposition::MapPosition;
use tilestep::components::rigidbody::RigidBody;
use tilestep::events::audio::{AudioCmd, FX_BOOP, FX_PRIZE, TRACK_DRUMS};
use tilestep::game::Game;
use tilestep::resources::animationstore::AnimationStore;
use tilestep::resources::audio::attach_audio;
use tilestep::resources::gameconfig::GameConfig;
use tilestep::resources::gamesession::{GameSession, SessionStatus};
use tilestep::resources::levels::InMemoryLevels;
use tilestep::resources::roster::Roster;
use tilestep::resources::scores::{MemoryScoreBoard, ScoreKeeper};
use tilestep::resources::viewport::Viewport;
use tilestep::spawn::{spawn_creature, spawn_projectile};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// `rows` lines of `width` cells; the last one solid, the rest from `fill`.
fn map(width: usize, rows: usize, fill: impl Fn(usize, usize) -> char) -> String {
    let mut lines = Vec::new();
    for y in 0..rows - 1 {
        lines.push((0..width).map(|x| fill(x, y)).collect::<String>());
    }
    lines.push("A".repeat(width));
    lines.join("\n")
}

fn floor_map(width: usize, rows: usize) -> String {
    map(width, rows, |_, _| ' ')
}

fn game_with(levels: InMemoryLevels, config: GameConfig) -> Game {
    let mut game = Game::new(
        config,
        AnimationStore::builtin(),
        Box::new(levels),
        Box::new(MemoryScoreBoard::new()),
    );
    game.start().unwrap();
    game
}

fn single_level(text: String) -> Game {
    game_with(InMemoryLevels::new().with_level(1, text), GameConfig::new())
}

fn player(game: &Game) -> Entity {
    game.player().unwrap()
}

fn position(game: &Game, entity: Entity) -> MapPosition {
    *game.world().get::<MapPosition>(entity).unwrap()
}

fn body(game: &Game, entity: Entity) -> RigidBody {
    *game.world().get::<RigidBody>(entity).unwrap()
}

fn creature(game: &Game, entity: Entity) -> Creature {
    game.world().get::<Creature>(entity).unwrap().clone()
}

fn roster(game: &Game) -> Vec<Entity> {
    game.world().resource::<Roster>().entities().to_vec()
}

fn push_to_roster(game: &mut Game, entity: Entity) {
    game.world_mut().resource_mut::<Roster>().push(entity);
}

fn top_scores(game: &Game) -> Vec<u32> {
    game.world().resource::<ScoreKeeper>().0.top_scores().unwrap()
}

fn make_dying(game: &mut Game, entity: Entity) {
    let world = game.world_mut();
    let mut query = world.query::<(&mut Creature, &mut RigidBody)>();
    let (mut c, mut b) = query.get_mut(world, entity).unwrap();
    assert!(c.set_state(LifeState::Dying, &mut b));
}

// ---------------------------------------------------------------- falling

#[test]
fn falling_player_lands_on_floor() {
    let mut game = single_level(floor_map(10, 6));
    let p = player(&game);
    assert_eq!(position(&game, p), MapPosition::new(192.0, 0.0));

    let mut last_y = 0.0;
    for _ in 0..100 {
        game.step(16.0);
        let y = position(&game, p).y;
        assert!(y >= last_y, "player moved up while falling: {last_y} -> {y}");
        last_y = y;
    }

    let height = game.world().get::<BoxCollider>(p).unwrap().height;
    assert_eq!(height, 96.0);
    assert!(approx_eq(position(&game, p).y, 5.0 * 64.0 - height));
    assert!(creature(&game, p).on_ground);
    assert!(approx_eq(body(&game, p).vy, 0.0));
}

#[test]
fn gravity_grows_fall_speed_every_step() {
    let mut game = single_level(floor_map(10, 40));
    let p = player(&game);

    let mut last_vy = body(&game, p).vy;
    for _ in 0..20 {
        game.step(10.0);
        let vy = body(&game, p).vy;
        assert!(vy > last_vy);
        assert!(approx_eq(vy - last_vy, 0.002 * 10.0));
        last_vy = vy;
    }
    assert!(!creature(&game, p).on_ground);
}

#[test]
fn lag_spike_does_not_tunnel_through_floor() {
    let mut game = single_level(floor_map(10, 6));
    let p = player(&game);

    game.step(2000.0);

    assert!(approx_eq(position(&game, p).y, 224.0));
    assert!(creature(&game, p).on_ground);
    assert!(creature(&game, p).is_alive());
}

#[test]
fn lag_spike_does_not_tunnel_through_wall() {
    let text = map(10, 6, |x, _| if x == 8 { 'A' } else { ' ' });
    let mut game = single_level(text);
    let p = player(&game);

    game.input_mut().right.set(true);
    game.step(2000.0);

    assert!(approx_eq(position(&game, p).x, 8.0 * 64.0 - 48.0));
    assert!(approx_eq(body(&game, p).vx, 0.0));
    assert!(approx_eq(position(&game, p).y, 224.0));
}

// ---------------------------------------------------------------- contacts

#[test]
fn landing_on_a_creature_pounces() {
    let text = map(10, 6, |x, y| if (x, y) == (3, 4) { '1' } else { ' ' });
    let mut game = single_level(text);
    let p = player(&game);
    let grub = roster(&game)[0];

    for _ in 0..100 {
        game.step(16.0);
        if game.session().score > 0 {
            break;
        }
    }

    assert_eq!(game.session().score, 100);
    assert_eq!(game.session().lives, 3);
    assert_eq!(creature(&game, grub).state(), LifeState::Dying);
    assert!(creature(&game, p).is_alive());
    assert!(approx_eq(body(&game, p).vy, -0.95));
    assert!(approx_eq(position(&game, p).y, position(&game, grub).y - 96.0));
}

#[test]
fn walking_creature_kills_player_and_level_reloads() {
    let text = map(10, 6, |x, y| if (x, y) == (5, 4) { '1' } else { ' ' });
    let mut game = single_level(text);
    let p = player(&game);

    for _ in 0..300 {
        game.step(16.0);
        if game.session().lives < 3 {
            break;
        }
    }
    assert_eq!(game.session().lives, 2);
    assert_eq!(creature(&game, p).state(), LifeState::Dying);
    assert!(game.session().is_playing());

    let mut reloaded = false;
    for _ in 0..300 {
        game.step(16.0);
        if player(&game) != p {
            reloaded = true;
            break;
        }
    }
    assert!(reloaded);
    let fresh = player(&game);
    assert!(creature(&game, fresh).is_alive());
    assert_eq!(position(&game, fresh), MapPosition::new(192.0, 0.0));
    assert_eq!(game.session().lives, 2);
    assert_eq!(game.session().level, 1);
    assert!(game.session().pending_level.is_none());
    assert!(game.world().get_entity(p).is_err());
}

// ---------------------------------------------------------------- projectiles

#[test]
fn three_hits_kill_a_grub() {
    let mut game = single_level(floor_map(10, 6));
    let rx = attach_audio(game.world_mut());
    let grub = spawn_creature(game.world_mut(), CreatureKind::Grub, "grub", 400.0, 264.0);
    push_to_roster(&mut game, grub);

    let mut shots = Vec::new();
    for hit in 1..=3 {
        let x = position(&game, grub).x + 20.0;
        let shot = spawn_projectile(game.world_mut(), Facing::Right, x, 280.0);
        push_to_roster(&mut game, shot);
        shots.push(shot);

        game.step(1.0);

        let c = creature(&game, grub);
        assert_eq!(c.health, 3 - hit);
        assert!(!roster(&game).contains(&shot));
    }

    assert_eq!(creature(&game, grub).state(), LifeState::Dying);
    assert_eq!(game.session().score, 100);
    assert_eq!(roster(&game), vec![grub]);
    for shot in shots {
        assert!(game.world().get_entity(shot).is_err());
    }
    let sounds: Vec<AudioCmd> = rx.try_iter().collect();
    assert_eq!(sounds.iter().filter(|c| **c == AudioCmd::fx(FX_BOOP)).count(), 1);

    // dying only moves forward, and ends with the grub gone
    let mut last = LifeState::Dying;
    for _ in 0..25 {
        game.step(100.0);
        match game.world().get::<Creature>(grub) {
            Some(c) => {
                assert!(c.state() >= last);
                last = c.state();
            }
            None => {
                last = LifeState::Dead;
                break;
            }
        }
    }
    assert_eq!(last, LifeState::Dead);
    assert!(roster(&game).is_empty());
    assert!(game.world().get_entity(grub).is_err());
}

#[test]
fn projectiles_leaving_the_view_are_removed() {
    let mut game = single_level(floor_map(10, 6));
    let gone_right = spawn_projectile(game.world_mut(), Facing::Right, 805.0, 100.0);
    let gone_left = spawn_projectile(game.world_mut(), Facing::Left, -5.0, 100.0);
    let kept = spawn_projectile(game.world_mut(), Facing::Right, 700.0, 100.0);
    for shot in [gone_right, gone_left, kept] {
        push_to_roster(&mut game, shot);
    }

    game.step(20.0);

    assert_eq!(roster(&game), vec![kept]);
    assert!(game.world().get_entity(gone_right).is_err());
    assert!(game.world().get_entity(gone_left).is_err());
    assert!(approx_eq(position(&game, kept).x, 708.0));
    assert!(approx_eq(position(&game, kept).y, 100.0));
}

#[test]
fn firing_needs_ammo() {
    let mut config = GameConfig::new();
    config.ammo = 2;
    let mut game = game_with(InMemoryLevels::new().with_level(1, floor_map(10, 6)), config);

    for _ in 0..100 {
        game.input_mut().fire.set(true);
        game.step(16.0);
    }

    assert_eq!(game.session().ammo, 0);
}

// ---------------------------------------------------------------- removal

#[test]
fn dead_creatures_leave_roster_in_order() {
    let text = map(40, 6, |x, y| {
        if y == 4 && x >= 14 && x % 2 == 0 { '1' } else { ' ' }
    });
    let mut game = single_level(text);
    let grubs = roster(&game);
    assert_eq!(grubs.len(), 13);

    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let mut doomed = vec![grubs[0]];
    let mut survivors = vec![grubs[1]];
    for &grub in &grubs[2..] {
        if rng.bool() {
            doomed.push(grub);
        } else {
            survivors.push(grub);
        }
    }
    for &grub in &doomed {
        make_dying(&mut game, grub);
    }

    game.step(2100.0);

    assert_eq!(roster(&game), survivors);
    for grub in doomed {
        assert!(game.world().get_entity(grub).is_err());
    }
    for grub in survivors {
        assert!(creature(&game, grub).is_alive());
    }
}

// ---------------------------------------------------------------- session

#[test]
fn final_score_is_recorded_once() {
    let mut config = GameConfig::new();
    config.lives = 1;
    let text = vec![" ".repeat(10); 4].join("\n");
    let mut game = game_with(InMemoryLevels::new().with_level(1, text), config);
    let p = player(&game);

    for _ in 0..300 {
        game.step(16.0);
    }

    assert_eq!(game.session().status, SessionStatus::GameOver);
    assert!(game.session().score_recorded);
    assert_eq!(top_scores(&game), vec![0]);
    // no reload after game over
    assert_eq!(player(&game), p);

    game.input_mut().restart.set(true);
    game.step(16.0);

    assert!(game.session().is_playing());
    assert!(!game.session().score_recorded);
    assert_eq!(game.session().lives, 1);
    assert_ne!(player(&game), p);
    assert_eq!(top_scores(&game), vec![0]);
}

#[test]
fn pause_freezes_the_world() {
    let mut game = single_level(floor_map(10, 6));
    let p = player(&game);
    game.step(16.0);

    game.input_mut().pause.set(true);
    game.step(16.0);
    assert!(game.session().paused);
    let before = position(&game, p);
    game.input_mut().pause.set(false);
    for _ in 0..10 {
        game.step(16.0);
    }
    assert_eq!(position(&game, p), before);

    game.input_mut().pause.set(true);
    game.step(16.0);
    assert!(!game.session().paused);
    game.input_mut().pause.set(false);
    game.step(16.0);
    assert!(position(&game, p).y > before.y);
}

#[test]
fn goal_advances_until_levels_run_out() {
    let text = map(10, 6, |x, y| if (x, y) == (3, 4) { '*' } else { ' ' });
    let levels = InMemoryLevels::new()
        .with_level(1, text.clone())
        .with_level(2, text);
    let mut config = GameConfig::new();
    config.ammo = 5;
    let mut game = game_with(levels, config);
    game.world_mut().resource_mut::<GameSession>().ammo = 1;

    for _ in 0..100 {
        game.step(16.0);
        if game.session().level == 2 {
            break;
        }
    }
    assert_eq!(game.session().level, 2);
    assert_eq!(game.session().ammo, 5);
    assert!(game.session().is_playing());

    for _ in 0..100 {
        game.step(16.0);
        if !game.session().is_playing() {
            break;
        }
    }
    assert_eq!(game.session().status, SessionStatus::Won);
    assert_eq!(game.session().level, 2);
    assert_eq!(top_scores(&game), vec![0]);
}

// ---------------------------------------------------------------- power-ups

#[test]
fn walking_into_star_and_music() {
    let text = map(10, 6, |x, y| match (x, y) {
        (5, 4) => 'o',
        (7, 4) => '!',
        _ => ' ',
    });
    let mut game = single_level(text);
    let rx = attach_audio(game.world_mut());
    assert_eq!(roster(&game).len(), 2);

    for _ in 0..50 {
        game.step(16.0);
    }
    assert!(creature(&game, player(&game)).on_ground);
    assert_eq!(game.session().score, 0);

    game.input_mut().right.set(true);
    for _ in 0..40 {
        game.step(16.0);
    }

    assert_eq!(game.session().score, 50);
    assert_eq!(game.session().ammo, 4);
    assert!(roster(&game).is_empty());
    let sounds: Vec<AudioCmd> = rx.try_iter().collect();
    assert_eq!(sounds.iter().filter(|c| **c == AudioCmd::fx(FX_PRIZE)).count(), 2);
    assert_eq!(
        sounds
            .iter()
            .filter(|c| **c == AudioCmd::ToggleTrack { track: TRACK_DRUMS })
            .count(),
        1
    );
}

#[test]
fn pickup_happens_before_the_vertical_move() {
    let text = map(10, 6, |x, y| if (x, y) == (4, 4) { 'o' } else { ' ' });
    let mut game = single_level(text);
    let p = player(&game);
    for _ in 0..50 {
        game.step(16.0);
    }
    assert!(approx_eq(position(&game, p).y, 224.0));

    // one long step: sideways onto the star, then up and clear of it
    game.input_mut().right.set(true);
    game.input_mut().jump.set(true);
    game.step(100.0);

    assert!(approx_eq(position(&game, p).x, 242.0));
    assert!(approx_eq(position(&game, p).y, 149.0));
    assert_eq!(game.session().score, 50);
    assert!(roster(&game).is_empty());
}

// ---------------------------------------------------------------- wake-up

#[test]
fn creatures_wake_when_they_enter_the_view() {
    let text = map(40, 6, |x, y| match (x, y) {
        (7, 4) | (30, 4) => '1',
        _ => ' ',
    });
    let mut game = single_level(text);
    let near = roster(&game)[0];
    let far = roster(&game)[1];

    game.step(16.0);
    assert!(approx_eq(body(&game, near).vx, -0.05));
    assert!(approx_eq(body(&game, far).vx, 0.0));

    let p = player(&game);
    game.world_mut().get_mut::<MapPosition>(p).unwrap().x = 1700.0;
    game.step(16.0);

    let view = *game.world().resource::<Viewport>();
    assert!(approx_eq(view.left, 1300.0));
    assert!(approx_eq(body(&game, far).vx, -0.05));
    assert!(approx_eq(body(&game, near).vx, -0.05));
}

// ---------------------------------------------------------------- facing

#[test]
fn facing_follows_movement_not_keys() {
    let mut game = single_level(floor_map(10, 6));
    let p = player(&game);
    for _ in 0..50 {
        game.step(16.0);
    }

    game.input_mut().left.set(true);
    game.step(16.0);
    assert_eq!(creature(&game, p).facing, Facing::Left);

    game.input_mut().left.set(true);
    game.input_mut().right.set(true);
    for _ in 0..3 {
        game.step(16.0);
    }
    assert!(approx_eq(body(&game, p).vx, 0.0));
    assert_eq!(creature(&game, p).facing, Facing::Left);
}
