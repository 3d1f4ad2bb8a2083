//! Tilestep headless runner.
//!
//! Loads the maps from a directory and plays a session with a scripted
//! input: run right, jump at intervals, keep the trigger held. Sound commands
//! go to the logging audio sink. Useful to smoke-test level files and to
//! watch the simulation in the log.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --maps assets/maps --frames 2000
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use tilestep::game::Game;
use tilestep::resources::animationstore::AnimationStore;
use tilestep::resources::audio::{setup_audio, shutdown_audio};
use tilestep::resources::gameconfig::GameConfig;
use tilestep::resources::levels::DirectoryLevels;
use tilestep::resources::scores::{FileScoreBoard, ScoreBoard};

/// Tilestep platformer simulation
#[derive(Parser)]
#[command(version, about = "Runs a headless tilestep session with scripted input.")]
struct Cli {
    /// INI file with physics, player, projectile, viewport and scoring settings.
    #[arg(long, value_name = "PATH", default_value = "assets/config.ini")]
    config: PathBuf,

    /// Directory holding map1.txt, map2.txt, ...
    #[arg(long, value_name = "DIR", default_value = "assets/maps")]
    maps: PathBuf,

    /// Optional JSON clip catalogue merged over the built-in clips.
    #[arg(long, value_name = "PATH")]
    clips: Option<PathBuf>,

    /// High score file.
    #[arg(long, value_name = "PATH", default_value = "scores.txt")]
    scores: PathBuf,

    /// Number of steps to run.
    #[arg(long, default_value_t = 1200)]
    frames: u32,

    /// Milliseconds per step.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,

    /// Print the final snapshot as JSON.
    #[arg(long)]
    dump: bool,
}

/// Frames between scripted jumps.
const JUMP_EVERY: u32 = 45;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("using default settings: {e}");
    }

    let mut store = AnimationStore::builtin();
    if let Some(path) = &cli.clips {
        match store.load_json(path) {
            Ok(count) => info!("loaded {count} clips from {}", path.display()),
            Err(e) => error!("{e}"),
        }
    }

    let mut game = Game::new(
        config,
        store,
        Box::new(DirectoryLevels::new(&cli.maps)),
        Box::new(FileScoreBoard::new(&cli.scores)),
    );
    setup_audio(game.world_mut());

    if let Err(e) = game.start() {
        error!("cannot start: {e}");
        shutdown_audio(game.world_mut());
        std::process::exit(1);
    }

    for frame in 0..cli.frames {
        {
            let mut input = game.input_mut();
            input.left.set(false);
            input.right.set(true);
            input.jump.set(frame % JUMP_EVERY == 0);
            input.fire.set(true);
            input.pause.set(false);
            input.restart.set(false);
        }
        game.step(cli.frame_ms);
        if !game.session().is_playing() {
            info!("session ended after {} steps", frame + 1);
            break;
        }
    }

    let session = game.session();
    info!(
        "level {}, score {}, lives {}, status {:?}",
        session.level, session.score, session.lives, session.status
    );
    match FileScoreBoard::new(&cli.scores).top_scores() {
        Ok(scores) => info!("high scores: {scores:?}"),
        Err(e) => warn!("{e}"),
    }

    if cli.dump
        && let Some(snapshot) = game.snapshot()
    {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("cannot serialize snapshot: {e}"),
        }
    }

    shutdown_audio(game.world_mut());
}
