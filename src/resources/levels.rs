//! Level provider and the character-grid map format.
//!
//! A map is a text file, one row of tiles per line:
//!
//! ```text
//! # comment lines start with '#'
//!
//!          o o o         *
//!     1   AAAAAAA   4  AAAAA
//! AAAAAAAAAAAAAAAAAAAAAAAAAAA
//! ```
//!
//! - `A`..`L` solid tiles (the letter picks the tile image)
//! - `o` star, `!` music note, `*` goal
//! - `1`, `2`, `3` grubs (three skins), `4` fly
//! - anything else is empty space
//!
//! The grid is as wide as the longest line. The player always starts at
//! tile column 3 on the top row.

use std::path::PathBuf;

use log::{debug, info};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::components::creature::CreatureKind;
use crate::components::powerup::PowerUpKind;
use crate::resources::tilegrid::{TileCoord, TileGrid, TileId};

/// Number of tile images, `A` through `L`.
pub const TILE_KINDS: u8 = 12;

/// Player start, in tiles.
pub const PLAYER_START: TileCoord = TileCoord { x: 3, y: 0 };

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {0} not found")]
    NotFound(u32),

    #[error("failed to read level {id}: {source}")]
    Io {
        id: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("level {0} has no rows")]
    Empty(u32),
}

/// What a map character asks to be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Creature {
        kind: CreatureKind,
        /// Clip set prefix in the animation store.
        skin: &'static str,
    },
    PowerUp(PowerUpKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub kind: SpawnKind,
    pub tile: TileCoord,
}

/// Everything needed to build a level: its grid and what to put in it.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub grid: TileGrid,
    /// In map order: top to bottom, left to right.
    pub spawns: Vec<Spawn>,
    pub player_start: TileCoord,
}

/// Source of level data.
///
/// `NotFound` is the normal way to say "there are no more levels".
pub trait LevelProvider: Send + Sync {
    fn load_level(&self, id: u32) -> Result<LevelData, LevelError>;
}

fn spawn_for(ch: char) -> Option<SpawnKind> {
    let kind = match ch {
        'o' => SpawnKind::PowerUp(PowerUpKind::Star),
        '!' => SpawnKind::PowerUp(PowerUpKind::Music),
        '*' => SpawnKind::PowerUp(PowerUpKind::Goal),
        '1' => SpawnKind::Creature {
            kind: CreatureKind::Grub,
            skin: "grub",
        },
        '2' => SpawnKind::Creature {
            kind: CreatureKind::Grub,
            skin: "conny",
        },
        '3' => SpawnKind::Creature {
            kind: CreatureKind::Grub,
            skin: "tonny",
        },
        '4' => SpawnKind::Creature {
            kind: CreatureKind::Fly,
            skin: "fly",
        },
        _ => return None,
    };
    Some(kind)
}

fn tile_for(ch: char) -> Option<TileId> {
    let offset = (ch as u32).checked_sub('A' as u32)?;
    (offset < TILE_KINDS as u32).then_some(offset as TileId)
}

/// Parse a character-grid map.
pub fn parse_text_map(id: u32, text: &str) -> Result<LevelData, LevelError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.starts_with('#'))
        .collect();
    if lines.is_empty() {
        return Err(LevelError::Empty(id));
    }

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut grid = TileGrid::new(width as i32, lines.len() as i32);
    let mut spawns = Vec::new();

    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let (x, y) = (x as i32, y as i32);
            if let Some(tile) = tile_for(ch) {
                grid.set_tile(x, y, Some(tile));
            } else if let Some(kind) = spawn_for(ch) {
                spawns.push(Spawn {
                    kind,
                    tile: TileCoord::new(x, y),
                });
            }
        }
    }

    debug!(
        "parsed level {id}: {}x{} tiles, {} spawns",
        grid.width(),
        grid.height(),
        spawns.len()
    );

    Ok(LevelData {
        grid,
        spawns,
        player_start: PLAYER_START,
    })
}

/// Reads `map{id}.txt` from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryLevels {
    dir: PathBuf,
}

impl DirectoryLevels {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: u32) -> PathBuf {
        self.dir.join(format!("map{id}.txt"))
    }
}

impl LevelProvider for DirectoryLevels {
    fn load_level(&self, id: u32) -> Result<LevelData, LevelError> {
        let path = self.path_for(id);
        let text = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LevelError::NotFound(id)
            } else {
                LevelError::Io { id, source }
            }
        })?;
        info!("Loading level {id} from {}", path.display());
        parse_text_map(id, &text)
    }
}

/// Maps held in memory, keyed by level id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLevels {
    maps: FxHashMap<u32, String>,
}

impl InMemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, id: u32, text: impl Into<String>) -> Self {
        self.maps.insert(id, text.into());
        self
    }
}

impl LevelProvider for InMemoryLevels {
    fn load_level(&self, id: u32) -> Result<LevelData, LevelError> {
        let text = self.maps.get(&id).ok_or(LevelError::NotFound(id))?;
        parse_text_map(id, text)
    }
}
