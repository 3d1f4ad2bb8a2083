//! High-score persistence.
//!
//! The simulation hands the final score to a [`ScoreBoard`] once per game
//! over. [`FileScoreBoard`] keeps the best five scores in a text file, one per
//! line, highest first. [`MemoryScoreBoard`] does the same without touching
//! the disk.

use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use thiserror::Error;

/// How many scores are kept.
pub const MAX_SCORES: usize = 5;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait ScoreBoard: Send + Sync {
    fn append_score(&mut self, value: u32) -> Result<(), ScoreError>;

    /// Best scores, highest first.
    fn top_scores(&self) -> Result<Vec<u32>, ScoreError>;
}

/// Resource wrapper so systems can reach the board.
#[derive(Resource)]
pub struct ScoreKeeper(pub Box<dyn ScoreBoard>);

fn merge(mut scores: Vec<u32>, value: u32) -> Vec<u32> {
    scores.push(value);
    scores.sort_unstable_by(|a, b| b.cmp(a));
    scores.truncate(MAX_SCORES);
    scores
}

#[derive(Debug, Clone, Default)]
pub struct MemoryScoreBoard {
    scores: Vec<u32>,
    /// Every value ever appended, in order, including ones that fell off.
    pub appended: Vec<u32>,
}

impl MemoryScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreBoard for MemoryScoreBoard {
    fn append_score(&mut self, value: u32) -> Result<(), ScoreError> {
        self.appended.push(value);
        self.scores = merge(std::mem::take(&mut self.scores), value);
        Ok(())
    }

    fn top_scores(&self) -> Result<Vec<u32>, ScoreError> {
        Ok(self.scores.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FileScoreBoard {
    path: PathBuf,
}

impl FileScoreBoard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> ScoreError {
        ScoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read(&self) -> Result<Vec<u32>, ScoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        let mut scores = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match line.parse::<u32>() {
                Ok(v) => scores.push(v),
                Err(_) => warn!("skipping bad score line {:?} in {}", line, self.path.display()),
            }
        }
        Ok(scores)
    }
}

impl ScoreBoard for FileScoreBoard {
    fn append_score(&mut self, value: u32) -> Result<(), ScoreError> {
        let scores = merge(self.read()?, value);
        let mut out = String::new();
        for s in &scores {
            out.push_str(&s.to_string());
            out.push('\n');
        }
        std::fs::write(&self.path, out).map_err(|e| self.io_error(e))?;
        info!("recorded score {value} in {}", self.path.display());
        Ok(())
    }

    fn top_scores(&self) -> Result<Vec<u32>, ScoreError> {
        let mut scores = self.read()?;
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_SCORES);
        Ok(scores)
    }
}
