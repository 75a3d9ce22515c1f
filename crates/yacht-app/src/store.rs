//! Append-only persistence for final game totals.
//!
//! Entries carry a monotonically increasing id so that the leaderboard can
//! order equal scores by the time they were recorded.

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: u64,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access score file {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("malformed score entry at {path:?} line {line}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
        line: usize,
    },
    #[error("failed to encode score entry: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait ScoreStore {
    /// Appends one final total.
    fn record_score(&mut self, name: &str, score: u32) -> Result<(), StoreError>;

    /// Best `limit` entries, highest score first; older entries win ties.
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError>;
}

fn rank(mut entries: Vec<ScoreEntry>, limit: usize) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
    entries.truncate(limit);
    entries
}

/// One JSON object per line in a local file.
#[derive(Debug, Clone)]
pub struct JsonlScoreStore {
    path: PathBuf,
}

impl JsonlScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            source,
            path: self.path.clone(),
        }
    }

    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|err| self.io_error(err))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: ScoreEntry =
                serde_json::from_str(&line).map_err(|source| StoreError::Parse {
                    source,
                    path: self.path.clone(),
                    line: idx + 1,
                })?;
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl ScoreStore for JsonlScoreStore {
    fn record_score(&mut self, name: &str, score: u32) -> Result<(), StoreError> {
        let next_id = self
            .load()?
            .iter()
            .map(|entry| entry.id)
            .max()
            .map_or(1, |id| id + 1);
        let entry = ScoreEntry {
            id: next_id,
            name: name.to_string(),
            score,
        };
        let line = serde_json::to_string(&entry)?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| self.io_error(err))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.io_error(err))?;
        writeln!(file, "{line}").map_err(|err| self.io_error(err))?;
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(rank(self.load()?, limit))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    entries: Vec<ScoreEntry>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

impl ScoreStore for MemoryScoreStore {
    fn record_score(&mut self, name: &str, score: u32) -> Result<(), StoreError> {
        let id = self.entries.len() as u64 + 1;
        self.entries.push(ScoreEntry {
            id,
            name: name.to_string(),
            score,
        });
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(rank(self.entries.clone(), limit))
    }
}
