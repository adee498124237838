//! Persistence layer.
//!
//! The engine only needs "read current snapshot" and "write current results";
//! `Store` keeps the medium opaque. `FileStore` keeps each artifact as a
//! pretty-printed JSON file in one directory. A missing input is an error,
//! never a fresh default.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::types::{LeaderboardSnapshot, Pool, PoolError};

/// Storage for the pool's JSON artifacts.
pub trait Store {
    fn load_snapshot(&self) -> Result<LeaderboardSnapshot>;
    fn save_snapshot(&self, snapshot: &LeaderboardSnapshot) -> Result<()>;

    /// Bet definitions: the pot and every gambler's picks.
    fn load_bets(&self) -> Result<Pool>;

    fn load_results(&self) -> Result<Pool>;
    fn save_results(&self, results: &Pool) -> Result<()>;
}

/// JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    leaderboard: PathBuf,
    bets: PathBuf,
    results: PathBuf,
}

impl FileStore {
    pub fn new(cfg: &StorageConfig) -> Self {
        Self {
            leaderboard: cfg.data_dir.join(&cfg.leaderboard_file),
            bets: cfg.data_dir.join(&cfg.bets_file),
            results: cfg.data_dir.join(&cfg.results_file),
        }
    }

    pub fn results_path(&self) -> &Path {
        &self.results
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
        if !path.exists() {
            return Err(PoolError::Storage(format!("{} does not exist", path.display())).into());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), "Loaded");
        Ok(value)
    }

    fn write<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialise {}", path.display()))?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "Saved");
        Ok(())
    }
}

impl Store for FileStore {
    fn load_snapshot(&self) -> Result<LeaderboardSnapshot> {
        Self::read(&self.leaderboard)
    }

    fn save_snapshot(&self, snapshot: &LeaderboardSnapshot) -> Result<()> {
        Self::write(&self.leaderboard, snapshot)?;
        info!(
            path = %self.leaderboard.display(),
            players = snapshot.leaderboard.len(),
            "Leaderboard snapshot saved"
        );
        Ok(())
    }

    fn load_bets(&self) -> Result<Pool> {
        let pool: Pool = Self::read(&self.bets)?;
        pool.validate()
            .with_context(|| format!("Invalid bet definitions in {}", self.bets.display()))?;
        Ok(pool)
    }

    fn load_results(&self) -> Result<Pool> {
        Self::read(&self.results)
    }

    fn save_results(&self, results: &Pool) -> Result<()> {
        Self::write(&self.results, results)?;
        info!(path = %self.results.display(), "Results saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
