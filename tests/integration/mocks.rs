//! In-memory source and store for integration testing.
//!
//! `MockSource` serves a fixed leaderboard and `MemoryStore` keeps the
//! artifacts in memory, so the whole pipeline runs with no files or network.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;

use golfpool::leaderboard::LeaderboardSource;
use golfpool::storage::Store;
use golfpool::types::{LeaderboardSnapshot, Pool, PoolError};

/// A leaderboard source returning a preset snapshot.
pub struct MockSource {
    snapshot: LeaderboardSnapshot,
    /// If set, `fetch_snapshot` fails with this message.
    force_error: Mutex<Option<String>>,
    calls: Mutex<usize>,
}

impl MockSource {
    pub fn new(snapshot: LeaderboardSnapshot) -> Self {
        Self {
            snapshot,
            force_error: Mutex::new(None),
            calls: Mutex::new(0),
        }
    }

    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LeaderboardSource for MockSource {
    async fn fetch_snapshot(&self) -> Result<LeaderboardSnapshot> {
        *self.calls.lock().unwrap() += 1;
        if let Some(msg) = self.force_error.lock().unwrap().as_ref() {
            return Err(anyhow!("{msg}"));
        }
        Ok(self.snapshot.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A store holding each artifact in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub snapshot: Mutex<Option<LeaderboardSnapshot>>,
    pub bets: Mutex<Option<Pool>>,
    pub results: Mutex<Option<Pool>>,
}

impl MemoryStore {
    pub fn with_bets(bets: Pool) -> Self {
        Self {
            bets: Mutex::new(Some(bets)),
            ..Self::default()
        }
    }
}

fn missing(what: &str) -> anyhow::Error {
    PoolError::Storage(format!("no {what} stored")).into()
}

impl Store for MemoryStore {
    fn load_snapshot(&self) -> Result<LeaderboardSnapshot> {
        self.snapshot.lock().unwrap().clone().ok_or_else(|| missing("snapshot"))
    }

    fn save_snapshot(&self, snapshot: &LeaderboardSnapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    fn load_bets(&self) -> Result<Pool> {
        self.bets.lock().unwrap().clone().ok_or_else(|| missing("bets"))
    }

    fn load_results(&self) -> Result<Pool> {
        self.results.lock().unwrap().clone().ok_or_else(|| missing("results"))
    }

    fn save_results(&self, results: &Pool) -> Result<()> {
        *self.results.lock().unwrap() = Some(results.clone());
        Ok(())
    }
}
