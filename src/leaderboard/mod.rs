//! Leaderboard acquisition and lookup.
//!
//! Defines the `LeaderboardSource` trait and provides implementations for:
//! - raw table text saved from the leaderboard page
//! - a snapshot JSON document served over HTTP
//!
//! `Leaderboard` is the by-name lookup the scoring engine works against.

pub mod http;
pub mod normalizer;
pub mod raw_text;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::types::{LeaderboardEntry, LeaderboardSnapshot};

pub use normalizer::Normalizer;

/// Abstraction over wherever the current leaderboard comes from.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    /// Produce the current leaderboard snapshot.
    async fn fetch_snapshot(&self) -> Result<LeaderboardSnapshot>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Leaderboard entries keyed by player name.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    by_name: HashMap<String, LeaderboardEntry>,
}

impl Leaderboard {
    /// Build the lookup. A later entry with the same name replaces an earlier one.
    pub fn from_entries(entries: &[LeaderboardEntry]) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        for entry in entries {
            if let Some(prev) = by_name.insert(entry.name.clone(), entry.clone()) {
                debug!(name = %prev.name, replaced = %prev.raw_position, "Duplicate leaderboard name");
            }
        }
        Self { by_name }
    }

    pub fn from_snapshot(snapshot: &LeaderboardSnapshot) -> Self {
        Self::from_entries(&snapshot.leaderboard)
    }

    pub fn get(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
