//! Raw table-text source.
//!
//! Reads the leaderboard table text as saved from the tournament page
//! (one cell per line) and normalizes it into a snapshot.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use std::path::PathBuf;
use tracing::info;

use super::{LeaderboardSource, Normalizer};
use crate::types::LeaderboardSnapshot;

const SOURCE_NAME: &str = "raw-text";

/// Timestamp format used when the caller supplies none.
const DATE_TIME_FORMAT: &str = "%B %-d, %Y %H:%M";

pub struct RawTextSource {
    path: PathBuf,
    normalizer: Normalizer,
    date_time: Option<String>,
}

impl RawTextSource {
    pub fn new(path: impl Into<PathBuf>, normalizer: Normalizer) -> Self {
        Self {
            path: path.into(),
            normalizer,
            date_time: None,
        }
    }

    /// Stamp snapshots with a fixed timestamp instead of the local time.
    pub fn with_date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = Some(date_time.into());
        self
    }
}

#[async_trait]
impl LeaderboardSource for RawTextSource {
    async fn fetch_snapshot(&self) -> Result<LeaderboardSnapshot> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read leaderboard text from {}", self.path.display()))?;

        let leaderboard = self
            .normalizer
            .normalize_text(&text)
            .with_context(|| format!("Rejected leaderboard text in {}", self.path.display()))?;

        let date_time = self
            .date_time
            .clone()
            .unwrap_or_else(|| Local::now().format(DATE_TIME_FORMAT).to_string());

        info!(
            path = %self.path.display(),
            players = leaderboard.len(),
            date_time = %date_time,
            "Leaderboard text imported"
        );

        Ok(LeaderboardSnapshot { date_time, leaderboard })
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}
