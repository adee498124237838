//! HTTP snapshot source.
//!
//! Downloads a ready-made leaderboard snapshot (`{date_time, leaderboard}`)
//! from whatever service scrapes the tournament page. The HTTP client is
//! owned by the source and dropped with it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::LeaderboardSource;
use crate::types::{LeaderboardSnapshot, PoolError};

const SOURCE_NAME: &str = "http";

pub struct HttpSource {
    http: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("golfpool/0.1.0")
            .build()
            .context("Failed to build HTTP client for leaderboard source")?;

        Ok(Self { http, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LeaderboardSource for HttpSource {
    async fn fetch_snapshot(&self) -> Result<LeaderboardSnapshot> {
        debug!(url = %self.url, "Fetching leaderboard snapshot");

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Leaderboard request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(PoolError::Source {
                source_name: SOURCE_NAME.to_string(),
                message: format!("{status}: {body}"),
            }
            .into());
        }

        let snapshot: LeaderboardSnapshot = resp
            .json()
            .await
            .context("Failed to parse leaderboard snapshot")?;

        info!(
            url = %self.url,
            players = snapshot.leaderboard.len(),
            date_time = %snapshot.date_time,
            "Leaderboard snapshot fetched"
        );

        Ok(snapshot)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}
