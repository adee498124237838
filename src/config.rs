//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the file named by `GOLFPOOL_CONFIG`) and
//! deserializes into strongly-typed structs. Every key has a default,
//! so a partial file is enough.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Env var overriding the config file path.
pub const CONFIG_ENV: &str = "GOLFPOOL_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PoolConfig {
    /// Tournament name, used in log output only.
    pub name: String,
    pub currency_symbol: String,
    pub decimal_separator: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "Golf pool".to_string(),
            currency_symbol: "€".to_string(),
            decimal_separator: ",".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Line prefixes that separate active players from those who missed the cut.
    pub cut_sentinels: Vec<String>,
    /// Where `fetch` downloads the snapshot JSON from.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            cut_sentinels: vec!["The".to_string(), "Pro".to_string()],
            url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub leaderboard_file: String,
    pub bets_file: String,
    pub results_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            leaderboard_file: "leaderboard.json".to_string(),
            bets_file: "bets.json".to_string(),
            results_file: "results.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.pool.decimal_separator.is_empty() {
            return Err(crate::types::PoolError::Config(
                "pool.decimal_separator must not be empty".to_string(),
            )
            .into());
        }
        Ok(config)
    }

    /// Config path from `GOLFPOOL_CONFIG`, falling back to `config.toml`.
    pub fn path_from_env() -> String {
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }
}
