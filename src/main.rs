//! golfpool — golf tournament betting pool scorer
//!
//! Entry point. Loads configuration, initialises structured logging and
//! runs one command:
//!
//! - `import <file> [date_time]` normalize saved leaderboard text into a snapshot
//! - `fetch` download the current snapshot
//! - `score` score the bets against the stored snapshot (default)
//! - `run` fetch, then score

use anyhow::{bail, Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use golfpool::config::AppConfig;
use golfpool::engine::prize::PrizeAllocator;
use golfpool::engine::{refresh, score_stored};
use golfpool::leaderboard::http::HttpSource;
use golfpool::leaderboard::raw_text::RawTextSource;
use golfpool::leaderboard::Normalizer;
use golfpool::storage::{FileStore, Store};

const USAGE: &str = "usage: golfpool [import <file> [date_time] | fetch | score | run]";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = AppConfig::load(&AppConfig::path_from_env())?;

    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let store = FileStore::new(&cfg.storage);

    info!(pool = %cfg.pool.name, command = args.first().map(String::as_str).unwrap_or("score"), "golfpool starting");

    match args.first().map(String::as_str) {
        Some("import") => {
            let Some(path) = args.get(1) else { bail!(USAGE) };
            let mut source = RawTextSource::new(path, normalizer(&cfg));
            if let Some(date_time) = args.get(2) {
                source = source.with_date_time(date_time.clone());
            }
            refresh(&source, &store).await.map(|_| ())
        }
        Some("fetch") => refresh(&http_source(&cfg)?, &store).await.map(|_| ()),
        Some("run") => {
            refresh(&http_source(&cfg)?, &store).await?;
            score(&cfg, &store)
        }
        Some("score") | None => score(&cfg, &store),
        Some(other) => bail!("unknown command {other:?}\n{USAGE}"),
    }
}

fn normalizer(cfg: &AppConfig) -> Normalizer {
    Normalizer::new(cfg.leaderboard.cut_sentinels.clone())
}

fn http_source(cfg: &AppConfig) -> Result<HttpSource> {
    let url = cfg
        .leaderboard
        .url
        .as_deref()
        .context("leaderboard.url is not configured")?;
    HttpSource::new(url, Duration::from_secs(cfg.leaderboard.timeout_secs))
}

/// Score the stored bets and log the standings.
fn score(cfg: &AppConfig, store: &dyn Store) -> Result<()> {
    let results = score_stored(store, &PrizeAllocator::from_config(&cfg.pool))?;

    if !results.missing.is_empty() {
        warn!(count = results.missing.len(), "Some picks are not on the leaderboard");
    }
    for (rank, gambler) in results.pool.gamblers.iter().enumerate() {
        info!(rank = rank + 1, "{gambler}");
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("golfpool=info"));

    let json_logging = std::env::var("GOLFPOOL_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
