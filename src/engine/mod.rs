//! Core engine — normalize → score → allocate.
//!
//! `compute_results` is a pure pass over in-memory data: the same snapshot
//! and bet definitions always yield the same results artifact.

pub mod prize;
pub mod scoring;

use anyhow::{Context, Result};
use tracing::info;

use crate::leaderboard::{Leaderboard, LeaderboardSource};
use crate::storage::Store;
use crate::types::{LeaderboardSnapshot, Pool, PoolError};

use prize::{PrizeAllocator, TierPayout};
use scoring::{MissingPick, ScoringEngine};

/// Everything one scoring pass produced.
#[derive(Debug, Clone)]
pub struct PoolResults {
    /// The results artifact, gamblers in ranking order.
    pub pool: Pool,
    pub missing: Vec<MissingPick>,
    pub payouts: Vec<TierPayout>,
}

/// Score `pool` against `snapshot` and allocate the pot.
pub fn compute_results(
    snapshot: &LeaderboardSnapshot,
    mut pool: Pool,
    allocator: &PrizeAllocator,
) -> Result<PoolResults, PoolError> {
    pool.validate()?;

    let board = Leaderboard::from_snapshot(snapshot);
    let report = ScoringEngine::new(&board).score_all(&mut pool.gamblers);
    let payouts = allocator.allocate(pool.total_prize, &mut pool.gamblers);
    pool.snapshot_timestamp = Some(snapshot.date_time.clone());

    info!(
        players = board.len(),
        gamblers = pool.gamblers.len(),
        bets = report.bets_scored,
        missing = report.missing.len(),
        tiers = payouts.len(),
        date_time = %snapshot.date_time,
        "Pool scored"
    );

    Ok(PoolResults {
        pool,
        missing: report.missing,
        payouts,
    })
}

/// Replace the stored snapshot with a fresh one from `source`.
pub async fn refresh(source: &dyn LeaderboardSource, store: &dyn Store) -> Result<LeaderboardSnapshot> {
    let snapshot = source
        .fetch_snapshot()
        .await
        .with_context(|| format!("Leaderboard source {} failed", source.name()))?;
    store.save_snapshot(&snapshot)?;
    Ok(snapshot)
}

/// Score the stored bets against the stored snapshot and save the results.
pub fn score_stored(store: &dyn Store, allocator: &PrizeAllocator) -> Result<PoolResults> {
    let snapshot = store.load_snapshot().context("No leaderboard snapshot available")?;
    let bets = store.load_bets().context("No bet definitions available")?;

    let results = compute_results(&snapshot, bets, allocator)?;
    store.save_results(&results.pool)?;
    Ok(results)
}
