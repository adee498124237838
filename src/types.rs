//! Shared types for the golf pool.
//!
//! These types mirror the JSON artifacts exchanged with the scraping and
//! rendering shells, so the serde field names (`pos`, `punten`, `totaal`, ...)
//! are part of the wire format and must not change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// One player row of a tournament leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Reported position text, e.g. "1", "T5" or "" when unknown.
    #[serde(rename = "pos")]
    pub raw_position: String,
    pub name: String,
    /// Whether the player missed the cut.
    #[serde(rename = "cut")]
    pub is_cut: bool,
}

impl LeaderboardEntry {
    pub fn new(raw_position: impl Into<String>, name: impl Into<String>, is_cut: bool) -> Self {
        Self {
            raw_position: raw_position.into(),
            name: name.into(),
            is_cut,
        }
    }
}

/// A complete leaderboard as captured at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub date_time: String,
    pub leaderboard: Vec<LeaderboardEntry>,
}

// ---------------------------------------------------------------------------
// Bets
// ---------------------------------------------------------------------------

/// A single pick: a player and the position the gambler expects them to finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    #[serde(rename = "pos")]
    pub predicted_position: u32,
    /// Empty for an intentionally unused slot.
    #[serde(rename = "name")]
    pub picked_name: String,
    /// Position text of the matched leaderboard entry, `None` when not found.
    #[serde(rename = "loc", default)]
    pub actual_position_text: Option<String>,
    #[serde(rename = "punten", default)]
    pub points: u32,
    #[serde(rename = "cut", default)]
    pub is_cut: Option<bool>,
}

impl Bet {
    pub fn new(predicted_position: u32, picked_name: impl Into<String>) -> Self {
        Self {
            predicted_position,
            picked_name: picked_name.into(),
            actual_position_text: None,
            points: 0,
            is_cut: None,
        }
    }
}

/// A pool participant with their picks and results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gambler {
    pub name: String,
    #[serde(rename = "bet")]
    pub bets: Vec<Bet>,
    #[serde(rename = "totaal", default)]
    pub total_points: u32,
    /// Formatted payout; empty when the gambler wins nothing, `None` before allocation.
    #[serde(rename = "winnings", default)]
    pub prize_amount: Option<String>,
}

impl Gambler {
    pub fn new(name: impl Into<String>, bets: Vec<Bet>) -> Self {
        Self {
            name: name.into(),
            bets,
            total_points: 0,
            prize_amount: None,
        }
    }
}

impl fmt::Display for Gambler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pts", self.name, self.total_points)?;
        match self.prize_amount.as_deref() {
            Some(prize) if !prize.is_empty() => write!(f, ", {prize})"),
            _ => write!(f, ")"),
        }
    }
}

/// The betting pool: bet definitions on input, the results artifact on output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Total prize money.
    #[serde(rename = "pot")]
    pub total_prize: Decimal,
    pub gamblers: Vec<Gambler>,
    /// Copied from the leaderboard snapshot the results were computed against.
    #[serde(rename = "date_time", default, skip_serializing_if = "Option::is_none")]
    pub snapshot_timestamp: Option<String>,
}

impl Pool {
    /// Reject bet definitions that list the same gambler twice.
    pub fn validate(&self) -> Result<(), PoolError> {
        let mut seen = std::collections::HashSet::new();
        for gambler in &self.gamblers {
            if !seen.insert(gambler.name.as_str()) {
                return Err(PoolError::DuplicateGambler(gambler.name.clone()));
            }
        }
        Ok(())
    }

    /// Sum of all bet points across all gamblers.
    pub fn total_bet_points(&self) -> u32 {
        self.gamblers
            .iter()
            .flat_map(|g| g.bets.iter())
            .map(|b| b.points)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Malformed leaderboard: {section} section has {lines} lines, not a multiple of 3")]
    MalformedLeaderboard { section: &'static str, lines: usize },

    #[error("Duplicate gambler in bet definitions: {0}")]
    DuplicateGambler(String),

    #[error("Leaderboard source error ({source_name}): {message}")]
    Source { source_name: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
