//! Scoring engine.
//!
//! Matches every bet against the leaderboard and awards points from an
//! ordered rule table. The first rule whose predicate holds decides the
//! points for a bet; tiers never stack.

use tracing::{debug, warn};

use crate::leaderboard::Leaderboard;
use crate::types::{Bet, Gambler};

/// Marks a shared position, as in "T5".
const TIE_MARKER: char = 'T';

// ---------------------------------------------------------------------------
// Point rules
// ---------------------------------------------------------------------------

/// One tier of the point table.
#[derive(Debug, Clone, Copy)]
pub struct PointRule {
    pub name: &'static str,
    /// `(actual, predicted) -> applies`
    pub applies: fn(u32, u32) -> bool,
    pub points: u32,
}

/// Point tiers in priority order.
pub const POINT_RULES: &[PointRule] = &[
    PointRule { name: "winner", applies: |actual: u32, _: u32| actual == 1, points: 50 },
    PointRule { name: "exact", applies: |actual: u32, predicted: u32| actual < 10 && actual == predicted, points: 30 },
    PointRule { name: "top-ten", applies: |actual: u32, _: u32| actual < 10, points: 15 },
];

/// Points for a bet whose player finished at `actual`.
pub fn points_for(actual: u32, predicted: u32) -> u32 {
    POINT_RULES
        .iter()
        .find(|rule| (rule.applies)(actual, predicted))
        .map(|rule| rule.points)
        .unwrap_or(0)
}

/// Numeric position from leaderboard text: "T5" and "T 5" both give 5.
/// Blank or non-numeric text ("", "CUT", "E") is an unknown position.
pub fn parse_position(raw: &str) -> Option<u32> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != TIE_MARKER && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A non-empty pick that does not appear on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPick {
    pub gambler: String,
    pub predicted_position: u32,
    pub name: String,
}

/// Outcome of scoring a whole pool.
#[derive(Debug, Clone, Default)]
pub struct ScoringReport {
    pub bets_scored: usize,
    pub missing: Vec<MissingPick>,
}

pub struct ScoringEngine<'a> {
    board: &'a Leaderboard,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(board: &'a Leaderboard) -> Self {
        Self { board }
    }

    /// Fill in `loc`, `cut` and points for one bet. Returns `false` when a
    /// non-empty pick is not on the leaderboard.
    pub fn score_bet(&self, bet: &mut Bet) -> bool {
        bet.points = 0;
        bet.actual_position_text = None;
        bet.is_cut = None;

        let Some(entry) = self.board.get(&bet.picked_name) else {
            return bet.picked_name.is_empty();
        };

        bet.actual_position_text = Some(entry.raw_position.trim().to_string());
        bet.is_cut = Some(entry.is_cut);
        if let Some(actual) = parse_position(&entry.raw_position) {
            bet.points = points_for(actual, bet.predicted_position);
        }

        debug!(
            player = %bet.picked_name,
            predicted = bet.predicted_position,
            actual = %entry.raw_position,
            points = bet.points,
            "Bet scored"
        );
        true
    }

    /// Score every bet of a gambler and set their total.
    pub fn score_gambler(&self, gambler: &mut Gambler) -> Vec<MissingPick> {
        let mut missing = Vec::new();
        for bet in gambler.bets.iter_mut() {
            if !self.score_bet(bet) {
                warn!(
                    gambler = %gambler.name,
                    predicted = bet.predicted_position,
                    name = %bet.picked_name,
                    "Pick missing from leaderboard"
                );
                missing.push(MissingPick {
                    gambler: gambler.name.clone(),
                    predicted_position: bet.predicted_position,
                    name: bet.picked_name.clone(),
                });
            }
        }
        gambler.total_points = gambler.bets.iter().map(|b| b.points).sum();
        missing
    }

    /// Score all gamblers in place.
    pub fn score_all(&self, gamblers: &mut [Gambler]) -> ScoringReport {
        let mut report = ScoringReport::default();
        for gambler in gamblers.iter_mut() {
            report.bets_scored += gambler.bets.len();
            report.missing.extend(self.score_gambler(gambler));
        }
        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
