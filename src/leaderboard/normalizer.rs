//! Leaderboard normalizer.
//!
//! Turns the flat table text of a leaderboard page (one cell per line) into
//! `LeaderboardEntry` rows. Players come in triples of
//! (position, name, placeholder). A single sentinel line such as
//! "The following players failed to make the cut" separates the active
//! field from the players who missed the cut.

use tracing::debug;

use crate::types::{LeaderboardEntry, PoolError};

/// Placeholder the site shows in the position column.
const DASH: char = '-';

const LINES_PER_ROW: usize = 3;

/// Splits raw leaderboard lines into entries.
#[derive(Debug, Clone)]
pub struct Normalizer {
    sentinels: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(vec!["The".to_string(), "Pro".to_string()])
    }
}

impl Normalizer {
    pub fn new(sentinels: Vec<String>) -> Self {
        Self { sentinels }
    }

    fn is_sentinel(&self, line: &str) -> bool {
        self.sentinels.iter().any(|s| line.starts_with(s.as_str()))
    }

    /// Normalize a whole table. Rejects the table if either section does not
    /// divide into complete rows.
    pub fn normalize<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<LeaderboardEntry>, PoolError> {
        let boundary = lines
            .iter()
            .step_by(LINES_PER_ROW)
            .position(|line| self.is_sentinel(line.as_ref()))
            .map(|row| row * LINES_PER_ROW);

        let (active, cut) = match boundary {
            Some(at) => (&lines[..at], &lines[at + 1..]),
            None => (lines, &lines[lines.len()..]),
        };

        if active.len() % LINES_PER_ROW != 0 {
            return Err(PoolError::MalformedLeaderboard {
                section: "active",
                lines: active.len(),
            });
        }
        if cut.len() % LINES_PER_ROW != 0 {
            return Err(PoolError::MalformedLeaderboard {
                section: "cut",
                lines: cut.len(),
            });
        }

        let mut entries = Vec::with_capacity((active.len() + cut.len()) / LINES_PER_ROW);
        for row in active.chunks(LINES_PER_ROW) {
            let pos: String = row[0]
                .as_ref()
                .chars()
                .filter(|c| *c != DASH && !c.is_whitespace())
                .collect();
            entries.push(LeaderboardEntry::new(pos, row[1].as_ref(), false));
        }
        // Cut rows keep their spaces.
        for row in cut.chunks(LINES_PER_ROW) {
            let pos = row[0].as_ref().replace(DASH, "");
            entries.push(LeaderboardEntry::new(pos, row[1].as_ref(), true));
        }

        debug!(
            active = active.len() / LINES_PER_ROW,
            cut = cut.len() / LINES_PER_ROW,
            "Leaderboard normalized"
        );

        Ok(entries)
    }

    /// Normalize table text as copied from the page, one cell per line.
    pub fn normalize_text(&self, text: &str) -> Result<Vec<LeaderboardEntry>, PoolError> {
        let lines: Vec<&str> = text.lines().collect();
        self.normalize(&lines)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
