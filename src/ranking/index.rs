//! Ranked Score Index
//!
//! Pairs a `username -> score` map (existence checks, old-key lookup) with an
//! [`OrderStatTree`] of composite keys (positional queries). Both structures are
//! always updated together; the index is not thread-safe on its own and is
//! guarded by the owning `Leaderboard`.

use super::tree::OrderStatTree;
use super::types::{RankedEntry, ScoreKey, compare_parts};
use crate::error::{LeaderboardError, Result};

use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 10;

/// Rejects the empty username. Any other string, whitespace included, is a key.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(LeaderboardError::InvalidArgument(
            "username must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Rejects NaN and infinities. Negative zero is folded into zero so both
/// spellings land on the same position.
pub fn validate_score(score: f64) -> Result<f64> {
    if !score.is_finite() {
        return Err(LeaderboardError::InvalidArgument(format!(
            "score must be a finite number, got {}",
            score
        )));
    }
    Ok(score + 0.0)
}

#[derive(Default)]
pub struct RankedScoreIndex {
    scores: HashMap<String, f64>,
    order: OrderStatTree<ScoreKey>,
}

impl RankedScoreIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the score for `username` and returns its rank after the write.
    pub fn upsert(&mut self, username: &str, score: f64) -> Result<usize> {
        validate_username(username)?;
        let score = validate_score(score)?;

        if let Some(previous) = self.scores.get(username).copied() {
            if previous.total_cmp(&score).is_eq() {
                return self.rank(username);
            }
            if !self.order.remove(&ScoreKey::new(previous, username)) {
                return Err(LeaderboardError::Internal(format!(
                    "entry for '{}' missing from order tree",
                    username
                )));
            }
        }

        let rank = self
            .order
            .insert(ScoreKey::new(score, username))
            .ok_or_else(|| {
                LeaderboardError::Internal(format!("duplicate order key for '{}'", username))
            })?;
        self.scores.insert(username.to_string(), score);

        self.check_sizes()?;
        Ok(rank)
    }

    pub fn rank(&self, username: &str) -> Result<usize> {
        let score = self
            .score(username)
            .ok_or_else(|| LeaderboardError::NotFound(username.to_string()))?;

        self.order
            .rank_by(|key| key.locate(score, username))
            .ok_or_else(|| {
                LeaderboardError::Internal(format!(
                    "'{}' present in score map but not in order tree",
                    username
                ))
            })
    }

    pub fn score(&self, username: &str) -> Option<f64> {
        self.scores.get(username).copied()
    }

    /// The first `n` entries in rank order; `n` is clamped to `size()`.
    pub fn top_n(&self, n: usize) -> Result<Vec<RankedEntry>> {
        let entries: Vec<RankedEntry> = self
            .order
            .iter()
            .take(n)
            .enumerate()
            .map(|(rank, key)| RankedEntry {
                rank,
                username: key.username.clone(),
                score: key.score,
            })
            .collect();

        self.check_page(&entries)?;
        Ok(entries)
    }

    pub fn leader(&self) -> Option<RankedEntry> {
        self.order.first().map(|key| RankedEntry {
            rank: 0,
            username: key.username.clone(),
            score: key.score,
        })
    }

    pub fn size(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
        self.order.clear();
    }

    fn check_sizes(&self) -> Result<()> {
        if self.scores.len() != self.order.len() {
            return Err(LeaderboardError::Internal(format!(
                "index size mismatch: {} scores, {} ordered keys",
                self.scores.len(),
                self.order.len()
            )));
        }
        Ok(())
    }

    /// A page must be strictly ordered and agree with the score map, which also
    /// rules out the same username appearing twice.
    fn check_page(&self, entries: &[RankedEntry]) -> Result<()> {
        for pair in entries.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if compare_parts(a.score, &a.username, b.score, &b.username).is_ge() {
                return Err(LeaderboardError::Internal(format!(
                    "ranks {} and {} out of order",
                    a.rank, b.rank
                )));
            }
        }
        for entry in entries {
            if self.score(&entry.username) != Some(entry.score) {
                return Err(LeaderboardError::Internal(format!(
                    "stale order key for '{}'",
                    entry.username
                )));
            }
        }
        Ok(())
    }
}
