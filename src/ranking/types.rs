use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Composite ordering key stored in the order-statistics tree.
///
/// Keys compare by score descending, then username ascending, so two distinct
/// usernames never share a position. Scores are always finite here (validated on
/// the way in), which makes `total_cmp` agree with the numeric order.
#[derive(Debug, Clone)]
pub struct ScoreKey {
    pub score: f64,
    pub username: String,
}

impl ScoreKey {
    pub fn new(score: f64, username: impl Into<String>) -> Self {
        Self {
            score,
            username: username.into(),
        }
    }

    /// Where the borrowed pair `(score, username)` sorts relative to this key.
    pub fn locate(&self, score: f64, username: &str) -> Ordering {
        compare_parts(score, username, self.score, &self.username)
    }
}

/// Leaderboard order on borrowed parts: higher score first, then username.
pub fn compare_parts(a_score: f64, a_username: &str, b_score: f64, b_username: &str) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| a_username.cmp(b_username))
}

impl Ord for ScoreKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_parts(self.score, &self.username, other.score, &other.username)
    }
}

impl PartialOrd for ScoreKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScoreKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoreKey {}

/// One row of a ranking query. `rank` is zero-based; 0 is the leader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub username: String,
    pub score: f64,
}
