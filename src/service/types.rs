use serde::{Deserialize, Serialize};

/// Result of a score submission or rank lookup. `rank` is zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub username: String,
    pub score: f64,
    pub rank: usize,
}
