use crate::ranking::index::RankedScoreIndex;
use serde::{Deserialize, Serialize};

/// Aggregate view of one generation of the leaderboard.
///
/// Built wholesale by each aggregation tick and replaced atomically; readers
/// never see a partially updated snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub count: usize,
    pub top_username: Option<String>,
    pub top_score: Option<f64>,
    /// Unix timestamp (ms) when the snapshot was computed.
    pub generated_at: u64,
    /// Index generation the snapshot was computed from.
    pub generation: u64,
}

impl MetadataSnapshot {
    /// The empty-state sentinel published at start and after every expiry.
    pub fn empty(generation: u64) -> Self {
        Self {
            count: 0,
            top_username: None,
            top_score: None,
            generated_at: now_ms(),
            generation,
        }
    }

    pub fn from_index(index: &RankedScoreIndex, generation: u64) -> Self {
        let leader = index.leader();
        Self {
            count: index.size(),
            top_username: leader.as_ref().map(|entry| entry.username.clone()),
            top_score: leader.map(|entry| entry.score),
            generated_at: now_ms(),
            generation,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
