//! HTTP API Protocol
//!
//! Endpoints and Data Transfer Objects (DTOs) of the public API.
//!
//! The core numbers ranks from 0 (leader). Responses on this boundary are
//! 1-based, and the translation happens only in the `From` impls below.

use crate::metadata::types::MetadataSnapshot;
use crate::ranking::types::RankedEntry;
use crate::service::types::ScoreUpdate;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Submit or overwrite a user's score.
pub const ENDPOINT_SCORE: &str = "/api/score";
/// Top-N listing, `?top=N`.
pub const ENDPOINT_LEADERBOARD: &str = "/api/leaderboard";
/// Rank and score of a single user, `/api/rank/:username`.
pub const ENDPOINT_RANK: &str = "/api/rank";
/// Last published aggregate snapshot.
pub const ENDPOINT_METADATA: &str = "/api/metadata";
/// Liveness probe.
pub const ENDPOINT_HEALTH: &str = "/api/health";

// --- Data Transfer Objects ---

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    pub username: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct TopParams {
    pub top: Option<i64>,
}

/// Returned by both score submission and rank lookup.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserRankResponse {
    pub username: String,
    pub score: f64,
    /// 1-based position.
    pub rank: usize,
}

impl From<ScoreUpdate> for UserRankResponse {
    fn from(update: ScoreUpdate) -> Self {
        Self {
            username: update.username,
            score: update.score,
            rank: update.rank + 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub username: String,
    pub score: f64,
}

impl From<RankedEntry> for LeaderboardEntry {
    fn from(entry: RankedEntry) -> Self {
        Self {
            rank: entry.rank + 1,
            username: entry.username,
            score: entry.score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MetadataResponse {
    pub total_users: usize,
    pub top_user: Option<String>,
    pub top_score: Option<f64>,
    /// Unix timestamp (ms) of the aggregation tick that produced this view.
    pub generated_at: u64,
    pub generation: u64,
}

impl From<&MetadataSnapshot> for MetadataResponse {
    fn from(snapshot: &MetadataSnapshot) -> Self {
        Self {
            total_users: snapshot.count,
            top_user: snapshot.top_username.clone(),
            top_score: snapshot.top_score,
            generated_at: snapshot.generated_at,
            generation: snapshot.generation,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub generation: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error kind: `invalid_argument`, `not_found`, `unavailable`, `internal`.
    pub error: String,
    pub message: String,
}
