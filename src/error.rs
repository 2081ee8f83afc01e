//! Leaderboard Error Types
//!
//! Every core operation returns a typed [`LeaderboardError`]; the HTTP layer maps
//! each kind to a distinct status code (see `service::handlers`).

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Malformed request: empty username, non-finite score, negative page size.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The username has no entry in the current generation.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backing store cannot serve requests (e.g. after shutdown).
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// An internal invariant was violated. Never expected in a correct build.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LeaderboardError {
    /// Stable machine-readable identifier used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            LeaderboardError::InvalidArgument(_) => "invalid_argument",
            LeaderboardError::NotFound(_) => "not_found",
            LeaderboardError::Unavailable(_) => "unavailable",
            LeaderboardError::Internal(_) => "internal",
        }
    }
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;
