//! Real-Time Leaderboard Library
//!
//! Core modules of the leaderboard service. The binary (`main.rs`) only parses
//! configuration, starts a `LeaderboardService`, and serves its router.
//!
//! ## Architecture Modules
//! - **`ranking`**: The ranked score index, an order-statistics treap keyed by
//!   (score desc, username asc) plus a username lookup map.
//! - **`expiration`**: Sliding TTL over the whole index and the generation counter.
//! - **`metadata`**: Periodically aggregated snapshot (count, top user, top score).
//! - **`service`**: Validation, generation gating, HTTP API, and runtime lifecycle.
//! - **`config`** / **`error`**: Command-line/env configuration and typed errors.

pub mod config;
pub mod error;
pub mod expiration;
pub mod metadata;
pub mod ranking;
pub mod service;
