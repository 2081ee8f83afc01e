//! Leaderboard Service Module
//!
//! The request-facing layer over the ranking core.
//!
//! ## Responsibilities
//! - **Validation**: Usernames, scores, and page sizes are checked before the index is touched.
//! - **Gating**: Every operation runs against the live generation only.
//! - **API**: Axum handlers translate typed results into HTTP status codes and JSON,
//!   converting 0-based core ranks to 1-based public ranks.
//!
//! ## Submodules
//! - **`leaderboard`**: The shared `Leaderboard` facade (submit/top/rank/metadata).
//! - **`handlers`**: HTTP request handlers and the router.
//! - **`protocol`**: Endpoints and DTOs of the public API.
//! - **`runtime`**: Startup and shutdown of the facade together with its background jobs.
//! - **`types`**: Facade result types.

pub mod handlers;
pub mod leaderboard;
pub mod protocol;
pub mod runtime;
pub mod types;

#[cfg(test)]
mod tests;
