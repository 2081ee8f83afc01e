//! Metadata Module
//!
//! Aggregate information about the leaderboard (participant count, leader),
//! recomputed on its own schedule rather than on every write.
//!
//! ## Submodules
//! - **`types`**: `MetadataSnapshot` and its empty-state sentinel.
//! - **`store`**: Atomic publication of the latest snapshot.
//! - **`aggregator`**: Periodic recomputation task.

pub mod aggregator;
pub mod store;
pub mod types;
