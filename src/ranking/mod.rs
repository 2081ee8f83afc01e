//! Ranked Score Index Module
//!
//! The in-memory ordered structure behind the leaderboard.
//!
//! ## Ordering
//! Entries are totally ordered by **score descending**, then **username ascending**.
//! The tie-break lives in the key comparison itself (`ScoreKey`), so equal scores
//! never produce two entries at the same position.
//!
//! ## Submodules
//! - **`tree`**: Order-statistics treap (subtree sizes) giving O(log n) insert/remove/rank
//!   and O(k + log n) top-k.
//! - **`index`**: `RankedScoreIndex`, the username-keyed facade over the tree.
//! - **`types`**: The composite key and ranked result rows.

pub mod index;
pub mod tree;
pub mod types;
