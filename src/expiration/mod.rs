//! Expiration Module
//!
//! Sliding time-to-live over the whole leaderboard.
//!
//! Each write pushes the deadline to `now + ttl`. Once it passes, the index and
//! its metadata are reset together and a new **generation** begins; readers see
//! either the full old generation or the empty new one, never a mix.
//!
//! ## Submodules
//! - **`manager`**: Deadline and generation bookkeeping.
//! - **`sweeper`**: Background loop that clears lapsed generations without waiting for traffic.

pub mod manager;
pub mod sweeper;
