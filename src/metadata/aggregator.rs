//! Metadata Aggregator
//!
//! Background job that recomputes the leaderboard's [`MetadataSnapshot`] on a
//! fixed interval, independently of request handling.
//!
//! ## Responsibilities
//! - **Scheduling**: First tick fires one full interval after start, then every interval.
//! - **Consistency**: Each tick reads size and leader under the shared lock and
//!   publishes the result as one atomic replace.
//! - **Isolation**: A failed tick is logged and retried on the next one; nothing
//!   partial is ever published and the service keeps running.

use super::types::MetadataSnapshot;
use crate::error::Result;
use crate::service::leaderboard::Leaderboard;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_AGGREGATION_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound for background job periods (one year).
pub const MAX_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24 * 365);

pub struct MetadataAggregator {
    board: Arc<Leaderboard>,
    interval: Duration,
}

impl MetadataAggregator {
    /// `interval` is clamped to `MAX_INTERVAL` so the first deadline always
    /// fits on the clock.
    pub fn new(board: Arc<Leaderboard>, interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            board,
            interval: interval.min(MAX_INTERVAL),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single aggregation cycle.
    ///
    /// Sweeps a lapsed generation first so the snapshot never describes data
    /// that has already expired. Returns `None` if the generation lapsed
    /// between the sweep and the read; the next tick picks it up.
    pub fn aggregate_once(&self) -> Result<Option<Arc<MetadataSnapshot>>> {
        self.board.sweep_expired()?;
        self.board.refresh_metadata()
    }

    /// Spawns the periodic loop. It exits when `shutdown` flips to `true` or its
    /// sender is dropped; an in-flight tick always completes first.
    pub fn start(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tracing::info!(
            "Starting metadata aggregator (interval {:?})",
            self.interval
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.tick(),
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("Metadata aggregator stopped");
        })
    }

    fn tick(&self) {
        match self.aggregate_once() {
            Ok(Some(snapshot)) => {
                tracing::debug!(
                    "Metadata refreshed: {} users, top {:?} ({:?}), generation {}",
                    snapshot.count,
                    snapshot.top_username,
                    snapshot.top_score,
                    snapshot.generation
                );
            }
            Ok(None) => {
                tracing::debug!("Generation lapsed during aggregation, retrying next tick");
            }
            Err(e) => {
                tracing::error!("Error in background metadata update: {}", e);
            }
        }
    }
}
