//! Expiration Sweeper
//!
//! Reads and writes already handle a lapsed generation lazily; this loop clears
//! it proactively so an idle leaderboard releases its memory and resets its
//! metadata without waiting for traffic.

use crate::service::leaderboard::Leaderboard;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct ExpirationSweeper {
    board: Arc<Leaderboard>,
    interval: Duration,
}

impl ExpirationSweeper {
    pub fn new(board: Arc<Leaderboard>, interval: Duration) -> Arc<Self> {
        Arc::new(Self { board, interval })
    }

    pub fn start(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tracing::info!("Starting expiration sweeper (interval {:?})", self.interval);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.board.sweep_expired() {
                            Ok(Some(generation)) => {
                                tracing::debug!("Sweeper started generation {}", generation);
                            }
                            Ok(None) => {}
                            Err(e) => tracing::warn!("Expiration sweep failed: {}", e),
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("Expiration sweeper stopped");
        })
    }
}
