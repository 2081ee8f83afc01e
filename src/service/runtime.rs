//! Service Runtime
//!
//! Owns the shared [`Leaderboard`] and its background jobs for the lifetime of
//! the process: started together at init, stopped together at shutdown.

use super::handlers::router;
use super::leaderboard::Leaderboard;
use crate::config::Config;
use crate::expiration::sweeper::ExpirationSweeper;
use crate::metadata::aggregator::MetadataAggregator;

use axum::Router;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct LeaderboardService {
    board: Arc<Leaderboard>,
    aggregator: Arc<MetadataAggregator>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl LeaderboardService {
    /// Builds the leaderboard and spawns the aggregator and sweeper.
    /// Must be called from within a tokio runtime.
    pub fn start(config: &Config) -> Self {
        let board = Leaderboard::new(config.ttl, config.default_top_n);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let aggregator = MetadataAggregator::new(board.clone(), config.aggregation_interval);
        let sweeper = ExpirationSweeper::new(board.clone(), config.sweep_interval);

        let tasks = vec![
            aggregator.clone().start(shutdown_rx.clone()),
            sweeper.start(shutdown_rx),
        ];

        tracing::info!(
            "Leaderboard ready (ttl {:?}, default top-N {})",
            config.ttl,
            config.default_top_n
        );

        Self {
            board,
            aggregator,
            shutdown_tx,
            tasks,
        }
    }

    pub fn board(&self) -> Arc<Leaderboard> {
        self.board.clone()
    }

    pub fn aggregator(&self) -> Arc<MetadataAggregator> {
        self.aggregator.clone()
    }

    pub fn router(&self) -> Router {
        router(self.board.clone())
    }

    /// Stops the background jobs, waits for them, then closes the leaderboard.
    pub async fn shutdown(self) {
        tracing::info!("Shutting down leaderboard service");
        self.shutdown_tx.send_replace(true);

        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::warn!("Background task ended abnormally: {}", e);
            }
        }

        if let Err(e) = self.board.shutdown() {
            tracing::error!("Failed to close leaderboard: {}", e);
        }
    }
}
