//! Leaderboard Facade
//!
//! The single owned instance shared (via `Arc`) by HTTP handlers and background
//! jobs. It validates input, gates every access on the live generation, and
//! keeps the index, its expiration state, and the metadata snapshot consistent.
//!
//! ## Locking
//! One `RwLock` guards the index together with its `ExpirationManager`:
//! - **Writes** take the exclusive lock, sweep an elapsed generation, upsert,
//!   and refresh the deadline in one critical section.
//! - **Reads** take the shared lock. A generation whose deadline has passed but
//!   which has not been swept yet reads as empty, so no caller ever observes a
//!   partially cleared index.

use super::types::ScoreUpdate;
use crate::error::{LeaderboardError, Result};
use crate::expiration::manager::ExpirationManager;
use crate::metadata::store::MetadataStore;
use crate::metadata::types::MetadataSnapshot;
use crate::ranking::index::{RankedScoreIndex, validate_score, validate_username};
use crate::ranking::types::RankedEntry;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::time::Instant;

struct LiveBoard {
    index: RankedScoreIndex,
    expiration: ExpirationManager,
    /// Cleared by `shutdown`; afterwards every operation is `Unavailable`.
    open: bool,
}

impl LiveBoard {
    fn visible(&self, now: Instant) -> Option<&RankedScoreIndex> {
        (!self.expiration.is_expired(now)).then_some(&self.index)
    }
}

pub struct Leaderboard {
    live: RwLock<LiveBoard>,
    metadata: MetadataStore,
    default_top_n: usize,
}

impl Leaderboard {
    pub fn new(ttl: Duration, default_top_n: usize) -> Arc<Self> {
        let expiration = ExpirationManager::new(ttl);
        let metadata = MetadataStore::new(expiration.generation());

        Arc::new(Self {
            live: RwLock::new(LiveBoard {
                index: RankedScoreIndex::new(),
                expiration,
                open: true,
            }),
            metadata,
            default_top_n,
        })
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Inserts or replaces `username`'s score and refreshes the sliding TTL.
    pub fn submit_score(&self, username: &str, score: f64) -> Result<ScoreUpdate> {
        validate_username(username)?;
        let score = validate_score(score)?;

        let now = Instant::now();
        let mut live = self.write_live()?;
        self.expire_locked(&mut live, now);

        let rank = live.index.upsert(username, score)?;
        live.expiration.refresh(now);

        tracing::debug!(
            "Score for '{}' set to {} (rank {}, generation {})",
            username,
            score,
            rank,
            live.expiration.generation()
        );

        Ok(ScoreUpdate {
            username: username.to_string(),
            score,
            rank,
        })
    }

    /// Top `n` entries; `None` falls back to the configured default page size.
    pub fn query_top(&self, n: Option<i64>) -> Result<Vec<RankedEntry>> {
        let n = match n {
            None => self.default_top_n,
            Some(n) if n < 0 => {
                return Err(LeaderboardError::InvalidArgument(format!(
                    "n must be non-negative, got {}",
                    n
                )));
            }
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        };

        let live = self.read_live()?;
        match live.visible(Instant::now()) {
            Some(index) => index.top_n(n),
            None => Ok(Vec::new()),
        }
    }

    /// Rank and score of `username`. Unknown names, the empty one included, are `NotFound`.
    pub fn query_rank(&self, username: &str) -> Result<ScoreUpdate> {
        let live = self.read_live()?;
        let index = live
            .visible(Instant::now())
            .ok_or_else(|| LeaderboardError::NotFound(username.to_string()))?;

        let rank = index.rank(username)?;
        let score = index
            .score(username)
            .ok_or_else(|| LeaderboardError::NotFound(username.to_string()))?;

        Ok(ScoreUpdate {
            username: username.to_string(),
            score,
            rank,
        })
    }

    /// The last published snapshot, or the empty sentinel once the generation has lapsed.
    pub fn query_metadata(&self) -> Result<Arc<MetadataSnapshot>> {
        let live = self.read_live()?;
        let now = Instant::now();

        if live.expiration.is_expired(now) {
            return Ok(Arc::new(MetadataSnapshot::empty(
                live.expiration.generation_at(now),
            )));
        }
        Ok(self.metadata.latest())
    }

    pub fn size(&self) -> Result<usize> {
        let live = self.read_live()?;
        Ok(live.visible(Instant::now()).map_or(0, |index| index.size()))
    }

    pub fn generation(&self) -> Result<u64> {
        let live = self.read_live()?;
        Ok(live.expiration.generation_at(Instant::now()))
    }

    /// Clears the index if its deadline has passed. Returns the new generation
    /// when a sweep happened.
    pub fn sweep_expired(&self) -> Result<Option<u64>> {
        let now = Instant::now();
        {
            let live = self.read_live()?;
            if !live.expiration.is_expired(now) {
                return Ok(None);
            }
        }

        let mut live = self.write_live()?;
        Ok(self.expire_locked(&mut live, now))
    }

    /// Recomputes the metadata snapshot from the live index and publishes it.
    ///
    /// The read and the publish happen under the shared lock, so an expiry
    /// cannot slip in between and be overwritten by a stale snapshot. Returns
    /// `None` when the generation lapsed and awaits its sweep.
    pub fn refresh_metadata(&self) -> Result<Option<Arc<MetadataSnapshot>>> {
        let live = self.read_live()?;
        let generation = live.expiration.generation();

        Ok(live
            .visible(Instant::now())
            .map(|index| self.metadata.publish(MetadataSnapshot::from_index(index, generation))))
    }

    pub fn metadata_store(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Destroys the index and refuses all further requests.
    pub fn shutdown(&self) -> Result<()> {
        let mut live = self
            .live
            .write()
            .map_err(|_| LeaderboardError::Internal("leaderboard lock poisoned".to_string()))?;

        if !live.open {
            return Ok(());
        }
        live.open = false;
        live.index.clear();
        let generation = live.expiration.advance();
        self.metadata.reset(generation);

        tracing::info!("Leaderboard closed (generation {})", generation);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.live.read().map(|live| live.open).unwrap_or(false)
    }

    fn expire_locked(&self, live: &mut LiveBoard, now: Instant) -> Option<u64> {
        let generation = live.expiration.expire_if_due(now)?;
        let dropped = live.index.size();
        live.index.clear();
        self.metadata.reset(generation);

        tracing::info!(
            "Leaderboard expired after {:?} of inactivity: dropped {} entries, starting generation {}",
            live.expiration.ttl(),
            dropped,
            generation
        );
        Some(generation)
    }

    fn read_live(&self) -> Result<RwLockReadGuard<'_, LiveBoard>> {
        let live = self
            .live
            .read()
            .map_err(|_| LeaderboardError::Internal("leaderboard lock poisoned".to_string()))?;
        if !live.open {
            return Err(LeaderboardError::Unavailable(
                "leaderboard is shut down".to_string(),
            ));
        }
        Ok(live)
    }

    fn write_live(&self) -> Result<RwLockWriteGuard<'_, LiveBoard>> {
        let live = self
            .live
            .write()
            .map_err(|_| LeaderboardError::Internal("leaderboard lock poisoned".to_string()))?;
        if !live.open {
            return Err(LeaderboardError::Unavailable(
                "leaderboard is shut down".to_string(),
            ));
        }
        Ok(live)
    }
}
