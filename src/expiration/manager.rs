//! Sliding Expiration
//!
//! Tracks a single deadline for the whole index: `last write + ttl`. The
//! manager itself owns no data; the caller clears the index in the same
//! critical section in which `expire_if_due` reports a new generation.

use std::time::Duration;
use tokio::time::Instant;

/// Default window, matching a day of inactivity.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Largest window accepted from configuration (ten years).
pub const MAX_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 10);

#[derive(Debug, Clone)]
pub struct ExpirationManager {
    ttl: Duration,
    /// `None` while the generation has seen no write.
    deadline: Option<Instant>,
    generation: u64,
}

impl ExpirationManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            deadline: None,
            generation: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Pushes the deadline to `now + ttl`. Called on every successful write.
    ///
    /// A window too large for the clock to represent leaves the generation
    /// without a deadline, i.e. it never expires.
    pub fn refresh(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.ttl);
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// The generation a reader at `now` should observe: an expired but not yet
    /// swept generation already counts as its successor.
    pub fn generation_at(&self, now: Instant) -> u64 {
        if self.is_expired(now) {
            self.generation + 1
        } else {
            self.generation
        }
    }

    /// Starts a new generation if the deadline has passed and returns its id.
    /// The deadline stays cleared until the next write.
    pub fn expire_if_due(&mut self, now: Instant) -> Option<u64> {
        if !self.is_expired(now) {
            return None;
        }
        Some(self.advance())
    }

    /// Unconditionally starts a new generation.
    pub fn advance(&mut self) -> u64 {
        self.deadline = None;
        self.generation += 1;
        self.generation
    }
}

impl Default for ExpirationManager {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
