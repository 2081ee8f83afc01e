//! Snapshot Publication
//!
//! The last published [`MetadataSnapshot`] lives behind a `tokio::sync::watch`
//! channel: publishing is a single pointer swap and readers clone the `Arc`.

use super::types::MetadataSnapshot;

use std::sync::Arc;
use tokio::sync::watch;

pub struct MetadataStore {
    tx: watch::Sender<Arc<MetadataSnapshot>>,
}

impl MetadataStore {
    /// Creates a store holding the empty sentinel for `generation`.
    pub fn new(generation: u64) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(MetadataSnapshot::empty(generation)));
        Self { tx }
    }

    /// Replaces the current snapshot wholesale and returns the published value.
    pub fn publish(&self, snapshot: MetadataSnapshot) -> Arc<MetadataSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Publishes the empty sentinel for a freshly started generation.
    pub fn reset(&self, generation: u64) -> Arc<MetadataSnapshot> {
        self.publish(MetadataSnapshot::empty(generation))
    }

    pub fn latest(&self) -> Arc<MetadataSnapshot> {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MetadataSnapshot>> {
        self.tx.subscribe()
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new(0)
    }
}
