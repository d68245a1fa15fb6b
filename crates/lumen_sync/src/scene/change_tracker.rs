//! Change tracking for derived collections
//!
//! When a light picks up a different shadow collection, whatever renders that
//! collection has to rebuild its prim list. The synchronizer only announces
//! the collection name; `ChangeTracker` implementations decide what that
//! means downstream.

use std::collections::{BTreeSet, HashMap};

/// Receiver of collection invalidation events
pub trait ChangeTracker {
    /// Flag a collection as needing to be rebuilt
    fn mark_collection_dirty(&mut self, name: &str);
}

/// Change tracker keeping a version counter per collection
///
/// Every mark bumps the collection's version and the global collection
/// version, so consumers can cheaply compare versions between frames.
#[derive(Debug, Default)]
pub struct CollectionChangeTracker {
    versions: HashMap<String, u64>,
    collection_version: u64,
    notifications: usize,
    pending: BTreeSet<String>,
}

impl CollectionChangeTracker {
    /// Create a tracker with no collections
    pub fn new() -> Self {
        Self::default()
    }

    /// Version of one collection; zero if it was never marked
    pub fn collection_version(&self, name: &str) -> u64 {
        self.versions.get(name).copied().unwrap_or(0)
    }

    /// Version bumped by every mark, regardless of collection
    pub fn global_collection_version(&self) -> u64 {
        self.collection_version
    }

    /// Total number of marks received
    pub fn notification_count(&self) -> usize {
        self.notifications
    }

    /// Drain the names marked since the previous call, sorted and deduplicated
    pub fn take_dirty_collections(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

impl ChangeTracker for CollectionChangeTracker {
    fn mark_collection_dirty(&mut self, name: &str) {
        log::debug!("Collection '{}' marked dirty", name);
        *self.versions.entry(name.to_string()).or_insert(0) += 1;
        self.collection_version += 1;
        self.notifications += 1;
        self.pending.insert(name.to_string());
    }
}
