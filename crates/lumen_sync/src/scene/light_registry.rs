//! Light registry - the host-side sync loop
//!
//! Owns one [`LightSynchronizer`] per scene light along with the dirty bits
//! accumulated for it since the last pass. Hosts mark lights dirty as scene
//! edits come in and call [`LightRegistry::sync_all`] once per frame.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::config::scene::SceneDescription;
use crate::lighting::{
    AttributeError, DirtyBits, GpuLight, LightId, LightKind, LightSynchronizer,
};

use super::change_tracker::ChangeTracker;
use super::source::SceneSource;

slotmap::new_key_type! {
    /// Stable handle to a registered light
    pub struct LightHandle;
}

#[derive(Debug)]
struct LightEntry {
    light: LightSynchronizer,
    pending: DirtyBits,
}

/// Totals for one `sync_all` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySyncSummary {
    /// Lights that had pending bits and were synced
    pub synced: usize,
    /// Lights skipped because nothing was pending
    pub skipped: usize,
    /// Shadow collection notifications sent to the tracker
    pub collections_notified: usize,
    /// Attribute problems collected across all lights
    pub diagnostics: Vec<AttributeError>,
}

/// Collection of synchronizers with per-light pending dirty bits
#[derive(Debug, Default)]
pub struct LightRegistry {
    lights: SlotMap<LightHandle, LightEntry>,
    // BTreeMap keeps sync order deterministic
    index: BTreeMap<LightId, LightHandle>,
}

impl LightRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every light of a scene description
    pub fn from_description(description: &SceneDescription) -> Self {
        let mut registry = Self::new();
        for light in &description.lights {
            registry.insert(light.id.clone(), light.kind());
        }
        registry
    }

    /// Register a light, seeding its pending bits with the kind's initial mask.
    ///
    /// Re-inserting an id finalizes the previous light and starts over.
    pub fn insert(&mut self, id: LightId, kind: LightKind) -> LightHandle {
        if self.remove(&id) {
            log::debug!("Replacing light {}", id);
        }

        let light = LightSynchronizer::new(id.clone(), kind);
        let pending = light.initial_dirty_bits();
        let handle = self.lights.insert(LightEntry { light, pending });
        self.index.insert(id, handle);
        handle
    }

    /// Finalize and drop a light; returns whether it was registered
    pub fn remove(&mut self, id: &LightId) -> bool {
        let Some(handle) = self.index.remove(id) else {
            return false;
        };
        if let Some(mut entry) = self.lights.remove(handle) {
            entry.light.finalize();
        }
        true
    }

    /// OR `bits` into a light's pending set; returns whether the light exists
    pub fn mark_dirty(&mut self, id: &LightId, bits: DirtyBits) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.pending |= bits;
                true
            }
            None => false,
        }
    }

    /// Sync every light with pending bits, in id order
    pub fn sync_all(
        &mut self,
        source: &dyn SceneSource,
        tracker: &mut dyn ChangeTracker,
    ) -> RegistrySyncSummary {
        let mut summary = RegistrySyncSummary::default();

        for handle in self.index.values() {
            let Some(entry) = self.lights.get_mut(*handle) else {
                continue;
            };
            if entry.pending.is_clean() {
                summary.skipped += 1;
                continue;
            }

            let report = entry.light.sync(source, tracker, &mut entry.pending);
            summary.synced += 1;
            if report.collection_notified {
                summary.collections_notified += 1;
            }
            summary.diagnostics.extend(report.diagnostics);
        }

        log::info!(
            "Light sync: {} synced, {} skipped, {} collection updates, {} diagnostics",
            summary.synced,
            summary.skipped,
            summary.collections_notified,
            summary.diagnostics.len()
        );
        summary
    }

    /// Synchronizer of a light
    pub fn get(&self, id: &LightId) -> Option<&LightSynchronizer> {
        let handle = self.index.get(id)?;
        self.lights.get(*handle).map(|entry| &entry.light)
    }

    /// Synchronizer behind a handle
    pub fn get_by_handle(&self, handle: LightHandle) -> Option<&LightSynchronizer> {
        self.lights.get(handle).map(|entry| &entry.light)
    }

    /// Bits waiting for the next pass
    pub fn pending_bits(&self, id: &LightId) -> Option<DirtyBits> {
        let handle = self.index.get(id)?;
        self.lights.get(*handle).map(|entry| entry.pending)
    }

    /// Number of registered lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// True when no lights are registered
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Registered ids in sync order
    pub fn ids(&self) -> impl Iterator<Item = &LightId> {
        self.index.keys()
    }

    /// Pack every light with a cached descriptor, in id order
    pub fn gpu_lights(&self) -> Vec<GpuLight> {
        self.index
            .values()
            .filter_map(|handle| self.lights.get(*handle))
            .filter_map(|entry| entry.light.light())
            .map(|descriptor| descriptor.to_gpu())
            .collect()
    }

    fn entry_mut(&mut self, id: &LightId) -> Option<&mut LightEntry> {
        let handle = self.index.get(id)?;
        self.lights.get_mut(*handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CollectionChangeTracker, InMemorySceneSource};

    #[test]
    fn test_insert_seeds_initial_mask() {
        let mut registry = LightRegistry::new();
        let simple = LightId::new("/World/Simple");
        let dome = LightId::new("/World/Dome");
        registry.insert(simple.clone(), LightKind::Simple);
        registry.insert(dome.clone(), LightKind::Dome);

        assert_eq!(registry.pending_bits(&simple), Some(DirtyBits::ALL_DIRTY));
        assert_eq!(
            registry.pending_bits(&dome),
            Some(DirtyBits::TRANSFORM | DirtyBits::PARAMS)
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reinsert_replaces_light() {
        let mut registry = LightRegistry::new();
        let id = LightId::new("/World/Key");
        let first = registry.insert(id.clone(), LightKind::Simple);
        let second = registry.insert(id.clone(), LightKind::Area);

        assert_ne!(first, second);
        assert_eq!(registry.len(), 1);
        assert!(registry.get_by_handle(first).is_none());
        assert_eq!(registry.get(&id).map(LightSynchronizer::kind), Some(LightKind::Area));
    }

    #[test]
    fn test_sync_all_cleans_pending_bits() {
        let mut registry = LightRegistry::new();
        let source = InMemorySceneSource::new();
        let mut tracker = CollectionChangeTracker::new();
        let id = LightId::new("/World/Dome");
        registry.insert(id.clone(), LightKind::Dome);

        let summary = registry.sync_all(&source, &mut tracker);
        assert_eq!(summary.synced, 1);
        assert_eq!(registry.pending_bits(&id), Some(DirtyBits::CLEAN));

        let summary = registry.sync_all(&source, &mut tracker);
        assert_eq!(summary.synced, 0);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_mark_dirty_unknown_light() {
        let mut registry = LightRegistry::new();
        assert!(!registry.mark_dirty(&LightId::new("/Nope"), DirtyBits::PARAMS));
        assert!(!registry.remove(&LightId::new("/Nope")));
    }

    #[test]
    fn test_ids_are_sorted() {
        let mut registry = LightRegistry::new();
        for path in ["/World/C", "/World/A", "/World/B"] {
            registry.insert(LightId::new(path), LightKind::Area);
        }
        let ids: Vec<_> = registry.ids().map(LightId::as_str).collect();
        assert_eq!(ids, vec!["/World/A", "/World/B", "/World/C"]);
    }
}
