//! Optimistic client-side caches.
//!
//! [`CollectionCache`] holds the last fetched listing and applies
//! create/update/delete results in place, so a view refreshes without
//! another round trip. [`DashboardCache`] holds the aggregate totals
//! and keeps the stale value when a refresh fails.

use std::collections::BTreeMap;

use parking_lot::RwLock;

/// A record addressable by a unique ordered key.
pub trait Keyed {
    /// The key type, usually the record's id newtype.
    type Key: Ord + Copy;

    /// The record's key.
    fn key(&self) -> Self::Key;
}

/// An id-ordered cache of one listing endpoint's records.
pub struct CollectionCache<T: Keyed> {
    entries: RwLock<BTreeMap<T::Key, T>>,
}

impl<T: Keyed + Clone> CollectionCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Replace the cache contents with a freshly fetched listing.
    pub fn set(&self, records: Vec<T>) {
        let mut entries = self.entries.write();
        entries.clear();
        for record in records {
            entries.insert(record.key(), record);
        }
    }

    /// Insert a record returned by a create call.
    pub fn apply_created(&self, record: T) {
        self.entries.write().insert(record.key(), record);
    }

    /// Replace a record in place with the server's updated copy.
    ///
    /// A record not currently cached is inserted, matching what a
    /// subsequent full fetch would show.
    pub fn apply_updated(&self, record: T) {
        self.entries.write().insert(record.key(), record);
    }

    /// Remove a record after a delete call. Unknown keys are ignored.
    pub fn apply_deleted(&self, key: &T::Key) {
        self.entries.write().remove(key);
    }

    /// Drop everything, forcing the next view to fetch.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Snapshot of cached records in ascending key order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.entries.read().values().cloned().collect()
    }

    /// Number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: Keyed + Clone> Default for CollectionCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Holder for the dashboard totals.
///
/// A failed refresh leaves the previous value in place, so the
/// dashboard keeps showing the last known numbers. Mutations elsewhere
/// mark the cache dirty; the flag clears on the next successful
/// refresh.
pub struct DashboardCache<T> {
    totals: RwLock<Option<T>>,
    dirty: std::sync::atomic::AtomicBool,
}

impl<T: Clone> DashboardCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            totals: RwLock::new(None),
            dirty: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Apply a refresh outcome. `Ok` replaces the value and clears the
    /// dirty flag; `Err` keeps whatever was there, still marked dirty.
    pub fn refresh<E>(&self, outcome: Result<T, E>) {
        if let Ok(totals) = outcome {
            *self.totals.write() = Some(totals);
            self.dirty
                .store(false, std::sync::atomic::Ordering::Relaxed);
        }
    }

    /// Flag the cached totals as stale after a book mutation.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, std::sync::atomic::Ordering::Relaxed);
    }

    /// Whether the cached totals may no longer match the store.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// The cached totals, if any refresh ever succeeded.
    #[must_use]
    pub fn current(&self) -> Option<T> {
        self.totals.read().clone()
    }

    /// Drop the cached value.
    pub fn clear(&self) {
        *self.totals.write() = None;
        self.dirty.store(true, std::sync::atomic::Ordering::Relaxed);
    }
}

impl<T: Clone> Default for DashboardCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryRecord, Totals};
    use bookstack_core::CategoryId;

    fn category(id: u64, name: &str) -> CategoryRecord {
        CategoryRecord {
            category_id: CategoryId::new(id),
            name: name.into(),
        }
    }

    #[test]
    fn set_replaces_and_orders() {
        let cache = CollectionCache::new();
        cache.set(vec![category(3, "c"), category(1, "a")]);
        let names: Vec<String> = cache.items().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["a", "c"]);

        cache.set(vec![category(2, "b")]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn created_records_appear_without_a_refetch() {
        let cache = CollectionCache::new();
        cache.set(vec![category(1, "a")]);
        cache.apply_created(category(2, "b"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.items()[1].name, "b");
    }

    #[test]
    fn updates_replace_in_place() {
        let cache = CollectionCache::new();
        cache.set(vec![category(1, "a"), category(2, "b")]);
        cache.apply_updated(category(1, "renamed"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.items()[0].name, "renamed");
    }

    #[test]
    fn deletes_drop_the_record() {
        let cache = CollectionCache::new();
        cache.set(vec![category(1, "a"), category(2, "b")]);
        cache.apply_deleted(&CategoryId::new(1));
        assert_eq!(cache.items()[0].name, "b");

        // Unknown keys are a no-op.
        cache.apply_deleted(&CategoryId::new(42));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_then_set_acts_as_manual_refresh() {
        let cache = CollectionCache::new();
        cache.set(vec![category(1, "a")]);
        cache.clear();
        assert!(cache.is_empty());
        cache.set(vec![category(9, "z")]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn dashboard_keeps_stale_totals_on_failure() {
        let cache = DashboardCache::new();
        assert!(cache.current().is_none());

        let totals = Totals {
            total: 5,
            total_deleted: 1,
            total_per_author: Vec::new(),
        };
        cache.refresh::<()>(Ok(totals.clone()));
        assert_eq!(cache.current(), Some(totals.clone()));

        cache.refresh(Err("gateway unreachable"));
        assert_eq!(cache.current(), Some(totals));
    }

    #[test]
    fn dirty_flag_clears_on_successful_refresh() {
        let cache = DashboardCache::new();
        cache.refresh::<()>(Ok(Totals {
            total: 1,
            total_deleted: 0,
            total_per_author: Vec::new(),
        }));
        assert!(!cache.is_dirty());

        cache.mark_dirty();
        assert!(cache.is_dirty());

        // Failure keeps the flag raised.
        cache.refresh(Err("offline"));
        assert!(cache.is_dirty());

        cache.refresh::<()>(Ok(Totals {
            total: 2,
            total_deleted: 0,
            total_per_author: Vec::new(),
        }));
        assert!(!cache.is_dirty());
    }
}
