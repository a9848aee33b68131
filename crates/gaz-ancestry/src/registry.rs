//! Admin and pending registries
//!
//! - [`AdminRegistry`]: ancestry key → canonical administrative division
//! - [`PendingRegistry`]: parent key → places waiting for that parent

use crate::arena::PlaceHandle;
use gaz_place::AncestryKey;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Canonical owner of each ancestry key
///
/// Last writer wins: registering a key that is already owned replaces the
/// owner and hands the previous one back to the caller.
#[derive(Debug, Default)]
pub struct AdminRegistry {
    owners: HashMap<AncestryKey, PlaceHandle>,
}

impl AdminRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `handle` the owner of `key`, returning the previous owner
    pub fn register(&mut self, key: AncestryKey, handle: PlaceHandle) -> Option<PlaceHandle> {
        self.owners.insert(key, handle)
    }

    /// Current owner of a key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &AncestryKey) -> Option<PlaceHandle> {
        self.owners.get(key).copied()
    }

    /// Nearest registered strict ancestor of `key`
    ///
    /// Strips one component at a time; `FR.11.75` checks `FR.11`, then `FR`.
    #[must_use]
    pub fn nearest_ancestor(&self, key: &AncestryKey) -> Option<(AncestryKey, PlaceHandle)> {
        key.ancestors()
            .find_map(|ancestor| self.get(&ancestor).map(|handle| (ancestor, handle)))
    }

    /// Number of registered keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Check if no key is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Places waiting for a parent key to be registered or resolved
///
/// Buckets keep insertion order so resolution and emission are
/// deterministic for a given input order. Empty buckets are never stored.
#[derive(Debug, Default)]
pub struct PendingRegistry {
    buckets: HashMap<AncestryKey, IndexSet<PlaceHandle>>,
}

impl PendingRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a place under the key of its missing parent
    pub fn insert(&mut self, key: AncestryKey, handle: PlaceHandle) -> bool {
        self.buckets.entry(key).or_default().insert(handle)
    }

    /// Remove and return a whole bucket
    pub fn take(&mut self, key: &AncestryKey) -> Option<IndexSet<PlaceHandle>> {
        self.buckets.remove(key)
    }

    /// Put back whatever is left of a bucket taken with [`take`](Self::take)
    pub fn restore(&mut self, key: AncestryKey, remaining: IndexSet<PlaceHandle>) {
        if !remaining.is_empty() {
            self.buckets.entry(key).or_default().extend(remaining);
        }
    }

    /// Waiting places for a key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &AncestryKey) -> Option<&IndexSet<PlaceHandle>> {
        self.buckets.get(key)
    }

    /// Keys ordered by specificity, then lexically
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<AncestryKey> {
        let mut keys: Vec<_> = self.buckets.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Iterate over `(key, bucket)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&AncestryKey, &IndexSet<PlaceHandle>)> {
        self.buckets.iter()
    }

    /// Number of keys with waiting places
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if nothing is waiting
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of waiting places
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.buckets.values().map(IndexSet::len).sum()
    }

    /// Remove everything, keys in specificity order
    pub fn drain_sorted(&mut self) -> Vec<(AncestryKey, IndexSet<PlaceHandle>)> {
        let keys = self.sorted_keys();
        keys.into_iter()
            .filter_map(|key| self.buckets.remove(&key).map(|bucket| (key, bucket)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::PlaceArena;
    use gaz_test_utils::admin;

    fn key(s: &str) -> AncestryKey {
        s.parse().unwrap()
    }

    #[test]
    fn admin_last_writer_wins() {
        let mut arena = PlaceArena::new();
        let first = arena.insert(admin(1, "US"));
        let second = arena.insert(admin(2, "US"));
        let mut registry = AdminRegistry::new();

        assert_eq!(registry.register(key("US"), first), None);
        assert_eq!(registry.register(key("US"), second), Some(first));
        assert_eq!(registry.get(&key("US")), Some(second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn nearest_ancestor_skips_missing_levels() {
        let mut arena = PlaceArena::new();
        let fr = arena.insert(admin(1, "FR"));
        let mut registry = AdminRegistry::new();
        registry.register(key("FR"), fr);

        assert_eq!(
            registry.nearest_ancestor(&key("FR.11.75")),
            Some((key("FR"), fr))
        );
        assert_eq!(registry.nearest_ancestor(&key("FR")), None);
        assert_eq!(registry.nearest_ancestor(&key("DE.01")), None);
    }

    #[test]
    fn pending_take_and_restore() {
        let mut arena = PlaceArena::new();
        let a = arena.insert(admin(1, "US.CA"));
        let b = arena.insert(admin(2, "US.NY"));
        let mut pending = PendingRegistry::new();

        assert!(pending.insert(key("US"), a));
        assert!(!pending.insert(key("US"), a));
        pending.insert(key("US"), b);
        assert_eq!(pending.waiting(), 2);

        let mut bucket = pending.take(&key("US")).unwrap();
        assert!(pending.is_empty());

        bucket.shift_remove(&a);
        pending.restore(key("US"), bucket);
        assert_eq!(pending.get(&key("US")).map(IndexSet::len), Some(1));

        pending.restore(key("DE"), IndexSet::new());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn pending_keys_sorted_by_specificity() {
        let mut arena = PlaceArena::new();
        let h = arena.insert(admin(1, "XX"));
        let mut pending = PendingRegistry::new();
        for k in ["US.CA", "FR", "AD.07.1", "US"] {
            pending.insert(key(k), h);
        }

        assert_eq!(
            pending.sorted_keys(),
            vec![key("FR"), key("US"), key("US.CA"), key("AD.07.1")]
        );
    }
}
