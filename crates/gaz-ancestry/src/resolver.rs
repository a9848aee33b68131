//! Ancestry resolver
//!
//! Provides [`AncestryResolver`], the stateful engine that rebuilds the
//! administrative forest from places arriving in arbitrary order.
//!
//! # Lifecycle
//!
//! 1. [`ingest`](AncestryResolver::ingest) every place, in stream order.
//!    Places whose ancestry is complete are emitted immediately; the rest
//!    wait in the pending registry until their parent shows up.
//! 2. [`finalize`](AncestryResolver::finalize) once: waiting places fall back
//!    to their nearest registered ancestor.
//! 3. [`drain_remaining`](AncestryResolver::drain_remaining) to emit whatever
//!    is still unresolved.
//!
//! Every ingested place is emitted exactly once across the three steps.

use crate::arena::{PlaceArena, PlaceHandle};
use crate::emit::{Emitter, PlaceView};
use crate::registry::{AdminRegistry, PendingRegistry};
use crate::report::{level_name, UnresolvedReport};
use gaz_place::{AncestryKey, Place};
use indexmap::IndexSet;
use std::collections::VecDeque;

/// Counters kept over the resolver's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Places ingested
    pub ingested: usize,
    /// Places emitted by `ingest` and `finalize`
    pub emitted: usize,
    /// Places resolved through the finalize fallback
    pub fallback: usize,
    /// Admin keys claimed by more than one place
    pub admin_conflicts: usize,
    /// Failed or inconsistent parent assignments
    pub parent_errors: usize,
    /// Pending keys with no registered ancestor at finalize
    pub unresolvable_keys: usize,
}

/// Online administrative-hierarchy resolver
///
/// Single-writer: registries are plain owned maps and every call must come
/// from the one thread feeding the stream.
#[derive(Debug, Default)]
pub struct AncestryResolver {
    arena: PlaceArena,
    admin: AdminRegistry,
    pending: PendingRegistry,
    stats: ResolverStats,
}

impl AncestryResolver {
    /// Create empty resolver
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters so far
    #[inline]
    #[must_use]
    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Places currently tracked (admin divisions plus the unresolved frontier)
    #[inline]
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.arena.len()
    }

    /// Places waiting for a parent
    #[inline]
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.pending.waiting()
    }

    /// Canonical division for a key
    #[must_use]
    pub fn admin(&self, key: &AncestryKey) -> Option<&Place> {
        self.admin.get(key).and_then(|handle| self.arena.get(handle))
    }

    /// Number of registered administrative keys
    #[inline]
    #[must_use]
    pub fn admin_divisions(&self) -> usize {
        self.admin.len()
    }

    /// Feed one place
    ///
    /// # Errors
    /// Only emitter failures are returned; data-quality problems (duplicate
    /// admin keys, rejected parent assignments) are logged and skipped.
    pub fn ingest<E: Emitter>(
        &mut self,
        place: Place,
        emitter: &mut E,
    ) -> Result<PlaceHandle, E::Error> {
        self.stats.ingested += 1;
        let parent_key = place.parent_key().cloned();
        let own_key = place.ancestry_key().cloned();
        let handle = self.arena.insert(place);

        if let Some(parent_key) = parent_key {
            let attached = match self.admin.get(&parent_key) {
                Some(parent) => self.assign_parent(handle, parent),
                None => false,
            };
            if !attached || !self.arena.is_resolved(handle) {
                self.pending.insert(parent_key, handle);
            }
        }

        if self.arena.is_resolved(handle) {
            self.emit(handle, emitter)?;
        }

        if let Some(key) = own_key {
            self.register(key, handle);
            self.cascade(handle, emitter)?;
        }
        Ok(handle)
    }

    /// Resolve waiting places against their nearest registered ancestor
    ///
    /// Keys are visited least specific first, so a division rescued here
    /// unblocks its own waiting children when their deeper key comes up.
    ///
    /// # Errors
    /// Only emitter failures are returned.
    pub fn finalize<E: Emitter>(&mut self, emitter: &mut E) -> Result<(), E::Error> {
        for key in self.pending.sorted_keys() {
            let Some((ancestor_key, parent)) = self.admin.nearest_ancestor(&key) else {
                self.stats.unresolvable_keys += 1;
                tracing::error!(key = %key, "Unable to resolve parent for place key");
                continue;
            };
            let Some(bucket) = self.pending.take(&key) else {
                continue;
            };

            let mut remaining = IndexSet::new();
            for child in bucket {
                if self.arena.is_resolved(child) {
                    self.emit(child, emitter)?;
                    continue;
                }
                match self.arena.set_parent(child, parent) {
                    Ok(()) if self.arena.is_resolved(child) => {
                        self.stats.fallback += 1;
                        self.emit(child, emitter)?;
                    }
                    Ok(()) => {
                        self.stats.parent_errors += 1;
                        tracing::error!(
                            key = %key,
                            ancestor = %ancestor_key,
                            "Place {} should be fully resolved (parent: {})",
                            self.describe(child),
                            self.describe(parent)
                        );
                        remaining.insert(child);
                    }
                    Err(err) => {
                        self.stats.parent_errors += 1;
                        tracing::error!(
                            key = %key,
                            error = %err,
                            "Unable to set parent of {} to {}",
                            self.describe(child),
                            self.describe(parent)
                        );
                        remaining.insert(child);
                    }
                }
            }
            self.pending.restore(key, remaining);
        }
        Ok(())
    }

    /// Emit every place still waiting, resolved or not, and drop all state
    ///
    /// Returns the number of places emitted.
    ///
    /// # Errors
    /// Only emitter failures are returned.
    pub fn drain_remaining<E: Emitter>(mut self, emitter: &mut E) -> Result<usize, E::Error> {
        let mut count = 0;
        for (_, bucket) in self.pending.drain_sorted() {
            for handle in bucket {
                if let Some(view) = PlaceView::new(&self.arena, handle) {
                    emitter.emit(view)?;
                    count += 1;
                }
            }
        }
        tracing::debug!(forced = count, "emitted unresolved places");
        Ok(count)
    }

    /// Summarise the unresolved frontier
    #[must_use]
    pub fn report(&self) -> UnresolvedReport {
        let mut report = UnresolvedReport {
            admin_divisions: self.admin.len(),
            missing_keys: self.pending.len(),
            ..UnresolvedReport::default()
        };

        for (key, bucket) in self.pending.iter() {
            let level = level_name(key.specificity());
            if level == "NULL" {
                tracing::error!(key = %key, "Unexpected ancestry key");
            }
            *report.missing_by_level.entry(level).or_default() += 1;
            report.unresolved_places += bucket.len();
            report.by_key.insert(key.to_string(), bucket.len());

            for place in bucket.iter().filter_map(|handle| self.arena.get(*handle)) {
                let feature = format!("{}:{}", place.feature_class(), place.feature_code());
                *report.by_feature.entry(feature).or_default() += 1;
            }
        }
        report
    }

    fn register(&mut self, key: AncestryKey, handle: PlaceHandle) {
        if let Some(previous) = self.admin.register(key.clone(), handle) {
            if previous != handle {
                self.stats.admin_conflicts += 1;
                tracing::error!(
                    key = %key,
                    "Resolved duplicate admin key [{}] for places {} and {}",
                    key,
                    self.describe(previous),
                    self.describe(handle)
                );
            }
        }
    }

    /// Unblock everything waiting below a newly registered division
    ///
    /// Breadth-first over newly resolved divisions. Children of the
    /// registrant get their parent assigned; deeper descendants already
    /// point at their parent and are only re-checked.
    fn cascade<E: Emitter>(&mut self, registrant: PlaceHandle, emitter: &mut E) -> Result<(), E::Error> {
        let mut queue = VecDeque::from([(registrant, true)]);

        while let Some((parent, assign)) = queue.pop_front() {
            let Some(key) = self
                .arena
                .get(parent)
                .and_then(Place::ancestry_key)
                .cloned()
            else {
                continue;
            };
            let Some(bucket) = self.pending.take(&key) else {
                continue;
            };

            let mut remaining = IndexSet::new();
            for child in bucket {
                if assign && !self.assign_parent(child, parent) {
                    tracing::error!(
                        "Error setting parent {} of place {}",
                        self.describe(parent),
                        self.describe(child)
                    );
                }
                if self.arena.is_resolved(child) {
                    queue.push_back((child, false));
                    self.emit(child, emitter)?;
                } else {
                    remaining.insert(child);
                }
            }
            self.pending.restore(key, remaining);
        }
        Ok(())
    }

    /// Set-once parent assignment; failures are logged and counted
    fn assign_parent(&mut self, child: PlaceHandle, parent: PlaceHandle) -> bool {
        match self.arena.set_parent(child, parent) {
            Ok(()) => true,
            Err(err) => {
                self.stats.parent_errors += 1;
                tracing::error!(error = %err, "parent assignment rejected");
                false
            }
        }
    }

    fn emit<E: Emitter>(&mut self, handle: PlaceHandle, emitter: &mut E) -> Result<(), E::Error> {
        let Some(view) = PlaceView::new(&self.arena, handle) else {
            return Ok(());
        };
        emitter.emit(view)?;
        self.stats.emitted += 1;

        // nothing can point at a non-administrative place
        let is_leaf = self
            .arena
            .get(handle)
            .is_some_and(|place| !place.is_admin_division());
        if is_leaf {
            self.arena.remove(handle);
        }
        Ok(())
    }

    fn describe(&self, handle: PlaceHandle) -> String {
        self.arena
            .get(handle)
            .map_or_else(|| handle.to_string(), ToString::to_string)
    }
}
