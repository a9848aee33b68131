//! Place arena
//!
//! Provides [`PlaceArena`], which owns every place the resolver currently
//! tracks. Parent links are stored as [`PlaceHandle`]s, never as references,
//! so the hierarchy can be rewired without ownership cycles.

use crate::error::ParentError;
use gaz_place::{Place, PlaceId};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Stable arena slot for one ingested place
///
/// Handles are assigned sequentially on insertion and never reused, so two
/// records sharing a GeoNames id still get distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceHandle(u32);

impl PlaceHandle {
    /// Raw slot number
    #[inline]
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl Display for PlaceHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Node {
    place: Place,
    parent: Option<PlaceHandle>,
}

/// Owner of tracked places and their parent links
#[derive(Debug, Default)]
pub struct PlaceArena {
    nodes: HashMap<PlaceHandle, Node>,
    next: u32,
}

impl PlaceArena {
    /// Create empty arena
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a place, with no parent set
    pub fn insert(&mut self, place: Place) -> PlaceHandle {
        let handle = PlaceHandle(self.next);
        self.next += 1;
        self.nodes.insert(handle, Node { place, parent: None });
        handle
    }

    /// Drop a place from the arena
    ///
    /// Only places nothing points at (non-administrative leaves) may be
    /// removed; the caller guarantees that.
    pub fn remove(&mut self, handle: PlaceHandle) -> Option<Place> {
        self.nodes.remove(&handle).map(|node| node.place)
    }

    /// Place behind a handle
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PlaceHandle) -> Option<&Place> {
        self.nodes.get(&handle).map(|node| &node.place)
    }

    /// Direct parent, if one has been assigned
    #[inline]
    #[must_use]
    pub fn parent(&self, handle: PlaceHandle) -> Option<PlaceHandle> {
        self.nodes.get(&handle).and_then(|node| node.parent)
    }

    /// Number of tracked places
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Assign the parent of `child`, exactly once
    ///
    /// # Errors
    /// - [`ParentError::UnknownHandle`] if either handle is not tracked
    /// - [`ParentError::AlreadySet`] if `child` already has a parent
    /// - [`ParentError::Cycle`] if `parent` is `child` or one of its descendants
    pub fn set_parent(&mut self, child: PlaceHandle, parent: PlaceHandle) -> Result<(), ParentError> {
        let parent_id = self.id_of(parent)?;
        let child_node = self
            .nodes
            .get(&child)
            .ok_or(ParentError::UnknownHandle(child))?;
        let child_id = child_node.place.id();

        if let Some(existing) = child_node.parent {
            return Err(ParentError::AlreadySet {
                child: child_id,
                existing: self.id_of(existing)?,
                requested: parent_id,
            });
        }
        if parent == child || self.chain(parent).any(|ancestor| ancestor == child) {
            return Err(ParentError::Cycle {
                child: child_id,
                parent: parent_id,
            });
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Whether the full parent chain up to a place without a parent key is set
    #[must_use]
    pub fn is_resolved(&self, handle: PlaceHandle) -> bool {
        let mut current = handle;
        // parents are set once and never form cycles, so the walk is bounded
        // by the arena size
        for _ in 0..=self.nodes.len() {
            let Some(node) = self.nodes.get(&current) else {
                return false;
            };
            if node.place.parent_key().is_none() {
                return true;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Handles of the ancestors of a place, nearest first
    pub fn chain(&self, handle: PlaceHandle) -> impl Iterator<Item = PlaceHandle> + '_ {
        std::iter::successors(self.parent(handle), move |current| self.parent(*current))
            .take(self.nodes.len())
    }

    fn id_of(&self, handle: PlaceHandle) -> Result<PlaceId, ParentError> {
        self.get(handle)
            .map(Place::id)
            .ok_or(ParentError::UnknownHandle(handle))
    }
}
