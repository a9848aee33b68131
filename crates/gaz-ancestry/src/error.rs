//! Error types for ancestry resolution
//!
//! None of these abort a build: the resolver logs them and keeps going with
//! whatever partial state the place is left in.

use crate::arena::PlaceHandle;
use gaz_place::PlaceId;

/// Violations of the set-once parent contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParentError {
    /// Place already has a parent
    #[error("place {child} already has parent {existing}, refusing {requested}")]
    AlreadySet {
        /// Place being rewired
        child: PlaceId,
        /// Parent already assigned
        existing: PlaceId,
        /// Parent that was offered
        requested: PlaceId,
    },

    /// Assignment would make a place its own ancestor
    #[error("assigning parent {parent} to {child} would create a cycle")]
    Cycle {
        /// Place being rewired
        child: PlaceId,
        /// Parent that was offered
        parent: PlaceId,
    },

    /// Handle does not refer to a tracked place
    #[error("unknown place handle {0}")]
    UnknownHandle(PlaceHandle),
}
