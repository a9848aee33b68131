//! Emission of resolved places
//!
//! The resolver hands every place to an [`Emitter`] exactly once, as a
//! [`PlaceView`] that can walk the place's resolved ancestry.

use crate::arena::{PlaceArena, PlaceHandle};
use gaz_place::{Place, PlaceId};
use std::convert::Infallible;

/// Read-only view of an emitted place and its ancestry
#[derive(Debug, Clone, Copy)]
pub struct PlaceView<'a> {
    arena: &'a PlaceArena,
    handle: PlaceHandle,
    place: &'a Place,
}

impl<'a> PlaceView<'a> {
    /// View a tracked place; `None` if the handle is not in the arena
    #[must_use]
    pub fn new(arena: &'a PlaceArena, handle: PlaceHandle) -> Option<Self> {
        arena.get(handle).map(|place| Self {
            arena,
            handle,
            place,
        })
    }

    /// Arena handle
    #[inline]
    #[must_use]
    pub fn handle(&self) -> PlaceHandle {
        self.handle
    }

    /// The place itself
    #[inline]
    #[must_use]
    pub fn place(&self) -> &'a Place {
        self.place
    }

    /// Direct parent
    #[must_use]
    pub fn parent(&self) -> Option<&'a Place> {
        self.arena
            .parent(self.handle)
            .and_then(|parent| self.arena.get(parent))
    }

    /// Ancestors, nearest first, up to the root of the chain
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Place> + 'a {
        let arena = self.arena;
        arena.chain(self.handle).filter_map(move |handle| arena.get(handle))
    }

    /// Whether the full ancestry was resolved at emission time
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.arena.is_resolved(self.handle)
    }
}

/// Receiver of resolved places
///
/// Errors returned by the emitter abort the current resolver call and are
/// passed back to the caller unchanged.
pub trait Emitter {
    /// Failure raised while consuming a place
    type Error;

    /// Consume one place
    ///
    /// # Errors
    /// Implementation defined; typically a failure to write downstream.
    fn emit(&mut self, place: PlaceView<'_>) -> Result<(), Self::Error>;
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    type Error = E::Error;

    fn emit(&mut self, place: PlaceView<'_>) -> Result<(), Self::Error> {
        (**self).emit(place)
    }
}

/// Collect emitted ids in emission order
impl Emitter for Vec<PlaceId> {
    type Error = Infallible;

    fn emit(&mut self, place: PlaceView<'_>) -> Result<(), Self::Error> {
        self.push(place.place().id());
        Ok(())
    }
}

/// Adapter turning a closure into an [`Emitter`]
#[derive(Debug)]
pub struct EmitFn<F>(pub F);

impl<F, E> Emitter for EmitFn<F>
where
    F: FnMut(PlaceView<'_>) -> Result<(), E>,
{
    type Error = E;

    fn emit(&mut self, place: PlaceView<'_>) -> Result<(), Self::Error> {
        (self.0)(place)
    }
}

/// Snapshot of a place's ancestry at emission time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedPlace {
    /// GeoNames id
    pub id: PlaceId,
    /// Direct parent id
    pub parent: Option<PlaceId>,
    /// Ancestor ids, nearest first
    pub ancestors: Vec<PlaceId>,
    /// Full chain resolved when emitted
    pub resolved: bool,
}

/// Emitter that records every emission, for inspection and dry runs
#[derive(Debug, Default)]
pub struct Recorder {
    /// Emissions in order
    pub emitted: Vec<EmittedPlace>,
}

impl Recorder {
    /// Create empty recorder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitted ids in order
    #[must_use]
    pub fn ids(&self) -> Vec<PlaceId> {
        self.emitted.iter().map(|e| e.id).collect()
    }

    /// Record for a given id (first emission)
    #[must_use]
    pub fn find(&self, id: u32) -> Option<&EmittedPlace> {
        self.emitted.iter().find(|e| e.id == PlaceId(id))
    }
}

impl Emitter for Recorder {
    type Error = Infallible;

    fn emit(&mut self, place: PlaceView<'_>) -> Result<(), Self::Error> {
        self.emitted.push(EmittedPlace {
            id: place.place().id(),
            parent: place.parent().map(Place::id),
            ancestors: place.ancestors().map(Place::id).collect(),
            resolved: place.is_resolved(),
        });
        Ok(())
    }
}
