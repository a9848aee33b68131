//! Online ancestry resolution
//!
//! Rebuilds the administrative hierarchy of a gazetteer that arrives in
//! arbitrary order: children may precede their parents, and parents may
//! precede their own ancestors. Each place is emitted as soon as its full
//! chain of ancestors is known.
//!
//! # Overview
//!
//! - [`AncestryResolver`]: ingest, cascade, finalize and drain
//! - [`PlaceArena`]: owner of tracked places and their parent links
//! - [`AdminRegistry`] / [`PendingRegistry`]: key → division, key → waiting places
//! - [`Emitter`]: receiver of resolved places, seen through [`PlaceView`]
//!
//! # Example
//!
//! ```rust
//! use gaz_ancestry::{AncestryResolver, Recorder};
//! use gaz_place::{FeatureClass, Place};
//!
//! let county = Place::builder(2, "Los Angeles County")
//!     .feature(FeatureClass::A, "ADM2")
//!     .country("US")
//!     .admin_codes(["CA", "037"])
//!     .build();
//! let state = Place::builder(1, "California")
//!     .feature(FeatureClass::A, "ADM1")
//!     .country("US")
//!     .admin_codes(["CA"])
//!     .build();
//!
//! let mut resolver = AncestryResolver::new();
//! let mut out = Recorder::new();
//! resolver.ingest(county, &mut out).unwrap();
//! resolver.ingest(state, &mut out).unwrap();
//!
//! // no `US` country yet: both wait for the finalize fallback
//! assert!(out.emitted.is_empty());
//! assert_eq!(resolver.waiting(), 2);
//! ```

#![warn(missing_docs)]

mod arena;
mod emit;
mod error;
mod registry;
mod report;
mod resolver;

// Re-exports
pub use arena::{PlaceArena, PlaceHandle};
pub use emit::{EmitFn, EmittedPlace, Emitter, PlaceView, Recorder};
pub use error::ParentError;
pub use registry::{AdminRegistry, PendingRegistry};
pub use report::{level_name, UnresolvedReport};
pub use resolver::{AncestryResolver, ResolverStats};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
