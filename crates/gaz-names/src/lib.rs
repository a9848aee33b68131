//! Alternate-name selection
//!
//! Picks one English display name per place from the GeoNames
//! `alternateNames.txt` side feed.
//!
//! # Overview
//!
//! - [`AlternateName`]: one feed row
//! - [`best_name`]: preferred > short > first seen
//! - [`PreferredNames`]: id → best candidate table
//!
//! # Example
//!
//! ```rust
//! use gaz_names::{AlternateName, PreferredNames};
//! use gaz_place::PlaceId;
//!
//! let mut names = PreferredNames::new();
//! names.ingest(AlternateName::new(6_252_001, "United States of America", "en", true, false));
//! names.ingest(AlternateName::new(6_252_001, "United States", "en", true, true));
//!
//! assert_eq!(names.lookup(PlaceId(6_252_001)), Some("United States"));
//! ```

#![warn(missing_docs)]

mod candidate;
mod error;
mod selector;

// Re-exports
pub use candidate::{best_name, AlternateName, MIN_COLUMNS};
pub use error::NameError;
pub use selector::{LoadStats, PreferredNames};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
