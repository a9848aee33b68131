//! Gazetteer place model
//!
//! Place entities as read from a GeoNames dump, with the hierarchy keys the
//! ancestry resolver works on.
//!
//! # Overview
//!
//! - [`Place`]: one gazetteer entry, built through [`PlaceBuilder`]
//! - [`AncestryKey`]: dot-separated administrative code (`US.CA.037`)
//! - [`FeatureClass`] / [`FeatureCode`]: GeoNames classification
//! - [`record`]: parsing of raw dump rows
//!
//! # Example
//!
//! ```rust
//! use gaz_place::{FeatureClass, Place};
//!
//! let county = Place::builder(5_368_381, "Los Angeles County")
//!     .feature(FeatureClass::A, "ADM2")
//!     .country("US")
//!     .admin_codes(["CA", "037"])
//!     .build();
//!
//! assert_eq!(county.ancestry_key().unwrap().as_str(), "US.CA.037");
//! assert_eq!(county.parent_key().unwrap().as_str(), "US.CA");
//! ```

#![warn(missing_docs)]

mod error;
mod feature;
mod key;
mod place;
pub mod record;

// Re-exports
pub use error::PlaceError;
pub use feature::{FeatureClass, FeatureCode, FeatureError};
pub use key::{AncestryKey, KeyError, KEY_SEPARATOR};
pub use place::{Place, PlaceBuilder, PlaceId, ADMIN_CODE_COLUMNS};
pub use record::{parse_line, GazetteerRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
