//! Gazetteer index builder
//!
//! Reads GeoNames dumps, rebuilds their administrative hierarchy and writes
//! one searchable record per name variant of every place.
//!
//! # Overview
//!
//! - [`IndexBuilder`]: end-to-end pipeline
//! - [`Projector`]: place → [`IndexRecord`]s
//! - [`DocumentSink`]: where records go ([`JsonLinesSink`], [`MemorySink`],
//!   `TantivySink` with the `tantivy` feature)
//! - [`BuildConfig`]: layered configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use gaz_index::{BuildConfig, IndexBuilder};
//!
//! let config = BuildConfig::new()
//!     .with_gazetteer_files(["allCountries.txt"])
//!     .with_alt_names_file("alternateNames.txt")
//!     .with_index_path("IndexDirectory")
//!     .with_replace_index(true);
//!
//! let summary = IndexBuilder::new(config)?.run()?;
//! println!("{} records", summary.records_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod field;
pub mod projector;
pub mod sink;

// Re-exports
pub use builder::{prepare_index_dir, BuildSummary, IndexBuilder, ProjectingEmitter};
pub use config::{Backend, BuildConfig};
pub use error::{BuildError, ConfigError, SinkError};
pub use feed::{FeedStats, GazetteerFeed};
pub use field::{FieldKind, FieldOptions, IndexField};
pub use projector::{IndexFields, IndexRecord, Projection, Projector, ProjectorConfig};
pub use sink::{DocumentSink, JsonLinesSink, MemorySink, SinkSummary, StoredRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
