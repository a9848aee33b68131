//! Document sinks
//!
//! A [`DocumentSink`] receives every index record the builder produces. Sinks
//! do not deduplicate: the same name variant may be added for several places,
//! and a place may be added several times if it occurs more than once in the
//! input.

mod json;
mod memory;
#[cfg(feature = "tantivy")]
mod tantivy_index;

pub use json::{JsonLinesSink, DOCUMENTS_FILE};
pub use memory::{MemorySink, StoredRecord};
#[cfg(feature = "tantivy")]
pub use tantivy_index::{schema, TantivySink};

use crate::error::SinkError;
use crate::projector::IndexRecord;
use std::path::PathBuf;

/// Totals reported by a closed sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkSummary {
    /// Records accepted
    pub records: u64,
    /// Where the records ended up, if on disk
    pub location: Option<PathBuf>,
}

/// Receiver of index records
pub trait DocumentSink {
    /// Add one record
    ///
    /// # Errors
    /// Any failure is fatal to the build.
    fn add(&mut self, record: &IndexRecord<'_>) -> Result<(), SinkError>;

    /// Flush and finish; no record may be added afterwards
    ///
    /// # Errors
    /// Returns error if pending records cannot be persisted.
    fn close(&mut self) -> Result<SinkSummary, SinkError>;
}

impl<S: DocumentSink + ?Sized> DocumentSink for Box<S> {
    fn add(&mut self, record: &IndexRecord<'_>) -> Result<(), SinkError> {
        (**self).add(record)
    }

    fn close(&mut self) -> Result<SinkSummary, SinkError> {
        (**self).close()
    }
}

impl<S: DocumentSink + ?Sized> DocumentSink for &mut S {
    fn add(&mut self, record: &IndexRecord<'_>) -> Result<(), SinkError> {
        (**self).add(record)
    }

    fn close(&mut self) -> Result<SinkSummary, SinkError> {
        (**self).close()
    }
}
