//! In-memory sink for tests and dry runs

use super::{DocumentSink, SinkSummary};
use crate::error::SinkError;
use crate::projector::{IndexFields, IndexRecord};
use gaz_place::PlaceId;

/// Owned copy of an [`IndexRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Name variant
    pub name: String,
    /// Shared field values
    pub fields: IndexFields,
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Records in insertion order
    pub records: Vec<StoredRecord>,
    closed: bool,
}

impl MemorySink {
    /// Create empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of one place
    pub fn for_place(&self, id: PlaceId) -> impl Iterator<Item = &StoredRecord> {
        self.records.iter().filter(move |r| r.fields.geoname_id == id)
    }

    /// Name variants of one place, in insertion order
    #[must_use]
    pub fn names_of(&self, id: PlaceId) -> Vec<&str> {
        self.for_place(id).map(|r| r.name.as_str()).collect()
    }

    /// Whether [`close`](DocumentSink::close) was called
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl DocumentSink for MemorySink {
    fn add(&mut self, record: &IndexRecord<'_>) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        self.records.push(StoredRecord {
            name: record.name.to_string(),
            fields: record.fields.clone(),
        });
        Ok(())
    }

    fn close(&mut self) -> Result<SinkSummary, SinkError> {
        self.closed = true;
        Ok(SinkSummary {
            records: self.records.len() as u64,
            location: None,
        })
    }
}
