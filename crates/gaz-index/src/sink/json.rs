//! JSON-lines sink

use super::{DocumentSink, SinkSummary};
use crate::error::SinkError;
use crate::projector::IndexRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File written inside the index directory
pub const DOCUMENTS_FILE: &str = "documents.jsonl";

/// Writes one JSON object per record, newline separated
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: Option<BufWriter<W>>,
    records: u64,
    location: Option<PathBuf>,
}

impl JsonLinesSink<File> {
    /// Create [`DOCUMENTS_FILE`] in an existing index directory
    ///
    /// # Errors
    /// Returns error if the file cannot be created.
    pub fn create(index_dir: &Path) -> Result<Self, SinkError> {
        let path = index_dir.join(DOCUMENTS_FILE);
        let file = File::create(&path)?;
        let mut sink = Self::new(file);
        sink.location = Some(path);
        Ok(sink)
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap any writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(BufWriter::new(writer)),
            records: 0,
            location: None,
        }
    }

    /// Records written so far
    #[inline]
    #[must_use]
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Close and hand back the underlying writer
    ///
    /// # Errors
    /// Returns error if the buffer cannot be flushed or the sink was closed.
    pub fn into_inner(mut self) -> Result<W, SinkError> {
        let writer = self.writer.take().ok_or(SinkError::Closed)?;
        writer.into_inner().map_err(|err| SinkError::Io(err.into_error()))
    }
}

impl<W: Write> DocumentSink for JsonLinesSink<W> {
    fn add(&mut self, record: &IndexRecord<'_>) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Closed)?;
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<SinkSummary, SinkError> {
        let mut writer = self.writer.take().ok_or(SinkError::Closed)?;
        writer.flush()?;
        Ok(SinkSummary {
            records: self.records,
            location: self.location.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::IndexFields;
    use gaz_place::PlaceId;

    fn fields() -> IndexFields {
        IndexFields {
            payload: "{}".to_string(),
            geoname_id: PlaceId(42),
            preferred_name: None,
            parent_id: Some(PlaceId(7)),
            ancestor_ids: vec![PlaceId(7)],
            population: 10,
            sort_pop: 110,
            historical: false,
            feature_code: "PPL".to_string(),
        }
    }

    #[test]
    fn writes_one_object_per_line() {
        let fields = fields();
        let mut sink = JsonLinesSink::new(Vec::new());
        for name in ["Alpha", "Beta"] {
            sink.add(&IndexRecord { name, fields: &fields }).unwrap();
        }
        assert_eq!(sink.records(), 2);

        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["indexName"], "Beta");
        assert_eq!(lines[0]["parentID"], 7);
        assert!(lines[0].get("preferredName").is_none());
    }

    #[test]
    fn close_reports_and_seals() {
        let fields = fields();
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.add(&IndexRecord { name: "Alpha", fields: &fields }).unwrap();

        let summary = sink.close().unwrap();
        assert_eq!(summary.records, 1);
        assert!(summary.location.is_none());
        assert!(matches!(
            sink.add(&IndexRecord { name: "Beta", fields: &fields }),
            Err(SinkError::Closed)
        ));
    }
}
