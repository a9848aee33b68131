//! Tantivy-backed sink

use super::{DocumentSink, SinkSummary};
use crate::error::SinkError;
use crate::field::{FieldKind, IndexField};
use crate::projector::IndexRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tantivy::schema::{Field, NumericOptions, Schema, TextOptions, STORED, STRING, TEXT};
use tantivy::{Index, IndexWriter, TantivyDocument};

/// Writer heap shared by all indexing threads
const WRITER_MEMORY: usize = 128 << 20;

/// Writes records into a tantivy index directory
pub struct TantivySink {
    writer: Option<IndexWriter>,
    fields: HashMap<IndexField, Field>,
    records: u64,
    location: PathBuf,
}

impl std::fmt::Debug for TantivySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivySink")
            .field("records", &self.records)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Schema derived from the field catalogue
#[must_use]
pub fn schema() -> (Schema, HashMap<IndexField, Field>) {
    let mut builder = Schema::builder();
    let mut fields = HashMap::new();

    for field in IndexField::ALL {
        let options = field.options();
        let handle = match options.kind {
            FieldKind::Text => {
                let text = if options.stored { TEXT | STORED } else { TEXT };
                builder.add_text_field(field.key(), text)
            }
            FieldKind::Keyword => {
                let text: TextOptions = match (options.indexed, options.stored) {
                    (true, true) => STRING | STORED,
                    (true, false) => STRING,
                    (false, _) => STORED.into(),
                };
                builder.add_text_field(field.key(), text)
            }
            FieldKind::Unsigned => builder.add_u64_field(field.key(), numeric(options)),
            FieldKind::Bool => builder.add_bool_field(field.key(), numeric(options)),
        };
        fields.insert(field, handle);
    }
    (builder.build(), fields)
}

fn numeric(options: crate::field::FieldOptions) -> NumericOptions {
    let mut numeric = NumericOptions::default();
    if options.indexed {
        numeric = numeric.set_indexed();
    }
    if options.stored {
        numeric = numeric.set_stored();
    }
    if options.fast {
        numeric = numeric.set_fast();
    }
    numeric
}

impl TantivySink {
    /// Create a new index in an existing, empty directory
    ///
    /// # Errors
    /// Returns error if the index or its writer cannot be created.
    pub fn create(index_dir: &Path) -> Result<Self, SinkError> {
        let (schema, fields) = schema();
        let index = Index::create_in_dir(index_dir, schema)?;
        let writer: IndexWriter = index.writer(WRITER_MEMORY)?;
        Ok(Self {
            writer: Some(writer),
            fields,
            records: 0,
            location: index_dir.to_path_buf(),
        })
    }

    fn field(&self, field: IndexField) -> Field {
        // every catalogue field is registered in `schema()`
        self.fields[&field]
    }
}

impl DocumentSink for TantivySink {
    fn add(&mut self, record: &IndexRecord<'_>) -> Result<(), SinkError> {
        let fields = record.fields;
        let mut doc = TantivyDocument::default();
        doc.add_text(self.field(IndexField::IndexName), record.name);
        doc.add_text(self.field(IndexField::Geoname), &fields.payload);
        doc.add_u64(self.field(IndexField::GeonameId), u64::from(fields.geoname_id.get()));
        if let Some(preferred) = &fields.preferred_name {
            doc.add_text(self.field(IndexField::PreferredName), preferred);
        }
        if let Some(parent) = fields.parent_id {
            doc.add_u64(self.field(IndexField::ParentId), u64::from(parent.get()));
        }
        for ancestor in &fields.ancestor_ids {
            doc.add_u64(self.field(IndexField::AncestorIds), u64::from(ancestor.get()));
        }
        doc.add_u64(self.field(IndexField::Population), fields.population);
        doc.add_u64(self.field(IndexField::SortPop), fields.sort_pop);
        doc.add_bool(self.field(IndexField::Historical), fields.historical);
        doc.add_text(self.field(IndexField::FeatureCode), &fields.feature_code);

        let writer = self.writer.as_mut().ok_or(SinkError::Closed)?;
        writer.add_document(doc)?;
        self.records += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<SinkSummary, SinkError> {
        let mut writer = self.writer.take().ok_or(SinkError::Closed)?;
        writer.commit()?;
        writer.wait_merging_threads()?;
        tracing::info!(records = self.records, path = %self.location.display(), "committed search index");
        Ok(SinkSummary {
            records: self.records,
            location: Some(self.location.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_every_field() {
        let (schema, fields) = schema();
        assert_eq!(fields.len(), IndexField::ALL.len());
        for field in IndexField::ALL {
            assert_eq!(schema.get_field(field.key()).ok(), Some(fields[&field]));
        }
    }
}
