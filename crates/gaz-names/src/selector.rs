//! Preferred-name selection
//!
//! Provides [`PreferredNames`], the id → best English candidate table consulted
//! when places are projected into index records.

use crate::candidate::{best_name, AlternateName};
use crate::error::NameError;
use gaz_place::PlaceId;
use std::collections::HashMap;
use std::io::Read;

/// Counters from loading a feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows read
    pub lines: usize,
    /// Rows that passed the English + preferred/short filter
    pub accepted: usize,
    /// Rows skipped because they failed to parse
    pub malformed: usize,
}

/// Best English display name per place
///
/// Built once from the alternate-names feed, read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct PreferredNames {
    names: HashMap<PlaceId, AlternateName>,
}

impl PreferredNames {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Offer a candidate
    ///
    /// Only English names flagged preferred or short are considered; an
    /// accepted candidate replaces the stored one only if it ranks strictly
    /// higher. Returns whether the candidate passed the filter.
    pub fn ingest(&mut self, candidate: AlternateName) -> bool {
        if !(candidate.is_english() && candidate.is_pref_or_short()) {
            return false;
        }
        let best = match self.names.remove(&candidate.geoname_id) {
            Some(current) => best_name(current, candidate),
            None => candidate,
        };
        self.names.insert(best.geoname_id, best);
        true
    }

    /// Best name for a place
    #[inline]
    #[must_use]
    pub fn lookup(&self, id: PlaceId) -> Option<&str> {
        self.names.get(&id).map(|name| name.name.as_str())
    }

    /// Full best candidate for a place
    #[inline]
    #[must_use]
    pub fn candidate(&self, id: PlaceId) -> Option<&AlternateName> {
        self.names.get(&id)
    }

    /// Number of places with a preferred name
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no name was ever accepted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Read a whole tab-separated feed
    ///
    /// Malformed rows are logged and skipped.
    ///
    /// # Errors
    /// Returns error only if the underlying reader fails.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<LoadStats, NameError> {
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut stats = LoadStats::default();
        let mut record = csv::StringRecord::new();
        loop {
            match csv.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) if err.is_io_error() => return Err(NameError::Read(err)),
                Err(err) => {
                    stats.lines += 1;
                    stats.malformed += 1;
                    tracing::warn!(line = stats.lines, error = %err, "skipping unreadable alternate name");
                    continue;
                }
            }
            stats.lines += 1;

            let fields: Vec<&str> = record.iter().collect();
            match AlternateName::from_fields(&fields) {
                Ok(candidate) => {
                    if self.ingest(candidate) {
                        stats.accepted += 1;
                    }
                }
                Err(err) => {
                    stats.malformed += 1;
                    tracing::warn!(line = stats.lines, error = %err, "skipping malformed alternate name");
                }
            }
        }

        tracing::info!(
            "Processed {} alternate names. Found {} names.",
            stats.lines,
            self.names.len()
        );
        Ok(stats)
    }
}

impl Extend<AlternateName> for PreferredNames {
    fn extend<T: IntoIterator<Item = AlternateName>>(&mut self, iter: T) {
        for candidate in iter {
            self.ingest(candidate);
        }
    }
}

impl FromIterator<AlternateName> for PreferredNames {
    fn from_iter<T: IntoIterator<Item = AlternateName>>(iter: T) -> Self {
        let mut names = Self::new();
        names.extend(iter);
        names
    }
}
