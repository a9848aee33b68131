//! Gazetteer dump reader
//!
//! Streams [`Place`]s out of a tab-separated GeoNames dump. Rows that fail to
//! parse are logged and skipped; only I/O failures stop the stream.

use gaz_place::{GazetteerRecord, Place};
use std::io::Read;

/// Counters for one feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Rows read, including malformed ones
    pub rows: u64,
    /// Rows skipped
    pub malformed: u64,
}

/// Sequential reader over a gazetteer dump
#[derive(Debug)]
pub struct GazetteerFeed<R: Read> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    stats: FeedStats,
}

impl<R: Read> GazetteerFeed<R> {
    /// Wrap a reader positioned at the first row
    pub fn new(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            reader,
            record: csv::StringRecord::new(),
            stats: FeedStats::default(),
        }
    }

    /// Counters so far
    #[inline]
    #[must_use]
    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Next well-formed place, `None` at end of input
    ///
    /// # Errors
    /// Returns error only if the underlying reader fails.
    pub fn next_place(&mut self) -> Result<Option<Place>, csv::Error> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => {}
                Ok(false) => return Ok(None),
                Err(err) if err.is_io_error() => return Err(err),
                Err(err) => {
                    self.skip(&err);
                    continue;
                }
            }
            self.stats.rows += 1;

            let parsed = self
                .record
                .deserialize::<GazetteerRecord>(None)
                .map_err(|err| err.to_string())
                .and_then(|record| Place::try_from(record).map_err(|err| err.to_string()));
            match parsed {
                Ok(place) => return Ok(Some(place)),
                Err(err) => {
                    self.stats.malformed += 1;
                    tracing::warn!(row = self.stats.rows, error = %err, "skipping malformed gazetteer row");
                }
            }
        }
    }

    fn skip(&mut self, err: &csv::Error) {
        self.stats.rows += 1;
        self.stats.malformed += 1;
        tracing::warn!(row = self.stats.rows, error = %err, "skipping unreadable gazetteer row");
    }
}

impl<R: Read> Iterator for GazetteerFeed<R> {
    type Item = Result<Place, csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_place().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaz_place::PlaceId;
    use gaz_test_utils::{feed, GazetteerLine};

    #[test]
    fn reads_rows_and_skips_malformed() {
        let body = feed([
            GazetteerLine::new(1, "France", "A", "PCLI", "FR").render(),
            "not\ta\trow".to_string(),
            GazetteerLine::new(2, "Paris", "P", "PPLC", "FR")
                .admin(&["11", "75"])
                .population(2_138_551)
                .render(),
            GazetteerLine::new(3, "Bad", "Q", "PPL", "FR").render(),
        ]);

        let mut reader = GazetteerFeed::new(body.as_bytes());
        let places: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();

        let ids: Vec<_> = places.iter().map(Place::id).collect();
        assert_eq!(ids, vec![PlaceId(1), PlaceId(2)]);
        assert_eq!(places[1].population(), 2_138_551);
        assert_eq!(places[1].parent_key().unwrap().as_str(), "FR.11.75");
        assert_eq!(reader.stats(), FeedStats { rows: 4, malformed: 2 });
    }

    #[test]
    fn quotes_are_literal() {
        let body = GazetteerLine::new(5, "\"Old\" Town", "P", "PPL", "US").render();
        let place = GazetteerFeed::new(body.as_bytes()).next_place().unwrap().unwrap();
        assert_eq!(place.name(), "\"Old\" Town");
    }
}
