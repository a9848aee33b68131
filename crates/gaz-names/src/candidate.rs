//! Alternate-name candidates
//!
//! Provides [`AlternateName`], one row of the GeoNames `alternateNames.txt`
//! feed, and the [`best_name`] preference order.

use crate::error::NameError;
use gaz_place::PlaceId;

/// Column positions in the alternate-names feed
///
/// ```text
/// alternateNameId  geonameid  isolanguage  alternate name  isPreferredName  isShortName  isColloquial  isHistoric
/// ```
mod column {
    pub(super) const GEONAME_ID: usize = 1;
    pub(super) const LANGUAGE: usize = 2;
    pub(super) const NAME: usize = 3;
    pub(super) const PREFERRED: usize = 4;
    pub(super) const SHORT: usize = 5;
}

/// Minimum number of columns for a usable row (flags may be missing)
pub const MIN_COLUMNS: usize = column::NAME + 1;

const FLAG_TRUE: &str = "1";
const ISO2_ENGLISH: &str = "en";
const ISO3_ENGLISH: &str = "eng";

/// One candidate display name for a place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateName {
    /// Place the name belongs to
    pub geoname_id: PlaceId,
    /// Display text
    pub name: String,
    /// ISO 639 language code (or a pseudo-code such as `post`, `iata`, `link`)
    pub lang: String,
    /// Official/preferred name for the place
    pub preferred: bool,
    /// Short form, e.g. `California` for `State of California`
    pub short: bool,
}

impl AlternateName {
    /// Create a candidate
    #[must_use]
    pub fn new(
        geoname_id: u32,
        name: impl Into<String>,
        lang: impl Into<String>,
        preferred: bool,
        short: bool,
    ) -> Self {
        Self {
            geoname_id: PlaceId(geoname_id),
            name: name.into(),
            lang: lang.into(),
            preferred,
            short,
        }
    }

    /// Parse a row from already split fields
    ///
    /// Missing flag columns default to `false`; colloquial and historic flags
    /// are ignored.
    ///
    /// # Errors
    /// Returns error if the row has fewer than [`MIN_COLUMNS`] columns or the
    /// geoname id is not numeric.
    pub fn from_fields(fields: &[&str]) -> Result<Self, NameError> {
        if fields.len() < MIN_COLUMNS {
            return Err(NameError::MissingColumns {
                expected: MIN_COLUMNS,
                actual: fields.len(),
            });
        }
        let raw_id = fields[column::GEONAME_ID].trim();
        let geoname_id: u32 = raw_id
            .parse()
            .map_err(|_| NameError::InvalidId(raw_id.to_string()))?;
        let flag = |idx: usize| fields.get(idx).is_some_and(|v| v.trim() == FLAG_TRUE);

        Ok(Self {
            geoname_id: PlaceId(geoname_id),
            name: fields[column::NAME].to_string(),
            lang: fields[column::LANGUAGE].trim().to_string(),
            preferred: flag(column::PREFERRED),
            short: flag(column::SHORT),
        })
    }

    /// Parse one tab-separated line
    ///
    /// # Errors
    /// See [`AlternateName::from_fields`].
    pub fn parse_line(line: &str) -> Result<Self, NameError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split('\t').collect();
        Self::from_fields(&fields)
    }

    /// Language is English (`en` or `eng`, any case)
    #[must_use]
    pub fn is_english(&self) -> bool {
        self.lang.eq_ignore_ascii_case(ISO2_ENGLISH) || self.lang.eq_ignore_ascii_case(ISO3_ENGLISH)
    }

    /// Marked preferred or short
    #[inline]
    #[must_use]
    pub fn is_pref_or_short(&self) -> bool {
        self.preferred || self.short
    }

    /// Rank on the preferred and short dimensions only
    #[inline]
    fn rank(&self) -> (bool, bool) {
        (self.preferred, self.short)
    }
}

/// Pick the better of two candidates
///
/// Preferred beats non-preferred; among equal preferred status, short beats
/// non-short. On a full tie `current` (the one already held) is kept, so the
/// first-seen candidate wins among equals. The text is never compared.
#[must_use]
pub fn best_name(current: AlternateName, candidate: AlternateName) -> AlternateName {
    if candidate.rank() > current.rank() {
        candidate
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(fields: &[&str]) -> String {
        fields.join("\t")
    }

    #[test]
    fn parses_full_row() {
        let row = line(&["1", "6252001", "en", "United States", "1", "0", "0", "0"]);
        let name = AlternateName::parse_line(&row).unwrap();

        assert_eq!(name.geoname_id, PlaceId(6_252_001));
        assert_eq!(name.name, "United States");
        assert!(name.preferred);
        assert!(!name.short);
    }

    #[test]
    fn missing_flags_default_to_false() {
        let name = AlternateName::parse_line(&line(&["1", "2", "eng", "Somewhere"])).unwrap();
        assert!(!name.preferred);
        assert!(!name.short);

        let name = AlternateName::parse_line(&line(&["1", "2", "eng", "Somewhere", "1"])).unwrap();
        assert!(name.preferred);
        assert!(!name.short);
    }

    #[test]
    fn rejects_short_rows_and_bad_ids() {
        assert!(matches!(
            AlternateName::parse_line("1\t2\ten"),
            Err(NameError::MissingColumns { actual: 3, .. })
        ));
        assert!(matches!(
            AlternateName::parse_line("1\tabc\ten\tName"),
            Err(NameError::InvalidId(_))
        ));
    }

    #[test]
    fn english_detection_is_case_insensitive() {
        for lang in ["en", "EN", "eng", "Eng"] {
            assert!(AlternateName::new(1, "x", lang, true, false).is_english());
        }
        for lang in ["fr", "", "post", "english"] {
            assert!(!AlternateName::new(1, "x", lang, true, false).is_english());
        }
    }

    #[test]
    fn best_name_total_order() {
        let names = [
            AlternateName::new(1, "The United States", "eng", true, true),
            AlternateName::new(1, "The United States of America", "eng", true, false),
            AlternateName::new(1, "The USA", "eng", false, true),
            AlternateName::new(1, "'Murca", "eng", false, false),
        ];

        for (i, a) in names.iter().enumerate() {
            for (j, b) in names.iter().enumerate() {
                let best = best_name(a.clone(), b.clone());
                let expected = if i <= j { a } else { b };
                assert_eq!(&best, expected, "best_name({i}, {j})");
            }
        }
    }

    #[test]
    fn best_name_tie_keeps_current() {
        let first = AlternateName::new(1, "Zed", "en", true, false);
        let second = AlternateName::new(1, "Alpha", "en", true, false);

        assert_eq!(best_name(first.clone(), second), first);
    }
}
