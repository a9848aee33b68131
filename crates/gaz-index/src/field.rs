//! Index field catalogue
//!
//! Every stored index record carries the same set of fields; sinks use the
//! per-field [`FieldOptions`] to build their schema.

use std::fmt::{self, Display, Formatter};

/// Stored index fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexField {
    /// Searchable name variant, one per record
    IndexName,
    /// Serialized place payload
    Geoname,
    /// GeoNames id
    GeonameId,
    /// Preferred English display name
    PreferredName,
    /// Direct parent id
    ParentId,
    /// Every ancestor id, nearest first
    AncestorIds,
    /// Raw population
    Population,
    /// Boosted population used for ranking
    SortPop,
    /// Historical feature flag
    Historical,
    /// Feature code, exact match only
    FeatureCode,
}

/// Value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Tokenized full text
    Text,
    /// Untokenized string
    Keyword,
    /// Unsigned integer
    Unsigned,
    /// Boolean
    Bool,
}

/// How a sink should store a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOptions {
    /// Value type
    pub kind: FieldKind,
    /// Retrievable from search hits
    pub stored: bool,
    /// Usable in filters and range queries
    pub indexed: bool,
    /// Columnar, for sorting and scoring
    pub fast: bool,
    /// May hold several values per record
    pub multi: bool,
}

impl FieldOptions {
    const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            stored: false,
            indexed: false,
            fast: false,
            multi: false,
        }
    }

    const fn stored(mut self) -> Self {
        self.stored = true;
        self
    }

    const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    const fn fast(mut self) -> Self {
        self.fast = true;
        self
    }

    const fn multi(mut self) -> Self {
        self.multi = true;
        self
    }
}

impl IndexField {
    /// All fields, in schema order
    pub const ALL: [IndexField; 10] = [
        Self::IndexName,
        Self::Geoname,
        Self::GeonameId,
        Self::PreferredName,
        Self::ParentId,
        Self::AncestorIds,
        Self::Population,
        Self::SortPop,
        Self::Historical,
        Self::FeatureCode,
    ];

    /// Field name in the stored record
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::IndexName => "indexName",
            Self::Geoname => "geoname",
            Self::GeonameId => "geonameID",
            Self::PreferredName => "preferredName",
            Self::ParentId => "parentID",
            Self::AncestorIds => "ancestorIDs",
            Self::Population => "population",
            Self::SortPop => "sortPop",
            Self::Historical => "historical",
            Self::FeatureCode => "featureCode",
        }
    }

    /// Storage options
    #[must_use]
    pub const fn options(self) -> FieldOptions {
        match self {
            Self::IndexName => FieldOptions::new(FieldKind::Text).stored().indexed(),
            Self::Geoname | Self::PreferredName => FieldOptions::new(FieldKind::Keyword).stored(),
            Self::GeonameId | Self::ParentId | Self::Population | Self::SortPop => {
                FieldOptions::new(FieldKind::Unsigned).stored().indexed().fast()
            }
            Self::AncestorIds => FieldOptions::new(FieldKind::Unsigned)
                .stored()
                .indexed()
                .multi(),
            Self::Historical => FieldOptions::new(FieldKind::Bool).indexed().fast(),
            Self::FeatureCode => FieldOptions::new(FieldKind::Keyword).indexed(),
        }
    }
}

impl Display for IndexField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
