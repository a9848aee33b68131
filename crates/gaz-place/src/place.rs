//! Place entities
//!
//! Provides [`Place`], one gazetteer entry with its derived hierarchy keys, and
//! [`PlaceBuilder`] for assembling one.

use crate::feature::{FeatureClass, FeatureCode};
use crate::key::AncestryKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Number of administrative code columns carried by a gazetteer record
pub const ADMIN_CODE_COLUMNS: usize = 4;

/// GeoNames identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub u32);

impl PlaceId {
    /// Raw numeric id
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Display for PlaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlaceId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// One gazetteer entry
///
/// Hierarchy keys are derived once when the place is built:
/// - the **ancestry key** names the place's own position and is only present
///   for administrative divisions (countries and `ADM1`..`ADM4`);
/// - the **parent key** is the ancestry key of the expected direct parent and
///   is absent for top-level divisions and places without a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    id: PlaceId,
    name: String,
    ascii_name: String,
    alternate_names: BTreeSet<String>,
    latitude: f64,
    longitude: f64,
    feature_class: FeatureClass,
    feature_code: FeatureCode,
    country_code: Option<String>,
    alternate_country_codes: BTreeSet<String>,
    admin_codes: Vec<String>,
    population: u64,
    elevation: Option<i32>,
    timezone: Option<String>,
    modified: Option<String>,
    ancestry_key: Option<AncestryKey>,
    parent_key: Option<AncestryKey>,
}

impl Place {
    /// Start building a place
    #[inline]
    #[must_use]
    pub fn builder(id: u32, name: impl Into<String>) -> PlaceBuilder {
        PlaceBuilder::new(PlaceId(id), name.into())
    }

    /// GeoNames id
    #[inline]
    #[must_use]
    pub fn id(&self) -> PlaceId {
        self.id
    }

    /// Primary name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ASCII-normalised name
    #[inline]
    #[must_use]
    pub fn ascii_name(&self) -> &str {
        &self.ascii_name
    }

    /// Alternate names carried on the gazetteer record itself
    #[inline]
    #[must_use]
    pub fn alternate_names(&self) -> &BTreeSet<String> {
        &self.alternate_names
    }

    /// Latitude in decimal degrees
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Feature class
    #[inline]
    #[must_use]
    pub fn feature_class(&self) -> FeatureClass {
        self.feature_class
    }

    /// Feature code
    #[inline]
    #[must_use]
    pub fn feature_code(&self) -> &FeatureCode {
        &self.feature_code
    }

    /// Primary ISO country code
    #[inline]
    #[must_use]
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// Alternate country codes
    #[inline]
    #[must_use]
    pub fn alternate_country_codes(&self) -> &BTreeSet<String> {
        &self.alternate_country_codes
    }

    /// Raw admin1..admin4 codes (blank entries preserved)
    #[inline]
    #[must_use]
    pub fn admin_codes(&self) -> &[String] {
        &self.admin_codes
    }

    /// Population, 0 when unknown
    #[inline]
    #[must_use]
    pub fn population(&self) -> u64 {
        self.population
    }

    /// Elevation in metres
    #[inline]
    #[must_use]
    pub fn elevation(&self) -> Option<i32> {
        self.elevation
    }

    /// IANA timezone id
    #[inline]
    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// Last modification date as recorded by the gazetteer
    #[inline]
    #[must_use]
    pub fn modified(&self) -> Option<&str> {
        self.modified.as_deref()
    }

    /// Own position in the hierarchy, for administrative divisions only
    #[inline]
    #[must_use]
    pub fn ancestry_key(&self) -> Option<&AncestryKey> {
        self.ancestry_key.as_ref()
    }

    /// Ancestry key of the expected direct parent
    #[inline]
    #[must_use]
    pub fn parent_key(&self) -> Option<&AncestryKey> {
        self.parent_key.as_ref()
    }

    /// Can act as a parent for other places
    #[inline]
    #[must_use]
    pub fn is_admin_division(&self) -> bool {
        self.ancestry_key.is_some()
    }

    /// Country-level administrative division
    #[inline]
    #[must_use]
    pub fn is_top_level_admin(&self) -> bool {
        self.feature_code.is_top_level_admin()
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {}:{} {})",
            self.id, self.feature_class, self.feature_code, self.name
        )
    }
}

/// Builder for [`Place`]
#[derive(Debug, Clone)]
pub struct PlaceBuilder {
    id: PlaceId,
    name: String,
    ascii_name: Option<String>,
    alternate_names: BTreeSet<String>,
    latitude: f64,
    longitude: f64,
    feature_class: FeatureClass,
    feature_code: FeatureCode,
    country_code: Option<String>,
    alternate_country_codes: BTreeSet<String>,
    admin_codes: Vec<String>,
    population: u64,
    elevation: Option<i32>,
    timezone: Option<String>,
    modified: Option<String>,
}

impl PlaceBuilder {
    fn new(id: PlaceId, name: String) -> Self {
        Self {
            id,
            name,
            ascii_name: None,
            alternate_names: BTreeSet::new(),
            latitude: 0.0,
            longitude: 0.0,
            feature_class: FeatureClass::Null,
            feature_code: FeatureCode::default(),
            country_code: None,
            alternate_country_codes: BTreeSet::new(),
            admin_codes: Vec::new(),
            population: 0,
            elevation: None,
            timezone: None,
            modified: None,
        }
    }

    /// ASCII name, defaults to the primary name
    #[must_use]
    pub fn ascii_name(mut self, ascii_name: impl Into<String>) -> Self {
        self.ascii_name = Some(ascii_name.into());
        self
    }

    /// Add alternate names; blank entries are ignored
    #[must_use]
    pub fn alternate_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternate_names.extend(
            names
                .into_iter()
                .map(Into::into)
                .filter(|name| !name.trim().is_empty()),
        );
        self
    }

    /// Coordinates
    #[must_use]
    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Feature class and code
    #[must_use]
    pub fn feature(mut self, class: FeatureClass, code: impl Into<String>) -> Self {
        self.feature_class = class;
        self.feature_code = FeatureCode::new(code);
        self
    }

    /// Primary country code; blank clears it
    #[must_use]
    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country_code = non_blank(code.into());
        self
    }

    /// Alternate country codes; blank entries are ignored
    #[must_use]
    pub fn alternate_countries<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternate_country_codes
            .extend(codes.into_iter().filter_map(|code| non_blank(code.into())));
        self
    }

    /// admin1..admin4 codes, in order; extra codes are ignored
    #[must_use]
    pub fn admin_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admin_codes = codes
            .into_iter()
            .take(ADMIN_CODE_COLUMNS)
            .map(|code| code.into().trim().to_string())
            .collect();
        self
    }

    /// Population
    #[must_use]
    pub fn population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    /// Elevation in metres
    #[must_use]
    pub fn elevation(mut self, elevation: Option<i32>) -> Self {
        self.elevation = elevation;
        self
    }

    /// Timezone id
    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = non_blank(timezone.into());
        self
    }

    /// Modification date
    #[must_use]
    pub fn modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = non_blank(modified.into());
        self
    }

    /// Derive the hierarchy keys and build the place
    #[must_use]
    pub fn build(self) -> Place {
        let (ancestry_key, parent_key) = derive_keys(
            &self.feature_code,
            self.country_code.as_deref(),
            &self.admin_codes,
        );
        Place {
            id: self.id,
            ascii_name: self.ascii_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            alternate_names: self.alternate_names,
            latitude: self.latitude,
            longitude: self.longitude,
            feature_class: self.feature_class,
            feature_code: self.feature_code,
            country_code: self.country_code,
            alternate_country_codes: self.alternate_country_codes,
            admin_codes: self.admin_codes,
            population: self.population,
            elevation: self.elevation,
            timezone: self.timezone,
            modified: self.modified,
            ancestry_key,
            parent_key,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Key made of the country code and the leading non-blank admin codes,
/// at most `depth` of them
fn prefix_key(country: &str, admin_codes: &[String], depth: usize) -> Option<AncestryKey> {
    let codes = admin_codes
        .iter()
        .take(depth)
        .take_while(|code| !code.is_empty());
    AncestryKey::from_components(std::iter::once(country).chain(codes.map(String::as_str))).ok()
}

/// Derive `(ancestry_key, parent_key)`
///
/// An `ADMn` division whose first `n` admin codes are not all present has no
/// ancestry key; it hangs below the deepest division its codes do name.
fn derive_keys(
    code: &FeatureCode,
    country: Option<&str>,
    admin_codes: &[String],
) -> (Option<AncestryKey>, Option<AncestryKey>) {
    let Some(country) = country else {
        return (None, None);
    };

    match code.admin_level() {
        Some(0) => (AncestryKey::from_components([country]).ok(), None),
        Some(level) => {
            let own = prefix_key(country, admin_codes, level)
                .filter(|key| key.specificity() == level + 1);
            match own {
                Some(key) => {
                    let parent = key.parent();
                    (Some(key), parent)
                }
                None => (None, prefix_key(country, admin_codes, level - 1)),
            }
        }
        None => (None, prefix_key(country, admin_codes, ADMIN_CODE_COLUMNS)),
    }
}
