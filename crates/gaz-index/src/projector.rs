//! Index-record projection
//!
//! Turns one emitted place into the set of records stored in the index: one
//! record per distinct name variant, all sharing the same field values.

use gaz_ancestry::PlaceView;
use gaz_place::{FeatureClass, Place, PlaceId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Ranking boost for populated places and countries
pub const POPULATION_BOOST: u64 = 11;

/// Excluded from the boost: City of London, whose recorded population is far
/// below how often it is mentioned relative to London
pub const BOOST_EXCEPTION: PlaceId = PlaceId(2_643_741);

/// Projection settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Include the serialized ancestor chain in the stored payload
    pub full_ancestry: bool,
}

/// Ranking multiplier for a place
#[must_use]
pub fn population_boost(place: &Place) -> u64 {
    let boosted = place.feature_class() == FeatureClass::P || place.feature_code().is_country_level();
    if boosted && place.id() != BOOST_EXCEPTION {
        POPULATION_BOOST
    } else {
        1
    }
}

/// Field values shared by every record of a place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexFields {
    /// Serialized place, with its ancestors when full ancestry is enabled
    #[serde(rename = "geoname")]
    pub payload: String,
    /// GeoNames id
    #[serde(rename = "geonameID")]
    pub geoname_id: PlaceId,
    /// Preferred English name
    #[serde(rename = "preferredName", skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    /// Direct parent id
    #[serde(rename = "parentID", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PlaceId>,
    /// Ancestor ids, nearest first
    #[serde(rename = "ancestorIDs")]
    pub ancestor_ids: Vec<PlaceId>,
    /// Population
    pub population: u64,
    /// Population times the ranking boost
    #[serde(rename = "sortPop")]
    pub sort_pop: u64,
    /// Historical feature
    pub historical: bool,
    /// Feature code
    #[serde(rename = "featureCode")]
    pub feature_code: String,
}

/// One stored record: a name variant plus the shared fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRecord<'a> {
    /// Name variant this record is found by
    #[serde(rename = "indexName")]
    pub name: &'a str,
    /// Shared field values
    #[serde(flatten)]
    pub fields: &'a IndexFields,
}

/// All records of one place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Shared field values
    pub fields: IndexFields,
    /// Distinct non-empty name variants
    pub names: Vec<String>,
}

impl Projection {
    /// One record per name variant
    pub fn records(&self) -> impl Iterator<Item = IndexRecord<'_>> {
        self.names.iter().map(move |name| IndexRecord {
            name,
            fields: &self.fields,
        })
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the place yields no record
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Serialize)]
struct Payload<'a> {
    #[serde(flatten)]
    place: &'a Place,
    #[serde(skip_serializing_if = "Option::is_none")]
    ancestors: Option<Vec<&'a Place>>,
}

/// Builds [`Projection`]s from emitted places
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    /// Create projector
    #[inline]
    #[must_use]
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    /// Active settings
    #[inline]
    #[must_use]
    pub fn config(&self) -> ProjectorConfig {
        self.config
    }

    /// Project a place and its preferred name
    ///
    /// # Errors
    /// Returns error if the payload cannot be serialized.
    pub fn project(
        &self,
        view: &PlaceView<'_>,
        preferred: Option<&str>,
    ) -> Result<Projection, serde_json::Error> {
        let place = view.place();
        let payload = serde_json::to_string(&Payload {
            place,
            ancestors: self
                .config
                .full_ancestry
                .then(|| view.ancestors().collect()),
        })?;

        let boost = population_boost(place);
        let fields = IndexFields {
            payload,
            geoname_id: place.id(),
            preferred_name: preferred.map(str::to_string),
            parent_id: view.parent().map(Place::id),
            ancestor_ids: view.ancestors().map(Place::id).collect(),
            population: place.population(),
            sort_pop: place.population().saturating_mul(boost),
            historical: place.feature_code().is_historical(),
            feature_code: place.feature_code().to_string(),
        };

        Ok(Projection {
            fields,
            names: name_variants(place, preferred),
        })
    }
}

/// Distinct non-empty names a place can be found by
fn name_variants(place: &Place, preferred: Option<&str>) -> Vec<String> {
    let mut names: IndexSet<&str> = IndexSet::new();
    names.insert(place.name());
    names.insert(place.ascii_name());
    names.extend(place.alternate_names().iter().map(String::as_str));

    if place.is_top_level_admin() {
        names.extend(place.country_code());
        names.extend(place.alternate_country_codes().iter().map(String::as_str));
    }
    names.extend(preferred);

    names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::IndexField;
    use gaz_ancestry::{AncestryResolver, EmitFn};
    use gaz_test_utils::{admin, city_builder, named_admin};
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;

    /// Resolve `places` in order and project the last one
    fn project_last(places: Vec<Place>, config: ProjectorConfig, preferred: Option<&str>) -> Projection {
        let projector = Projector::new(config);
        let target = places.last().map(Place::id).unwrap();
        let mut resolver = AncestryResolver::new();
        let mut found = None;
        let mut emitter = EmitFn(|view: PlaceView<'_>| -> Result<(), Infallible> {
            if view.place().id() == target {
                found = Some(projector.project(&view, preferred).unwrap());
            }
            Ok(())
        });
        for place in places {
            resolver.ingest(place, &mut emitter).unwrap();
        }
        resolver.finalize(&mut emitter).unwrap();
        resolver.drain_remaining(&mut emitter).unwrap();
        drop(emitter);
        found.unwrap()
    }

    #[test]
    fn boosts_populated_places() {
        let city = city_builder(5_368_361, "Los Angeles", "US.CA").population(3_971_883).build();
        assert_eq!(population_boost(&city), POPULATION_BOOST);

        let london = city_builder(2_643_741, "City of London", "GB.ENG").population(8_071).build();
        assert_eq!(population_boost(&london), 1);
    }

    #[test]
    fn boosts_countries_but_not_states() {
        let country = named_admin(6_252_001, "United States", "US", 310_232_863);
        let state = named_admin(5_332_921, "California", "US.CA", 37_691_912);

        assert_eq!(population_boost(&country), POPULATION_BOOST);
        assert_eq!(population_boost(&state), 1);
    }

    #[test]
    fn sort_pop_is_boosted_population() {
        let projection = project_last(
            vec![
                named_admin(1, "France", "FR", 64_768_389),
                city_builder(2_988_507, "Paris", "FR").population(2_138_551).build(),
            ],
            ProjectorConfig::default(),
            None,
        );

        assert_eq!(projection.fields.population, 2_138_551);
        assert_eq!(projection.fields.sort_pop, 2_138_551 * POPULATION_BOOST);
        assert_eq!(projection.fields.parent_id, Some(PlaceId(1)));
        assert_eq!(projection.fields.ancestor_ids, vec![PlaceId(1)]);
        assert_eq!(projection.fields.feature_code, "PPL");
        assert!(!projection.fields.historical);
    }

    #[test]
    fn name_variants_are_deduplicated() {
        let place = city_builder(1, "Zürich", "CH.ZH")
            .ascii_name("Zurich")
            .alternate_names(["Zurich", "Zuerich", "", "Zürich"])
            .build();
        let names = name_variants(&place, Some("Zurich"));

        assert_eq!(names, vec!["Zürich", "Zurich", "Zuerich"]);
    }

    #[test]
    fn top_level_divisions_add_country_codes() {
        let country = Place::builder(6_252_001, "United States")
            .feature(FeatureClass::A, "PCLI")
            .country("US")
            .alternate_countries(["UM"])
            .build();
        let names = name_variants(&country, Some("United States of America"));

        assert_eq!(
            names,
            vec!["United States", "US", "UM", "United States of America"]
        );

        // only top-level divisions are searchable by code
        let state = admin(5_332_921, "US.CA");
        assert!(!name_variants(&state, None).contains(&"US".to_string()));
    }

    #[test]
    fn records_differ_only_in_name() {
        let projection = project_last(
            vec![city_builder(7, "Köln", "DE")
                .ascii_name("Koln")
                .alternate_names(["Cologne"])
                .build()],
            ProjectorConfig::default(),
            Some("Cologne"),
        );

        let records: Vec<_> = projection.records().collect();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.fields == &projection.fields));
        assert_eq!(projection.fields.preferred_name.as_deref(), Some("Cologne"));
    }

    #[test]
    fn full_ancestry_embeds_ancestors() {
        let places = vec![
            admin(1, "FR"),
            admin(2, "FR.11"),
            city_builder(3, "Paris", "FR.11").build(),
        ];

        let plain = project_last(places.clone(), ProjectorConfig::default(), None);
        let full = project_last(places, ProjectorConfig { full_ancestry: true }, None);

        let plain: serde_json::Value = serde_json::from_str(&plain.fields.payload).unwrap();
        let full: serde_json::Value = serde_json::from_str(&full.fields.payload).unwrap();

        assert_eq!(plain["name"], "Paris");
        assert!(plain.get("ancestors").is_none());
        let ancestors: Vec<_> = full["ancestors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ancestors, vec![2, 1]);
    }

    #[test]
    fn record_serializes_with_field_keys() {
        let projection = project_last(
            vec![city_builder(9, "Hamlet", "ZZ").build()],
            ProjectorConfig::default(),
            None,
        );
        let record = projection.records().next().unwrap();
        let json = serde_json::to_value(record).unwrap();

        for field in IndexField::ALL {
            let optional = matches!(field, IndexField::PreferredName | IndexField::ParentId);
            assert!(optional || json.get(field.key()).is_some(), "missing {field}");
        }
        assert_eq!(json[IndexField::IndexName.key()], "Hamlet");
    }
}
