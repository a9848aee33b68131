//! GeoNames dump records
//!
//! Column layout of `allCountries.txt` (see
//! <http://download.geonames.org/export/dump/readme.txt>):
//!
//! | # | column            | # | column       |
//! |---|-------------------|---|--------------|
//! | 0 | geonameid         | 10| admin1 code  |
//! | 1 | name              | 11| admin2 code  |
//! | 2 | asciiname         | 12| admin3 code  |
//! | 3 | alternatenames    | 13| admin4 code  |
//! | 4 | latitude          | 14| population   |
//! | 5 | longitude         | 15| elevation    |
//! | 6 | feature class     | 16| dem          |
//! | 7 | feature code      | 17| timezone     |
//! | 8 | country code      | 18| modification date |
//! | 9 | cc2               |   |              |

use crate::feature::{FeatureClass, FeatureCode};
use crate::place::Place;
use crate::PlaceError;
use serde::Deserialize;

/// Raw gazetteer row, deserialized positionally
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GazetteerRecord {
    /// GeoNames id
    pub geoname_id: String,
    /// Primary name
    pub name: String,
    /// ASCII name
    pub ascii_name: String,
    /// Comma-separated alternate names
    pub alternate_names: String,
    /// Latitude
    pub latitude: String,
    /// Longitude
    pub longitude: String,
    /// Feature class letter
    pub feature_class: String,
    /// Feature code
    pub feature_code: String,
    /// ISO country code
    pub country_code: String,
    /// Comma-separated alternate country codes
    pub cc2: String,
    /// admin1 code
    pub admin1: String,
    /// admin2 code
    pub admin2: String,
    /// admin3 code
    pub admin3: String,
    /// admin4 code
    pub admin4: String,
    /// Population
    #[serde(default)]
    pub population: String,
    /// Elevation
    #[serde(default)]
    pub elevation: String,
    /// Digital elevation model
    #[serde(default)]
    pub dem: String,
    /// Timezone id
    #[serde(default)]
    pub timezone: String,
    /// Modification date
    #[serde(default)]
    pub modified: String,
}

impl GazetteerRecord {
    /// Build a record from already split fields
    ///
    /// # Errors
    /// Returns error if there are fewer than the 14 mandatory columns.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, PlaceError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        if fields.len() < MANDATORY_COLUMNS {
            return Err(PlaceError::MissingColumns {
                expected: MANDATORY_COLUMNS,
                actual: fields.len(),
            });
        }
        let column = |idx: usize| fields.get(idx).map(|s| (*s).to_string()).unwrap_or_default();
        Ok(Self {
            geoname_id: column(0),
            name: column(1),
            ascii_name: column(2),
            alternate_names: column(3),
            latitude: column(4),
            longitude: column(5),
            feature_class: column(6),
            feature_code: column(7),
            country_code: column(8),
            cc2: column(9),
            admin1: column(10),
            admin2: column(11),
            admin3: column(12),
            admin4: column(13),
            population: column(14),
            elevation: column(15),
            dem: column(16),
            timezone: column(17),
            modified: column(18),
        })
    }
}

/// Columns up to and including admin4
pub const MANDATORY_COLUMNS: usize = 14;

impl TryFrom<GazetteerRecord> for Place {
    type Error = PlaceError;

    fn try_from(record: GazetteerRecord) -> Result<Self, Self::Error> {
        let id: u32 = record
            .geoname_id
            .trim()
            .parse()
            .map_err(|_| PlaceError::InvalidId(record.geoname_id.clone()))?;
        let latitude = parse_coordinate("latitude", &record.latitude)?;
        let longitude = parse_coordinate("longitude", &record.longitude)?;
        let feature_class: FeatureClass = record.feature_class.parse()?;
        let feature_code: FeatureCode = record.feature_code.parse()?;
        let population = parse_optional::<u64>("population", &record.population)?.unwrap_or(0);
        let elevation = parse_optional::<i32>("elevation", &record.elevation)?
            .or(parse_optional::<i32>("dem", &record.dem)?);

        let ascii_name = if record.ascii_name.trim().is_empty() {
            record.name.clone()
        } else {
            record.ascii_name
        };

        Ok(Place::builder(id, record.name)
            .ascii_name(ascii_name)
            .alternate_names(split_list(&record.alternate_names))
            .coordinates(latitude, longitude)
            .feature(feature_class, feature_code.as_str())
            .country(record.country_code)
            .alternate_countries(split_list(&record.cc2))
            .admin_codes([record.admin1, record.admin2, record.admin3, record.admin4])
            .population(population)
            .elevation(elevation)
            .timezone(record.timezone)
            .modified(record.modified)
            .build())
    }
}

/// Parse one tab-separated gazetteer line
///
/// # Errors
/// Returns error if the line is missing columns or a value fails to parse.
pub fn parse_line(line: &str) -> Result<Place, PlaceError> {
    let line = line.trim_end_matches(['\r', '\n']);
    Place::try_from(GazetteerRecord::from_fields(line.split('\t'))?)
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_coordinate(column: &'static str, raw: &str) -> Result<f64, PlaceError> {
    Ok(parse_optional::<f64>(column, raw)?.unwrap_or(0.0))
}

fn parse_optional<T: std::str::FromStr>(
    column: &'static str,
    raw: &str,
) -> Result<Option<T>, PlaceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| PlaceError::InvalidNumber {
        column,
        value: raw.to_string(),
    })
}
