//! GeoNames feature classification
//!
//! See <http://www.geonames.org/export/codes.html> for the full catalogue.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Top-level feature class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum FeatureClass {
    /// Country, state, region
    A,
    /// Stream, lake
    H,
    /// Parks, area
    L,
    /// City, village
    P,
    /// Road, railroad
    R,
    /// Spot, building, farm
    S,
    /// Mountain, hill, rock
    T,
    /// Undersea
    U,
    /// Forest, heath
    V,
    /// Blank or unknown class
    #[default]
    Null,
}

impl FeatureClass {
    /// Single-letter code, empty for [`FeatureClass::Null`]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::H => "H",
            Self::L => "L",
            Self::P => "P",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::Null => "",
        }
    }

    /// Populated places (cities, towns, villages)
    #[inline]
    #[must_use]
    pub fn is_populated_place(self) -> bool {
        self == Self::P
    }
}

impl FromStr for FeatureClass {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(Self::A),
            "H" => Ok(Self::H),
            "L" => Ok(Self::L),
            "P" => Ok(Self::P),
            "R" => Ok(Self::R),
            "S" => Ok(Self::S),
            "T" => Ok(Self::T),
            "U" => Ok(Self::U),
            "V" => Ok(Self::V),
            "" => Ok(Self::Null),
            other => Err(FeatureError::UnknownClass(other.to_string())),
        }
    }
}

impl Display for FeatureClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature codes of top-level administrative divisions (independent,
/// dependent, freely associated, semi-independent political entities)
const TOP_LEVEL_CODES: &[&str] = &["PCL", "PCLD", "PCLF", "PCLI", "PCLIX", "PCLS"];

/// Feature codes whose GeoNames description marks them historical
const HISTORICAL_CODES: &[&str] = &[
    "ADM1H", "ADM2H", "ADM3H", "ADM4H", "ADM5H", "ADMDH", "PCLH", "PPLCH", "PPLH", "RGNH",
    "ZNH",
];

/// Code of the administrative division at a given level (`ADM1` … `ADM4`)
const ADMIN_CODES: &[&str] = &["ADM1", "ADM2", "ADM3", "ADM4"];

/// GeoNames feature code (e.g. `PPL`, `ADM2`, `PCLI`)
///
/// Kept as the raw code rather than an exhaustive enum; the predicates below
/// cover every classification the index needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureCode(String);

impl FeatureCode {
    /// Wrap a raw code
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_ascii_uppercase())
    }

    /// Raw code, empty when the record had none
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the record carried no feature code
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }

    /// Feature no longer exists (historical divisions, former places)
    #[must_use]
    pub fn is_historical(&self) -> bool {
        HISTORICAL_CODES.contains(&self.0.as_str())
    }

    /// Country-level political entity
    #[must_use]
    pub fn is_top_level_admin(&self) -> bool {
        TOP_LEVEL_CODES.contains(&self.0.as_str())
    }

    /// Any `PCL*` code, historical ones included
    #[inline]
    #[must_use]
    pub fn is_country_level(&self) -> bool {
        self.0.starts_with("PCL")
    }

    /// Position in the administrative hierarchy
    ///
    /// `Some(0)` for top-level divisions, `Some(n)` for `ADMn`, `None` for
    /// everything that cannot act as a parent.
    #[must_use]
    pub fn admin_level(&self) -> Option<usize> {
        if self.is_top_level_admin() {
            return Some(0);
        }
        ADMIN_CODES
            .iter()
            .position(|code| *code == self.0)
            .map(|idx| idx + 1)
    }
}

impl FromStr for FeatureCode {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.chars().any(|c| !c.is_ascii_alphanumeric()) {
            return Err(FeatureError::InvalidCode(code.to_string()));
        }
        Ok(Self::new(code))
    }
}

impl Display for FeatureCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while classifying features
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    /// Class letter outside A, H, L, P, R, S, T, U, V
    #[error("unknown feature class: '{0}'")]
    UnknownClass(String),

    /// Code with non-alphanumeric characters
    #[error("invalid feature code: '{0}'")]
    InvalidCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_parses_letters_and_blank() {
        assert_eq!("P".parse::<FeatureClass>().unwrap(), FeatureClass::P);
        assert_eq!("".parse::<FeatureClass>().unwrap(), FeatureClass::Null);
        assert!("Q".parse::<FeatureClass>().is_err());
    }

    #[test]
    fn code_admin_levels() {
        assert_eq!(FeatureCode::new("PCLI").admin_level(), Some(0));
        assert_eq!(FeatureCode::new("ADM1").admin_level(), Some(1));
        assert_eq!(FeatureCode::new("ADM4").admin_level(), Some(4));
        assert_eq!(FeatureCode::new("ADM1H").admin_level(), None);
        assert_eq!(FeatureCode::new("ADM5").admin_level(), None);
        assert_eq!(FeatureCode::new("PPL").admin_level(), None);
    }

    #[test]
    fn code_historical_predicate() {
        assert!(FeatureCode::new("PCLH").is_historical());
        assert!(FeatureCode::new("ADM2H").is_historical());
        assert!(!FeatureCode::new("PPL").is_historical());
        assert!(!FeatureCode::new("PPLA").is_historical());
    }

    #[test]
    fn code_country_level_covers_historical_countries() {
        assert!(FeatureCode::new("PCLH").is_country_level());
        assert!(!FeatureCode::new("PCLH").is_top_level_admin());
        assert!(FeatureCode::new("PCLI").is_top_level_admin());
    }

    #[test]
    fn code_is_normalised() {
        assert_eq!(FeatureCode::new(" ppl ").as_str(), "PPL");
        assert!("PP-L".parse::<FeatureCode>().is_err());
    }
}
