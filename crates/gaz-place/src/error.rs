//! Error types for place parsing

use crate::feature::FeatureError;
use crate::key::KeyError;

/// Errors raised while turning a gazetteer row into a [`Place`](crate::Place)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    /// Row is shorter than the mandatory column set
    #[error("expected at least {expected} columns, found {actual}")]
    MissingColumns {
        /// Mandatory column count
        expected: usize,
        /// Columns present
        actual: usize,
    },

    /// GeoNames id is not a non-negative integer
    #[error("invalid geoname id: '{0}'")]
    InvalidId(String),

    /// Numeric column failed to parse
    #[error("invalid {column}: '{value}'")]
    InvalidNumber {
        /// Column name
        column: &'static str,
        /// Offending value
        value: String,
    },

    /// Feature class or code failed to parse
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// Ancestry key failed to parse
    #[error(transparent)]
    Key(#[from] KeyError),
}
