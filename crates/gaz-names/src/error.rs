//! Error types for the alternate-names feed

/// Errors raised while reading alternate names
#[derive(Debug, thiserror::Error)]
pub enum NameError {
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

    /// Underlying reader failed
    #[error("failed to read alternate names: {0}")]
    Read(#[from] csv::Error),
}
