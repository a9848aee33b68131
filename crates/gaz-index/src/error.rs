//! Error types for index building

use crate::config::Backend;
use std::io;
use std::path::PathBuf;

/// Failures writing index records
///
/// All sink errors are fatal to a build.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// I/O failure in the backing store
    #[error("sink i/o error: {0}")]
    Io(#[from] io::Error),

    /// Record could not be serialized
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Search backend failure
    #[cfg(feature = "tantivy")]
    #[error("search index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    /// Record added after the sink was closed
    #[error("sink already closed")]
    Closed,
}

/// Invalid or unreadable configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying failure
        source: io::Error,
    },

    /// Configuration file is not valid TOML for [`BuildConfig`](crate::BuildConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// None of the configured gazetteer files can be read
    #[error("no readable gazetteer files")]
    NoGazetteerFiles,

    /// Alternate-names file cannot be read
    #[error("alternate names file {0} is not readable")]
    UnreadableAltNames(PathBuf),

    /// Value out of range
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending setting
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Backend not compiled into this build
    #[error("backend {0} is not available in this build")]
    BackendUnavailable(Backend),
}

/// Top-level build failure
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Index directory already exists and replacement was not requested
    #[error("index directory {0} already exists; use --replace-index to overwrite")]
    IndexExists(PathBuf),

    /// File system failure on an input or the index directory
    #[error("i/o error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying failure
        source: io::Error,
    },

    /// Gazetteer file could not be read
    #[error("failed to read gazetteer {path}: {source}")]
    Feed {
        /// Gazetteer file
        path: PathBuf,
        /// Underlying failure
        source: csv::Error,
    },

    /// Alternate-names feed could not be read
    #[error(transparent)]
    Names(#[from] gaz_names::NameError),

    /// Writing records failed
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
