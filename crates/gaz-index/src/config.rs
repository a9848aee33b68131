//! Build configuration
//!
//! Values come from three layers, lowest precedence first: built-in defaults,
//! an optional TOML file, then command-line flags.
//!
//! ```toml
//! index_path = "/srv/gazetteer/index"
//! gazetteer_files = ["allCountries.txt", "extra.txt"]
//! alt_names_file = "alternateNames.txt"
//! replace_index = true
//! full_ancestry = false
//! backend = "json-lines"
//! ```

use crate::error::ConfigError;
use crate::projector::ProjectorConfig;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default index directory
pub const DEFAULT_INDEX_PATH: &str = "./IndexDirectory";

/// Gazetteer files read when none are configured
pub const DEFAULT_GAZETTEER_FILES: [&str; 2] = [
    "./allCountries.txt",
    "./src/main/resources/SupplementaryGazetteer.txt",
];

/// Rows between progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Storage backend for index records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// `documents.jsonl` inside the index directory
    #[default]
    JsonLines,
    /// Tantivy search index (requires the `tantivy` feature)
    Tantivy,
}

impl Backend {
    /// Whether this build can write the backend
    #[must_use]
    pub fn is_available(self) -> bool {
        match self {
            Self::JsonLines => true,
            Self::Tantivy => cfg!(feature = "tantivy"),
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::JsonLines => "json-lines",
            Self::Tantivy => "tantivy",
        })
    }
}

/// Settings for one index build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Output directory
    pub index_path: PathBuf,
    /// Gazetteer dumps, read in order
    pub gazetteer_files: Vec<PathBuf>,
    /// Alternate-names feed
    pub alt_names_file: Option<PathBuf>,
    /// Overwrite an existing index directory
    pub replace_index: bool,
    /// Store each place's ancestors in its payload
    pub full_ancestry: bool,
    /// Record storage
    pub backend: Backend,
    /// Rows between progress log lines
    pub progress_interval: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            gazetteer_files: DEFAULT_GAZETTEER_FILES.into_iter().map(PathBuf::from).collect(),
            alt_names_file: None,
            replace_index: false,
            full_ancestry: false,
            backend: Backend::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl BuildConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error on invalid TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// With index directory
    #[inline]
    #[must_use]
    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = path.into();
        self
    }

    /// With gazetteer files
    #[must_use]
    pub fn with_gazetteer_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.gazetteer_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// With alternate-names feed
    #[inline]
    #[must_use]
    pub fn with_alt_names_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.alt_names_file = Some(path.into());
        self
    }

    /// With index replacement
    #[inline]
    #[must_use]
    pub fn with_replace_index(mut self, replace: bool) -> Self {
        self.replace_index = replace;
        self
    }

    /// With ancestors stored in payloads
    #[inline]
    #[must_use]
    pub fn with_full_ancestry(mut self, full: bool) -> Self {
        self.full_ancestry = full;
        self
    }

    /// With storage backend
    #[inline]
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// With progress interval
    #[inline]
    #[must_use]
    pub fn with_progress_interval(mut self, rows: u64) -> Self {
        self.progress_interval = rows;
        self
    }

    /// Projection settings derived from this configuration
    #[inline]
    #[must_use]
    pub fn projector_config(&self) -> ProjectorConfig {
        ProjectorConfig {
            full_ancestry: self.full_ancestry,
        }
    }

    /// Check inputs before a build
    ///
    /// Unreadable gazetteer files are dropped with a warning.
    ///
    /// # Errors
    /// Returns error if no gazetteer file is readable, the alternate-names
    /// file is not readable, or a setting is out of range.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.progress_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "progress_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.backend.is_available() {
            return Err(ConfigError::BackendUnavailable(self.backend));
        }

        self.gazetteer_files.retain(|path| {
            let readable = is_readable(path);
            if !readable {
                tracing::warn!(path = %path.display(), "unable to read gazetteer file, skipping");
            }
            readable
        });
        if self.gazetteer_files.is_empty() {
            return Err(ConfigError::NoGazetteerFiles);
        }

        if let Some(path) = &self.alt_names_file {
            if !is_readable(path) {
                return Err(ConfigError::UnreadableAltNames(path.clone()));
            }
        }
        Ok(())
    }
}

fn is_readable(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults() {
        let config = BuildConfig::new();
        assert_eq!(config.index_path, PathBuf::from("./IndexDirectory"));
        assert_eq!(config.gazetteer_files.len(), 2);
        assert_eq!(config.backend, Backend::JsonLines);
        assert_eq!(config.progress_interval, 100_000);
        assert!(!config.replace_index);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = BuildConfig::from_toml_str(
            r#"
            index_path = "/tmp/gaz"
            gazetteer_files = ["a.txt"]
            full_ancestry = true
            backend = "tantivy"
            "#,
        )
        .unwrap();

        assert_eq!(config.index_path, PathBuf::from("/tmp/gaz"));
        assert_eq!(config.gazetteer_files, vec![PathBuf::from("a.txt")]);
        assert!(config.full_ancestry);
        assert_eq!(config.backend, Backend::Tantivy);
        assert_eq!(config.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = BuildConfig::from_toml_str("index_dir = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_drops_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        fs::write(&present, "").unwrap();

        let mut config =
            BuildConfig::new().with_gazetteer_files([present.clone(), dir.path().join("missing.txt")]);
        config.validate().unwrap();
        assert_eq!(config.gazetteer_files, vec![present]);
    }

    #[test]
    fn validate_requires_some_gazetteer() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BuildConfig::new().with_gazetteer_files([dir.path().join("missing.txt")]);
        assert!(matches!(config.validate(), Err(ConfigError::NoGazetteerFiles)));
    }

    #[test]
    fn validate_requires_readable_alt_names() {
        let dir = tempfile::tempdir().unwrap();
        let gazetteer = dir.path().join("g.txt");
        fs::write(&gazetteer, "").unwrap();

        let mut config = BuildConfig::new()
            .with_gazetteer_files([gazetteer])
            .with_alt_names_file(dir.path().join("nope.txt"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnreadableAltNames(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = BuildConfig::new().with_progress_interval(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }
}
