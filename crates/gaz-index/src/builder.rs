//! Index build pipeline
//!
//! Wires the pieces together: preferred names are loaded first, gazetteer
//! files are streamed through the [`AncestryResolver`] in order, and every
//! emitted place is projected straight into the sink.

use crate::config::{Backend, BuildConfig};
use crate::error::{BuildError, ConfigError, SinkError};
use crate::feed::GazetteerFeed;
use crate::projector::Projector;
use crate::sink::{DocumentSink, JsonLinesSink};
use gaz_ancestry::{AncestryResolver, Emitter, PlaceView};
use gaz_names::PreferredNames;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

/// Totals of a finished build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Gazetteer rows read
    pub rows: u64,
    /// Rows skipped as malformed
    pub malformed: u64,
    /// Places handed to the projector
    pub places_emitted: u64,
    /// Records written to the sink
    pub records_written: u64,
    /// Administrative divisions registered
    pub admin_divisions: usize,
    /// Places emitted without a fully resolved ancestry
    pub unresolved: usize,
    /// Wall-clock time
    pub elapsed: Duration,
}

/// [`Emitter`] that projects places into a sink
pub struct ProjectingEmitter<'a, S: DocumentSink + ?Sized> {
    projector: &'a Projector,
    names: &'a PreferredNames,
    sink: &'a mut S,
    places: u64,
    records: u64,
}

impl<'a, S: DocumentSink + ?Sized> ProjectingEmitter<'a, S> {
    /// Create emitter
    pub fn new(projector: &'a Projector, names: &'a PreferredNames, sink: &'a mut S) -> Self {
        Self {
            projector,
            names,
            sink,
            places: 0,
            records: 0,
        }
    }

    /// Places projected so far
    #[inline]
    #[must_use]
    pub fn places(&self) -> u64 {
        self.places
    }

    /// Records written so far
    #[inline]
    #[must_use]
    pub fn records(&self) -> u64 {
        self.records
    }
}

impl<S: DocumentSink + ?Sized> Emitter for ProjectingEmitter<'_, S> {
    type Error = SinkError;

    fn emit(&mut self, place: PlaceView<'_>) -> Result<(), Self::Error> {
        let preferred = self.names.lookup(place.place().id());
        let projection = self.projector.project(&place, preferred)?;
        for record in projection.records() {
            self.sink.add(&record)?;
            self.records += 1;
        }
        self.places += 1;
        Ok(())
    }
}

/// Create the index directory, replacing an existing one if allowed
///
/// # Errors
/// Returns [`BuildError::IndexExists`] if the directory exists and
/// `replace` is false, or an I/O error.
pub fn prepare_index_dir(path: &Path, replace: bool) -> Result<(), BuildError> {
    if path.exists() {
        if !replace {
            return Err(BuildError::IndexExists(path.to_path_buf()));
        }
        tracing::info!(path = %path.display(), "replacing index");
        let removed = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|err| BuildError::io(path, err))?;
    }
    fs::create_dir_all(path).map_err(|err| BuildError::io(path, err))
}

/// Runs one index build
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    config: BuildConfig,
}

impl IndexBuilder {
    /// Validate the configuration and create a builder
    ///
    /// # Errors
    /// Returns error if the configuration does not validate.
    pub fn new(mut config: BuildConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Validated configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build into the configured index directory and backend
    ///
    /// # Errors
    /// Returns error if the directory cannot be prepared, an input cannot be
    /// read, or the sink fails.
    pub fn run(&self) -> Result<BuildSummary, BuildError> {
        let index_path = &self.config.index_path;
        prepare_index_dir(index_path, self.config.replace_index)?;

        let mut sink: Box<dyn DocumentSink> = match self.config.backend {
            Backend::JsonLines => Box::new(JsonLinesSink::create(index_path)?),
            #[cfg(feature = "tantivy")]
            Backend::Tantivy => Box::new(crate::sink::TantivySink::create(index_path)?),
            #[cfg(not(feature = "tantivy"))]
            Backend::Tantivy => return Err(ConfigError::BackendUnavailable(Backend::Tantivy).into()),
        };
        self.run_with_sink(&mut *sink)
    }

    /// Build into any sink; the index directory is not touched
    ///
    /// # Errors
    /// Returns error if an input cannot be read or the sink fails.
    pub fn run_with_sink<S: DocumentSink + ?Sized>(&self, sink: &mut S) -> Result<BuildSummary, BuildError> {
        let started = Instant::now();
        let names = self.load_names()?;
        let projector = Projector::new(self.config.projector_config());
        let mut emitter = ProjectingEmitter::new(&projector, &names, sink);
        let mut resolver = AncestryResolver::new();
        let mut summary = BuildSummary::default();

        for path in &self.config.gazetteer_files {
            tracing::info!(path = %path.display(), "Reading gazetteer");
            let file = File::open(path).map_err(|err| BuildError::io(path, err))?;
            let mut feed = GazetteerFeed::new(BufReader::new(file));

            while let Some(place) = feed.next_place().map_err(|source| BuildError::Feed {
                path: path.clone(),
                source,
            })? {
                resolver.ingest(place, &mut emitter)?;
                let rows = summary.rows + feed.stats().rows;
                if rows % self.config.progress_interval == 0 {
                    tracing::info!("Indexed {} rows ({} places)", rows, emitter.places());
                }
            }

            let stats = feed.stats();
            summary.rows += stats.rows;
            summary.malformed += stats.malformed;
            tracing::info!(
                path = %path.display(),
                rows = stats.rows,
                malformed = stats.malformed,
                "Finished gazetteer"
            );
        }

        tracing::info!("Resolving unresolved places");
        resolver.report().log();
        resolver.finalize(&mut emitter)?;
        let report = resolver.report();
        report.log();
        summary.admin_divisions = report.admin_divisions;
        summary.unresolved = resolver.drain_remaining(&mut emitter)?;

        summary.places_emitted = emitter.places();
        summary.records_written = emitter.records();
        let closed = sink.close()?;
        summary.elapsed = started.elapsed();

        tracing::info!(
            rows = summary.rows,
            places = summary.places_emitted,
            records = closed.records,
            elapsed_ms = u64::try_from(summary.elapsed.as_millis()).unwrap_or(u64::MAX),
            "Index build complete"
        );
        Ok(summary)
    }

    fn load_names(&self) -> Result<PreferredNames, BuildError> {
        let mut names = PreferredNames::new();
        if let Some(path) = &self.config.alt_names_file {
            tracing::info!(path = %path.display(), "Reading alternate names");
            let file = File::open(path).map_err(|err| BuildError::io(path, err))?;
            names.load(BufReader::new(file))?;
        }
        Ok(names)
    }
}
