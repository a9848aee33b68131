//! Command-line interface

use crate::config::{Backend, BuildConfig};
use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Build a searchable gazetteer index from GeoNames dumps
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "gaz-index", version, about)]
pub struct Cli {
    /// Gazetteer files, `:`-separated, read in order
    #[arg(short = 'i', long, value_delimiter = ':', value_name = "FILES")]
    pub gazetteer_files: Vec<PathBuf>,

    /// GeoNames alternate-names file
    #[arg(long, value_name = "FILE")]
    pub alt_names_file: Option<PathBuf>,

    /// Output index directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub index_path: Option<PathBuf>,

    /// Replace an existing index directory
    #[arg(short = 'r', long)]
    pub replace_index: bool,

    /// Store each place's ancestors in its payload
    #[arg(long)]
    pub with_full_ancestry: bool,

    /// Record storage backend
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Resolve the effective configuration: defaults, then the config file,
    /// then flags given on the command line
    ///
    /// # Errors
    /// Returns error if the config file cannot be loaded.
    pub fn build_config(&self) -> Result<BuildConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::from_file(path)?,
            None => BuildConfig::default(),
        };

        if !self.gazetteer_files.is_empty() {
            config.gazetteer_files.clone_from(&self.gazetteer_files);
        }
        if let Some(path) = &self.alt_names_file {
            config.alt_names_file = Some(path.clone());
        }
        if let Some(path) = &self.index_path {
            config.index_path.clone_from(path);
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        config.replace_index |= self.replace_index;
        config.full_ancestry |= self.with_full_ancestry;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn splits_gazetteer_files_on_colon() {
        let cli = Cli::parse_from(["gaz-index", "-i", "a.txt:b.txt", "-o", "out", "-r"]);
        let config = cli.build_config().unwrap();

        assert_eq!(
            config.gazetteer_files,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
        assert_eq!(config.index_path, PathBuf::from("out"));
        assert!(config.replace_index);
        assert!(!config.full_ancestry);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("gaz.toml");
        fs::write(
            &file,
            "index_path = \"from-file\"\nfull_ancestry = true\nprogress_interval = 10\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "gaz-index",
            "--config",
            file.to_str().unwrap(),
            "--index-path",
            "from-flag",
            "--backend",
            "tantivy",
        ]);
        let config = cli.build_config().unwrap();

        assert_eq!(config.index_path, PathBuf::from("from-flag"));
        assert!(config.full_ancestry);
        assert_eq!(config.progress_interval, 10);
        assert_eq!(config.backend, Backend::Tantivy);
    }

    #[test]
    fn no_flags_means_defaults() {
        let config = Cli::parse_from(["gaz-index"]).build_config().unwrap();
        assert_eq!(config, BuildConfig::default());
    }
}
