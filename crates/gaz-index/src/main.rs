//! `gaz-index` command-line entry point

use anyhow::Context;
use clap::Parser;
use gaz_index::cli::Cli;
use gaz_index::{BuildSummary, IndexBuilder};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: &Cli) -> anyhow::Result<BuildSummary> {
    let config = cli.build_config().context("loading configuration")?;
    let builder = IndexBuilder::new(config).context("invalid configuration")?;
    tracing::info!(
        index = %builder.config().index_path.display(),
        files = builder.config().gazetteer_files.len(),
        backend = %builder.config().backend,
        "Building gazetteer index"
    );
    let summary = builder.run().context("index build failed")?;
    Ok(summary)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(&cli) {
        Ok(summary) => {
            tracing::info!(
                "Indexed {} places as {} records from {} rows ({} malformed) in {:.1}s",
                summary.places_emitted,
                summary.records_written,
                summary.rows,
                summary.malformed,
                summary.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
