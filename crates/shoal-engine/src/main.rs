//! Command-line driver for the Shoal population recurrence.
//!
//! Derives the closed-form population formula for each configured horizon,
//! evaluates it against the input histogram, and checks it against a
//! brute-force numeric run and the known answers.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `shoal-config.yaml` (defaults if absent)
//! 3. Initialize structured logging (tracing)
//! 4. Solve and check every horizon
//! 5. Write the JSON report, if requested

mod cli;
mod error;
mod runner;

use std::path::Path;

use clap::Parser;
use shoal_core::ShoalConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, solving, any check, or the export
/// fails; the process then exits non-zero.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    args.apply(&mut config, &std::env::current_dir()?);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = %args.config.display(),
        childhood = config.model.childhood,
        repr_cycle = config.model.repr_cycle,
        horizons = ?config.run.horizons,
        "shoal-engine starting"
    );

    let base_dir = args.config.parent().unwrap_or_else(|| Path::new("."));
    let report = runner::run(&config, base_dir)?;

    if let Some(path) = &config.output.report_path {
        runner::write_report(&report, &runner::resolve(base_dir, path))?;
    }

    info!(
        run_id = %report.run_id,
        horizons = report.horizons.len(),
        "all horizons solved and checked"
    );
    Ok(())
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
fn load_config(path: &Path) -> Result<ShoalConfig, EngineError> {
    if path.exists() {
        Ok(ShoalConfig::from_file(path)?)
    } else {
        Ok(ShoalConfig::default())
    }
}
