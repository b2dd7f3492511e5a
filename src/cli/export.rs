//! Export of the review ledger to a document on disk.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::Utc;
use followsweep::export::{ExportFormat, export_file_name, write_csv, write_markdown};
use followsweep::telemetry::NoopTelemetrySink;
use followsweep::{FollowSweepConfig, SweepError};

use super::output;

/// Writes the review ledger to a CSV or Markdown document.
///
/// The destination is `--export-path` when given, otherwise a generated
/// timestamped file name in the current directory. An empty ledger still
/// produces a complete (header-only) document.
///
/// # Errors
///
/// Returns [`SweepError::Configuration`] for an unknown format or host,
/// [`SweepError::Persistence`] when the ledger cannot be read, and
/// [`SweepError::Io`] or [`SweepError::Export`] when writing fails.
pub fn run(config: &FollowSweepConfig) -> Result<(), SweepError> {
    let format = parse_export_format(config)?;
    let host = config
        .source_host()
        .map_err(|error| SweepError::Configuration {
            message: error.to_string(),
        })?;

    let ledger = super::open_ledger(config, &NoopTelemetrySink)?;
    let store = ledger
        .load()
        .map_err(|error| super::migrations::map_persistence_error(&error))?;

    let now = Utc::now();
    let file_name = config
        .export_path
        .clone()
        .unwrap_or_else(|| export_file_name(format, now));

    let file = File::create(&file_name).map_err(|error| SweepError::Io {
        message: format!("failed to create output file '{file_name}': {error}"),
    })?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(&mut writer, store.accounts(), &host),
        ExportFormat::Markdown => write_markdown(&mut writer, store.accounts(), &host, now),
    }
    .map_err(|error| SweepError::Export {
        message: error.to_string(),
    })?;
    writer.flush().map_err(|error| SweepError::Io {
        message: format!("failed to flush output file: {error}"),
    })?;

    let mut stdout = io::stdout().lock();
    output::write_export_summary(&mut stdout, store.len(), &file_name)
}

/// Parses the export format from configuration, defaulting to CSV.
fn parse_export_format(config: &FollowSweepConfig) -> Result<ExportFormat, SweepError> {
    config
        .export_format
        .as_deref()
        .map_or(Ok(ExportFormat::Csv), str::parse)
        .map_err(|error| SweepError::Configuration {
            message: error.to_string(),
        })
}
