//! TUI mode for reviewing the followed-accounts list.
//!
//! This module provides the entry point for the interactive terminal user
//! interface that presents stored accounts one at a time for keep, unfollow,
//! and skip decisions.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use crossterm::terminal;

use followsweep::telemetry::{StderrJsonlTelemetrySink, TelemetrySink};
use followsweep::tui::{
    ReviewApp, ScanContext, set_initial_store, set_initial_terminal_size, set_scan_context,
    set_session_host, set_session_ledger, set_telemetry_sink,
};
use followsweep::{FollowSweepConfig, SweepError};

use super::migrations;

/// Runs the TUI mode for reviewing stored accounts.
///
/// # Errors
///
/// Returns an error if:
/// - The configured host is invalid
/// - The database cannot be opened or migrated
/// - The TUI fails to initialise
pub async fn run(config: &FollowSweepConfig) -> Result<(), SweepError> {
    let host = config
        .source_host()
        .map_err(|error| SweepError::Configuration {
            message: error.to_string(),
        })?;
    let telemetry: Arc<dyn TelemetrySink> = Arc::new(StderrJsonlTelemetrySink);

    let ledger = super::open_ledger(config, telemetry.as_ref())?;
    let store = ledger
        .load()
        .map_err(|error| migrations::map_persistence_error(&error))?;

    // Store startup context in global state for Model::init() to retrieve.
    // If already set (e.g. re-running the TUI in the same process), this is a
    // no-op and the existing data remains.
    let _ = set_initial_store(store);
    let _ = set_session_ledger(ledger);
    let _ = set_session_host(host);

    // Store the scan context for the in-session rescan feature. Same
    // semantics as above: if already set, we keep the existing context.
    if let Some(capture) = config.capture_path() {
        let _ = set_scan_context(ScanContext {
            capture: capture.to_owned(),
            limits: config.scan_limits(),
        });
    }

    if let Ok((width, height)) = terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }

    let _ = set_telemetry_sink(telemetry);

    // Run the TUI program
    run_tui().await.map_err(|error| SweepError::Tui {
        message: error.to_string(),
    })?;

    Ok(())
}

/// Runs the bubbletea-rs program with the `ReviewApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // Build and run the program using the builder pattern.
    // ReviewApp::init() will retrieve data from module-level storage.
    let program = Program::<ReviewApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    // Ensure stdout is flushed
    io::stdout().flush().ok();

    Ok(())
}
