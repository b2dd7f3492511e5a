//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`scan`]: Headless scan of a capture file into the review ledger
//! - [`review_tui`]: Interactive TUI for triaging scanned accounts
//! - [`export`]: Write the review ledger to a CSV or Markdown document
//! - [`clear`]: Empty the review ledger after confirmation
//! - [`migrations`]: Database schema migrations
//!
//! Output formatting utilities are in [`output`].

use followsweep::persistence::ReviewLedger;
use followsweep::telemetry::TelemetrySink;
use followsweep::{FollowSweepConfig, SweepError};

pub mod clear;
pub mod export;
pub mod migrations;
pub mod output;
pub mod review_tui;
pub mod scan;

/// Opens the review ledger named by the configuration.
///
/// Pending migrations run first, so a fresh database is usable without an
/// explicit `--migrate-db` pass.
///
/// # Errors
///
/// Returns [`SweepError::Configuration`] for a blank database URL and
/// [`SweepError::Persistence`] when the database cannot be opened or
/// migrated.
pub fn open_ledger(
    config: &FollowSweepConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<ReviewLedger, SweepError> {
    migrations::ensure_schema(&config.database_url, telemetry)?;
    ReviewLedger::new(config.database_url.clone())
        .map_err(|error| migrations::map_persistence_error(&error))
}
