//! Headless scan of a capture file into the review ledger.

use std::io;

use chrono::Utc;
use followsweep::scan::{CaptureSource, ScanEvent, ScanEventReceiver, ScanOutcome, events, run_scan};
use followsweep::telemetry::{StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
use followsweep::{FollowSweepConfig, SweepError};

use super::output;

/// Scans the configured capture file and merges the results into the
/// review ledger.
///
/// Progress is printed line by line while the scan runs, followed by a
/// merge summary naming the stop reason. A scan error discards the
/// partial accumulation and leaves the ledger untouched.
///
/// # Errors
///
/// Returns [`SweepError::Configuration`] when no capture file is
/// configured, [`SweepError::Scan`] when the capture is unusable or the
/// scan fails, and [`SweepError::Persistence`] when the ledger cannot be
/// opened or written.
pub async fn run(config: &FollowSweepConfig) -> Result<(), SweepError> {
    let capture_path = config
        .capture_path()
        .ok_or_else(|| SweepError::Configuration {
            message: "capture file is required (use --capture <file>)".to_owned(),
        })?;
    let mut source = CaptureSource::open(capture_path).map_err(|error| SweepError::Scan {
        message: error.to_string(),
    })?;

    let telemetry = StderrJsonlTelemetrySink;
    let ledger = super::open_ledger(config, &telemetry)?;
    let mut store = ledger
        .load()
        .map_err(|error| super::migrations::map_persistence_error(&error))?;

    let limits = config.scan_limits();
    let (events, receiver) = events::channel();
    let task = tokio::spawn(async move { run_scan(&mut source, &limits, &events).await });

    report_progress(receiver).await?;

    let ScanOutcome { accounts, reason } = task
        .await
        .map_err(|error| SweepError::Scan {
            message: error.to_string(),
        })?
        .map_err(|error| SweepError::Scan {
            message: error.to_string(),
        })?;

    let collected = accounts.len();
    let report = store.merge_scanned(accounts, Utc::now());
    ledger
        .replace_all(&store)
        .map_err(|error| super::migrations::map_persistence_error(&error))?;
    telemetry.record(TelemetryEvent::ScanMerged {
        collected,
        added: report.added,
        reason: reason.describe().to_owned(),
    });

    let mut stdout = io::stdout().lock();
    output::write_scan_summary(&mut stdout, collected, &report, reason)
}

/// Prints progress updates until the scan reports a terminal event.
async fn report_progress(mut receiver: ScanEventReceiver) -> Result<(), SweepError> {
    while let Some(event) = receiver.recv().await {
        match event {
            ScanEvent::ScanProgress { current, total } => {
                let mut stdout = io::stdout().lock();
                output::write_scan_progress(&mut stdout, current, total)?;
            }
            ScanEvent::ScanComplete { .. } | ScanEvent::ScanError { .. } => break,
        }
    }
    Ok(())
}
