//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use followsweep::SweepError;
use followsweep::review::MergeReport;
use followsweep::scan::ScanEndReason;

/// Writes one scan progress update to the given writer.
pub fn write_scan_progress<W: Write>(
    writer: &mut W,
    current: usize,
    total: usize,
) -> Result<(), SweepError> {
    writeln!(writer, "Scanned {current}/{total} accounts").map_err(|e| io_error(&e))
}

/// Writes the post-merge scan summary to the given writer.
pub fn write_scan_summary<W: Write>(
    writer: &mut W,
    collected: usize,
    report: &MergeReport,
    reason: ScanEndReason,
) -> Result<(), SweepError> {
    writeln!(writer, "Scan complete: {collected} accounts ({} new)", report.added)
        .map_err(|e| io_error(&e))?;
    writeln!(writer, "Stopped: {reason}").map_err(|e| io_error(&e))?;
    writeln!(writer, "Store now holds {} accounts.", report.total).map_err(|e| io_error(&e))
}

/// Writes the export summary to the given writer.
pub fn write_export_summary<W: Write>(
    writer: &mut W,
    count: usize,
    path: &str,
) -> Result<(), SweepError> {
    writeln!(writer, "Exported {count} accounts to {path}").map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`SweepError::Io`].
pub(crate) fn io_error(error: &io::Error) -> SweepError {
    SweepError::Io {
        message: error.to_string(),
    }
}
