//! Irreversible clearing of the review ledger.

use std::io::{self, BufRead, Write};

use followsweep::persistence::ReviewLedger;
use followsweep::telemetry::{StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
use followsweep::{FollowSweepConfig, SweepError};

use super::output::io_error;

/// Empties the review ledger after an explicit confirmation.
///
/// The prompt requires a literal `yes` on standard input; anything else
/// aborts without touching the store. There is no undo.
///
/// # Errors
///
/// Returns [`SweepError::Persistence`] when the ledger cannot be opened,
/// read, or cleared, and [`SweepError::Io`] when the prompt cannot be
/// written or the confirmation cannot be read.
pub fn run(config: &FollowSweepConfig) -> Result<(), SweepError> {
    let telemetry = StderrJsonlTelemetrySink;
    let ledger = super::open_ledger(config, &telemetry)?;
    let store = ledger
        .load()
        .map_err(|error| super::migrations::map_persistence_error(&error))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();
    run_with(&ledger, store.len(), &mut input, &mut stdout, &telemetry)
}

/// Prompts on `output`, reads the confirmation from `input`, and clears
/// the ledger when the user typed `yes`.
fn run_with<R: BufRead, W: Write>(
    ledger: &ReviewLedger,
    stored: usize,
    input: &mut R,
    output: &mut W,
    telemetry: &dyn TelemetrySink,
) -> Result<(), SweepError> {
    if stored == 0 {
        writeln!(output, "Nothing to clear.").map_err(|e| io_error(&e))?;
        return Ok(());
    }

    writeln!(
        output,
        "This deletes all {stored} stored accounts and their decisions. It cannot be undone."
    )
    .map_err(|e| io_error(&e))?;
    write!(output, "Type yes to confirm: ").map_err(|e| io_error(&e))?;
    output.flush().map_err(|e| io_error(&e))?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| io_error(&e))?;
    if line.trim() != "yes" {
        writeln!(output, "Aborted; nothing was deleted.").map_err(|e| io_error(&e))?;
        return Ok(());
    }

    let removed = ledger
        .clear()
        .map_err(|error| super::migrations::map_persistence_error(&error))?;
    telemetry.record(TelemetryEvent::StoreCleared { removed });
    writeln!(output, "Cleared {removed} accounts.").map_err(|e| io_error(&e))
}
