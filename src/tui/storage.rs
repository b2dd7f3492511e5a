//! Startup context storage for the review TUI.
//!
//! This module owns the global `OnceLock` values used during TUI bootstrapping
//! and provides the setter/getter functions consumed by CLI wiring and app
//! handlers.

use std::sync::{Arc, OnceLock};

use camino::Utf8PathBuf;
use crossterm::terminal;

use crate::model::SourceHost;
use crate::persistence::ReviewLedger;
use crate::review::ReviewStore;
use crate::scan::ScanLimits;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Global storage for the initial review store.
///
/// This is set before the TUI program starts and read by `ReviewApp::init()`.
static INITIAL_STORE: OnceLock<ReviewStore> = OnceLock::new();

/// Global storage for initial terminal dimensions.
///
/// This is set before the TUI program starts and read by `ReviewApp::init()`
/// so the first frame uses the actual terminal size.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Global storage for the session ledger.
///
/// This is set before the TUI program starts so decisions made in the TUI
/// persist to the same database the CLI opened.
static SESSION_LEDGER: OnceLock<ReviewLedger> = OnceLock::new();

/// Global storage for the source host profile URLs are derived from.
static SESSION_HOST: OnceLock<SourceHost> = OnceLock::new();

/// Global storage for the scan context (capture path and limits).
///
/// Set before the TUI program starts when a capture file is configured.
/// Without this context, in-session rescan requests fail with a message.
static SCAN_CONTEXT: OnceLock<ScanContext> = OnceLock::new();

/// Global storage for telemetry sink.
///
/// This is set before the TUI program starts to enable scan merge metrics.
/// Without this, a no-op sink is used.
static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Static fallback telemetry sink to avoid allocations on each call.
///
/// This is used by `get_telemetry_sink` when no sink has been configured,
/// avoiding repeated `Arc::new` allocations.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Context required to run a scan from inside the TUI.
#[derive(Debug, Clone)]
pub struct ScanContext {
    /// Capture file the scan replays.
    pub capture: Utf8PathBuf,
    /// Bounds the scan runs under.
    pub limits: ScanLimits,
}

/// Sets the initial review store for the TUI application.
///
/// This must be called before starting the bubbletea-rs program. The store
/// will be read by `ReviewApp::init()` when the program starts.
///
/// # Returns
///
/// `true` if the store was set, `false` if it was already set.
pub fn set_initial_store(store: ReviewStore) -> bool {
    INITIAL_STORE.set(store).is_ok()
}

/// Sets the initial terminal dimensions for the TUI application.
///
/// This should be called before starting the bubbletea-rs program so the
/// initial render can use the actual terminal size instead of fallbacks.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the ledger the TUI persists decisions to.
///
/// This must be called before starting the bubbletea-rs program. Without it
/// the app falls back to a ledger at the default database path.
///
/// # Returns
///
/// `true` if the ledger was set, `false` if it was already set.
pub fn set_session_ledger(ledger: ReviewLedger) -> bool {
    SESSION_LEDGER.set(ledger).is_ok()
}

/// Sets the source host used to derive profile URLs.
///
/// # Returns
///
/// `true` if the host was set, `false` if it was already set.
pub fn set_session_host(host: SourceHost) -> bool {
    SESSION_HOST.set(host).is_ok()
}

/// Sets the scan context for in-session rescans.
///
/// This must be called before starting the bubbletea-rs program to enable
/// the rescan feature. Without this context, rescan requests fail with a
/// status message.
///
/// # Returns
///
/// `true` if the context was set, `false` if it was already set.
pub fn set_scan_context(context: ScanContext) -> bool {
    SCAN_CONTEXT.set(context).is_ok()
}

/// Sets the telemetry sink for the TUI application.
///
/// This must be called before starting the bubbletea-rs program to enable
/// scan merge metrics. Without this, a no-op sink is used.
///
/// # Returns
///
/// `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Gets a clone of the initial review store from storage.
///
/// Called internally by `ReviewApp::init()`. Returns the stored value or an
/// empty store if not set.
///
/// Note: This function clones the data because `OnceLock` does not support
/// consuming (taking) the value. The name reflects that this is a read
/// operation, not a destructive take.
pub(crate) fn get_initial_store() -> ReviewStore {
    INITIAL_STORE.get().cloned().unwrap_or_default()
}

/// Gets the initial terminal dimensions from storage.
///
/// Called internally by `ReviewApp::init()`. Returns the stored dimensions
/// or fallback dimensions if none were set.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

/// Gets the session ledger, falling back to the default database path.
///
/// Called internally by `ReviewApp::init()`.
pub(crate) fn get_session_ledger() -> ReviewLedger {
    SESSION_LEDGER.get().cloned().unwrap_or_default()
}

/// Gets the session host, falling back to the default host.
///
/// Called internally by `ReviewApp::init()`.
pub(crate) fn get_session_host() -> SourceHost {
    SESSION_HOST.get().cloned().unwrap_or_default()
}

/// Gets the scan context, if configured.
///
/// Called internally by the rescan handler. Returns `None` when no capture
/// file was configured.
pub(crate) fn get_scan_context() -> Option<ScanContext> {
    SCAN_CONTEXT.get().cloned()
}

/// Gets the telemetry sink, returning a no-op sink if not configured.
///
/// Uses a static fallback sink to avoid allocating a new `Arc` on each call
/// when no sink has been configured.
fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Records scan telemetry for a scan that merged into the store.
///
/// Called internally by the app after a completed in-session scan.
pub(crate) fn record_scan_telemetry(collected: usize, added: usize, reason: &str) {
    get_telemetry_sink().record(TelemetryEvent::ScanMerged {
        collected,
        added,
        reason: reason.to_owned(),
    });
}

/// Records that the store was cleared from inside the TUI.
pub(crate) fn record_clear_telemetry(removed: usize) {
    get_telemetry_sink().record(TelemetryEvent::StoreCleared { removed });
}
