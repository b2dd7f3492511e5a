//! Behavioural tests for capture playback scanning.

mod support;

use std::time::Duration;

use camino::Utf8Path;
use chrono::{DateTime, TimeZone, Utc};
use followsweep::model::ScrapedAccount;
use followsweep::persistence::{ReviewLedger, migrate_database};
use followsweep::review::{MergeReport, ReviewStore};
use followsweep::scan::source::test_support::scraped;
use followsweep::scan::{
    CaptureSource, DEFAULT_MAX_ACCOUNTS, ScanError, ScanLimits, ScanOutcome, events, run_scan,
};
use followsweep::telemetry::NoopTelemetrySink;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tempfile::TempDir;

use support::runtime::{SharedRuntime, ensure_runtime};
use support::{create_temp_dir, database_url_in};

#[derive(ScenarioState, Default)]
struct ScanState {
    runtime: Slot<SharedRuntime>,
    temp_dir: Slot<TempDir>,
    capture_path: Slot<String>,
    max_accounts: Slot<usize>,
    ledger: Slot<ReviewLedger>,
    outcome: Slot<ScanOutcome>,
    error: Slot<ScanError>,
    report: Slot<MergeReport>,
}

#[fixture]
fn scan_state() -> ScanState {
    ScanState::default()
}

fn seed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .unwrap_or_else(|| panic!("fixed timestamp should be unambiguous"))
}

/// Splits a quoted, comma-separated handle list into trimmed handles.
fn parse_handles(raw: &str) -> Vec<String> {
    raw.trim_matches('"')
        .split(',')
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builds capture JSONL from a `|`-separated frame spec such as
/// `"alice | alice,bob"`. Each frame becomes one array line of
/// handle-only entries after the header line.
fn capture_contents(frames_spec: &str) -> String {
    let mut lines = vec![r#"{"kind":"following","host":"x.com"}"#.to_owned()];
    for frame in frames_spec.trim_matches('"').split('|') {
        let entries: Vec<String> = frame
            .split(',')
            .map(str::trim)
            .filter(|handle| !handle.is_empty())
            .map(|handle| format!(r#"{{"handle":"{handle}"}}"#))
            .collect();
        lines.push(format!("[{}]", entries.join(",")));
    }
    let mut contents = lines.join("\n");
    contents.push('\n');
    contents
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn write_capture(scan_state: &ScanState, contents: &str) {
    let temp_dir = scan_state.temp_dir.take().unwrap_or_else(create_temp_dir);
    let path = temp_dir.path().join("capture.jsonl");
    std::fs::write(&path, contents).expect("capture file should write");
    let capture_path = path
        .to_str()
        .expect("temp paths should be valid UTF-8")
        .to_owned();
    scan_state.temp_dir.set(temp_dir);
    scan_state.capture_path.set(capture_path);
}

#[given("a capture file with frames {frames}")]
fn capture_with_frames(scan_state: &ScanState, frames: String) {
    write_capture(scan_state, &capture_contents(&frames));
}

#[given("a capture file ending in a corrupt frame")]
fn capture_with_corrupt_frame(scan_state: &ScanState) {
    let contents = concat!(
        "{\"kind\":\"following\"}\n",
        "[{\"handle\":\"alice\"}]\n",
        "{\"not\":\"an array\"}\n",
    );
    write_capture(scan_state, contents);
}

#[given("an account limit of {limit}")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn account_limit(scan_state: &ScanState, limit: String) {
    let parsed: usize = limit.parse().expect("account limit should be numeric");
    scan_state.max_accounts.set(parsed);
}

#[given("a review ledger seeded with accounts {handles}")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn seeded_ledger(scan_state: &ScanState, handles: String) {
    let temp_dir = scan_state.temp_dir.take().unwrap_or_else(create_temp_dir);
    let database_url = database_url_in(&temp_dir, "followsweep.sqlite");
    scan_state.temp_dir.set(temp_dir);

    migrate_database(&database_url, &NoopTelemetrySink).expect("migrations should run");
    let ledger = ReviewLedger::new(database_url).expect("ledger should open");

    let scanned: Vec<ScrapedAccount> = parse_handles(&handles)
        .iter()
        .map(|handle| scraped(handle))
        .collect();
    let mut store = ReviewStore::new();
    store.merge_scanned(scanned, seed_time());
    ledger
        .replace_all(&store)
        .expect("seed accounts should persist");
    scan_state.ledger.set(ledger);
}

#[when("the capture is scanned")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn scan_the_capture(scan_state: &ScanState) {
    let runtime = ensure_runtime(&scan_state.runtime).expect("runtime should start");
    let capture_path = scan_state
        .capture_path
        .with_ref(Clone::clone)
        .expect("capture file not initialised");
    let mut source =
        CaptureSource::open(Utf8Path::new(&capture_path)).expect("capture header should validate");

    let limits = ScanLimits {
        max_accounts: scan_state.max_accounts.get().unwrap_or(DEFAULT_MAX_ACCOUNTS),
        scroll_delay: Duration::ZERO,
        timeout: Duration::from_secs(30),
    };
    let (sender, receiver) = events::channel();
    let result = runtime.block_on(run_scan(&mut source, &limits, &sender));
    drop(receiver);

    match result {
        Ok(outcome) => scan_state.outcome.set(outcome),
        Err(error) => scan_state.error.set(error),
    }
}

#[when("the scan result is merged into the ledger")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn merge_scan_result(scan_state: &ScanState) {
    let outcome = scan_state.outcome.take().expect("scan should have completed");
    let ledger = scan_state
        .ledger
        .with_ref(Clone::clone)
        .expect("ledger not initialised");
    let mut store = ledger.load().expect("session should load");
    let report = store.merge_scanned(outcome.accounts, seed_time());
    ledger.replace_all(&store).expect("merge should persist");
    scan_state.report.set(report);
}

#[then("the scan collects {handles}")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn scan_collects(scan_state: &ScanState, handles: String) {
    let expected = parse_handles(&handles);
    let collected = scan_state
        .outcome
        .with_ref(|outcome| {
            outcome
                .accounts
                .iter()
                .map(|account| account.handle.as_str().to_owned())
                .collect::<Vec<_>>()
        })
        .expect("scan should have completed");
    assert_eq!(collected, expected, "collected handles mismatch");
}

#[then("the scan stops because {reason}")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn scan_stops_because(scan_state: &ScanState, reason: String) {
    let described = scan_state
        .outcome
        .with_ref(|outcome| outcome.reason.describe().to_owned())
        .expect("scan should have completed");
    assert_eq!(described, reason.trim_matches('"'), "stop reason mismatch");
}

#[then("the scan fails with an extraction error")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn scan_fails_with_extraction_error(scan_state: &ScanState) {
    let is_extraction = scan_state
        .error
        .with_ref(|error| matches!(error, ScanError::ExtractionFailed { .. }))
        .expect("scan should have failed");
    assert!(is_extraction, "expected an extraction failure");
    assert!(
        scan_state.outcome.with_ref(|_| ()).is_none(),
        "a failed scan should not record an outcome"
    );
}

#[then("the merge reports {added} added of {total} total")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn merge_reports(scan_state: &ScanState, added: String, total: String) {
    let expected_added: usize = added.parse().expect("added count should be numeric");
    let expected_total: usize = total.parse().expect("total count should be numeric");
    let report = scan_state.report.get().expect("merge should have run");
    assert_eq!(report.added, expected_added, "added count mismatch");
    assert_eq!(report.total, expected_total, "total count mismatch");
}

#[then("the reloaded store holds accounts {handles}")]
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn reloaded_store_holds(scan_state: &ScanState, handles: String) {
    let expected = parse_handles(&handles);
    let ledger = scan_state
        .ledger
        .with_ref(Clone::clone)
        .expect("ledger not initialised");
    let store = ledger.load().expect("session should reload");
    let stored: Vec<String> = store
        .accounts()
        .iter()
        .map(|record| record.handle.as_str().to_owned())
        .collect();
    assert_eq!(stored, expected, "stored handles mismatch");
}

#[scenario(path = "tests/features/scan_capture.feature", index = 0)]
fn scan_collects_until_the_list_ends(scan_state: ScanState) {
    let _ = scan_state;
}

#[scenario(path = "tests/features/scan_capture.feature", index = 1)]
fn account_limit_stops_the_scan_early(scan_state: ScanState) {
    let _ = scan_state;
}

#[scenario(path = "tests/features/scan_capture.feature", index = 2)]
fn corrupt_frame_discards_the_partial_scan(scan_state: ScanState) {
    let _ = scan_state;
}

#[scenario(path = "tests/features/scan_capture.feature", index = 3)]
fn rescanning_merges_only_new_accounts(scan_state: ScanState) {
    let _ = scan_state;
}
