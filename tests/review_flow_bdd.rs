//! Behavioural tests for the persisted review flow.

mod support;

use chrono::{DateTime, TimeZone, Utc};
use followsweep::model::ScrapedAccount;
use followsweep::persistence::{ReviewLedger, migrate_database};
use followsweep::review::{ReviewDecision, ReviewStore};
use followsweep::scan::source::test_support::scraped;
use followsweep::telemetry::NoopTelemetrySink;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tempfile::TempDir;

use support::{create_temp_dir, database_url_in};

#[derive(ScenarioState, Default)]
struct ReviewFlowState {
    temp_dir: Slot<TempDir>,
    ledger: Slot<ReviewLedger>,
    store: Slot<ReviewStore>,
}

#[fixture]
fn review_state() -> ReviewFlowState {
    ReviewFlowState::default()
}

fn decision_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .unwrap_or_else(|| panic!("timestamp should be valid"))
}

fn parse_handles(raw: &str) -> Vec<String> {
    raw.trim_matches('"')
        .split(',')
        .map(|part| part.trim().to_owned())
        .filter(|part| !part.is_empty())
        .collect()
}

// --- Given steps ---

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[given("a review session over accounts {handles}")]
fn seed_review_session(review_state: &ReviewFlowState, handles: String) {
    let temp_dir = create_temp_dir();
    let database_url = database_url_in(&temp_dir, "followsweep.sqlite");
    migrate_database(&database_url, &NoopTelemetrySink).expect("migrations should run");

    let ledger = ReviewLedger::new(database_url).expect("ledger should open");
    let mut store = ReviewStore::new();
    let scanned: Vec<ScrapedAccount> = parse_handles(&handles)
        .iter()
        .map(|handle| scraped(handle))
        .collect();
    store.merge_scanned(scanned, decision_time());
    ledger
        .replace_all(&store)
        .expect("seed accounts should persist");

    review_state.temp_dir.set(temp_dir);
    review_state.ledger.set(ledger);
    review_state.store.set(store);
}

// --- When steps ---

#[when("the current account is kept")]
fn keep_current(review_state: &ReviewFlowState) {
    apply_decision(review_state, ReviewDecision::Keep);
}

#[when("the current account is marked for unfollowing")]
fn unfollow_current(review_state: &ReviewFlowState) {
    apply_decision(review_state, ReviewDecision::Unfollow);
}

#[when("the current account is skipped")]
fn skip_current(review_state: &ReviewFlowState) {
    apply_decision(review_state, ReviewDecision::Skip);
}

#[when("the reviewer steps back")]
fn step_back(review_state: &ReviewFlowState) {
    apply_decision(review_state, ReviewDecision::Back);
}

/// Applies a decision and persists it the way the TUI does: only the
/// touched record plus the cursor, in one transaction.
#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn apply_decision(review_state: &ReviewFlowState, decision: ReviewDecision) {
    let mut store = review_state
        .store
        .take()
        .expect("review session not initialised");
    if let Some(outcome) = store.decide(decision, decision_time()) {
        let ledger = review_state
            .ledger
            .with_ref(Clone::clone)
            .expect("ledger not initialised");
        let changed = outcome.changed.and_then(|index| store.get(index));
        ledger
            .record_decision(changed, outcome.cursor)
            .expect("decision should persist");
    }
    review_state.store.set(store);
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[when("the session is reloaded from disk")]
fn reload_session(review_state: &ReviewFlowState) {
    let ledger = review_state
        .ledger
        .with_ref(Clone::clone)
        .expect("ledger not initialised");
    let store = ledger.load().expect("session should reload");
    drop(review_state.store.take());
    review_state.store.set(store);
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[when("the ledger is cleared")]
fn clear_ledger(review_state: &ReviewFlowState) {
    let ledger = review_state
        .ledger
        .with_ref(Clone::clone)
        .expect("ledger not initialised");
    ledger.clear().expect("clear should succeed");
}

// --- Then steps ---

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("the account {handle} has status {status}")]
fn account_has_status(review_state: &ReviewFlowState, handle: String, status: String) {
    let handle_clean = handle.trim_matches('"').to_owned();
    let status_clean = status.trim_matches('"').to_owned();

    let actual = review_state
        .store
        .with_ref(|store| {
            store
                .accounts()
                .iter()
                .find(|record| record.handle.as_str() == handle_clean)
                .map(|record| record.status.as_str().to_owned())
        })
        .expect("review session not initialised")
        .unwrap_or_else(|| panic!("no stored account for handle {handle_clean}"));

    assert_eq!(actual, status_clean, "status mismatch for {handle_clean}");
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("the cursor rests on {handle}")]
fn cursor_rests_on(review_state: &ReviewFlowState, handle: String) {
    let handle_clean = handle.trim_matches('"').to_owned();

    let current = review_state
        .store
        .with_ref(|store| {
            store
                .current()
                .map(|record| record.handle.as_str().to_owned())
        })
        .expect("review session not initialised")
        .unwrap_or_else(|| panic!("cursor points at no account"));

    assert_eq!(current, handle_clean, "cursor mismatch");
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("the stats report {reviewed} reviewed and {pending} pending")]
fn stats_report(review_state: &ReviewFlowState, reviewed: String, pending: String) {
    let expected_reviewed: usize = reviewed.parse().expect("reviewed count should be numeric");
    let expected_pending: usize = pending.parse().expect("pending count should be numeric");

    let stats = review_state
        .store
        .with_ref(ReviewStore::stats)
        .expect("review session not initialised");

    assert_eq!(stats.reviewed, expected_reviewed, "reviewed count mismatch");
    assert_eq!(stats.pending, expected_pending, "pending count mismatch");
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("the reloaded store is empty")]
fn reloaded_store_is_empty(review_state: &ReviewFlowState) {
    let ledger = review_state
        .ledger
        .with_ref(Clone::clone)
        .expect("ledger not initialised");
    let store = ledger.load().expect("session should reload");
    assert!(store.is_empty(), "expected an empty store after clearing");
    assert_eq!(store.cursor(), 0);
}

#[scenario(path = "tests/features/review_flow.feature", index = 0)]
fn keeping_advances_to_next_pending(review_state: ReviewFlowState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_flow.feature", index = 1)]
fn unfollow_requests_are_recorded(review_state: ReviewFlowState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_flow.feature", index = 2)]
fn skipping_leaves_the_account_pending(review_state: ReviewFlowState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_flow.feature", index = 3)]
fn stepping_back_reopens_the_previous_decision(review_state: ReviewFlowState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_flow.feature", index = 4)]
fn decisions_survive_a_restart(review_state: ReviewFlowState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_flow.feature", index = 5)]
fn clearing_removes_every_account(review_state: ReviewFlowState) {
    let _ = review_state;
}
