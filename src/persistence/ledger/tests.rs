//! Tests for the review ledger.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::ReviewLedger;
use crate::model::{Handle, ReviewStatus, ScrapedAccount};
use crate::persistence::{PersistenceError, migrate_database};
use crate::review::{ReviewDecision, ReviewStore};
use crate::telemetry::NoopTelemetrySink;

#[fixture]
fn temp_db() -> FixtureResult<(TempDir, String)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("followsweep.sqlite");
    Ok((temp_dir, db_path.to_string_lossy().to_string()))
}

#[fixture]
fn migrated_ledger(
    temp_db: FixtureResult<(TempDir, String)>,
) -> FixtureResult<(TempDir, ReviewLedger)> {
    let (temp_dir, database_url) = temp_db?;
    migrate_database(&database_url, &NoopTelemetrySink)?;

    let ledger = ReviewLedger::new(database_url)?;
    Ok((temp_dir, ledger))
}

fn scraped(handle: &str) -> ScrapedAccount {
    ScrapedAccount {
        handle: Handle::new(handle).expect("test handle should be valid"),
        name: Some(format!("{handle} name")),
        avatar: Some(format!("https://pbs.example/{handle}.jpg")),
        bio: Some(format!("bio for {handle}")),
        follows_you: Some(handle.len() % 2 == 0),
    }
}

fn seeded_store(handles: &[&str]) -> ReviewStore {
    let now = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("timestamp should be valid");
    let mut store = ReviewStore::new();
    store.merge_scanned(handles.iter().map(|h| scraped(h)).collect(), now);
    store
}

#[test]
fn blank_database_url_is_rejected() {
    assert!(matches!(
        ReviewLedger::new("   "),
        Err(PersistenceError::BlankDatabaseUrl)
    ));
}

#[rstest]
fn empty_ledger_loads_an_empty_store(
    migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>,
) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");

    let store = ledger.load().expect("load should succeed");

    assert!(store.is_empty());
    assert_eq!(store.cursor(), 0);
}

#[rstest]
fn sessions_round_trip_through_the_ledger(
    migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>,
) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");
    let mut store = seeded_store(&["alice", "bob", "carol"]);
    let decided_at = Utc
        .with_ymd_and_hms(2024, 5, 2, 9, 30, 0)
        .single()
        .expect("timestamp should be valid");
    store.decide(ReviewDecision::Keep, decided_at);
    store.decide(ReviewDecision::Unfollow, decided_at);

    ledger.replace_all(&store).expect("write should succeed");
    let loaded = ledger.load().expect("load should succeed");

    assert_eq!(loaded.accounts(), store.accounts());
    assert_eq!(loaded.cursor(), store.cursor());
}

#[rstest]
fn replace_all_overwrites_previous_sessions(
    migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>,
) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");
    ledger
        .replace_all(&seeded_store(&["alice", "bob"]))
        .expect("first write should succeed");

    ledger
        .replace_all(&seeded_store(&["carol"]))
        .expect("second write should succeed");

    let loaded = ledger.load().expect("load should succeed");
    assert_eq!(loaded.len(), 1);
    assert_eq!(
        loaded.get(0).map(|r| r.handle.as_str()),
        Some("carol")
    );
}

#[rstest]
fn decisions_persist_atomically(migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");
    let mut store = seeded_store(&["alice", "bob"]);
    ledger.replace_all(&store).expect("seed should succeed");

    let decided_at = Utc
        .with_ymd_and_hms(2024, 5, 2, 9, 30, 0)
        .single()
        .expect("timestamp should be valid");
    let outcome = store
        .decide(ReviewDecision::Keep, decided_at)
        .expect("decision should apply");
    let changed = outcome.changed.and_then(|index| store.get(index));
    ledger
        .record_decision(changed, outcome.cursor)
        .expect("decision write should succeed");

    let loaded = ledger.load().expect("load should succeed");
    let alice = loaded.get(0).expect("alice should be stored");
    assert_eq!(alice.status, ReviewStatus::Kept);
    assert_eq!(alice.decided_at, Some(decided_at));
    assert_eq!(loaded.cursor(), 1);
}

#[rstest]
fn cursor_only_decisions_persist(migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");
    ledger
        .replace_all(&seeded_store(&["alice", "bob"]))
        .expect("seed should succeed");

    ledger
        .record_decision(None, 1)
        .expect("cursor write should succeed");

    let loaded = ledger.load().expect("load should succeed");
    assert_eq!(loaded.cursor(), 1);
    assert!(loaded.accounts().iter().all(|r| r.status.is_pending()));
}

#[rstest]
fn unknown_handles_roll_the_whole_write_back(
    migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>,
) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");
    ledger
        .replace_all(&seeded_store(&["alice"]))
        .expect("seed should succeed");

    let mut ghost_store = seeded_store(&["ghost"]);
    let decided_at = Utc
        .with_ymd_and_hms(2024, 5, 2, 9, 30, 0)
        .single()
        .expect("timestamp should be valid");
    ghost_store.decide(ReviewDecision::Keep, decided_at);
    let ghost = ghost_store.get(0).expect("ghost record exists");

    let error = ledger
        .record_decision(Some(ghost), 5)
        .expect_err("unknown handle should fail");

    assert!(matches!(error, PersistenceError::WriteFailed { .. }));
    // The cursor update in the same transaction must not have committed.
    let loaded = ledger.load().expect("load should succeed");
    assert_eq!(loaded.cursor(), 0);
}

#[rstest]
fn clear_removes_accounts_and_resets_the_cursor(
    migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>,
) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");
    let mut store = seeded_store(&["alice", "bob"]);
    let decided_at = Utc
        .with_ymd_and_hms(2024, 5, 2, 9, 30, 0)
        .single()
        .expect("timestamp should be valid");
    store.decide(ReviewDecision::Keep, decided_at);
    ledger.replace_all(&store).expect("seed should succeed");

    let removed = ledger.clear().expect("clear should succeed");

    assert_eq!(removed, 2);
    let loaded = ledger.load().expect("load should succeed");
    assert!(loaded.is_empty());
    assert_eq!(loaded.cursor(), 0);
}

#[rstest]
fn missing_schema_is_reported(temp_db: FixtureResult<(TempDir, String)>) {
    let (_temp_dir, database_url) = temp_db.expect("fixture should succeed");
    let ledger = ReviewLedger::new(database_url).expect("ledger should construct");

    assert!(matches!(
        ledger.load(),
        Err(PersistenceError::SchemaNotInitialised)
    ));
}

#[rstest]
fn out_of_range_cursors_clamp_on_load(
    migrated_ledger: FixtureResult<(TempDir, ReviewLedger)>,
) {
    let (_temp_dir, ledger) = migrated_ledger.expect("fixture should succeed");
    ledger
        .replace_all(&seeded_store(&["alice", "bob"]))
        .expect("seed should succeed");

    ledger
        .record_decision(None, 99)
        .expect("cursor write should succeed");

    let loaded = ledger.load().expect("load should succeed");
    assert_eq!(loaded.cursor(), 1);
}
