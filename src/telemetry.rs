//! Application telemetry events and sinks.
//!
//! FollowSweep is a local-first tool, but it still benefits from
//! lightweight telemetry to support debugging and to capture operational
//! signals such as the active database schema version and scan summaries.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by FollowSweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20260301000000`).
        schema_version: String,
    },

    /// Records the outcome of a finished scan after it merged into the
    /// review store.
    ScanMerged {
        /// Accounts the scan collected.
        collected: usize,
        /// Accounts that were new to the store.
        added: usize,
        /// Why the scan stopped.
        reason: String,
    },

    /// Records that the review store was cleared.
    StoreCleared {
        /// Number of accounts removed.
        removed: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    //! Telemetry sinks for assertions in tests.

    use std::sync::{Arc, Mutex, PoisonError};

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that stores recorded events for later inspection.
    ///
    /// Clones share the same event buffer, so a clone handed to the code
    /// under test feeds the instance the test asserts on.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingSink {
        events: Arc<Mutex<Vec<TelemetryEvent>>>,
    }

    impl RecordingSink {
        /// Drains and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain(..)
                .collect()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::{TelemetryEvent, TelemetrySink};

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingSink::default();
        sink.record(TelemetryEvent::SchemaVersionRecorded {
            schema_version: "20260301000000".to_owned(),
        });

        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::SchemaVersionRecorded {
                schema_version: "20260301000000".to_owned(),
            }]
        );
    }

    #[test]
    fn scan_merge_events_serialise_with_snake_case_tags() {
        let event = TelemetryEvent::ScanMerged {
            collected: 40,
            added: 12,
            reason: "end of list reached".to_owned(),
        };

        let json = serde_json::to_string(&event).expect("event serialises");

        assert!(json.starts_with(r#"{"type":"scan_merged""#));
        assert!(json.contains(r#""added":12"#));
    }
}
