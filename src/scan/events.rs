//! Scan lifecycle events and the channel that relays them.
//!
//! Events use a tagged wire shape (`type` plus a `data` payload) so they can
//! be logged or replayed as JSON. Delivery is fire-and-forget: the scan
//! never learns whether anything is listening, and a send to a closed
//! channel is logged and dropped rather than surfaced.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::model::ScrapedAccount;

/// A scan lifecycle event.
///
/// Exactly one terminal event (`ScanComplete` or `ScanError`) ends every
/// scan; progress events may arrive any number of times before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanEvent {
    /// Accounts accumulated so far out of the configured limit.
    ScanProgress {
        /// Accounts accumulated so far.
        current: usize,
        /// The configured account limit.
        total: usize,
    },
    /// The scan finished and these accounts were collected.
    ScanComplete {
        /// Accounts collected, in first-seen order.
        accounts: Vec<ScrapedAccount>,
        /// Number of accounts collected.
        count: usize,
    },
    /// The scan aborted; no accounts were collected.
    ScanError {
        /// Human-readable failure detail.
        message: String,
    },
}

/// Receiving half of the scan event channel.
pub type ScanEventReceiver = mpsc::UnboundedReceiver<ScanEvent>;

/// Sending half of the scan event channel.
///
/// Cloneable so the scan task can own one while a launcher keeps another.
#[derive(Debug, Clone)]
pub struct ScanEventSender {
    tx: mpsc::UnboundedSender<ScanEvent>,
}

impl ScanEventSender {
    /// Emits a progress event.
    pub fn progress(&self, current: usize, total: usize) {
        self.send(ScanEvent::ScanProgress { current, total });
    }

    /// Emits the successful terminal event.
    pub fn complete(&self, accounts: Vec<ScrapedAccount>) {
        let count = accounts.len();
        self.send(ScanEvent::ScanComplete { accounts, count });
    }

    /// Emits the failure terminal event.
    pub fn error(&self, message: impl Into<String>) {
        self.send(ScanEvent::ScanError {
            message: message.into(),
        });
    }

    fn send(&self, event: ScanEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("scan event dropped: no consumer attached");
        }
    }
}

/// Creates the scan event channel.
#[must_use]
pub fn channel() -> (ScanEventSender, ScanEventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ScanEventSender { tx }, rx)
}
