//! In-session scan handlers for the review TUI.
//!
//! A scan launched with `r` runs as a background task; its lifecycle
//! events are pumped into the MVU loop one at a time by a re-armed
//! receive command. Completion merges the collected accounts into the
//! store through the ledger, so the UI layer stays the sole writer of
//! persisted state.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Cmd;
use chrono::Utc;
use tokio::sync::Mutex;

use super::ReviewApp;
use crate::model::ScrapedAccount;
use crate::scan::{CaptureSource, ScanEvent, ScanEventReceiver, events};
use crate::tui::messages::AppMsg;
use crate::tui::storage;

impl ReviewApp {
    /// Dispatches scan messages to their handlers.
    pub(super) fn handle_scan_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ScanRequested => self.handle_scan_requested(),
            AppMsg::ScanEvent(event) => self.handle_scan_event(event),
            _ => {
                debug_assert!(false, "non-scan message routed to handle_scan_msg");
                None
            }
        }
    }

    /// Launches a scan of the configured capture file.
    ///
    /// The capture is opened and validated before anything is mutated; a
    /// bad capture or a scan already in flight surfaces as a banner.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_scan_requested(&mut self) -> Option<Cmd> {
        if self.scanning || self.launcher.is_running() {
            return Some(self.show_status_banner("A scan is already running".to_owned()));
        }

        let Some(context) = storage::get_scan_context() else {
            return Some(self.show_status_banner(
                "No capture file configured; start with --capture to enable scanning".to_owned(),
            ));
        };

        let source = match CaptureSource::open(&context.capture) {
            Ok(source) => source,
            Err(error) => return Some(self.show_error_banner(error.to_string())),
        };

        let (sender, receiver) = events::channel();
        let task = match self.launcher.try_start(source, context.limits, sender) {
            Ok(task) => task,
            Err(error) => return Some(self.show_error_banner(error.to_string())),
        };

        self.scanning = true;
        self.scan_progress = None;
        self.scan_task = Some(task);
        let receiver = Arc::new(Mutex::new(receiver));
        self.scan_events = Some(Arc::clone(&receiver));

        Some(Self::recv_scan_event_cmd(receiver))
    }

    /// Handles one event from the running scan.
    ///
    /// Progress events re-arm the receive command; the terminal events
    /// drop the receiver and release the scanning flag.
    fn handle_scan_event(&mut self, event: &ScanEvent) -> Option<Cmd> {
        match event {
            ScanEvent::ScanProgress { current, total } => {
                self.scan_progress = Some((*current, *total));
                self.scan_events
                    .as_ref()
                    .map(|receiver| Self::recv_scan_event_cmd(Arc::clone(receiver)))
            }
            ScanEvent::ScanComplete { accounts, count } => {
                self.handle_scan_complete(accounts.clone(), *count)
            }
            ScanEvent::ScanError { message } => {
                self.finish_scan();
                Some(self.show_error_banner(format!("Scan failed: {message}")))
            }
        }
    }

    /// Merges a completed scan into the store and persists the result.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_scan_complete(&mut self, accounts: Vec<ScrapedAccount>, count: usize) -> Option<Cmd> {
        self.finish_scan();

        let report = self.store.merge_scanned(accounts, Utc::now());
        if let Err(error) = self.ledger.replace_all(&self.store) {
            tracing::warn!(%error, "scan merge write failed; rolling back to disk state");
            self.reload_store();
            return Some(self.show_error_banner(format!("Scan results not saved: {error}")));
        }

        storage::record_scan_telemetry(count, report.added, "completed");
        self.sync_display();
        Some(self.show_status_banner(format!(
            "Scan complete: {count} accounts ({} new)",
            report.added
        )))
    }

    fn finish_scan(&mut self) {
        self.scanning = false;
        self.scan_progress = None;
        self.scan_events = None;
        self.scan_task = None;
    }

    /// Creates a command that delivers the next scan event as a message.
    ///
    /// Resolves to `None` when the sending side is gone, which ends the
    /// receive loop.
    fn recv_scan_event_cmd(receiver: Arc<Mutex<ScanEventReceiver>>) -> Cmd {
        Box::pin(async move {
            let event = receiver.lock().await.recv().await?;
            Some(Box::new(AppMsg::ScanEvent(event)) as Box<dyn Any + Send>)
        })
    }

    /// Progress of the running scan, for the progress line.
    pub(super) const fn scan_progress(&self) -> Option<(usize, usize)> {
        self.scan_progress
    }
}
