//! Decision, export, and clear handlers for the review TUI.
//!
//! Every state transition here follows the same order: mutate the
//! in-memory store, persist through the ledger, and only then run any
//! externally visible side effect. A failed write rolls the store back to
//! disk state and surfaces a banner instead of the side effect.

use std::any::Any;
use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use bubbletea_rs::Cmd;
use chrono::Utc;

use super::ReviewApp;
use crate::export::{ExportError, ExportFormat, export_file_name, write_csv};
use crate::review::ReviewDecision;
use crate::tui::messages::AppMsg;
use crate::tui::state::{Banner, BannerKind};
use crate::tui::storage;

impl ReviewApp {
    /// Dispatches decision messages to their handler.
    pub(super) fn handle_decision_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Decide(decision) => self.handle_decision(*decision),
            _ => {
                debug_assert!(false, "non-decision message routed to handle_decision_msg");
                None
            }
        }
    }

    /// Dispatches export, clear, and confirmation messages to their
    /// handlers.
    pub(super) fn handle_store_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ExportRequested => self.handle_export_requested(),
            AppMsg::ClearRequested => self.handle_clear_requested(),
            AppMsg::ConfirmYes => self.handle_confirm_yes(),
            AppMsg::ConfirmNo => self.handle_confirm_no(),
            _ => {
                debug_assert!(false, "non-store message routed to handle_store_msg");
                None
            }
        }
    }

    /// Applies a decision to the account under the cursor and persists it.
    ///
    /// Unfollow additionally opens the account's profile in the browser,
    /// but only after the decision has reached disk.
    fn handle_decision(&mut self, decision: ReviewDecision) -> Option<Cmd> {
        let outcome = self.store.decide(decision, Utc::now())?;

        let changed = outcome.changed.and_then(|index| self.store.get(index));
        if let Err(error) = self.ledger.record_decision(changed, outcome.cursor) {
            tracing::warn!(%error, "decision write failed; rolling back to disk state");
            self.reload_store();
            return Some(self.show_error_banner(format!("Decision not saved: {error}")));
        }

        let cmd = if decision == ReviewDecision::Unfollow {
            self.open_profile(outcome.changed)
        } else {
            None
        };
        self.sync_display();
        cmd
    }

    /// Opens the decided account's profile in the default browser.
    ///
    /// A successful launch shows the manual-confirmation guidance banner;
    /// the unfollow itself is never performed by this tool.
    fn open_profile(&mut self, changed: Option<usize>) -> Option<Cmd> {
        let index = changed?;
        let record = self.store.get(index)?;
        let url = record.profile_url(&self.host);
        let handle = record.handle.to_string();
        match webbrowser::open(&url) {
            Ok(()) => Some(self.show_guidance_banner(format!(
                "Opened {handle} in the browser. Confirm the unfollow there; \
                 nothing is unfollowed automatically."
            ))),
            Err(error) => {
                tracing::warn!(%error, url, "browser launch failed");
                Some(self.show_error_banner(format!("Could not open {url}: {error}")))
            }
        }
    }

    /// Exports the store to a generated CSV file in the working directory.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    fn handle_export_requested(&mut self) -> Option<Cmd> {
        if self.store.is_empty() {
            return Some(self.show_status_banner("No accounts to export".to_owned()));
        }

        let file_name = export_file_name(ExportFormat::Csv, Utc::now());
        match self.write_export(&file_name) {
            Ok(count) => {
                Some(self.show_status_banner(format!("Exported {count} accounts to {file_name}")))
            }
            Err(error) => Some(self.show_error_banner(format!("Export failed: {error}"))),
        }
    }

    fn write_export(&self, file_name: &str) -> Result<usize, ExportError> {
        let file = File::create(file_name).map_err(|error| ExportError::Io {
            message: format!("{file_name}: {error}"),
        })?;
        let mut writer = BufWriter::new(file);
        write_csv(&mut writer, self.store.accounts(), &self.host)?;
        Ok(self.store.len())
    }

    /// Arms the clear confirmation; the store is only cleared after an
    /// explicit `y`.
    fn handle_clear_requested(&mut self) -> Option<Cmd> {
        if self.store.is_empty() {
            return Some(self.show_status_banner("Nothing to clear".to_owned()));
        }
        self.confirm_clear = true;
        None
    }

    /// Clears the store after confirmation, ledger first.
    fn handle_confirm_yes(&mut self) -> Option<Cmd> {
        if !self.confirm_clear {
            return None;
        }
        self.confirm_clear = false;

        match self.ledger.clear() {
            Ok(removed) => {
                self.store.clear();
                self.filter.clear();
                storage::record_clear_telemetry(removed);
                Some(self.show_status_banner(format!("Cleared {removed} accounts")))
            }
            Err(error) => Some(self.show_error_banner(format!("Clear failed: {error}"))),
        }
    }

    fn handle_confirm_no(&mut self) -> Option<Cmd> {
        self.confirm_clear = false;
        None
    }

    /// Replaces the in-memory store with whatever the ledger holds.
    ///
    /// Called after a failed write so the display never drifts from disk.
    pub(super) fn reload_store(&mut self) {
        match self.ledger.load() {
            Ok(store) => {
                self.store = store;
                self.sync_display();
            }
            Err(error) => {
                tracing::warn!(%error, "store reload after failed write also failed");
            }
        }
    }

    // Banner helpers

    pub(super) fn show_status_banner(&mut self, text: String) -> Cmd {
        self.show_banner(text, BannerKind::Status)
    }

    pub(super) fn show_error_banner(&mut self, text: String) -> Cmd {
        self.show_banner(text, BannerKind::Error)
    }

    pub(super) fn show_guidance_banner(&mut self, text: String) -> Cmd {
        self.show_banner(text, BannerKind::Guidance)
    }

    /// Installs a banner and returns the command that dismisses it.
    ///
    /// The generation stamp ensures a stale timer never dismisses a newer
    /// banner.
    fn show_banner(&mut self, text: String, kind: BannerKind) -> Cmd {
        self.banner_generation = self.banner_generation.wrapping_add(1);
        let generation = self.banner_generation;
        self.banner = Some(Banner::new(text, kind, generation));
        Self::banner_dismiss_cmd(kind.ttl(), generation)
    }

    fn banner_dismiss_cmd(ttl: Duration, generation: u64) -> Cmd {
        Box::pin(async move {
            tokio::time::sleep(ttl).await;
            Some(Box::new(AppMsg::BannerExpired { generation }) as Box<dyn Any + Send>)
        })
    }
}
