//! Main TUI application model implementing the MVU pattern.
//!
//! This module provides the core application state and update logic for the
//! review TUI. It presents one pending account at a time, applies decisions
//! to the review store, and persists every transition before any side
//! effect runs.
//!
//! # Module Structure
//!
//! - `rendering`: View rendering methods for terminal output
//! - `decision_handlers`: Decision, export, and clear handling
//! - `scan_handlers`: In-session scan launch and event handling

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::{Cmd, Model};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::model::{AccountRecord, SourceHost};
use crate::persistence::ReviewLedger;
use crate::review::ReviewStore;
use crate::scan::{ScanError, ScanEventReceiver, ScanLauncher, ScanOutcome};

use super::input::{InputMode, map_key_to_message};
use super::messages::AppMsg;
use super::state::{Banner, FilterState};
use super::storage;

mod decision_handlers;
mod rendering;
mod scan_handlers;

/// Main application model for the review TUI.
#[derive(Debug)]
pub struct ReviewApp {
    /// The review store holding accounts and the cursor.
    pub(crate) store: ReviewStore,
    /// Ledger decisions are persisted to.
    ledger: ReviewLedger,
    /// Host profile URLs are derived from.
    host: SourceHost,
    /// Text filter state.
    pub(crate) filter: FilterState,
    /// Currently displayed banner, if any.
    pub(crate) banner: Option<Banner>,
    /// Generation stamp handed to banner dismiss timers.
    banner_generation: u64,
    /// Whether a scan launched from this session is still running.
    pub(crate) scanning: bool,
    /// Progress of the running scan (accumulated, limit).
    scan_progress: Option<(usize, usize)>,
    /// Receiver the running scan's events arrive on.
    scan_events: Option<Arc<Mutex<ScanEventReceiver>>>,
    /// Handle of the running scan task, aborted on quit.
    scan_task: Option<JoinHandle<Result<ScanOutcome, ScanError>>>,
    /// Launcher enforcing one scan at a time.
    launcher: ScanLauncher,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether the help overlay is visible.
    pub(crate) show_help: bool,
    /// Whether a clear-store confirmation is pending.
    pub(crate) confirm_clear: bool,
}

impl ReviewApp {
    /// Creates a new application over the given store, ledger, and host.
    ///
    /// The cursor is re-synced to the next pending account so the first
    /// frame shows something actionable.
    #[must_use]
    pub fn new(store: ReviewStore, ledger: ReviewLedger, host: SourceHost) -> Self {
        let mut app = Self {
            store,
            ledger,
            host,
            filter: FilterState::new(),
            banner: None,
            banner_generation: 0,
            scanning: false,
            scan_progress: None,
            scan_events: None,
            scan_task: None,
            launcher: ScanLauncher::new(),
            width: 80,
            height: 24,
            show_help: false,
            confirm_clear: false,
        };
        app.sync_display();
        app
    }

    /// Returns the input mode key presses are interpreted under.
    #[must_use]
    pub(crate) const fn input_mode(&self) -> InputMode {
        if self.show_help {
            InputMode::Help
        } else if self.confirm_clear {
            InputMode::ConfirmClear
        } else if self.filter.is_editing() {
            InputMode::FilterEditing
        } else {
            InputMode::Normal
        }
    }

    /// The account the card should show, with its index in the store.
    ///
    /// This is the next pending account from the cursor; when a filter is
    /// active and that account falls outside the filtered set, the display
    /// is redirected to the first pending account matching the filter.
    /// `None` when nothing displayable remains (store empty, everything
    /// reviewed, or no pending account matches the filter).
    #[must_use]
    pub(crate) fn displayed_record(&self) -> Option<(usize, &AccountRecord)> {
        let index = self.store.find_next_pending(self.store.cursor())?;
        let record = self.store.get(index)?;
        if self.filter.is_active() && !self.filter.matches(record) {
            let redirected = self.filter.first_pending_match(self.store.accounts())?;
            let redirected_record = self.store.get(redirected)?;
            return Some((redirected, redirected_record));
        }
        Some((index, record))
    }

    /// Moves the cursor onto the displayed account.
    ///
    /// The move is in-memory only; the cursor reaches disk with the next
    /// recorded decision.
    pub(crate) fn sync_display(&mut self) {
        let target = self.displayed_record().map(|(index, _)| index);
        if let Some(index) = target {
            self.store.set_cursor(index);
        }
    }

    /// Handles a message and updates state accordingly.
    ///
    /// This method is the core update function that processes all
    /// application messages and returns any resulting commands. It
    /// delegates to specialised handlers for each message category to keep
    /// cyclomatic complexity low.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_decision() {
            return self.handle_decision_msg(msg);
        }
        if msg.is_filter() {
            return self.handle_filter_msg(msg);
        }
        if msg.is_scan() {
            return self.handle_scan_msg(msg);
        }
        if msg.is_store_operation() {
            return self.handle_store_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches filter messages to their handlers.
    fn handle_filter_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::StartFilterEdit => self.filter.start_edit(),
            AppMsg::FilterInput(c) => self.filter.push_char(*c),
            AppMsg::FilterBackspace => self.filter.pop_char(),
            AppMsg::FilterSubmit => {
                self.filter.submit();
                self.sync_display();
            }
            AppMsg::FilterCancel => self.filter.cancel(),
            AppMsg::FilterClear => {
                self.filter.clear();
                self.sync_display();
            }
            _ => {
                debug_assert!(false, "non-filter message routed to handle_filter_msg");
            }
        }
        None
    }

    /// Dispatches lifecycle and window messages to their handlers.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::BannerExpired { generation } => self.handle_banner_expired(*generation),
            AppMsg::Quit => {
                // An in-flight scan dies with the session; its partial
                // result is discarded, not merged.
                if let Some(task) = self.scan_task.take() {
                    task.abort();
                }
                Some(bubbletea_rs::quit())
            }
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => self.handle_resize(*width, *height),
            _ => {
                debug_assert!(
                    false,
                    "non-lifecycle message routed to handle_lifecycle_msg"
                );
                None
            }
        }
    }

    fn handle_banner_expired(&mut self, generation: u64) -> Option<Cmd> {
        if self
            .banner
            .as_ref()
            .is_some_and(|banner| banner.matches_generation(generation))
        {
            self.banner = None;
        }
        None
    }

    // Window event handlers

    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        None
    }
}

impl Model for ReviewApp {
    fn init() -> (Self, Option<Cmd>) {
        // Retrieve initial data from module-level storage
        let store = storage::get_initial_store();
        let ledger = storage::get_session_ledger();
        let host = storage::get_session_host();
        let mut model = Self::new(store, ledger, host);

        let (width, height) = storage::get_initial_terminal_size();
        model.width = width;
        model.height = height;

        (model, None)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        // Try to downcast to our message type
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        // Handle key events from bubbletea-rs
        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if let Some(mapped) = map_key_to_message(key_msg, self.input_mode()) {
                return self.handle_message(&mapped);
            }
        }

        // Handle window size messages
        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        // If help is shown, render overlay instead
        if self.show_help {
            return self.render_help_overlay();
        }

        let mut output = String::new();

        output.push_str(&self.render_header());
        output.push_str(&self.render_filter_bar());
        output.push_str(&self.render_scan_progress());
        output.push('\n');
        output.push_str(&self.render_body());
        output.push('\n');
        output.push_str(&self.render_stats_bar());
        output.push_str(&self.render_status_bar());

        output
    }
}
