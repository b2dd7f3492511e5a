//! Message types for the TUI update loop.
//!
//! This module defines all message types that can be sent to the application's
//! update function. Messages represent user actions, async command results,
//! and system events.

use crate::review::ReviewDecision;
use crate::scan::ScanEvent;

/// Messages for the review TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Review decisions
    /// Apply a decision to the account under review.
    Decide(ReviewDecision),

    // Filter editing
    /// Begin editing the text filter.
    StartFilterEdit,
    /// Append a character to the filter being edited.
    FilterInput(char),
    /// Delete the last character of the filter being edited.
    FilterBackspace,
    /// Commit the edited filter.
    FilterSubmit,
    /// Abandon the edit, restoring the previous filter.
    FilterCancel,
    /// Clear the committed filter.
    FilterClear,

    // Scan lifecycle
    /// Start a scan of the configured capture.
    ScanRequested,
    /// An event arrived from the running scan.
    ScanEvent(ScanEvent),

    // Store operations
    /// Export the store to a CSV document.
    ExportRequested,
    /// Ask for confirmation before clearing the store.
    ClearRequested,
    /// Confirm the pending clear.
    ConfirmYes,
    /// Abandon the pending clear.
    ConfirmNo,

    // Banners
    /// A banner's display time elapsed.
    BannerExpired {
        /// Generation stamp of the banner the timer was armed for.
        generation: u64,
    },

    // Application lifecycle
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for messages that decide the current account.
    #[must_use]
    pub const fn is_decision(&self) -> bool {
        matches!(self, Self::Decide(_))
    }

    /// Returns true for messages that edit or clear the text filter.
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::StartFilterEdit
                | Self::FilterInput(_)
                | Self::FilterBackspace
                | Self::FilterSubmit
                | Self::FilterCancel
                | Self::FilterClear
        )
    }

    /// Returns true for messages belonging to the scan lifecycle.
    #[must_use]
    pub const fn is_scan(&self) -> bool {
        matches!(self, Self::ScanRequested | Self::ScanEvent(_))
    }

    /// Returns true for export, clear, and clear-confirmation messages.
    #[must_use]
    pub const fn is_store_operation(&self) -> bool {
        matches!(
            self,
            Self::ExportRequested | Self::ClearRequested | Self::ConfirmYes | Self::ConfirmNo
        )
    }
}
