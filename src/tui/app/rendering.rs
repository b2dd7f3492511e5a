//! Rendering logic for the review TUI application.
//!
//! This module contains the view rendering methods that produce string output
//! for display in the terminal. These are pure query methods that read state
//! without modification.

use super::ReviewApp;
use crate::tui::components::{AccountCardComponent, AccountCardViewContext, StatsBarComponent};
use crate::tui::state::BannerKind;

impl ReviewApp {
    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let title = "FollowSweep - Following Review";
        let scanning_indicator = if self.scanning { " [Scanning...]" } else { "" };
        format!("{title}{scanning_indicator}\n")
    }

    /// Renders the filter bar.
    ///
    /// While editing, the draft is shown with a cursor marker; with a
    /// committed filter, the match count. No filter, no bar.
    pub(super) fn render_filter_bar(&self) -> String {
        if self.filter.is_editing() {
            return format!("Filter: {}_\n", self.filter.draft());
        }
        if self.filter.is_active() {
            let matched = self.filter.count_matches(self.store.accounts());
            let total = self.store.len();
            return format!("Filter: {} ({matched}/{total})\n", self.filter.query());
        }
        String::new()
    }

    /// Renders the scan progress line while a scan is running.
    pub(super) fn render_scan_progress(&self) -> String {
        self.scan_progress()
            .map_or_else(String::new, |(current, total)| {
                format!("Scanning: {current}/{total} accounts\n")
            })
    }

    /// Renders the body: the account card or a placeholder state.
    pub(super) fn render_body(&self) -> String {
        if self.store.is_empty() {
            return "No accounts stored yet. Press r to scan a capture file.\n".to_owned();
        }

        match self.displayed_record() {
            Some((index, record)) => {
                let ctx = AccountCardViewContext {
                    record,
                    position: index.saturating_add(1),
                    total: self.store.len(),
                    max_width: usize::from(self.width),
                };
                AccountCardComponent::view(&ctx)
            }
            None => {
                if self.store.find_next_pending(0).is_none() {
                    "All accounts reviewed. Press e to export or x to clear.\n".to_owned()
                } else {
                    "No pending accounts match the filter. Press Esc to clear it.\n".to_owned()
                }
            }
        }
    }

    /// Renders the stats bar.
    pub(super) fn render_stats_bar(&self) -> String {
        let stats = self.store.stats();
        format!("{}\n", StatsBarComponent::view(&stats))
    }

    /// Renders the status bar: confirmation prompt, banner, or key hints.
    pub(super) fn render_status_bar(&self) -> String {
        if self.confirm_clear {
            return format!(
                "Clear all {} accounts? This cannot be undone. [y/n]\n",
                self.store.len()
            );
        }

        if let Some(banner) = &self.banner {
            let prefix = match banner.kind {
                BannerKind::Error => "Error: ",
                BannerKind::Status | BannerKind::Guidance => "",
            };
            return format!("{prefix}{}\n", banner.text);
        }

        format!("{}\n", self.status_hints())
    }

    const fn status_hints(&self) -> &'static str {
        if self.filter.is_editing() {
            "type to filter  Enter:apply  Esc:cancel"
        } else if self.width <= 80 {
            "k:keep  u:unfollow  s:skip  b:back  ?:help  q:quit"
        } else {
            "k:keep  u:unfollow  s:skip  b:back  r:scan  e:export  /:filter  x:clear  ?:help  q:quit"
        }
    }

    /// Renders the help overlay if visible.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Decisions:
  k          Keep following this account
  u          Mark for unfollowing (opens the profile in your browser;
             the unfollow itself is confirmed there by you)
  s          Skip for now
  b          Go back and reopen the previous account

Filtering:
  /          Edit the text filter (matches handle or name)
  Enter      Apply the filter being edited
  Esc        Clear the filter / cancel editing

Other:
  r          Scan the configured capture file
  e          Export all accounts to CSV
  x          Clear all accounts (asks for confirmation)
  ?          Toggle this help
  q          Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}
