//! Text filter state for the review session.
//!
//! The filter is a case-insensitive substring match over an account's
//! handle or display name. It restricts which accounts are presented for
//! review without touching their stored order or review status. Editing
//! happens in a separate buffer so cancelling an edit restores the
//! previously committed query.

use crate::model::AccountRecord;

/// State of the text filter, including any edit in progress.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Committed filter query.
    query: String,
    /// Buffer for the query while it is being edited.
    draft: String,
    /// Whether the filter is currently being edited.
    editing: bool,
}

impl FilterState {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the query as it looks mid-edit.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns true while an edit is in progress.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Returns true when a non-blank query is committed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Begins editing, seeding the draft with the committed query.
    pub fn start_edit(&mut self) {
        self.draft = self.query.clone();
        self.editing = true;
    }

    /// Appends a character to the draft.
    pub fn push_char(&mut self, c: char) {
        if self.editing {
            self.draft.push(c);
        }
    }

    /// Removes the last character of the draft.
    pub fn pop_char(&mut self) {
        if self.editing {
            self.draft.pop();
        }
    }

    /// Commits the draft as the new query.
    pub fn submit(&mut self) {
        if self.editing {
            self.query = self.draft.clone();
            self.editing = false;
        }
    }

    /// Abandons the edit, keeping the previously committed query.
    pub fn cancel(&mut self) {
        self.draft.clear();
        self.editing = false;
    }

    /// Clears the committed query.
    pub fn clear(&mut self) {
        self.query.clear();
        self.draft.clear();
        self.editing = false;
    }

    /// Returns true if the record's handle or name contains the query.
    ///
    /// An inactive filter matches everything.
    #[must_use]
    pub fn matches(&self, record: &AccountRecord) -> bool {
        if !self.is_active() {
            return true;
        }
        let needle = self.query.trim().to_lowercase();
        record.handle.as_str().to_lowercase().contains(&needle)
            || record.name.to_lowercase().contains(&needle)
    }

    /// Counts the records matching the committed query.
    #[must_use]
    pub fn count_matches(&self, accounts: &[AccountRecord]) -> usize {
        accounts
            .iter()
            .filter(|record| self.matches(record))
            .count()
    }

    /// Finds the first pending record matching the committed query.
    ///
    /// Used to redirect the cursor when the account under review falls
    /// outside the filtered set.
    #[must_use]
    pub fn first_pending_match(&self, accounts: &[AccountRecord]) -> Option<usize> {
        accounts
            .iter()
            .position(|record| record.status.is_pending() && self.matches(record))
    }
}
