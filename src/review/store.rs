//! In-memory review store and decision state machine.
//!
//! The store owns the ordered account list and the cursor. It performs no
//! IO and takes the current time as an argument, so every transition can be
//! exercised deterministically in tests. Persistence happens outside, via
//! the ledger, after each transition.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::model::{AccountRecord, Handle, ReviewStatus, ScrapedAccount};

/// A review decision applied to the account under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Keep following the account.
    Keep,
    /// Mark the account for manual unfollowing.
    Unfollow,
    /// Defer the decision and move on.
    Skip,
    /// Step back to the previous account and reopen it.
    Back,
}

/// Result of merging one scan's accounts into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of accounts appended by this merge.
    pub added: usize,
    /// Number of accounts in the store after the merge.
    pub total: usize,
}

/// Result of applying a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    /// The decision that was applied.
    pub decision: ReviewDecision,
    /// Index of the record whose status changed, when one did. Skip moves
    /// the cursor without touching any record.
    pub changed: Option<usize>,
    /// Cursor position after the decision.
    pub cursor: usize,
}

/// Aggregate review progress counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
    /// Total stored accounts.
    pub total: usize,
    /// Accounts with a recorded decision.
    pub reviewed: usize,
    /// Accounts marked kept.
    pub kept: usize,
    /// Accounts marked for unfollowing.
    pub unfollow_requested: usize,
    /// Accounts still awaiting a decision.
    pub pending: usize,
}

/// Ordered collection of accounts under review plus the cursor.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    accounts: Vec<AccountRecord>,
    cursor: usize,
}

impl ReviewStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accounts: Vec::new(),
            cursor: 0,
        }
    }

    /// Rebuilds a store from persisted parts, clamping the cursor into the
    /// valid range (0 when the list is empty).
    #[must_use]
    pub fn from_parts(accounts: Vec<AccountRecord>, cursor: usize) -> Self {
        let clamped = clamp_cursor(cursor, accounts.len());
        Self {
            accounts,
            cursor: clamped,
        }
    }

    /// Borrow the stored accounts in review order.
    #[must_use]
    pub fn accounts(&self) -> &[AccountRecord] {
        &self.accounts
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamping into the valid range.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = clamp_cursor(cursor, self.accounts.len());
    }

    /// Number of stored accounts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true when no accounts are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// The record under the cursor, if any.
    #[must_use]
    pub fn current(&self) -> Option<&AccountRecord> {
        self.accounts.get(self.cursor)
    }

    /// The record at an arbitrary index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AccountRecord> {
        self.accounts.get(index)
    }

    /// Returns true when a record with this handle is already stored.
    #[must_use]
    pub fn contains(&self, handle: &Handle) -> bool {
        self.accounts.iter().any(|record| &record.handle == handle)
    }

    /// Merges one scan's accounts into the store.
    ///
    /// Accounts whose handle is already stored are skipped, so repeated
    /// scans never duplicate records and never disturb recorded decisions.
    /// New accounts are appended in scan order as pending. The cursor
    /// resets to the start so the next review pass covers the full list.
    pub fn merge_scanned(
        &mut self,
        scanned: Vec<ScrapedAccount>,
        now: DateTime<Utc>,
    ) -> MergeReport {
        let mut seen: HashSet<Handle> =
            self.accounts.iter().map(|r| r.handle.clone()).collect();
        let mut added = 0_usize;
        for account in scanned {
            if seen.contains(&account.handle) {
                continue;
            }
            seen.insert(account.handle.clone());
            self.accounts.push(AccountRecord::from_scraped(account, now));
            added += 1;
        }
        self.cursor = 0;
        MergeReport {
            added,
            total: self.accounts.len(),
        }
    }

    /// Applies a decision to the record under the cursor.
    ///
    /// Keep and unfollow stamp the record with `now` and advance the
    /// cursor; skip advances the cursor only; back steps the cursor to the
    /// previous record and reopens it as pending. The cursor never moves
    /// past the final record. Returns `None` when the decision is a no-op
    /// (empty store, or back at the first record).
    pub fn decide(
        &mut self,
        decision: ReviewDecision,
        now: DateTime<Utc>,
    ) -> Option<DecisionOutcome> {
        if self.accounts.is_empty() {
            return None;
        }
        let last_index = self.accounts.len().saturating_sub(1);
        match decision {
            ReviewDecision::Keep | ReviewDecision::Unfollow => {
                let index = self.cursor;
                let record = self.accounts.get_mut(index)?;
                record.status = match decision {
                    ReviewDecision::Keep => ReviewStatus::Kept,
                    _ => ReviewStatus::UnfollowRequested,
                };
                record.decided_at = Some(now);
                self.cursor = index.saturating_add(1).min(last_index);
                Some(DecisionOutcome {
                    decision,
                    changed: Some(index),
                    cursor: self.cursor,
                })
            }
            ReviewDecision::Skip => {
                self.cursor = self.cursor.saturating_add(1).min(last_index);
                Some(DecisionOutcome {
                    decision,
                    changed: None,
                    cursor: self.cursor,
                })
            }
            ReviewDecision::Back => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor = self.cursor.saturating_sub(1);
                let index = self.cursor;
                let record = self.accounts.get_mut(index)?;
                record.status = ReviewStatus::Pending;
                record.decided_at = None;
                Some(DecisionOutcome {
                    decision,
                    changed: Some(index),
                    cursor: index,
                })
            }
        }
    }

    /// Finds the next pending record, searching forward from `from`
    /// (inclusive) and wrapping around to the start.
    #[must_use]
    pub fn find_next_pending(&self, from: usize) -> Option<usize> {
        let len = self.accounts.len();
        if len == 0 {
            return None;
        }
        let start = if from >= len { 0 } else { from };
        self.accounts
            .iter()
            .enumerate()
            .cycle()
            .skip(start)
            .take(len)
            .find(|(_, record)| record.status.is_pending())
            .map(|(index, _)| index)
    }

    /// Removes every stored account and resets the cursor.
    pub fn clear(&mut self) {
        self.accounts.clear();
        self.cursor = 0;
    }

    /// Aggregate progress counts over the stored accounts.
    #[must_use]
    pub fn stats(&self) -> ReviewStats {
        let mut stats = ReviewStats {
            total: self.accounts.len(),
            ..ReviewStats::default()
        };
        for record in &self.accounts {
            match record.status {
                ReviewStatus::Pending => stats.pending += 1,
                ReviewStatus::Kept => stats.kept += 1,
                ReviewStatus::UnfollowRequested => stats.unfollow_requested += 1,
            }
        }
        stats.reviewed = stats.kept + stats.unfollow_requested;
        stats
    }
}

const fn clamp_cursor(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if cursor >= len {
        len - 1
    } else {
        cursor
    }
}
