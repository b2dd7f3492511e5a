//! The scan engine: drives a [`FollowingSource`] until a stop condition.
//!
//! Each cycle extracts the visible accounts, merges the not-yet-seen ones
//! into the accumulator, reports progress, and scrolls forward. The scan
//! stops when the account limit is reached, when three consecutive cycles
//! surface nothing new, when the scroll budget runs out, or when the
//! wall-clock deadline passes. Deadline expiry is a normal completion with
//! partial results, not an error; only a source failure aborts the scan.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use super::error::ScanError;
use super::events::ScanEventSender;
use super::source::FollowingSource;
use crate::model::{Handle, ScrapedAccount};

/// Default account limit per scan.
pub const DEFAULT_MAX_ACCOUNTS: usize = 200;
/// Default delay between scrolls, in milliseconds.
pub const DEFAULT_SCROLL_DELAY_MS: u64 = 1000;
/// Default wall-clock budget for one scan, in milliseconds.
pub const DEFAULT_SCAN_TIMEOUT_MS: u64 = 60_000;
/// Consecutive no-new-account cycles after which the list counts as
/// exhausted.
const MAX_STALL_CYCLES: usize = 3;
/// Scroll attempts after which the scan stops regardless of progress.
const MAX_SCROLL_ATTEMPTS: usize = 100;

/// Tunable bounds for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Stop once this many accounts have accumulated.
    pub max_accounts: usize,
    /// Pause between scrolls so the list can load.
    pub scroll_delay: Duration,
    /// Wall-clock budget for the whole scan.
    pub timeout: Duration,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_accounts: DEFAULT_MAX_ACCOUNTS,
            scroll_delay: Duration::from_millis(DEFAULT_SCROLL_DELAY_MS),
            timeout: Duration::from_millis(DEFAULT_SCAN_TIMEOUT_MS),
        }
    }
}

/// Why a scan stopped accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEndReason {
    /// The configured account limit was reached.
    LimitReached,
    /// Three consecutive cycles surfaced no new accounts.
    ListExhausted,
    /// The scroll budget ran out.
    ScrollBudgetExhausted,
    /// The wall-clock deadline passed; the accumulation is partial.
    TimedOut,
}

impl ScanEndReason {
    /// Short human-readable description for summaries and logs.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::LimitReached => "account limit reached",
            Self::ListExhausted => "end of list reached",
            Self::ScrollBudgetExhausted => "scroll budget exhausted",
            Self::TimedOut => "timed out with partial results",
        }
    }
}

impl fmt::Display for ScanEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Result of a finished scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// Accounts accumulated, in first-seen order.
    pub accounts: Vec<ScrapedAccount>,
    /// Why the scan stopped.
    pub reason: ScanEndReason,
}

/// Runs one scan over the given source.
///
/// Emits progress events as the accumulation grows and exactly one
/// terminal event: a completion carrying the accounts (for every stop
/// reason, including timeout), or an error when the source fails. A source
/// failure discards the partial accumulation.
///
/// # Errors
///
/// Returns the underlying [`ScanError`] when extraction or scrolling
/// fails.
pub async fn run_scan<S>(
    source: &mut S,
    limits: &ScanLimits,
    events: &ScanEventSender,
) -> Result<ScanOutcome, ScanError>
where
    S: FollowingSource + ?Sized,
{
    let deadline = Instant::now() + limits.timeout;
    let mut collected: Vec<ScrapedAccount> = Vec::new();
    let mut seen: HashSet<Handle> = HashSet::new();
    let mut stall_cycles = 0_usize;
    let mut scroll_attempts = 0_usize;

    let reason = loop {
        if Instant::now() >= deadline {
            break ScanEndReason::TimedOut;
        }
        if collected.len() >= limits.max_accounts {
            break ScanEndReason::LimitReached;
        }

        let visible = match source.visible_accounts().await {
            Ok(accounts) => accounts,
            Err(error) => {
                events.error(error.to_string());
                return Err(error);
            }
        };

        let mut new_count = 0_usize;
        for account in visible {
            if seen.insert(account.handle.clone()) {
                collected.push(account);
                new_count += 1;
            }
        }
        events.progress(collected.len(), limits.max_accounts);
        tracing::debug!(
            cycle = scroll_attempts + 1,
            new = new_count,
            total = collected.len(),
            "scan cycle"
        );

        if new_count == 0 {
            stall_cycles += 1;
            if stall_cycles >= MAX_STALL_CYCLES {
                break ScanEndReason::ListExhausted;
            }
        } else {
            stall_cycles = 0;
        }

        if collected.len() >= limits.max_accounts {
            break ScanEndReason::LimitReached;
        }

        if let Err(error) = source.scroll_forward().await {
            events.error(error.to_string());
            return Err(error);
        }
        scroll_attempts += 1;
        let wake = Instant::now() + limits.scroll_delay;
        sleep_until(wake.min(deadline)).await;

        if scroll_attempts > MAX_SCROLL_ATTEMPTS {
            break ScanEndReason::ScrollBudgetExhausted;
        }
    };

    tracing::debug!(%reason, count = collected.len(), "scan finished");
    events.complete(collected.clone());
    Ok(ScanOutcome {
        accounts: collected,
        reason,
    })
}

/// Spawns scans as background tasks, admitting at most one at a time.
#[derive(Debug, Default, Clone)]
pub struct ScanLauncher {
    running: Arc<AtomicBool>,
}

impl ScanLauncher {
    /// Creates an idle launcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a launched scan is still in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Launches a scan on a background task.
    ///
    /// The returned handle can be awaited for the outcome or aborted to
    /// cancel the scan; cancellation releases the single-flight slot.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::AlreadyRunning`] when a previously launched
    /// scan has not finished.
    pub fn try_start<S>(
        &self,
        mut source: S,
        limits: ScanLimits,
        events: ScanEventSender,
    ) -> Result<JoinHandle<Result<ScanOutcome, ScanError>>, ScanError>
    where
        S: FollowingSource + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ScanError::AlreadyRunning);
        }
        let slot = RunningSlot {
            flag: Arc::clone(&self.running),
        };
        Ok(tokio::spawn(async move {
            let _slot = slot;
            run_scan(&mut source, &limits, &events).await
        }))
    }
}

/// Clears the running flag when the scan task finishes or is dropped.
struct RunningSlot {
    flag: Arc<AtomicBool>,
}

impl Drop for RunningSlot {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
