//! Scanning of the following list.
//!
//! A scan walks a [`source::FollowingSource`] viewport in scroll/extract
//! cycles, accumulates accounts deduplicated by handle, and reports its
//! lifecycle through [`events::ScanEvent`]s. The production source replays
//! a capture file recorded from the platform's following page.

pub mod capture;
mod engine;
pub mod error;
pub mod events;
pub mod source;

pub use capture::{CAPTURE_KIND, CaptureHeader, CaptureSource};
pub use engine::{
    DEFAULT_MAX_ACCOUNTS, DEFAULT_SCAN_TIMEOUT_MS, DEFAULT_SCROLL_DELAY_MS, ScanEndReason,
    ScanLauncher, ScanLimits, ScanOutcome, run_scan,
};
pub use error::ScanError;
pub use events::{ScanEvent, ScanEventReceiver, ScanEventSender};
pub use source::FollowingSource;
