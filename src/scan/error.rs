//! Error types for the scan layer.

use thiserror::Error;

/// Errors raised while preparing or running a following-list scan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// A scan is already in flight; only one may run at a time.
    #[error("a scan is already running")]
    AlreadyRunning,

    /// The capture file could not be read.
    #[error("failed to read capture file: {message}")]
    CaptureUnreadable {
        /// Error detail from the filesystem.
        message: String,
    },

    /// The capture file does not describe a following list.
    #[error("capture is not usable: {message}")]
    CaptureInvalid {
        /// Detail describing why the capture was rejected.
        message: String,
    },

    /// Extracting accounts from the source failed mid-scan.
    #[error("account extraction failed: {message}")]
    ExtractionFailed {
        /// Error detail from the source.
        message: String,
    },

    /// Advancing the source viewport failed mid-scan.
    #[error("scrolling the following list failed: {message}")]
    ScrollFailed {
        /// Error detail from the source.
        message: String,
    },
}
