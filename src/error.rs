//! Top-level error type surfaced by the CLI operation modes.

use thiserror::Error;

/// Errors reported to the user when an operation mode fails.
///
/// Layer-specific errors ([`crate::scan::ScanError`],
/// [`crate::persistence::PersistenceError`],
/// [`crate::export::ExportError`]) are mapped into these variants at the
/// CLI boundary so every mode exits with a single printable failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SweepError {
    /// Configuration could not be loaded or holds an unusable value.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A scan failed before producing results.
    #[error("scan failed: {message}")]
    Scan {
        /// Error detail from the scan engine or capture source.
        message: String,
    },

    /// The review ledger could not be opened, migrated, read, or written.
    #[error("persistence error: {message}")]
    Persistence {
        /// Error detail from the persistence layer.
        message: String,
    },

    /// Writing an export document failed.
    #[error("export failed: {message}")]
    Export {
        /// Error detail from the export writer.
        message: String,
    },

    /// A local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The terminal user interface failed to start or crashed.
    #[error("TUI error: {message}")]
    Tui {
        /// Error detail from the TUI runtime.
        message: String,
    },
}
