//! Structured export of the review ledger.
//!
//! This module renders reviewed accounts for use outside the application.
//!
//! # Supported Formats
//!
//! - **CSV**: one row per stored account, spreadsheet-friendly
//! - **Markdown**: a checklist of unfollow-requested accounts with profile
//!   links, for working through manual unfollows
//!
//! # Ordering
//!
//! Accounts are exported in stored order, which matches the order the scan
//! first observed them.

mod csv;
mod markdown;
mod model;

pub use self::csv::write_csv;
pub use markdown::write_markdown;
pub use model::{ExportError, ExportFormat, ExportedAccount, export_file_name};
