//! Export data models for review ledger output.
//!
//! This module defines the flattened row structure used by the CSV and
//! Markdown writers and the format selection enum for CLI integration.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{AccountRecord, SourceHost};

/// Errors raised while exporting the review ledger.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested format name is not recognised.
    #[error("unsupported export format '{value}': valid options are 'csv' or 'markdown'")]
    UnsupportedFormat {
        /// Format name as supplied by the user.
        value: String,
    },
    /// Template compilation or rendering failed.
    #[error("failed to render export template: {message}")]
    Template {
        /// Description of the template failure.
        message: String,
    },
    /// Writing the export document failed.
    #[error("failed to write export output: {message}")]
    Io {
        /// Description of the underlying I/O failure.
        message: String,
    },
}

/// An account prepared for export with every field rendered as text.
///
/// This structure flattens an [`AccountRecord`] into the exact strings the
/// export documents carry. It is constructed via [`ExportedAccount::from_record`],
/// which needs the source host to derive the profile URL.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportedAccount {
    /// Account handle without the `@` prefix.
    pub handle: String,
    /// Display name.
    pub name: String,
    /// Whether the account follows the user: `yes`, `no`, or empty when unknown.
    pub follows_you: &'static str,
    /// Review status wire word.
    pub status: &'static str,
    /// Absolute profile URL on the source host.
    pub profile_url: String,
    /// Decision timestamp in ISO 8601 format, empty while pending.
    pub decided_at: String,
}

impl ExportedAccount {
    /// Flattens a stored account into export row form.
    #[must_use]
    pub fn from_record(record: &AccountRecord, host: &SourceHost) -> Self {
        Self {
            handle: record.handle.as_str().to_owned(),
            name: record.name.clone(),
            follows_you: match record.follows_you {
                Some(true) => "yes",
                Some(false) => "no",
                None => "",
            },
            status: record.status.as_str(),
            profile_url: record.profile_url(host),
            decided_at: record.decided_at.map_or_else(String::new, |decided| {
                decided.to_rfc3339_opts(SecondsFormat::Millis, true)
            }),
        }
    }
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Spreadsheet-friendly comma-separated values.
    Csv,
    /// Human-readable Markdown checklist for manual unfollowing.
    Markdown,
}

impl ExportFormat {
    /// File extension for documents in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(ExportError::UnsupportedFormat { value: s.to_owned() }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Builds the generated file name for an export document.
///
/// The name embeds the UTC timestamp in milliseconds so repeated exports
/// never collide.
#[must_use]
pub fn export_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!(
        "followsweep-export-{}.{}",
        now.timestamp_millis(),
        format.extension()
    )
}
