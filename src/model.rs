//! Core data model for followed-account review.
//!
//! The crate revolves around [`AccountRecord`]: one followed account as it
//! moves through the review lifecycle. Records are created when a scan is
//! merged, mutated only by review decisions, and removed only by clearing
//! the whole store. [`ScrapedAccount`] is the extraction-side shape before
//! review fields are attached.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Path segments on the platform that can never be account handles.
const RESERVED_SEGMENTS: [&str; 7] = [
    "home",
    "explore",
    "notifications",
    "messages",
    "compose",
    "i",
    "settings",
];

/// Errors produced while validating model values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The supplied handle was empty or contained disallowed characters.
    #[error("invalid account handle: {message}")]
    InvalidHandle {
        /// Detail describing the rejected input.
        message: String,
    },

    /// The supplied host name could not be used to derive profile URLs.
    #[error("invalid source host: {message}")]
    InvalidHost {
        /// Detail describing the rejected input.
        message: String,
    },

    /// The supplied review status word was not recognised.
    #[error("unknown review status: {message}")]
    InvalidStatus {
        /// The unrecognised status word.
        message: String,
    },
}

/// Unique, case-sensitive account handle without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Handle(String);

impl Handle {
    /// Validates and wraps a raw handle.
    ///
    /// A single leading `@` and surrounding whitespace are stripped. The
    /// remainder must be non-empty and consist of ASCII alphanumerics or
    /// underscores, matching the platform's profile path segment rules.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidHandle`] when the input is blank or
    /// contains characters outside the allowed set.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ModelError> {
        let trimmed = raw.as_ref().trim();
        let stripped = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if stripped.is_empty() {
            return Err(ModelError::InvalidHandle {
                message: "handle must not be blank".to_owned(),
            });
        }
        if !stripped
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ModelError::InvalidHandle {
                message: format!("handle {stripped:?} contains disallowed characters"),
            });
        }
        Ok(Self(stripped.to_owned()))
    }

    /// Borrow the handle value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true when the handle collides with a reserved platform path
    /// segment and therefore cannot belong to a real account.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        let lowered = self.0.to_ascii_lowercase();
        RESERVED_SEGMENTS.contains(&lowered.as_str())
    }
}

impl TryFrom<String> for Handle {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Validated host name of the platform profile pages are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHost(String);

impl SourceHost {
    /// Validates and wraps a host name such as `x.com`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidHost`] when the value does not parse as
    /// the host component of an `https` URL.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ModelError> {
        let candidate = raw.as_ref().trim();
        if candidate.is_empty() {
            return Err(ModelError::InvalidHost {
                message: "host must not be blank".to_owned(),
            });
        }
        let parsed =
            Url::parse(&format!("https://{candidate}/")).map_err(|error| ModelError::InvalidHost {
                message: format!("{candidate:?}: {error}"),
            })?;
        if parsed.host_str() != Some(candidate) {
            return Err(ModelError::InvalidHost {
                message: format!("{candidate:?} is not a bare host name"),
            });
        }
        Ok(Self(candidate.to_owned()))
    }

    /// Borrow the host name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for SourceHost {
    /// Returns the default source network host, `x.com`.
    fn default() -> Self {
        Self("x.com".to_owned())
    }
}

impl fmt::Display for SourceHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review lifecycle state of a stored account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// The user chose to keep following this account.
    Kept,
    /// The user asked to unfollow; confirmation happens manually.
    UnfollowRequested,
}

impl ReviewStatus {
    /// Returns the canonical status word used in storage and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Kept => "kept",
            Self::UnfollowRequested => "unfollow_requested",
        }
    }

    /// Returns true when the account still awaits a decision.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl FromStr for ReviewStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "kept" => Ok(Self::Kept),
            "unfollow_requested" => Ok(Self::UnfollowRequested),
            other => Err(ModelError::InvalidStatus {
                message: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One account as extracted from the following list, before review fields
/// are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedAccount {
    /// Account handle without the leading `@`.
    pub handle: Handle,
    /// Display name when one could be extracted.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar image URL when one could be extracted.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Profile bio when one could be extracted.
    #[serde(default)]
    pub bio: Option<String>,
    /// Whether the account follows the user back, when known.
    #[serde(default)]
    pub follows_you: Option<bool>,
}

/// A followed account under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Unique account handle.
    pub handle: Handle,
    /// Display name; falls back to the handle when extraction found none.
    pub name: String,
    /// Avatar image URL when known.
    pub avatar: Option<String>,
    /// Profile bio when known.
    pub bio: Option<String>,
    /// Whether the account follows the user back, when known.
    pub follows_you: Option<bool>,
    /// Current review state.
    pub status: ReviewStatus,
    /// When the account was first ingested by a scan.
    pub scanned_at: DateTime<Utc>,
    /// When the current decision was made; `None` while pending.
    pub decided_at: Option<DateTime<Utc>>,
}

impl AccountRecord {
    /// Builds a pending record from a scanned account.
    ///
    /// Blank extraction fields are normalised to `None` and the display
    /// name falls back to the handle.
    #[must_use]
    pub fn from_scraped(scraped: ScrapedAccount, scanned_at: DateTime<Utc>) -> Self {
        let name = scraped
            .name
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| scraped.handle.as_str().to_owned());
        Self {
            handle: scraped.handle,
            name,
            avatar: scraped.avatar.filter(|value| !value.trim().is_empty()),
            bio: scraped.bio.filter(|value| !value.trim().is_empty()),
            follows_you: scraped.follows_you,
            status: ReviewStatus::Pending,
            scanned_at,
            decided_at: None,
        }
    }

    /// Derives the profile URL for this account on the given host.
    #[must_use]
    pub fn profile_url(&self, host: &SourceHost) -> String {
        format!("https://{host}/{}", self.handle.as_str())
    }
}
