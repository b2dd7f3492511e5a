//! Capture playback source.
//!
//! Scans run against a capture file recorded from the platform's following
//! page: a JSON Lines document whose first line is a header describing what
//! was captured, followed by one line per viewport frame (a JSON array of
//! account objects). Scrolling advances one frame; once the capture is
//! exhausted the final frame keeps repeating, so a scan over a short
//! capture ends through the engine's stall detection, mirroring a real
//! list that has stopped loading new rows.

use std::fs;

use async_trait::async_trait;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::ScanError;
use super::source::FollowingSource;
use crate::model::ScrapedAccount;

/// The capture kind this crate can scan.
pub const CAPTURE_KIND: &str = "following";

/// Header line of a capture file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptureHeader {
    /// What the capture was taken from; must be [`CAPTURE_KIND`].
    pub kind: String,
    /// Host the capture was recorded on, when the recorder noted it.
    #[serde(default)]
    pub host: Option<String>,
    /// When the capture was recorded, when the recorder noted it.
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

/// A [`FollowingSource`] that replays a recorded capture file.
#[derive(Debug)]
pub struct CaptureSource {
    header: CaptureHeader,
    frames: Vec<String>,
    position: usize,
}

impl CaptureSource {
    /// Opens a capture file and validates its header.
    ///
    /// Only the header is parsed here. Frame lines are parsed lazily while
    /// the scan runs, so a corrupt frame surfaces as an extraction failure
    /// rather than blocking the scan from starting.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CaptureUnreadable`] when the file cannot be
    /// read and [`ScanError::CaptureInvalid`] when the header is missing,
    /// malformed, or describes something other than a following list.
    pub fn open(path: &Utf8Path) -> Result<Self, ScanError> {
        let contents = fs::read_to_string(path).map_err(|error| ScanError::CaptureUnreadable {
            message: format!("{path}: {error}"),
        })?;
        Self::from_contents(&contents)
    }

    /// Builds a capture source from in-memory capture contents.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::CaptureInvalid`] when the header is missing,
    /// malformed, or describes something other than a following list.
    pub fn from_contents(contents: &str) -> Result<Self, ScanError> {
        let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
        let Some(header_line) = lines.next() else {
            return Err(ScanError::CaptureInvalid {
                message: "capture is empty; expected a header line".to_owned(),
            });
        };
        let header: CaptureHeader =
            serde_json::from_str(header_line).map_err(|error| ScanError::CaptureInvalid {
                message: format!("capture header is not valid JSON: {error}"),
            })?;
        if header.kind != CAPTURE_KIND {
            return Err(ScanError::CaptureInvalid {
                message: format!(
                    "capture kind {:?} is not a following list; rerun the recorder on the \
                     following page",
                    header.kind
                ),
            });
        }
        let frames = lines.map(ToOwned::to_owned).collect();
        Ok(Self {
            header,
            frames,
            position: 0,
        })
    }

    /// The validated capture header.
    #[must_use]
    pub const fn header(&self) -> &CaptureHeader {
        &self.header
    }

    /// Number of frames recorded in the capture.
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn current_frame(&self) -> Result<Vec<ScrapedAccount>, ScanError> {
        let Some(line) = self.frames.get(self.position) else {
            return Ok(Vec::new());
        };
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(line).map_err(|error| ScanError::ExtractionFailed {
                message: format!("capture frame {} is not a JSON array: {error}", self.position),
            })?;
        let mut accounts = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<ScrapedAccount>(value) {
                Ok(account) if account.handle.is_reserved() => {
                    tracing::trace!(handle = %account.handle, "skipping reserved platform path");
                }
                Ok(account) => accounts.push(account),
                Err(error) => {
                    tracing::trace!(%error, "skipping unparseable capture entry");
                }
            }
        }
        Ok(accounts)
    }
}

#[async_trait]
impl FollowingSource for CaptureSource {
    async fn visible_accounts(&mut self) -> Result<Vec<ScrapedAccount>, ScanError> {
        self.current_frame()
    }

    async fn scroll_forward(&mut self) -> Result<(), ScanError> {
        let last = self.frames.len().saturating_sub(1);
        if self.position < last {
            self.position += 1;
        }
        Ok(())
    }
}
