//! Source abstraction for reading the following list.
//!
//! The scan engine only ever sees this trait, so the page-reading side can
//! be swapped for capture playback in production and scripted fakes in
//! tests.

use async_trait::async_trait;

use super::error::ScanError;
use crate::model::ScrapedAccount;

/// A viewport onto the following list.
///
/// `visible_accounts` returns what the viewport currently shows, already
/// deduplicated within the frame; `scroll_forward` advances the viewport so
/// further accounts become visible. Sources are stateful, hence `&mut`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowingSource: Send {
    /// Returns the accounts currently visible in the viewport.
    async fn visible_accounts(&mut self) -> Result<Vec<ScrapedAccount>, ScanError>;

    /// Advances the viewport towards the end of the list.
    async fn scroll_forward(&mut self) -> Result<(), ScanError>;
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    //! Scripted sources for exercising the scan engine.

    use async_trait::async_trait;

    use super::FollowingSource;
    use crate::model::{Handle, ScrapedAccount};
    use crate::scan::error::ScanError;

    /// Builds a scraped account with only the handle populated.
    ///
    /// # Panics
    ///
    /// Panics when the handle is not a valid account handle.
    #[must_use]
    #[expect(clippy::expect_used, reason = "fixtures accept only valid handles")]
    pub fn scraped(handle: &str) -> ScrapedAccount {
        ScrapedAccount {
            handle: Handle::new(handle).expect("test handle should be valid"),
            name: None,
            avatar: None,
            bio: None,
            follows_you: None,
        }
    }

    /// A [`FollowingSource`] that plays back a fixed list of frames.
    ///
    /// Scrolling advances one frame; past the final frame the last frame
    /// keeps repeating, which lets the engine's stall detection terminate.
    /// An extraction failure can be injected at a given call index.
    #[derive(Debug, Default)]
    pub struct ScriptedSource {
        frames: Vec<Vec<ScrapedAccount>>,
        position: usize,
        extraction_calls: usize,
        scroll_calls: usize,
        fail_extraction_at: Option<usize>,
    }

    impl ScriptedSource {
        /// Creates a source that replays the given frames in order.
        #[must_use]
        pub fn new(frames: Vec<Vec<ScrapedAccount>>) -> Self {
            Self {
                frames,
                ..Self::default()
            }
        }

        /// Injects an extraction failure at the given zero-based call index.
        #[must_use]
        pub const fn with_extraction_failure(mut self, call_index: usize) -> Self {
            self.fail_extraction_at = Some(call_index);
            self
        }

        /// Number of extraction calls made so far.
        #[must_use]
        pub const fn extraction_calls(&self) -> usize {
            self.extraction_calls
        }

        /// Number of scroll calls made so far.
        #[must_use]
        pub const fn scroll_calls(&self) -> usize {
            self.scroll_calls
        }
    }

    #[async_trait]
    impl FollowingSource for ScriptedSource {
        async fn visible_accounts(&mut self) -> Result<Vec<ScrapedAccount>, ScanError> {
            let call = self.extraction_calls;
            self.extraction_calls += 1;
            if self.fail_extraction_at == Some(call) {
                return Err(ScanError::ExtractionFailed {
                    message: "scripted extraction failure".to_owned(),
                });
            }
            Ok(self.frames.get(self.position).cloned().unwrap_or_default())
        }

        async fn scroll_forward(&mut self) -> Result<(), ScanError> {
            self.scroll_calls += 1;
            let last = self.frames.len().saturating_sub(1);
            if self.position < last {
                self.position += 1;
            }
            Ok(())
        }
    }
}
