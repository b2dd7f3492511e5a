//! FollowSweep library crate for reviewing a followed-accounts list.
//!
//! The library scans a captured following list into a local `SQLite` store,
//! walks the user through keep/unfollow/skip decisions one account at a
//! time, and exports the results. Unfollowing itself is never automated:
//! the most the tool does is open the profile in a browser so the user can
//! confirm by hand.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod persistence;
pub mod review;
pub mod scan;
pub mod telemetry;
pub mod tui;

pub use config::{FollowSweepConfig, OperationMode};
pub use error::SweepError;
pub use model::{AccountRecord, Handle, ModelError, ReviewStatus, ScrapedAccount, SourceHost};
pub use review::{ReviewDecision, ReviewStore};
