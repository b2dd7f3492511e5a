//! State management for the review TUI.
//!
//! This module provides the pure state types behind the interactive
//! session: the text filter and the timed status banners.

mod banner;
mod filter;

pub use banner::{Banner, BannerKind, GUIDANCE_BANNER_TTL, STATUS_BANNER_TTL};
pub use filter::FilterState;
