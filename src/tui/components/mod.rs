//! UI components for the review TUI.
//!
//! This module provides the rendering components for the single-account
//! review flow. Each component is a pure view: it renders a context of
//! borrowed state into a string.

mod account_card;
mod stats_bar;
pub(crate) mod text;

pub use account_card::{AccountCardComponent, AccountCardViewContext};
pub use stats_bar::StatsBarComponent;
