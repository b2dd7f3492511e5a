//! Terminal User Interface for reviewing followed accounts.
//!
//! This module provides an interactive TUI for triaging a following list one
//! account at a time using the bubbletea-rs framework.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::ReviewApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Filter and banner state management
//! - [`components`]: Reusable UI components
//! - [`input`]: Key-to-message mapping for input handling
//!
//! # Initial Data Loading
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, we use a module-level storage pattern for initial data. Call
//! [`set_initial_store`] and [`set_session_ledger`] before starting the
//! program, and `ReviewApp::init()` will automatically retrieve the data.
//!
//! # Scanning
//!
//! Similarly, [`set_scan_context`] must be called to enable the in-app scan
//! feature. This stores the capture file path and limits used when the user
//! requests a scan from inside the TUI.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod state;
mod storage;

pub use app::ReviewApp;
pub use storage::{
    ScanContext, set_initial_store, set_initial_terminal_size, set_scan_context, set_session_host,
    set_session_ledger, set_telemetry_sink,
};
