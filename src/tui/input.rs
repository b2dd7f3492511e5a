//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages. The mapping depends on the current
//! input mode so that filter editing captures printable characters and the
//! clear confirmation only accepts an explicit answer.

use crate::review::ReviewDecision;

use super::messages::AppMsg;

/// Which keys the application currently listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Decision keys and command keys are live.
    Normal,
    /// Printable characters feed the filter being edited.
    FilterEditing,
    /// Only `y`/`n` (or Escape) are accepted.
    ConfirmClear,
    /// Any key closes the help overlay.
    Help,
}

/// Maps a key event to an application message.
///
/// Returns `None` for key events that have no meaning in the current mode,
/// allowing them to be ignored.
#[must_use]
pub fn map_key_to_message(key: &bubbletea_rs::event::KeyMsg, mode: InputMode) -> Option<AppMsg> {
    match mode {
        InputMode::Normal => map_normal_key(key),
        InputMode::FilterEditing => map_filter_key(key),
        InputMode::ConfirmClear => map_confirm_key(key),
        InputMode::Help => Some(AppMsg::ToggleHelp),
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_normal_key(key: &bubbletea_rs::event::KeyMsg) -> Option<AppMsg> {
    use crossterm::event::KeyCode;

    match key.key {
        KeyCode::Char('k') => Some(AppMsg::Decide(ReviewDecision::Keep)),
        KeyCode::Char('u') => Some(AppMsg::Decide(ReviewDecision::Unfollow)),
        KeyCode::Char('s') => Some(AppMsg::Decide(ReviewDecision::Skip)),
        KeyCode::Char('b') => Some(AppMsg::Decide(ReviewDecision::Back)),
        KeyCode::Char('r') => Some(AppMsg::ScanRequested),
        KeyCode::Char('e') => Some(AppMsg::ExportRequested),
        KeyCode::Char('/') => Some(AppMsg::StartFilterEdit),
        KeyCode::Char('x') => Some(AppMsg::ClearRequested),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Esc => Some(AppMsg::FilterClear),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_filter_key(key: &bubbletea_rs::event::KeyMsg) -> Option<AppMsg> {
    use crossterm::event::KeyCode;

    match key.key {
        KeyCode::Enter => Some(AppMsg::FilterSubmit),
        KeyCode::Esc => Some(AppMsg::FilterCancel),
        KeyCode::Backspace => Some(AppMsg::FilterBackspace),
        KeyCode::Char(c) => Some(AppMsg::FilterInput(c)),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_confirm_key(key: &bubbletea_rs::event::KeyMsg) -> Option<AppMsg> {
    use crossterm::event::KeyCode;

    match key.key {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(AppMsg::ConfirmYes),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(AppMsg::ConfirmNo),
        _ => None,
    }
}
