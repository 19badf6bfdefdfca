//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    Start,
    /// Pause when running, resume otherwise.
    Toggle,
    Reset,
    Skip,
    NextField,
    PreviousField,
    /// Type a digit into the selected settings field.
    Digit(char),
    Backspace,
    /// Apply the pending settings input.
    Commit,
    /// Drop the pending settings input.
    CancelEdit,
    Help,
}

/// Wait up to `timeout` for a key press and translate it.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_action(timeout: Duration, editing: bool) -> std::io::Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key, editing)),
        _ => Ok(None),
    }
}

/// Translate a key press. `editing` is true while a settings value is
/// being typed, which changes what Enter and Esc mean.
pub fn map_key(key: KeyEvent, editing: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Esc if editing => Action::CancelEdit,
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,

        KeyCode::Char('s') => Action::Start,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Toggle,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('n') => Action::Skip,

        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => Action::NextField,
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => Action::PreviousField,

        KeyCode::Char(c) if c.is_ascii_digit() => Action::Digit(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Enter => Action::Commit,

        KeyCode::Char('?') => Action::Help,
        _ => return None,
    };
    Some(action)
}
