//! Key mapping for the terminal UI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press translated into something the app understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move selection up.
    Up,
    /// Move selection down.
    Down,
    /// Confirm / submit.
    Select,
    /// Leave the current screen.
    Back,
    /// Delete the last typed character.
    Backspace,
    /// A printable character.
    Char(char),
    /// Exit the program from anywhere.
    Quit,
}

/// Maps a key event to an [`Action`]. Release events and unmapped keys yield
/// `None`.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) => Some(Action::Char(c)),
        _ => None,
    }
}
