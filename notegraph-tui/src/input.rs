//! Key → action translation.
//!
//! Keeps keybinding choices out of the screen handlers: `app` dispatches on
//! [`Action`], never on raw key codes. Text-entry screens get their own
//! mapping so that letters type instead of triggering commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    /// Create a new project or node, depending on the screen.
    New,
    /// Edit the viewed node.
    Edit,
    /// Delete the selected project or node.
    Delete,
    /// Open the selection, or follow the highlighted link in the viewer.
    Activate,
    /// Move the link cursor to the next link.
    CycleLink,
    /// Pop the back-history stack.
    Back,
    /// Commit the content editor.
    Save,
    /// Leave the current screen.
    Cancel,
    SubmitText,
    Backspace,
    InputChar(char),
    Noop,
}

pub fn action_for_key(key: KeyEvent, text_mode: bool) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('s') => Action::Save,
            _ => Action::Noop,
        };
    }

    if text_mode {
        return match key.code {
            KeyCode::Enter => Action::SubmitText,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::Noop,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Enter => Action::Activate,
        KeyCode::Tab => Action::CycleLink,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('n') => Action::New,
        KeyCode::Char('e') => Action::Edit,
        KeyCode::Char('d') => Action::Delete,
        KeyCode::Char('b') => Action::Back,
        _ => Action::Noop,
    }
}
