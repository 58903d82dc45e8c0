//! Key bindings for the interactive shell

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Editor action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    HistoryPrevious,
    HistoryNext,
    Complete,
    Backspace,
    Insert(char),
    /// Page back through the transcript
    ScrollUp,
    /// Page towards the prompt
    ScrollDown,
    Quit,
}

/// Map a key event to an action. Key releases are ignored.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Some(KeyAction::Quit),
        KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Enter => Some(KeyAction::Submit),
        KeyCode::Up => Some(KeyAction::HistoryPrevious),
        KeyCode::Down => Some(KeyAction::HistoryNext),
        KeyCode::Tab => Some(KeyAction::Complete),
        KeyCode::PageUp => Some(KeyAction::ScrollUp),
        KeyCode::PageDown => Some(KeyAction::ScrollDown),
        KeyCode::Backspace => Some(KeyAction::Backspace),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(KeyAction::Insert(c))
        }
        _ => None,
    }
}
