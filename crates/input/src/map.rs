//! Key mapping from terminal events to board actions.

use crate::types::BoardAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to board actions.
pub fn handle_key_event(key: KeyEvent) -> Option<BoardAction> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(BoardAction::Reshuffle),
        KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Tab => Some(BoardAction::CycleLayout),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(BoardAction::ToggleLiveStream),
        _ => None,
    }
}

/// Check if key should quit the board.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
