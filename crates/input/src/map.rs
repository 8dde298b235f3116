//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key event to a game action.
///
/// Releases and auto-repeats are ignored so that one physical press yields
/// one action.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Char('c' | 'C' | 'x' | 'X') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char('c' | 'C') => Some(GameAction::RotateCw),
        KeyCode::Char('x' | 'X') => Some(GameAction::RotateCcw),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
