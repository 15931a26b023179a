//! Key mapping for the game screen.

use crate::game::DashInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(DashInput),
    Quit,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => KeyAction::Game(DashInput::Jump),
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(DashInput::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Game(DashInput::Other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_jump_bindings() {
        assert_eq!(
            map_key(key(KeyCode::Char(' '))),
            KeyAction::Game(DashInput::Jump)
        );
        assert_eq!(map_key(key(KeyCode::Up)), KeyAction::Game(DashInput::Jump));
    }

    #[test]
    fn test_restart_binding() {
        assert_eq!(
            map_key(key(KeyCode::Char('r'))),
            KeyAction::Game(DashInput::Restart)
        );
    }

    #[test]
    fn test_quit_bindings() {
        assert_eq!(map_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_plain_c_is_not_quit() {
        assert_eq!(
            map_key(key(KeyCode::Char('c'))),
            KeyAction::Game(DashInput::Other)
        );
    }
}
