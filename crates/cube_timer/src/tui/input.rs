//! Key mapping for the timer.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key event means to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Space went down (or auto-repeated).
    SpacePress,
    /// Space came up.
    SpaceRelease,
    /// Request a fresh scramble.
    NewScramble,
    /// Leave the timer.
    Quit,
    /// Nothing to do.
    Ignore,
}

/// Maps a key event to a timer action.
pub fn map_key(key: KeyEvent) -> KeyAction {
    match (key.code, key.kind) {
        (KeyCode::Char(' '), KeyEventKind::Press | KeyEventKind::Repeat) => KeyAction::SpacePress,
        (KeyCode::Char(' '), KeyEventKind::Release) => KeyAction::SpaceRelease,
        (_, KeyEventKind::Release) => KeyAction::Ignore,
        (KeyCode::Char('c'), _) if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Char('q') | KeyCode::Esc, _) => KeyAction::Quit,
        (KeyCode::Char('n'), _) => KeyAction::NewScramble,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn space_press_and_release_distinguished() {
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyEventKind::Press)),
            KeyAction::SpacePress
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyEventKind::Repeat)),
            KeyAction::SpacePress
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyEventKind::Release)),
            KeyAction::SpaceRelease
        );
    }

    #[test]
    fn quit_keys_ignore_release() {
        assert_eq!(map_key(key(KeyCode::Char('q'), KeyEventKind::Press)), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc, KeyEventKind::Press)), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Char('q'), KeyEventKind::Release)), KeyAction::Ignore);
    }

    #[test]
    fn ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), KeyAction::Quit);
    }
}
