//! Key bindings: arrows and WASD.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Command from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rotate,
    SoftDrop,
    MoveLeft,
    MoveRight,
    /// Recognised, but only re-asserts the downward direction.
    HardDrop,
    Restart,
    Quit,
}

/// Map a key event to a command. Unbound keys give `None`.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if modifiers == KeyModifiers::CONTROL {
        return matches!(code, KeyCode::Char('c')).then_some(Command::Quit);
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return None;
    }
    let command = match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Command::Rotate,
        KeyCode::Down | KeyCode::Char('s' | 'S') => Command::SoftDrop,
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::MoveRight,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Enter => Command::Restart,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_agree() {
        let pairs = [
            (KeyCode::Up, 'w', Command::Rotate),
            (KeyCode::Down, 's', Command::SoftDrop),
            (KeyCode::Left, 'a', Command::MoveLeft),
            (KeyCode::Right, 'd', Command::MoveRight),
        ];
        for (arrow, letter, command) in pairs {
            assert_eq!(key_to_command(key(arrow)), Some(command));
            assert_eq!(key_to_command(key(KeyCode::Char(letter))), Some(command));
        }
    }

    #[test]
    fn space_and_enter() {
        assert_eq!(key_to_command(key(KeyCode::Char(' '))), Some(Command::HardDrop));
        assert_eq!(key_to_command(key(KeyCode::Enter)), Some(Command::Restart));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(key_to_command(key(KeyCode::Char('z'))), None);
        assert_eq!(key_to_command(key(KeyCode::Tab)), None);
        let alt_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::ALT);
        assert_eq!(key_to_command(alt_w), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_command(ctrl_c), Some(Command::Quit));
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(key_to_command(ctrl_w), None);
    }
}
