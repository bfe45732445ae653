//! Key -> Action translation.
//!
//! The editor is modeless, so translation is a plain lookup: control chords
//! name commands, arrows move, and every other printable char is inserted.

use crate::{Action, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char(c) => ctrl_chord(c.to_ascii_lowercase()),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Enter => Action::InsertNewline,
        KeyCode::Backspace => Action::DeleteBackward,
        KeyCode::Char(c) if !c.is_control() => Action::InsertText(c.to_string()),
        KeyCode::Char(_) | KeyCode::Tab => return None,
    };
    Some(action)
}

fn ctrl_chord(c: char) -> Option<Action> {
    let action = match c {
        's' => Action::Save,
        'h' => Action::Motion(MotionKind::LineStart),
        'l' => Action::Motion(MotionKind::LineEnd),
        'q' => Action::ToggleSelection,
        'c' => Action::Copy,
        'x' => Action::Cut,
        'v' => Action::Paste,
        'z' => Action::Undo,
        'r' => Action::Redo,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr(key: KeyEvent) -> Option<Action> {
        translate_key(&key)
    }

    #[test]
    fn control_chords() {
        let cases = [
            ('s', Action::Save),
            ('h', Action::Motion(MotionKind::LineStart)),
            ('l', Action::Motion(MotionKind::LineEnd)),
            ('q', Action::ToggleSelection),
            ('c', Action::Copy),
            ('x', Action::Cut),
            ('v', Action::Paste),
            ('z', Action::Undo),
            ('r', Action::Redo),
        ];
        for (c, expected) in cases {
            assert_eq!(tr(KeyEvent::ctrl(c)), Some(expected), "ctrl+{c}");
        }
        assert_eq!(tr(KeyEvent::ctrl('k')), None);
    }

    #[test]
    fn ctrl_with_shift_still_matches() {
        let key = KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::CTRL | KeyModifiers::SHIFT);
        assert_eq!(tr(key), Some(Action::Undo));
    }

    #[test]
    fn printable_chars_insert_themselves() {
        assert_eq!(
            tr(KeyEvent::plain(KeyCode::Char('é'))),
            Some(Action::InsertText("é".into()))
        );
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(tr(shifted), Some(Action::InsertText("A".into())));
        assert_eq!(
            tr(KeyEvent::plain(KeyCode::Char(' '))),
            Some(Action::InsertText(" ".into()))
        );
    }

    #[test]
    fn named_keys() {
        assert_eq!(tr(KeyEvent::plain(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(tr(KeyEvent::plain(KeyCode::Enter)), Some(Action::InsertNewline));
        assert_eq!(tr(KeyEvent::plain(KeyCode::Backspace)), Some(Action::DeleteBackward));
        assert_eq!(
            tr(KeyEvent::plain(KeyCode::Down)),
            Some(Action::Motion(MotionKind::Down))
        );
        assert_eq!(tr(KeyEvent::plain(KeyCode::Tab)), None);
    }
}
