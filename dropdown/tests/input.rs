use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dropdown::prelude::*;

fn convert(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyCombo> {
    KeyCombo::from_crossterm(KeyEvent::new(code, modifiers))
}

#[test]
fn test_plain_keys() {
    assert_eq!(
        convert(KeyCode::Enter, KeyModifiers::NONE),
        Some(KeyCombo::key(Key::Enter))
    );
    assert_eq!(
        convert(KeyCode::Esc, KeyModifiers::NONE),
        Some(KeyCombo::key(Key::Escape))
    );
    assert_eq!(
        convert(KeyCode::Down, KeyModifiers::NONE),
        Some(KeyCombo::key(Key::Down))
    );
}

#[test]
fn test_space_is_its_own_key() {
    let combo = convert(KeyCode::Char(' '), KeyModifiers::NONE).unwrap();
    assert_eq!(combo.key, Key::Space);
    assert_eq!(combo.key.typed_char(), Some(' '));
}

#[test]
fn test_characters_keep_modifiers() {
    let combo = convert(KeyCode::Char('c'), KeyModifiers::CONTROL).unwrap();
    assert_eq!(combo, KeyCombo::key(Key::Char('c')).ctrl());
    assert!(combo.modifiers.is_command());

    let combo = convert(KeyCode::Char('Ї'), KeyModifiers::SHIFT).unwrap();
    assert_eq!(combo.key, Key::Char('Ї'));
    assert!(!combo.modifiers.is_command());
}

#[test]
fn test_back_tab_is_shift_tab() {
    let combo = convert(KeyCode::BackTab, KeyModifiers::NONE).unwrap();
    assert_eq!(combo, KeyCombo::key(Key::Tab).shift());
}

#[test]
fn test_releases_are_dropped() {
    let event = KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(KeyCombo::from_crossterm(event), None);
}

#[test]
fn test_unused_keys_are_dropped() {
    assert_eq!(convert(KeyCode::F(5), KeyModifiers::NONE), None);
    assert_eq!(convert(KeyCode::PageDown, KeyModifiers::NONE), None);
}
