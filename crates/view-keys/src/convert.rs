//! Conversion from crossterm key events.

use crate::event::{KeyEvent, KeyEventType};
use crate::keycode;
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Key code for a crossterm key, if it has one.
pub fn key_code(code: &KeyCode) -> Option<u32> {
    let name = match code {
        KeyCode::Char(c) => return keycode::code_of(&c.to_string()),
        KeyCode::F(n @ 1..=12) => return Some(111 + u32::from(*n)),
        KeyCode::Backspace => "backspace",
        KeyCode::Tab | KeyCode::BackTab => "tab",
        KeyCode::Enter => "enter",
        KeyCode::Esc => "esc",
        KeyCode::CapsLock => "caps_lock",
        KeyCode::NumLock => "num_lock",
        KeyCode::PageUp => "page_up",
        KeyCode::PageDown => "page_down",
        KeyCode::End => "end",
        KeyCode::Home => "home",
        KeyCode::Left => "left",
        KeyCode::Up => "up",
        KeyCode::Right => "right",
        KeyCode::Down => "down",
        KeyCode::Insert => "insert",
        KeyCode::Delete => "delete",
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "shift",
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "ctrl",
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "alt",
            ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper
            | ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta => "meta",
            _ => return None,
        },
        _ => return None,
    };
    keycode::code_of(name)
}

/// Modifier flags with super folded into meta.
fn modifiers(modifiers: KeyModifiers) -> KeyModifiers {
    let mut flags = modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
    if modifiers.intersects(KeyModifiers::META | KeyModifiers::SUPER) {
        flags |= KeyModifiers::META;
    }
    flags
}

impl KeyEvent {
    /// Convert a crossterm key event.
    ///
    /// Presses and repeats become keydown, releases keyup. Keys with no
    /// key code give `None`.
    pub fn from_crossterm(event: &crossterm::event::KeyEvent) -> Option<Self> {
        let event_type = match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => KeyEventType::KeyDown,
            KeyEventKind::Release => KeyEventType::KeyUp,
        };
        let which = key_code(&event.code)?;
        Some(Self::new(event_type, which, modifiers(event.modifiers)))
    }

    /// The matching keyup for a keydown.
    ///
    /// Terminals that never report releases can pair each press with this.
    pub fn released(&self) -> Self {
        let mut release = Self::new(KeyEventType::KeyUp, self.which, self.modifiers);
        release.origin = self.origin.clone();
        release
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn crossterm_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> crossterm::event::KeyEvent {
        crossterm::event::KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(key_code(&KeyCode::Char('s')), Some(83));
        assert_eq!(key_code(&KeyCode::Char('S')), Some(83));
        assert_eq!(key_code(&KeyCode::Char(' ')), keycode::code_of("space"));
        assert_eq!(key_code(&KeyCode::Esc), Some(27));
        assert_eq!(key_code(&KeyCode::F(5)), Some(116));
        assert_eq!(key_code(&KeyCode::F(13)), None);
        assert_eq!(
            key_code(&KeyCode::Modifier(ModifierKeyCode::RightControl)),
            Some(17)
        );
        assert_eq!(key_code(&KeyCode::Null), None);
    }

    #[test]
    fn test_press_and_release() {
        let press = crossterm_event(KeyCode::Char('s'), KeyModifiers::CONTROL, KeyEventKind::Press);
        let event = KeyEvent::from_crossterm(&press).unwrap();
        assert_eq!(event.event_type, KeyEventType::KeyDown);
        assert_eq!(event.which, 83);
        assert!(event.ctrl_key());

        let release = crossterm_event(KeyCode::Char('s'), KeyModifiers::NONE, KeyEventKind::Release);
        let event = KeyEvent::from_crossterm(&release).unwrap();
        assert_eq!(event.event_type, KeyEventType::KeyUp);
        assert!(!event.ctrl_key());
    }

    #[test]
    fn test_super_maps_to_meta() {
        let press = crossterm_event(KeyCode::Char('k'), KeyModifiers::SUPER, KeyEventKind::Press);
        let event = KeyEvent::from_crossterm(&press).unwrap();
        assert_eq!(event.modifiers, KeyModifiers::META);
    }

    #[test]
    fn test_released() {
        let down = KeyEvent::keydown(27).from_target("form.search");
        let up = down.released();
        assert_eq!(up.event_type, KeyEventType::KeyUp);
        assert_eq!(up.which, 27);
        assert_eq!(up.origin.as_deref(), Some("form.search"));
    }
}
