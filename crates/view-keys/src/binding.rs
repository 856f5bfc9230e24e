//! Listener record types.

use crate::action::Handler;
use crate::event::{KeyEvent, KeyEventType};
use crate::keycode;
use crate::parser::KeySpec;
use crossterm::event::KeyModifiers;
use std::fmt;
use std::rc::Rc;

/// A registered key listener.
#[derive(Clone)]
pub struct ListenerRecord {
    /// Base key name as declared
    pub key: String,
    /// The key code this record is filed under
    pub key_code: u32,
    /// Modifiers that must be held
    pub modifiers: KeyModifiers,
    /// Target selector, empty for the view root
    pub target: String,
    /// The bound handler; records without one never fire
    pub handler: Option<Handler>,
    /// Event type that fires the handler
    pub trigger_on: KeyEventType,
}

impl ListenerRecord {
    /// Create a record from a parsed key spec.
    pub fn new(spec: KeySpec, handler: Option<Handler>, trigger_on: KeyEventType) -> Self {
        Self {
            key: spec.key,
            key_code: spec.key_code,
            modifiers: spec.modifiers,
            target: spec.target,
            handler,
            trigger_on,
        }
    }

    /// Check if this record is bound to the given handler.
    pub fn is_bound_to(&self, handler: &Handler) -> bool {
        self.handler.as_ref().is_some_and(|h| Rc::ptr_eq(h, handler))
    }

    /// Check if an event fires this record, ignoring latched modifiers.
    ///
    /// The event type must match and every declared modifier must be held.
    pub fn triggers_on(&self, event: &KeyEvent) -> bool {
        event.event_type == self.trigger_on && event.modifiers.contains(self.modifiers)
    }

    /// Name of the key this record is filed under.
    pub fn key_name(&self) -> String {
        keycode::name_of(self.key_code)
    }
}

impl fmt::Debug for ListenerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRecord")
            .field("key", &self.key)
            .field("key_code", &self.key_code)
            .field("modifiers", &self.modifiers)
            .field("target", &self.target)
            .field("bound", &self.handler.is_some())
            .field("trigger_on", &self.trigger_on)
            .finish()
    }
}

impl fmt::Display for ListenerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("ctrl");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("alt");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("shift");
        }
        if self.modifiers.contains(KeyModifiers::META) {
            parts.push("meta");
        }
        parts.push(&self.key);

        write!(f, "{}", parts.join("+"))?;
        if !self.target.is_empty() {
            write!(f, " {}", self.target)?;
        }
        write!(f, " on {}", self.trigger_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::handler;
    use crate::parser::parse_key;
    use insta::assert_snapshot;

    fn record(token: &str, target: &str) -> ListenerRecord {
        let spec = KeySpec {
            target: target.to_string(),
            ..parse_key(token).unwrap()
        };
        ListenerRecord::new(spec, Some(handler(|_, _| {})), KeyEventType::KeyUp)
    }

    #[test]
    fn test_record_display() {
        assert_snapshot!(record("ctrl+s", "").to_string(), @"ctrl+s on keyup");
        assert_snapshot!(record("Shift+Alt+F5", "form.search").to_string(), @"alt+shift+f5 form.search on keyup");
    }

    #[test]
    fn test_triggers_on() {
        let r = record("ctrl+s", "");
        let plain = KeyEvent::keyup(83);
        let with_ctrl = KeyEvent::keyup(83).with_modifiers(KeyModifiers::CONTROL);
        let keydown = KeyEvent::keydown(83).with_modifiers(KeyModifiers::CONTROL);

        assert!(!r.triggers_on(&plain));
        assert!(r.triggers_on(&with_ctrl));
        assert!(!r.triggers_on(&keydown));
    }

    #[test]
    fn test_extra_modifiers_still_trigger() {
        let r = record("ctrl+s", "");
        let event = KeyEvent::keyup(83).with_modifiers(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(r.triggers_on(&event));
    }

    #[test]
    fn test_handler_identity() {
        let h = handler(|_, _| {});
        let other = handler(|_, _| {});
        let r = ListenerRecord::new(parse_key("a").unwrap(), Some(h.clone()), KeyEventType::KeyUp);

        assert!(r.is_bound_to(&h));
        assert!(!r.is_bound_to(&other));
    }

    #[test]
    fn test_key_name() {
        assert_eq!(record("return", "").key_name(), "enter");
        assert_eq!(record("x", "").key_name(), "X");
    }
}
