//! Raw key events as delivered by the host.

use crate::keycode;
use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The event type a binding fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventType {
    /// Fires for every press, including auto-repeat
    KeyDown,
    /// Fires once when the key is released
    #[default]
    KeyUp,
}

impl KeyEventType {
    /// Both event types, in the order listeners are attached.
    pub const ALL: [KeyEventType; 2] = [KeyEventType::KeyUp, KeyEventType::KeyDown];

    /// The lowercase event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
        }
    }
}

impl fmt::Display for KeyEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key event carrying a key code and modifier flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Whether this is a press or a release
    pub event_type: KeyEventType,
    /// Numeric key code
    pub which: u32,
    /// Modifier flags held when the event fired
    pub modifiers: KeyModifiers,
    /// Selector of the descendant element the event came from, if any
    pub origin: Option<String>,
    propagation_stopped: bool,
}

impl KeyEvent {
    /// Create an event for a raw key code.
    pub fn new(event_type: KeyEventType, which: u32, modifiers: KeyModifiers) -> Self {
        Self {
            event_type,
            which,
            modifiers,
            origin: None,
            propagation_stopped: false,
        }
    }

    /// Create a keydown event with no modifiers.
    pub fn keydown(which: u32) -> Self {
        Self::new(KeyEventType::KeyDown, which, KeyModifiers::NONE)
    }

    /// Create a keyup event with no modifiers.
    pub fn keyup(which: u32) -> Self {
        Self::new(KeyEventType::KeyUp, which, KeyModifiers::NONE)
    }

    /// Create an event from a key name, resolved through the key table.
    pub fn named(event_type: KeyEventType, name: &str) -> Option<Self> {
        keycode::code_of(&name.to_lowercase())
            .map(|which| Self::new(event_type, which, KeyModifiers::NONE))
    }

    /// Set the modifier flags.
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the selector of the element the event came from.
    pub fn from_target(mut self, selector: impl Into<String>) -> Self {
        self.origin = Some(selector.into());
        self
    }

    pub fn ctrl_key(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn alt_key(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Stop the event from reaching listeners further up the tree.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if propagation was stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_event() {
        let event = KeyEvent::named(KeyEventType::KeyUp, "Esc").unwrap();
        assert_eq!(event.which, 27);
        assert!(KeyEvent::named(KeyEventType::KeyUp, "bogus").is_none());
    }

    #[test]
    fn test_modifier_flags() {
        let event = KeyEvent::keydown(83).with_modifiers(KeyModifiers::CONTROL);
        assert!(event.ctrl_key());
        assert!(!event.alt_key());
    }

    #[test]
    fn test_stop_propagation() {
        let mut event = KeyEvent::keyup(27);
        assert!(!event.is_propagation_stopped());
        event.stop_propagation();
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_event_type_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            on: KeyEventType,
        }

        let parsed: Wrapper = toml::from_str(r#"on = "keydown""#).unwrap();
        assert_eq!(parsed.on, KeyEventType::KeyDown);
        assert_eq!(KeyEventType::default().to_string(), "keyup");
    }
}
