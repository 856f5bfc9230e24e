//! Declarative key maps.

use crate::action::{ActionSpec, KeyAction};
use crate::event::{KeyEvent, KeyEventType};
use std::rc::Rc;

/// An ordered mapping from key declarations to actions.
///
/// Declarations look like `"ctrl+s"`, `"a,b"` or `"esc form.search"`.
/// Each declaration appears at most once; rebinding one keeps its original
/// position.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    entries: Vec<(String, ActionSpec)>,
}

impl KeyMap {
    /// Create a new empty key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a declaration to an action.
    pub fn bind(&mut self, declaration: impl Into<String>, action: impl Into<ActionSpec>) {
        let declaration = declaration.into();
        let action = action.into();
        match self.entries.iter_mut().find(|(d, _)| *d == declaration) {
            Some((_, existing)) => *existing = action,
            None => self.entries.push((declaration, action)),
        }
    }

    /// Builder form of [`KeyMap::bind`].
    pub fn with(mut self, declaration: impl Into<String>, action: impl Into<ActionSpec>) -> Self {
        self.bind(declaration, action);
        self
    }

    /// Bind a declaration directly to a closure.
    pub fn with_fn(
        self,
        declaration: impl Into<String>,
        f: impl Fn(&KeyEvent, &str) + 'static,
    ) -> Self {
        self.with(declaration, ActionSpec::Callable(Rc::new(f)))
    }

    /// Bind a method that fires on a specific event type.
    pub fn with_on(
        self,
        declaration: impl Into<String>,
        method: &str,
        on: KeyEventType,
    ) -> Self {
        self.with(declaration, ActionSpec::on(method, on))
    }

    /// Get the action for a declaration.
    pub fn get(&self, declaration: &str) -> Option<&ActionSpec> {
        self.entries
            .iter()
            .find(|(d, _)| d == declaration)
            .map(|(_, action)| action)
    }

    /// Remove a declaration.
    pub fn unbind(&mut self, declaration: &str) {
        self.entries.retain(|(d, _)| d != declaration);
    }

    /// Merge another key map into this one (other takes precedence).
    pub fn merge(&mut self, other: KeyMap) {
        for (declaration, action) in other.entries {
            self.bind(declaration, action);
        }
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionSpec)> {
        self.entries.iter().map(|(d, a)| (d.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<D: Into<String>> FromIterator<(D, KeyAction)> for KeyMap {
    fn from_iter<I: IntoIterator<Item = (D, KeyAction)>>(iter: I) -> Self {
        let mut map = KeyMap::new();
        for (declaration, action) in iter {
            map.bind(declaration, action);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_order() {
        let keymap = KeyMap::new()
            .with("ctrl+s", "save")
            .with("esc", "close")
            .with("a,b", "foo");

        let declarations: Vec<_> = keymap.iter().map(|(d, _)| d).collect();
        assert_eq!(declarations, vec!["ctrl+s", "esc", "a,b"]);
    }

    #[test]
    fn test_rebind_keeps_position() {
        let keymap = KeyMap::new()
            .with("ctrl+s", "save")
            .with("esc", "close")
            .with("ctrl+s", "save_all");

        assert_eq!(keymap.len(), 2);
        assert_eq!(keymap.iter().next().map(|(d, _)| d), Some("ctrl+s"));
        assert!(matches!(keymap.get("ctrl+s"), Some(ActionSpec::Method(m)) if m == "save_all"));
    }

    #[test]
    fn test_keymap_merge() {
        let mut base = KeyMap::new().with("ctrl+a", "action_a");
        let overrides = KeyMap::new()
            .with("ctrl+a", "action_a_override")
            .with("ctrl+b", "action_b");

        base.merge(overrides);

        assert!(matches!(base.get("ctrl+a"), Some(ActionSpec::Method(m)) if m == "action_a_override"));
        assert!(matches!(base.get("ctrl+b"), Some(ActionSpec::Method(m)) if m == "action_b"));
    }

    #[test]
    fn test_unbind() {
        let mut keymap = KeyMap::new().with("esc", "close");
        keymap.unbind("esc");
        assert!(keymap.is_empty());
    }

    #[test]
    fn test_with_on() {
        let keymap = KeyMap::new().with_on("esc", "close", KeyEventType::KeyDown);
        assert_eq!(
            keymap.get("esc").and_then(ActionSpec::trigger_on),
            Some(KeyEventType::KeyDown)
        );
    }
}
