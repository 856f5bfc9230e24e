//! Action specs and handler resolution.

use crate::event::{KeyEvent, KeyEventType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A bound key handler. Receives the event and the base key name.
pub type Handler = Rc<dyn Fn(&KeyEvent, &str)>;

/// Wrap a closure as a [`Handler`].
pub fn handler(f: impl Fn(&KeyEvent, &str) + 'static) -> Handler {
    Rc::new(f)
}

/// Named handlers a view exposes to declarative key maps.
#[derive(Clone, Default)]
pub struct MethodTable {
    methods: HashMap<String, Handler>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method under `name`, replacing any previous one.
    pub fn define(&mut self, name: impl Into<String>, f: impl Fn(&KeyEvent, &str) + 'static) {
        self.methods.insert(name.into(), Rc::new(f));
    }

    /// Builder form of [`MethodTable::define`].
    pub fn with(mut self, name: impl Into<String>, f: impl Fn(&KeyEvent, &str) + 'static) -> Self {
        self.define(name, f);
        self
    }

    /// Look up a method by name.
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.methods.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.methods.keys().collect();
        names.sort();
        f.debug_struct("MethodTable").field("methods", &names).finish()
    }
}

/// A callable or the name of a view method.
#[derive(Clone)]
pub enum MethodRef {
    Handler(Handler),
    Name(String),
}

impl MethodRef {
    /// Resolve to a handler against the view's methods.
    pub fn resolve(&self, methods: &MethodTable) -> Option<Handler> {
        match self {
            Self::Handler(h) => Some(h.clone()),
            Self::Name(name) => methods.get(name),
        }
    }
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(h) => write!(f, "Handler({:p})", Rc::as_ptr(h)),
            Self::Name(name) => write!(f, "Name({name:?})"),
        }
    }
}

impl From<&str> for MethodRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for MethodRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Handler> for MethodRef {
    fn from(h: Handler) -> Self {
        Self::Handler(h)
    }
}

/// What a key declaration maps to.
#[derive(Clone)]
pub enum ActionSpec {
    /// A direct callable
    Callable(Handler),
    /// A view method name
    Method(String),
    /// An action with an explicit trigger event
    Detailed {
        action: MethodRef,
        on: Option<KeyEventType>,
    },
}

impl ActionSpec {
    /// Action triggered on a specific event type.
    pub fn on(action: impl Into<MethodRef>, on: KeyEventType) -> Self {
        Self::Detailed {
            action: action.into(),
            on: Some(on),
        }
    }

    /// The method or callable this spec points at.
    pub fn method(&self) -> MethodRef {
        match self {
            Self::Callable(h) => MethodRef::Handler(h.clone()),
            Self::Method(name) => MethodRef::Name(name.clone()),
            Self::Detailed { action, .. } => action.clone(),
        }
    }

    /// The trigger event this spec overrides, if any.
    pub fn trigger_on(&self) -> Option<KeyEventType> {
        match self {
            Self::Detailed { on, .. } => *on,
            _ => None,
        }
    }

    /// Resolve to a bound handler and trigger type.
    ///
    /// Returns `None` when the spec names a method the view does not have.
    pub fn resolve(
        &self,
        methods: &MethodTable,
        default_on: KeyEventType,
    ) -> Option<(Handler, KeyEventType)> {
        let handler = self.method().resolve(methods)?;
        Some((handler, self.trigger_on().unwrap_or(default_on)))
    }
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(h) => write!(f, "Callable({:p})", Rc::as_ptr(h)),
            Self::Method(name) => write!(f, "Method({name:?})"),
            Self::Detailed { action, on } => f
                .debug_struct("Detailed")
                .field("action", action)
                .field("on", on)
                .finish(),
        }
    }
}

impl From<&str> for ActionSpec {
    fn from(name: &str) -> Self {
        Self::Method(name.to_string())
    }
}

impl From<String> for ActionSpec {
    fn from(name: String) -> Self {
        Self::Method(name)
    }
}

impl From<Handler> for ActionSpec {
    fn from(h: Handler) -> Self {
        Self::Callable(h)
    }
}

impl From<KeyAction> for ActionSpec {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::Method(name) => Self::Method(name),
            KeyAction::Detailed { action, on } => Self::Detailed {
                action: MethodRef::Name(action),
                on,
            },
        }
    }
}

/// Serializable action as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyAction {
    /// `"ctrl+s" = "save"`
    Method(String),
    /// `"esc" = { action = "close", on = "keydown" }`
    Detailed {
        action: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on: Option<KeyEventType>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_method_table() {
        let methods = MethodTable::new().with("save", |_, _| {});
        assert!(methods.contains("save"));
        assert!(methods.get("load").is_none());
        assert_eq!(methods.len(), 1);
    }

    #[test]
    fn test_resolve_method_name() {
        let methods = MethodTable::new().with("save", |_, _| {});
        let (h, on) = ActionSpec::from("save")
            .resolve(&methods, KeyEventType::KeyUp)
            .unwrap();
        assert!(Rc::ptr_eq(&h, &methods.get("save").unwrap()));
        assert_eq!(on, KeyEventType::KeyUp);
    }

    #[test]
    fn test_resolve_callable() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let spec = ActionSpec::Callable(handler(move |_, _| counter.set(counter.get() + 1)));

        let (h, _) = spec.resolve(&MethodTable::new(), KeyEventType::KeyUp).unwrap();
        h(&KeyEvent::keyup(65), "a");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_resolve_detailed_overrides_trigger() {
        let methods = MethodTable::new().with("close", |_, _| {});
        let spec = ActionSpec::on("close", KeyEventType::KeyDown);
        let (_, on) = spec.resolve(&methods, KeyEventType::KeyUp).unwrap();
        assert_eq!(on, KeyEventType::KeyDown);
    }

    #[test]
    fn test_resolve_missing_method() {
        let spec = ActionSpec::from("missing");
        assert!(spec.resolve(&MethodTable::new(), KeyEventType::KeyUp).is_none());
        assert!(matches!(spec.method(), MethodRef::Name(name) if name == "missing"));
    }

    #[test]
    fn test_key_action_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            plain: KeyAction,
            detailed: KeyAction,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            plain = "save"
            detailed = { action = "close", on = "keydown" }
            "#,
        )
        .unwrap();

        assert_eq!(parsed.plain, KeyAction::Method("save".into()));
        assert_eq!(
            parsed.detailed,
            KeyAction::Detailed {
                action: "close".into(),
                on: Some(KeyEventType::KeyDown),
            }
        );
    }
}
