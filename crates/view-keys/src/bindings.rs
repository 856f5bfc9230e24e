//! Key bindings owned by a view.

use crate::action::{Handler, MethodRef, MethodTable};
use crate::binding::ListenerRecord;
use crate::config::KeyOptions;
use crate::error::{KeysError, KeysResult};
use crate::event::{KeyEvent, KeyEventType};
use crate::keycode;
use crate::keymap::KeyMap;
use crate::parser;
use crate::registry::BindingRegistry;
use crate::surface::{ListenerSurface, MemorySurface};

/// Modifier keys currently held down.
///
/// A latch is set from the first keydown that reports its modifier and is
/// only cleared by a keyup, so auto-repeated keydowns do not flicker it.
/// Only ctrl and alt are latched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierLatch {
    pub ctrl_pressed: bool,
    pub alt_pressed: bool,
}

impl ModifierLatch {
    /// Check if any latched modifier is held.
    pub fn is_held(&self) -> bool {
        self.ctrl_pressed || self.alt_pressed
    }

    fn before_dispatch(&mut self, event: &KeyEvent) {
        if event.event_type != KeyEventType::KeyDown {
            return;
        }
        if !self.ctrl_pressed {
            self.ctrl_pressed = event.ctrl_key();
        }
        if !self.alt_pressed {
            self.alt_pressed = event.alt_key();
        }
    }

    // Runs after matching so the modifier's own keyup is classified with
    // the latch still set.
    fn after_dispatch(&mut self, event: &KeyEvent) {
        if event.event_type != KeyEventType::KeyUp {
            return;
        }
        if self.ctrl_pressed {
            self.ctrl_pressed = event.ctrl_key();
        }
        if self.alt_pressed {
            self.alt_pressed = event.alt_key();
        }
    }
}

/// Arguments for [`KeyBindings::key_on`].
#[derive(Clone, Default)]
pub struct KeyOnArgs {
    /// Handler to run; records without one are kept but never fire
    pub action: Option<Handler>,
    /// Trigger event, defaults to the view's `bind_keys_on`
    pub on: Option<KeyEventType>,
    /// Target selector, empty for the view root
    pub target: String,
}

impl KeyOnArgs {
    pub fn new(action: Handler) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn on(mut self, on: KeyEventType) -> Self {
        self.on = Some(on);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }
}

/// Key bindings for one view.
///
/// The view owns this value and calls [`KeyBindings::delegate_keys`] after
/// its own event delegation and [`KeyBindings::undelegate_keys`] before its
/// own undelegation (see [`crate::KeyedView`]).
///
/// Handlers run synchronously inside [`KeyBindings::handle_key_event`].
/// A handler that wants to feed another key event to the same view has to
/// queue it and deliver it once the current dispatch has returned.
pub struct KeyBindings<S = MemorySurface> {
    surface: S,
    methods: MethodTable,
    options: KeyOptions,
    /// Key map used when `delegate_keys` gets none
    keys: KeyMap,
    registry: BindingRegistry,
    /// Distinct targets with attached listeners; `None` while undelegated
    bound_targets: Option<Vec<String>>,
    latch: ModifierLatch,
}

impl<S: ListenerSurface> KeyBindings<S> {
    /// Create key bindings attaching to `surface` and resolving method
    /// names against `methods`.
    pub fn new(surface: S, methods: MethodTable) -> Self {
        Self {
            surface,
            methods,
            options: KeyOptions::default(),
            keys: KeyMap::new(),
            registry: BindingRegistry::new(),
            bound_targets: None,
            latch: ModifierLatch::default(),
        }
    }

    /// Set the view options.
    pub fn with_options(mut self, options: KeyOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the view's default key map.
    pub fn with_keys(mut self, keys: KeyMap) -> Self {
        self.keys = keys;
        self
    }

    pub fn options(&self) -> &KeyOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: KeyOptions) {
        self.options = options;
    }

    /// Toggle the suppression flag.
    pub fn set_prevent_keyboard_action(&mut self, prevent: bool) {
        self.options.prevent_keyboard_action = prevent;
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    pub fn set_keys(&mut self, keys: KeyMap) {
        self.keys = keys;
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut MethodTable {
        &mut self.methods
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn latch(&self) -> ModifierLatch {
        self.latch
    }

    /// Check if keys are currently delegated.
    pub fn is_delegated(&self) -> bool {
        self.bound_targets.is_some()
    }

    /// Targets with attached listeners; empty string is the view root.
    pub fn bound_targets(&self) -> &[String] {
        self.bound_targets.as_deref().unwrap_or_default()
    }

    /// Rebuild bindings from `keys`, or from the view's own key map.
    ///
    /// Any previous delegation is torn down first. Every action is resolved
    /// before anything is registered: when a method name is missing the
    /// error is returned and the view is left undelegated.
    pub fn delegate_keys(&mut self, keys: Option<&KeyMap>) -> KeysResult<()> {
        self.undelegate_keys();
        let keys = keys.unwrap_or(&self.keys);

        let mut records = Vec::new();
        let mut targets: Vec<String> = Vec::new();

        for (declaration, action) in keys.iter() {
            let (key_group, target) = parser::split_declaration(declaration);
            let specs = parser::parse_keys(key_group, target);
            if specs.is_empty() {
                tracing::debug!(declaration, "declaration binds no keys");
                continue;
            }

            let (handler, on) = action
                .resolve(&self.methods, self.options.bind_keys_on)
                .ok_or_else(|| KeysError::UnresolvedAction {
                    declaration: declaration.to_string(),
                    method: match action.method() {
                        MethodRef::Name(name) => name,
                        MethodRef::Handler(_) => String::new(),
                    },
                })?;

            records.extend(
                specs
                    .into_iter()
                    .map(|spec| ListenerRecord::new(spec, Some(handler.clone()), on)),
            );
            if !targets.iter().any(|t| t == target) {
                targets.push(target.to_string());
            }
        }

        for record in records {
            self.registry.register(record);
        }
        for target in &targets {
            self.attach(target);
        }

        tracing::debug!(
            records = self.registry.len(),
            targets = targets.len(),
            "delegated keys"
        );
        self.bound_targets = Some(targets);
        Ok(())
    }

    /// Clear every binding and detach every listener this view attached.
    pub fn undelegate_keys(&mut self) {
        self.registry.unregister_all();
        self.latch = ModifierLatch::default();

        if let Some(targets) = self.bound_targets.take() {
            for target in &targets {
                for event_type in KeyEventType::ALL {
                    self.surface.off(event_type, selector(target));
                }
            }
            tracing::debug!(targets = targets.len(), "undelegated keys");
        }
    }

    /// Bind one or more keys (comma or space separated) directly.
    ///
    /// A listener is attached for `args.target` if none is yet.
    pub fn key_on(&mut self, keys: &str, args: KeyOnArgs) -> KeysResult<()> {
        let Some(targets) = self.bound_targets.as_ref() else {
            return Err(KeysError::NotDelegated);
        };
        let needs_listener = !targets.iter().any(|t| *t == args.target);

        let specs = parser::parse_keys(keys, &args.target);
        if specs.is_empty() {
            return Ok(());
        }

        let on = args.on.unwrap_or(self.options.bind_keys_on);
        for spec in specs {
            self.registry
                .register(ListenerRecord::new(spec, args.action.clone(), on));
        }

        if needs_listener {
            self.attach(&args.target);
            if let Some(targets) = self.bound_targets.as_mut() {
                targets.push(args.target);
            }
        }
        Ok(())
    }

    /// Remove bindings.
    ///
    /// - `key` of `None` clears every binding
    /// - a key with no method clears all records for that key
    /// - a key with a method removes only records bound to that method
    ///
    /// A method name the view does not define counts as no method.
    pub fn key_off(&mut self, key: Option<&str>, method: Option<MethodRef>) {
        let Some(key) = key else {
            self.registry.unregister_all();
            return;
        };

        let key_code = match parser::parse_key(key) {
            Ok(spec) => spec.key_code,
            Err(err) => {
                tracing::warn!(key, %err, "cannot unbind key");
                return;
            }
        };

        let handler = method.and_then(|m| {
            let resolved = m.resolve(&self.methods);
            if resolved.is_none() {
                tracing::warn!(key, method = ?m, "unknown method, clearing key");
            }
            resolved
        });

        self.registry
            .unregister_by_method(Some(key_code), handler.as_ref());
    }

    /// Name of a key code.
    pub fn key_name(&self, key_code: u32) -> String {
        keycode::name_of(key_code)
    }

    /// Deliver an event as the listener attached for `target` would.
    pub fn trigger_key(&mut self, target: &str, event: &mut KeyEvent) {
        self.latch.before_dispatch(event);
        self.dispatch(target, event);
        self.latch.after_dispatch(event);
    }

    /// Deliver an event to every listener it reaches.
    ///
    /// The listener delegated to the event's origin runs first, then the
    /// root listener unless propagation was stopped. Nothing happens while
    /// keys are undelegated.
    pub fn handle_key_event(&mut self, event: &mut KeyEvent) {
        let listeners: Vec<String> = match &self.bound_targets {
            None => return,
            Some(targets) => {
                let origin = event.origin.as_deref().filter(|o| !o.is_empty());
                let delegated = origin.filter(|o| targets.iter().any(|t| t == *o));
                delegated
                    .into_iter()
                    .chain(targets.iter().any(String::is_empty).then_some(""))
                    .map(str::to_string)
                    .collect()
            }
        };

        self.latch.before_dispatch(event);
        for target in &listeners {
            if event.is_propagation_stopped() {
                break;
            }
            self.dispatch(target, event);
        }
        self.latch.after_dispatch(event);
    }

    fn dispatch(&self, target: &str, event: &mut KeyEvent) {
        let held = self.latch.is_held();

        for record in self.registry.records(event.which) {
            if record.target != target {
                continue;
            }
            if record.modifiers.is_empty() && held {
                continue;
            }
            if !record.triggers_on(event) {
                continue;
            }
            let Some(handler) = &record.handler else {
                continue;
            };

            if self.options.prevent_keyboard_action {
                tracing::trace!(binding = %record, "keyboard action prevented");
                event.stop_propagation();
                continue;
            }

            tracing::trace!(binding = %record, "key binding fired");
            handler(event, &record.key);
        }
    }

    fn attach(&mut self, target: &str) {
        for event_type in KeyEventType::ALL {
            self.surface.on(event_type, selector(target));
        }
    }
}

fn selector(target: &str) -> Option<&str> {
    (!target.is_empty()).then_some(target)
}
