//! # view-keys
//!
//! Declarative keyboard shortcut bindings for view components.
//!
//! ## Features
//!
//! - Key declarations such as `"ctrl+s"`, `"a,b"` and `"esc form.search"`
//! - Actions given as closures, view method names, or either with an
//!   explicit trigger event
//! - Listener attachment kept in step with the view's delegate/undelegate
//!   lifecycle
//! - Ctrl/alt latching so plain bindings stay quiet while a modifier is held
//! - TOML key configuration and crossterm event conversion

mod action;
mod binding;
mod bindings;
mod config;
mod convert;
mod error;
mod event;
mod keycode;
mod keymap;
mod parser;
mod registry;
mod surface;
mod view;

pub use action::{handler, ActionSpec, Handler, KeyAction, MethodRef, MethodTable};
pub use binding::ListenerRecord;
pub use bindings::{KeyBindings, KeyOnArgs, ModifierLatch};
pub use config::{KeyOptions, KeysConfig};
pub use convert::key_code;
pub use error::{KeysError, KeysResult};
pub use event::{KeyEvent, KeyEventType};
pub use keycode::{code_of, is_alias, name_of, names};
pub use keymap::KeyMap;
pub use parser::{parse_declaration, parse_key, KeySpec, ParseError};
pub use registry::BindingRegistry;
pub use surface::{Attachment, ListenerSurface, MemorySurface};
pub use view::KeyedView;

pub use crossterm::event::KeyModifiers;

/// Name of a key code, falling back to the character it encodes.
pub fn key_name(key_code: u32) -> String {
    keycode::name_of(key_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name() {
        assert_eq!(key_name(27), "esc");
        assert_eq!(key_name(code_of("return").unwrap()), "enter");
    }
}
