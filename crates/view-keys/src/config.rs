//! Key binding configuration.

use crate::action::KeyAction;
use crate::error::{KeysError, KeysResult};
use crate::event::KeyEventType;
use crate::keymap::KeyMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-view key options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOptions {
    /// Event type bindings fire on unless they say otherwise.
    #[serde(default)]
    pub bind_keys_on: KeyEventType,
    /// Swallow matching key events instead of running their handlers.
    #[serde(default)]
    pub prevent_keyboard_action: bool,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            bind_keys_on: KeyEventType::KeyUp,
            prevent_keyboard_action: false,
        }
    }
}

/// Key configuration file contents.
///
/// ```toml
/// [options]
/// bind_keys_on = "keyup"
///
/// [keys]
/// "ctrl+s" = "save"
/// "esc form.search" = { action = "clear_search", on = "keydown" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    /// View options.
    #[serde(default)]
    pub options: KeyOptions,
    /// Declarations in file order.
    #[serde(default)]
    pub keys: toml::Table,
}

impl KeysConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> KeysResult<Self> {
        let config: Self = toml::from_str(content)?;
        // Surface malformed actions at load time rather than at delegation.
        config.key_map()?;
        Ok(config)
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> KeysResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> KeysResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| KeysError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the declared key map.
    pub fn key_map(&self) -> KeysResult<KeyMap> {
        self.keys
            .iter()
            .map(|(declaration, value)| {
                let action: KeyAction = value.clone().try_into().map_err(|e: toml::de::Error| {
                    KeysError::Config(format!("invalid action for '{declaration}': {e}"))
                })?;
                Ok((declaration.clone(), action))
            })
            .collect::<KeysResult<Vec<_>>>()
            .map(|entries| entries.into_iter().collect())
    }

    /// Add a declaration.
    pub fn bind(&mut self, declaration: impl Into<String>, action: KeyAction) -> KeysResult<()> {
        let value = toml::Value::try_from(action).map_err(|e| KeysError::Config(e.to_string()))?;
        self.keys.insert(declaration.into(), value);
        Ok(())
    }
}
