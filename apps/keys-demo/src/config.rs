//! Configuration for the key binding demo.

use std::path::PathBuf;
use view_keys::KeysConfig;

/// Key map used when no config file exists.
pub const DEFAULT_KEYS: &str = r#"
[options]
bind_keys_on = "keyup"
prevent_keyboard_action = false

[keys]
"j,down" = "next"
"k,up" = "previous"
"/,f3" = "focus_search"
"ctrl+s" = "save"
"ctrl+q" = "quit"
"f1" = "toggle_help"
"esc form.search" = { action = "leave_search", on = "keydown" }
"enter form.search" = "leave_search"
"#;

/// Load the key configuration, falling back to the built-in defaults.
pub fn load() -> KeysConfig {
    let Some(path) = config_path().filter(|p| p.exists()) else {
        return default_config();
    };

    match KeysConfig::load(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded key config");
            config
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring key config");
            default_config()
        }
    }
}

fn default_config() -> KeysConfig {
    KeysConfig::from_toml_str(DEFAULT_KEYS).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "keys-demo").map(|d| d.config_dir().join("keys.toml"))
}

pub fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "keys-demo").map(|d| d.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_parse() {
        let config = KeysConfig::from_toml_str(DEFAULT_KEYS).unwrap();
        let keymap = config.key_map().unwrap();
        assert_eq!(keymap.len(), 8);
    }
}
