//! Key declaration parser.

use crate::keycode;
use crossterm::event::KeyModifiers;
use thiserror::Error;

/// A single parsed key (base key + modifiers + target scope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    /// Lowercase base key name as written
    pub key: String,
    /// Resolved key code of the base key
    pub key_code: u32,
    /// Modifiers that must be held
    pub modifiers: KeyModifiers,
    /// Target selector, empty for the view root
    pub target: String,
}

/// Error parsing a single key token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty key token")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// Parse a single key token such as `"ctrl+s"` or `"esc"`.
///
/// The last `+`-separated segment is the base key; everything before it
/// is a modifier. Case-insensitive. Supported modifiers:
/// - `ctrl`, `control`
/// - `alt`, `option`, `options`
/// - `shift`
/// - `meta`, `cmd`, `command`
pub fn parse_key(token: &str) -> Result<KeySpec, ParseError> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parts: Vec<&str> = token.split('+').collect();
    // "+" and "ctrl++" name the plus key itself
    if token == "+" || token.ends_with("++") {
        parts.truncate(parts.len() - 2);
        parts.push("+");
    }

    let key = parts.pop().unwrap_or_default();
    if key.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut modifiers = KeyModifiers::NONE;
    for modifier in parts {
        modifiers |= parse_modifier(modifier)?;
    }

    let key_code = keycode::code_of(key).ok_or_else(|| ParseError::UnknownKey(key.to_string()))?;

    Ok(KeySpec {
        key: key.to_string(),
        key_code,
        modifiers,
        target: String::new(),
    })
}

fn parse_modifier(name: &str) -> Result<KeyModifiers, ParseError> {
    match name {
        "ctrl" | "control" => Ok(KeyModifiers::CONTROL),
        "alt" | "option" | "options" => Ok(KeyModifiers::ALT),
        "shift" => Ok(KeyModifiers::SHIFT),
        "meta" | "cmd" | "command" => Ok(KeyModifiers::META),
        _ => Err(ParseError::UnknownModifier(name.to_string())),
    }
}

/// Split a declaration into its key token group and target selector.
///
/// Everything before the first space is the key group, everything after it
/// is the selector.
pub fn split_declaration(declaration: &str) -> (&str, &str) {
    match declaration.split_once(' ') {
        Some((keys, target)) => (keys, target.trim()),
        None => (declaration, ""),
    }
}

/// Split a key group on commas and whitespace, dropping blank tokens.
pub fn split_keys(keys: &str) -> impl Iterator<Item = &str> {
    keys.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.trim().is_empty())
}

/// Parse a full declaration such as `"ctrl+s,ctrl+w form.search"`.
///
/// Tokens that fail to parse are skipped with a warning; the remaining
/// specs keep their declaration order and share the declaration's target.
pub fn parse_declaration(declaration: &str) -> Vec<KeySpec> {
    let (keys, target) = split_declaration(declaration);
    parse_keys(keys, target)
}

/// Parse a key group against an already split-off target.
pub fn parse_keys(keys: &str, target: &str) -> Vec<KeySpec> {
    split_keys(keys)
        .filter_map(|token| match parse_key(token) {
            Ok(spec) => Some(KeySpec {
                target: target.to_string(),
                ..spec
            }),
            Err(err) => {
                tracing::warn!(token, %err, "skipping key binding");
                None
            }
        })
        .collect()
}
