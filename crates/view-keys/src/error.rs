//! Key binding error types.

use thiserror::Error;

/// Errors raised while binding keys or loading key configuration.
#[derive(Debug, Error)]
pub enum KeysError {
    /// A declaration names a method the view does not define.
    #[error("unresolved action for '{declaration}': no method named '{method}'")]
    UnresolvedAction { declaration: String, method: String },

    /// Keys were bound on a view whose keys are not delegated.
    #[error("view keys are not delegated")]
    NotDelegated,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML error.
    #[error("TOML error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for KeysError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e.to_string())
    }
}

/// Result type for key binding operations.
pub type KeysResult<T> = Result<T, KeysError>;
