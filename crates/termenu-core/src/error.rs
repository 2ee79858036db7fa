//! Error types shared by every termenu crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by layer
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Terminal input exhausted")]
    InputExhausted,

    // ─────────────────────────────────────────────────────────────
    // Menu Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Menu has no selectable items")]
    NoSelectableItems,

    #[error("Item index {index} out of range for menu of {len} items")]
    ItemOutOfRange { index: usize, len: usize },

    // ─────────────────────────────────────────────────────────────
    // Settings Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Unknown key name: {name:?}")]
    InvalidKey { name: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_key(name: impl Into<String>) -> Self {
        Self::InvalidKey { name: name.into() }
    }

    pub fn item_out_of_range(index: usize, len: usize) -> Self {
        Self::ItemOutOfRange { index, len }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Config { .. } | Error::ConfigNotFound { .. } | Error::InvalidKey { .. }
        )
    }

    /// Check if this error ends the menu session it was raised in
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::NoSelectableItems
                | Error::ItemOutOfRange { .. }
                | Error::Terminal { .. }
                | Error::InputExhausted
                | Error::Io(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
