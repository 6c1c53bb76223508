//! Central error types for Waffle Bar.
//!
//! This module provides typed errors for better error handling across the codebase.
//! All errors implement `Serialize` for Tauri IPC compatibility.

use serde::Serialize;
use thiserror::Error;

/// Main error type for Waffle Bar operations.
#[derive(Error, Debug)]
pub enum WaffleBarError {
    /// HTTP transport failed (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Waffle API answered with a non-success status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Window management error
    #[error("Window error: {0}")]
    WindowError(String),

    /// Tray icon update failed
    #[error("Tray error: {0}")]
    TrayError(String),

    /// Global shortcut could not be parsed or registered
    #[error("Shortcut error: {0}")]
    ShortcutError(String),

    /// Invalid configuration value
    #[error("Invalid config: {0}")]
    ConfigError(String),

    /// Managed state was requested before setup registered it
    #[error("State not initialized: {0}")]
    StateMissing(&'static str),
}

/// Implement Serialize for Tauri IPC compatibility.
/// Tauri requires errors to be serializable to send to the frontend.
impl Serialize for WaffleBarError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<tauri::Error> for WaffleBarError {
    fn from(err: tauri::Error) -> Self {
        WaffleBarError::WindowError(err.to_string())
    }
}

/// Type alias for Results using WaffleBarError.
pub type WaffleBarResult<T> = Result<T, WaffleBarError>;
