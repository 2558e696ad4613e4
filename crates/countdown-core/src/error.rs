//! Core error types for countdown-core.
//!
//! The countdown engine itself is infallible; errors only arise at the
//! edges (parsing user input, reading and writing configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for countdown-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home directory could not be determined or created
    #[error("Failed to prepare config directory {path}: {source}")]
    DirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Time of day is not `HH:MM` with hour 0-23 and minute 0-59
    #[error("Invalid time of day '{input}': expected HH:MM (00:00 - 23:59)")]
    InvalidTimeOfDay { input: String },

    /// Date-time is not `YYYY-MM-DD HH:MM:SS`
    #[error("Invalid date-time '{input}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidDateTime { input: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
