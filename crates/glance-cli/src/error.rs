//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error.
#[derive(Error, Debug)]
pub enum CliError {
    /// Engine-side failures (wire encoding, validation)
    #[error("Core error: {0}")]
    Core(#[from] glance_core::CoreError),

    /// Goal store failures
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration failures
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No goal matched the given identifier
    #[error("No goal matches '{0}'")]
    GoalNotFound(String),

    /// More than one goal matched a name lookup
    #[error("'{0}' is ambiguous; use the goal id")]
    AmbiguousGoal(String),

    /// Bad command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    /// JSON encoding for output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Goal store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem access failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file is not valid JSON
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No usable data directory on this platform
    #[error("Could not resolve a data directory")]
    NoDataDir,
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
