//! Core error types for filing-alert.
//!
//! Configuration problems are the only errors fatal to a whole run, so they
//! get their own enum here; the scanner and mail crates define their own.

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (platform base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse JSON
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Filing-type key is not usable as an identifier
    #[error("invalid filing key: {0}")]
    InvalidKey(String),

    /// A requested filing-type key has no search URL configured
    #[error("no search URL configured for item '{key}'")]
    MissingSearchUrl {
        /// Requested key
        key: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
