//! Core error types for dayplan-core.
//!
//! Failures inside the engine degrade to documented default values instead
//! of propagating: unparseable timestamps are logged and their contribution
//! skipped, advisory gateway failures are converted to a default advisory,
//! and analysis failures produce a degraded report. The types here carry
//! the diagnostics for those paths.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Advisory gateway errors
    #[error("Advisory error: {0}")]
    Advisory(#[from] AdvisoryError),

    /// Timestamp parsing errors
    #[error("Time parse error: {0}")]
    TimeParse(#[from] TimeParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Timestamp parsing errors. Always recoverable: the field's contribution
/// is skipped and batch processing continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The string matched none of the accepted formats
    #[error("unparseable timestamp '{raw}'")]
    Unparseable { raw: String },

    /// The wall-clock time does not exist in the configured timezone
    /// (e.g. skipped by a DST transition)
    #[error("no valid local time for '{raw}' in {timezone}")]
    NonexistentLocalTime { raw: String, timezone: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown IANA timezone name
    #[error("Invalid timezone '{name}': not a known IANA timezone")]
    InvalidTimezone { name: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Advisory gateway errors. Caught at the gateway boundary and converted
/// to a default advisory; never surfaced to engine callers.
#[derive(Error, Debug)]
pub enum AdvisoryError {
    /// Request failed at the transport level
    #[error("advisory request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("advisory service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Response body carried no usable recommendation text
    #[error("advisory response carried no content")]
    EmptyResponse,

    /// Single attempt exceeded the configured deadline
    #[error("advisory request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
