//! Core error types for studyplanner-core.
//!
//! Parse failures on caller-supplied dates and times propagate unchanged;
//! validation failures reject inputs the greedy pass cannot work with.
//! Permissive skips (unknown weekday, unknown preference, exhausted capacity)
//! are not errors and never appear here.

use std::path::PathBuf;
use thiserror::Error;

use chrono::NaiveDateTime;

/// Core error type for studyplanner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed date/time input
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed date or time strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Calendar date not in `YYYY-MM-DD` form or not a real date
    #[error("invalid date '{value}' for {field} (expected YYYY-MM-DD): {reason}")]
    InvalidDate {
        field: String,
        value: String,
        reason: String,
    },

    /// Time of day not in 24-hour `HH:MM` form
    #[error("invalid time '{value}' for {field} (expected HH:MM): {reason}")]
    InvalidTime {
        field: String,
        value: String,
        reason: String,
    },

    /// Timestamp not in `YYYY-MM-DD HH:MM` form
    #[error("invalid timestamp '{value}' (expected YYYY-MM-DD HH:MM): {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task duration that would never split into chunks
    #[error("Estimated duration must be positive, got {minutes} minutes")]
    NonPositiveDuration { minutes: i64 },

    /// Attention span that would never shrink the remaining duration
    #[error("Attention span must be positive, got {minutes} minutes")]
    NonPositiveAttentionSpan { minutes: i64 },

    /// A task rejected while preparing it for placement
    #[error("Task '{subject}' rejected: {source}")]
    Task {
        subject: String,
        #[source]
        source: Box<ValidationError>,
    },

    /// Invalid time range
    #[error("Invalid time range for '{subject}': end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        subject: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A placed chunk whose end falls outside the representable calendar
    #[error("Chunk of {minutes} minutes for '{subject}' starting at {start} ends out of range")]
    EndOutOfRange {
        subject: String,
        start: NaiveDateTime,
        minutes: i64,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key that does not exist in the config tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
