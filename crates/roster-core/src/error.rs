//! Error types for the Roster users directory.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fetch errors - surfaced to the directory as a failed load.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection refused, DNS, TLS...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The request did not complete in time.
    #[error("Request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// The body was not a JSON array of user records.
    #[error("Malformed response: {0}")]
    MalformedBody(String),

    /// The load was cancelled before it settled.
    #[error("Fetch cancelled")]
    Cancelled,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("Failed to read {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// Parse error.
    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A value parsed but is not usable.
    #[error("Invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Preference persistence errors.
///
/// Reads never produce these (bad values fall back to defaults); only
/// writes to the backing store can fail.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("I/O error on {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The file sink could not store the file.
    #[error("Failed to save {filename}: {message}")]
    Save { filename: String, message: String },
}
