//! Top-level error for the `roster` binary.

use roster_core::{ConfigError, ExportError, FetchError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to load users: {0}")]
    Load(String),

    #[error("No user with id {0}")]
    UnknownUser(UserId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
