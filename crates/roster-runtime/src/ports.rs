//! Host-provided effects: file saving, clipboard and user notification.
//!
//! The directory never touches the terminal or the filesystem directly for
//! these; the front end supplies implementations.

use roster_core::ExportError;

/// Persists a generated file.
#[cfg_attr(test, mockall::automock)]
pub trait FileSink: Send + Sync {
    /// Store `bytes` under `filename`. Implementations may overwrite.
    fn save(&self, filename: &str, mime: &str, bytes: &[u8]) -> Result<(), ExportError>;
}

/// Writes text to the system clipboard.
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> std::io::Result<()>;
}

/// Non-blocking toasts and a blocking yes/no prompt.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn toast(&self, message: &str);

    /// Ask the user to confirm. `false` means declined.
    fn confirm(&self, message: &str) -> bool;
}
