//! Terminal frontend for the Roster users directory.
//!
//! This crate provides:
//! - `Directory`, the component that ties store, query, selection,
//!   preferences and export together
//! - Plain-text views (grid, table, detail)
//! - Terminal and filesystem implementations of the host services
//! - The interactive shell and command-line arguments

pub mod cli;
pub mod directory;
pub mod error;
pub mod platform;
pub mod shell;
pub mod views;

pub use cli::{Cli, Command};
pub use directory::{CopyField, Directory, PageView, RowView, Services};
pub use error::AppError;
pub use platform::{DirectoryFileSink, TerminalClipboard, TerminalNotifier};
