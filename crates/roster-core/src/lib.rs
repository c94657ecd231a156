//! Core types for the Roster users directory.
//!
//! This crate contains shared data structures that are used across all Roster crates:
//! - User records and identifiers
//! - Query state (search, filters, sort, pagination)
//! - Selection tracking
//! - View modes
//! - Configuration types
//! - Error types

mod config;
mod error;
mod fallback;
mod query;
mod record;
mod selection;
mod view;

pub use config::{
    config_dir, config_path, preferences_path, AppConfig, FetchFailurePolicy, DEFAULT_ENDPOINT,
};
pub use error::{ConfigError, ExportError, FetchError, PreferenceError};
pub use fallback::fallback_users;
pub use query::{QueryState, SortDirection, SortKey, SortSpec, DEFAULT_PAGE_SIZE};
pub use record::{Address, Company, Geo, UserId, UserRecord};
pub use selection::SelectionSet;
pub use view::ViewMode;
