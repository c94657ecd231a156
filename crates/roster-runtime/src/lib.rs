//! Async runtime pieces for the Roster users directory.
//!
//! - [`store`]: the user snapshot, loaded once per request and cancellable
//! - [`source`]: where users come from (HTTP or static)
//! - [`debounce`]: cancellable timer used for search input
//! - [`preferences`]: persisted view mode and sort
//! - [`export`]: the confirm / encode / save flow
//! - [`ports`]: traits for the host's file, clipboard and notification
//!   services

pub mod debounce;
pub mod export;
pub mod ports;
pub mod preferences;
pub mod source;
pub mod store;

pub use debounce::Debouncer;
pub use export::{export_filename, rows_in_scope, ExportOutcome, ExportScope, Exporter};
pub use ports::{Clipboard, FileSink, Notifier};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ViewPreferences, SORT_BY_KEY,
    VIEW_MODE_KEY,
};
pub use source::{parse_users, HttpUserSource, StaticUserSource, UserSource};
pub use store::{LoadState, LoadTicket, UserStore};
