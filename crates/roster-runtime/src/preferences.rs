//! View preferences and the key-value store they persist to.
//!
//! Two keys are used:
//! - `viewMode`: the raw string `grid` or `table`
//! - `sortBy`: JSON, e.g. `{"key":"name","dir":"asc"}`
//!
//! Reads never fail. A missing or malformed value falls back to the
//! default and is logged. Write failures are logged too.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use roster_core::{PreferenceError, SortKey, SortSpec, ViewMode};

pub const VIEW_MODE_KEY: &str = "viewMode";
pub const SORT_BY_KEY: &str = "sortBy";

// =============================================================================
// Preference Store
// =============================================================================

/// String key-value persistence.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Non-persistent store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory copy of `keys` from another store. Later writes stay here.
    pub fn copy_of(store: &dyn PreferenceStore, keys: &[&str]) -> Self {
        let values = keys
            .iter()
            .filter_map(|key| store.get(key).map(|value| (key.to_string(), value)))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk.
///
/// The whole file is read once on open and rewritten on every `set`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open `path`. A missing file starts empty; an unreadable or
    /// malformed one is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Ignoring malformed preferences at {:?}: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read preferences at {:?}: {}", path, e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            values: RwLock::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        let io_err = |e: std::io::Error| PreferenceError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        self.write_file(&values)
    }
}

// =============================================================================
// View Preferences
// =============================================================================

/// View mode and sort preference, written back on every change.
pub struct ViewPreferences {
    store: Arc<dyn PreferenceStore>,
    view_mode: ViewMode,
    sort: SortSpec,
}

impl ViewPreferences {
    /// Read persisted values, falling back to defaults.
    pub fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let view_mode = match store.get(VIEW_MODE_KEY) {
            Some(raw) => raw.parse::<ViewMode>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring persisted {}: {}", VIEW_MODE_KEY, e);
                ViewMode::default()
            }),
            None => ViewMode::default(),
        };

        let sort = match store.get(SORT_BY_KEY) {
            Some(raw) => serde_json::from_str::<SortSpec>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring persisted {}: {}", SORT_BY_KEY, e);
                SortSpec::default()
            }),
            None => SortSpec::default(),
        };

        tracing::debug!("Preferences: view={} sort={} {:?}", view_mode, sort.key, sort.dir);
        Self {
            store,
            view_mode,
            sort,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Flip grid/table and persist. Returns the new mode.
    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.set_view_mode(self.view_mode.toggled());
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        if let Err(e) = self.store.set(VIEW_MODE_KEY, mode.as_str()) {
            tracing::warn!("Failed to persist {}: {}", VIEW_MODE_KEY, e);
        }
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        match serde_json::to_string(&sort) {
            Ok(json) => {
                if let Err(e) = self.store.set(SORT_BY_KEY, &json) {
                    tracing::warn!("Failed to persist {}: {}", SORT_BY_KEY, e);
                }
            }
            Err(e) => tracing::warn!("Failed to encode {}: {}", SORT_BY_KEY, e),
        }
    }

    /// Column-header toggle, persisted.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortSpec {
        self.set_sort(self.sort.toggled(key));
        self.sort
    }
}
