//! The users directory component.
//!
//! `Directory` owns every piece of state the operator can change and runs
//! the query pipeline on demand. Nothing here prints; callers render the
//! [`PageView`] returned by [`Directory::refresh`].

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

use roster_core::{
    AppConfig, ExportError, QueryState, SelectionSet, SortKey, SortSpec, UserId, UserRecord,
    ViewMode,
};
use roster_query::{filter_users, sort_users, total_pages, Facets, PageSummary};
use roster_runtime::{
    rows_in_scope, Clipboard, Debouncer, ExportOutcome, ExportScope, Exporter, FileSink,
    LoadState, Notifier, PreferenceStore, UserSource, UserStore, ViewPreferences,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

// =============================================================================
// Services
// =============================================================================

/// Collaborators supplied by the host.
pub struct Services {
    pub source: Arc<dyn UserSource>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub sink: Arc<dyn FileSink>,
    pub clipboard: Arc<dyn Clipboard>,
    pub notifier: Arc<dyn Notifier>,
}

/// A field that can be copied to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyField {
    Email,
    Phone,
}

impl CopyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyField::Email => "email",
            CopyField::Phone => "phone",
        }
    }

    fn value_of<'a>(&self, user: &'a UserRecord) -> &'a str {
        match self {
            CopyField::Email => &user.email,
            CopyField::Phone => &user.phone,
        }
    }
}

impl fmt::Display for CopyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(CopyField::Email),
            "phone" => Ok(CopyField::Phone),
            other => Err(format!("cannot copy '{}' (expected email or phone)", other)),
        }
    }
}

// =============================================================================
// Page View
// =============================================================================

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub user: UserRecord,
    pub selected: bool,
}

/// Everything needed to draw the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub state: LoadState,
    pub rows: Vec<RowView>,
    pub summary: PageSummary,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub view_mode: ViewMode,
    pub sort: SortSpec,
    pub search: String,
    pub company_filter: String,
    pub city_filter: String,
    /// Selected ids that are present in the store.
    pub selected: usize,
}

impl PageView {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Directory
// =============================================================================

pub struct Directory {
    store: Arc<UserStore>,
    source: Arc<dyn UserSource>,
    query: QueryState,
    search: Debouncer<String>,
    search_input: String,
    selection: SelectionSet,
    prefs: ViewPreferences,
    exporter: Exporter,
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
}

impl Directory {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &AppConfig, services: Services) -> Self {
        let prefs = ViewPreferences::load(services.preferences);
        let mut query = QueryState::new(config.page_size);
        query.set_sort(prefs.sort());

        Self {
            store: Arc::new(UserStore::new(config.on_fetch_error)),
            source: services.source,
            query,
            search: Debouncer::new(String::new(), config.search_debounce()),
            search_input: String::new(),
            selection: SelectionSet::new(),
            prefs,
            exporter: Exporter::new(
                services.sink,
                services.notifier.clone(),
                config.export_delay(),
            ),
            clipboard: services.clipboard,
            notifier: services.notifier,
        }
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Fetch and wait for the result.
    pub async fn load(&self) -> LoadState {
        self.store.load(self.source.as_ref()).await
    }

    /// Fetch in the background. A later load supersedes this one.
    pub fn spawn_load(&self) -> JoinHandle<LoadState> {
        let store = self.store.clone();
        let source = self.source.clone();
        tokio::spawn(async move { store.load(source.as_ref()).await })
    }

    pub fn load_state(&self) -> LoadState {
        self.store.state()
    }

    pub fn subscribe_load(&self) -> watch::Receiver<LoadState> {
        self.store.subscribe()
    }

    // -------------------------------------------------------------------------
    // Search and filters
    // -------------------------------------------------------------------------

    /// Settled search text, as published by the debouncer.
    pub fn subscribe_search(&self) -> watch::Receiver<String> {
        self.search.subscribe()
    }

    /// Raw text as last typed, which may not have settled yet.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// A keystroke: the query only changes once typing pauses.
    pub fn type_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search_input = text.clone();
        self.search.schedule(text);
    }

    /// Apply search text immediately.
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search_input = text.clone();
        self.search.set_now(text);
        self.sync_search();
    }

    /// Settle any pending keystroke now.
    pub fn flush_search(&mut self) -> bool {
        let flushed = self.search.flush();
        self.sync_search();
        flushed
    }

    fn sync_search(&mut self) {
        let settled = self.search.settled();
        if settled != self.query.search_text() {
            tracing::debug!("Search settled: {:?}", settled);
            self.query.set_search_text(settled);
        }
    }

    pub fn set_company_filter(&mut self, company: impl Into<String>) {
        self.query.set_company_filter(company);
    }

    pub fn set_city_filter(&mut self, city: impl Into<String>) {
        self.query.set_city_filter(city);
    }

    /// Clear search text and column filters.
    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.search.set_now(String::new());
        self.query.clear_filters();
    }

    pub fn facets(&self) -> Facets {
        Facets::from_records(&self.store.snapshot())
    }

    // -------------------------------------------------------------------------
    // Sort and view
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> SortSpec {
        self.query.sort()
    }

    /// Column-header click: same key flips, a new key starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortSpec {
        let sort = self.prefs.toggle_sort(key);
        self.query.set_sort(sort);
        sort
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.prefs.set_sort(sort);
        self.query.set_sort(sort);
    }

    pub fn view_mode(&self) -> ViewMode {
        self.prefs.view_mode()
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.prefs.toggle_view_mode()
    }

    pub fn set_view(&mut self, mode: ViewMode) {
        self.prefs.set_view_mode(mode);
    }

    // -------------------------------------------------------------------------
    // Pages
    // -------------------------------------------------------------------------

    fn total_pages(&mut self) -> usize {
        self.sync_search();
        let records = self.store.snapshot();
        let matching = filter_users(&records, &self.query).len();
        total_pages(matching, self.query.page_size())
    }

    pub fn page(&self) -> usize {
        self.query.page()
    }

    pub fn first_page(&mut self) {
        self.query.first_page();
    }

    pub fn prev_page(&mut self) {
        self.query.prev_page();
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.query.next_page(total);
    }

    pub fn last_page(&mut self) {
        let total = self.total_pages();
        self.query.last_page(total);
    }

    /// Jump to `page`; out-of-range pages are clamped on the next refresh.
    pub fn goto_page(&mut self, page: usize) {
        self.query.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.query.set_page_size(page_size);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Returns true if `id` is now selected.
    pub fn toggle_select(&mut self, id: UserId) -> bool {
        self.selection.toggle(id)
    }

    pub fn is_selected(&self, id: UserId) -> bool {
        self.selection.contains(id)
    }

    /// Replace the selection with every filtered row, across all pages.
    pub fn select_all_visible(&mut self) -> usize {
        self.sync_search();
        let records = self.store.snapshot();
        let matching = filter_users(&records, &self.query);
        self.selection
            .select_all_visible(matching.iter().map(|user| user.id));
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected ids present in the store.
    pub fn selected_count(&self) -> usize {
        self.selection.count_in(&self.store.snapshot())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Run the pipeline and capture the current page.
    pub fn refresh(&mut self) -> PageView {
        self.sync_search();
        let records = self.store.snapshot();
        let outcome = roster_query::run(&records, &mut self.query);

        let rows = outcome
            .page_items()
            .iter()
            .map(|user| RowView {
                user: (*user).clone(),
                selected: self.selection.contains(user.id),
            })
            .collect();

        PageView {
            state: self.store.state(),
            rows,
            summary: outcome.summary(),
            page: outcome.page,
            total_pages: outcome.total_pages,
            page_size: outcome.page_size.get(),
            view_mode: self.prefs.view_mode(),
            sort: self.query.sort(),
            search: self.query.search_text().to_string(),
            company_filter: self.query.company_filter().to_string(),
            city_filter: self.query.city_filter().to_string(),
            selected: self.selection.count_in(&records),
        }
    }

    /// Look a user up in the current snapshot.
    pub fn user(&self, id: UserId) -> Option<UserRecord> {
        self.store
            .snapshot()
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    // -------------------------------------------------------------------------
    // Effects
    // -------------------------------------------------------------------------

    /// Copy a user's email or phone. Clipboard failures are swallowed.
    pub fn copy(&self, field: CopyField, id: UserId) -> bool {
        let Some(user) = self.user(id) else {
            self.notifier.toast(&format!("No user with id {}", id));
            return false;
        };

        match self.clipboard.copy(field.value_of(&user)) {
            Ok(()) => {
                self.notifier.toast(&format!("Copied {}", field));
                true
            }
            Err(e) => {
                tracing::debug!("Clipboard write failed: {}", e);
                false
            }
        }
    }

    /// Export the rows `scope` covers, in display order.
    pub async fn export(&mut self, scope: ExportScope) -> Result<ExportOutcome, ExportError> {
        self.sync_search();
        let records = self.store.snapshot();
        let mut filtered = filter_users(&records, &self.query);
        sort_users(&mut filtered, self.query.sort());

        let rows = rows_in_scope(scope, &filtered, &records, &self.selection);
        self.exporter.export(&rows).await
    }
}

impl Drop for Directory {
    fn drop(&mut self) {
        self.store.teardown();
        self.search.cancel();
    }
}
