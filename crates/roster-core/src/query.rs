//! Query state: search text, column filters, sort and pagination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::record::UserRecord;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

// =============================================================================
// Sort
// =============================================================================

/// Sortable fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Username,
    Email,
    Phone,
    Website,
    /// Resolves to `company.name`.
    Company,
    /// Resolves to `address.city`.
    City,
}

impl SortKey {
    /// All keys, in display order.
    pub const ALL: [SortKey; 7] = [
        SortKey::Name,
        SortKey::Username,
        SortKey::Email,
        SortKey::Phone,
        SortKey::Website,
        SortKey::Company,
        SortKey::City,
    ];

    /// Extract the sort value from a record.
    pub fn value_of<'a>(&self, user: &'a UserRecord) -> &'a str {
        match self {
            SortKey::Name => &user.name,
            SortKey::Username => &user.username,
            SortKey::Email => &user.email,
            SortKey::Phone => &user.phone,
            SortKey::Website => &user.website,
            SortKey::Company => user.company_name(),
            SortKey::City => user.city(),
        }
    }

    /// Lowercase key name, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Username => "username",
            SortKey::Email => "email",
            SortKey::Phone => "phone",
            SortKey::Website => "website",
            SortKey::Company => "company",
            SortKey::City => "city",
        }
    }

    /// Column label for headers.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Username => "Username",
            SortKey::Email => "Email",
            SortKey::Phone => "Phone",
            SortKey::Website => "Website",
            SortKey::Company => "Company",
            SortKey::City => "City",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the active column.
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort: key plus direction.
///
/// Serialized as `{"key":"name","dir":"asc"}`, the shape persisted under
/// the `sortBy` preference key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub dir: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, dir: SortDirection) -> Self {
        Self { key, dir }
    }

    /// Column-header toggle: the same key flips direction, a new key
    /// starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                dir: self.dir.reversed(),
            }
        } else {
            Self {
                key,
                dir: SortDirection::Asc,
            }
        }
    }
}

// =============================================================================
// Query State
// =============================================================================

/// Everything the pipeline needs besides the records themselves.
///
/// Owned by the caller. Changing search text, filters or page size resets
/// `page` to 1; the pipeline clamps `page` to the last page after each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    company_filter: String,
    city_filter: String,
    sort: SortSpec,
    page: usize,
    page_size: NonZeroUsize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            company_filter: String::new(),
            city_filter: String::new(),
            sort: SortSpec::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn company_filter(&self) -> &str {
        &self.company_filter
    }

    pub fn city_filter(&self) -> &str {
        &self.city_filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Whether any search text or column filter is active.
    pub fn has_filters(&self) -> bool {
        !self.search_text.trim().is_empty()
            || !self.company_filter.is_empty()
            || !self.city_filter.is_empty()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn set_company_filter(&mut self, company: impl Into<String>) {
        self.company_filter = company.into();
        self.page = 1;
    }

    pub fn set_city_filter(&mut self, city: impl Into<String>) {
        self.city_filter = city.into();
        self.page = 1;
    }

    /// Drop search text and both column filters.
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.company_filter.clear();
        self.city_filter.clear();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Apply a column-header toggle and return the new spec.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortSpec {
        self.sort = self.sort.toggled(key);
        self.sort
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Set the page, never below 1. The upper bound is enforced by
    /// [`QueryState::clamp_page`] once the filtered count is known.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Clamp `page` into `[1, total_pages]`. Returns true if it moved.
    pub fn clamp_page(&mut self, total_pages: usize) -> bool {
        let clamped = self.page.clamp(1, total_pages.max(1));
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    pub fn first_page(&mut self) {
        self.page = 1;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn last_page(&mut self, total_pages: usize) {
        self.page = total_pages.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_sort_key_resolves_nested_fields() {
        let user = UserRecord::new(1u64, "Ann")
            .with_company("Acme")
            .with_city("Springfield");

        assert_eq!(SortKey::Name.value_of(&user), "Ann");
        assert_eq!(SortKey::Company.value_of(&user), "Acme");
        assert_eq!(SortKey::City.value_of(&user), "Springfield");

        let bare = UserRecord::new(2u64, "Bob");
        assert_eq!(SortKey::Company.value_of(&bare), "");
        assert_eq!(SortKey::City.value_of(&bare), "");
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("company".parse::<SortKey>().unwrap(), SortKey::Company);
        assert_eq!(" City ".parse::<SortKey>().unwrap(), SortKey::City);
        assert!("zipcode".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_spec_json_shape() {
        let spec = SortSpec::new(SortKey::City, SortDirection::Desc);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"key":"city","dir":"desc"}"#);

        let back: SortSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = QueryState::default();
        assert_eq!(state.sort(), SortSpec::new(SortKey::Name, SortDirection::Asc));

        state.toggle_sort(SortKey::Name);
        assert_eq!(state.sort().dir, SortDirection::Desc);

        state.toggle_sort(SortKey::Name);
        assert_eq!(state.sort().dir, SortDirection::Asc);

        // Switching keys always starts ascending
        state.toggle_sort(SortKey::Name);
        state.toggle_sort(SortKey::City);
        assert_eq!(state.sort(), SortSpec::new(SortKey::City, SortDirection::Asc));
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = QueryState::default();
        state.set_page(4);
        state.set_search_text("ann");
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.set_company_filter("Acme");
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.set_city_filter("Springfield");
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.set_page_size(size(10));
        assert_eq!(state.page(), 1);
        assert!(state.has_filters());

        state.clear_filters();
        assert!(!state.has_filters());
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let mut state = QueryState::default();
        state.set_page(2);
        state.toggle_sort(SortKey::Email);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut state = QueryState::new(size(5));
        state.set_page(0);
        assert_eq!(state.page(), 1);

        state.prev_page();
        assert_eq!(state.page(), 1);

        state.next_page(3);
        state.next_page(3);
        state.next_page(3);
        assert_eq!(state.page(), 3);

        state.first_page();
        assert_eq!(state.page(), 1);

        state.last_page(0);
        assert_eq!(state.page(), 1);

        state.last_page(7);
        assert_eq!(state.page(), 7);
    }

    #[test]
    fn test_clamp_page() {
        let mut state = QueryState::default();
        state.set_page(9);
        assert!(state.clamp_page(2));
        assert_eq!(state.page(), 2);

        assert!(!state.clamp_page(2));

        // An empty result still has one page
        assert!(state.clamp_page(0));
        assert_eq!(state.page(), 1);
    }
}
