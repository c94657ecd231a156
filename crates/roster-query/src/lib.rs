//! Query pipeline for the Roster users directory.
//!
//! A pure derivation from `(records, QueryState)` to the page the user sees:
//!
//! ```text
//! records ──► filter ──► sort ──► paginate ──► QueryOutcome
//!                                    │
//!                                    └──► clamps QueryState::page
//! ```
//!
//! Nothing here touches I/O or time. The runtime crate decides when to
//! rerun it (debounced search, reloads) and what to do with the output.

mod export;
mod filter;
mod paginate;
mod sort;

pub use export::{encode_csv, CSV_HEADER, CSV_MIME};
pub use filter::{filter_users, Facets, UserFilter};
pub use paginate::{page_range, total_pages, PageSummary};
pub use sort::{compare, sort_users};

use std::num::NonZeroUsize;
use std::ops::Range;

use roster_core::{QueryState, UserId, UserRecord};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    /// Every record that passed the filters, in sorted order.
    pub filtered: Vec<&'a UserRecord>,

    /// Index range of the current page within `filtered`.
    pub range: Range<usize>,

    /// Current page (1-based, already clamped).
    pub page: usize,

    pub page_size: NonZeroUsize,

    pub total_pages: usize,

    /// True if this run moved `page` back to `total_pages`.
    pub page_clamped: bool,
}

impl<'a> QueryOutcome<'a> {
    /// Records on the current page.
    pub fn page_items(&self) -> &[&'a UserRecord] {
        self.filtered.get(self.range.clone()).unwrap_or(&[])
    }

    pub fn total_filtered(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Ids of all filtered records, across every page.
    pub fn filtered_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.filtered.iter().map(|user| user.id)
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::new(&self.range, self.filtered.len())
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Run filter, sort and paginate.
///
/// If `query.page` lies past the last page of the filtered result, it is
/// written back as `total_pages` and the outcome reports `page_clamped`.
pub fn run<'a>(records: &'a [UserRecord], query: &mut QueryState) -> QueryOutcome<'a> {
    let mut filtered = filter_users(records, query);
    sort_users(&mut filtered, query.sort());

    let page_size = query.page_size();
    let total_pages = total_pages(filtered.len(), page_size);
    let page_clamped = query.clamp_page(total_pages);
    if page_clamped {
        tracing::debug!(
            "Page clamped to {} ({} filtered rows)",
            query.page(),
            filtered.len()
        );
    }

    let range = page_range(query.page(), page_size, filtered.len());
    QueryOutcome {
        filtered,
        range,
        page: query.page(),
        page_size,
        total_pages,
        page_clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{fallback_users, SortDirection, SortKey, SortSpec};

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn numbered(count: u64) -> Vec<UserRecord> {
        (1..=count)
            .map(|i| UserRecord::new(i, format!("User {:02}", i)))
            .collect()
    }

    #[test]
    fn test_first_page_of_ten() {
        let records = numbered(10);
        let mut query = QueryState::new(size(5));

        let outcome = run(&records, &mut query);
        let ids: Vec<_> = outcome.page_items().iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(outcome.total_pages, 2);
        assert!(!outcome.page_clamped);
        assert!(outcome.has_next());
        assert!(!outcome.has_prev());
        assert_eq!(outcome.summary().to_string(), "Showing 1 - 5 of 10");
    }

    #[test]
    fn test_page_beyond_total_is_clamped_and_written_back() {
        let records = numbered(10);
        let mut query = QueryState::new(size(5));
        query.set_page(9);

        let outcome = run(&records, &mut query);
        assert!(outcome.page_clamped);
        assert_eq!(outcome.page, 2);
        assert_eq!(query.page(), 2);

        let ids: Vec<_> = outcome.page_items().iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);

        // A settled page is left alone on the next run
        let outcome = run(&records, &mut query);
        assert!(!outcome.page_clamped);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let records = numbered(3);
        let mut query = QueryState::default();
        query.set_search_text("nobody");
        query.set_page(4);

        let outcome = run(&records, &mut query);
        assert!(outcome.is_empty());
        assert_eq!(outcome.total_pages, 1);
        assert_eq!(query.page(), 1);
        assert!(outcome.page_items().is_empty());
        assert_eq!(outcome.summary().to_string(), "Showing 0 - 0 of 0");
    }

    #[test]
    fn test_quoted_name_example() {
        let records = vec![UserRecord::new(2u64, "B"), UserRecord::new(1u64, r#"A "Big" Co"#)];
        let mut query = QueryState::default();

        let outcome = run(&records, &mut query);
        let names: Vec<_> = outcome.filtered.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec![r#"A "Big" Co"#, "B"]);

        let csv = encode_csv(outcome.filtered.iter().copied()).unwrap();
        let first_row = csv.lines().nth(1).unwrap();
        assert!(first_row.starts_with(r#""1","A ""Big"" Co","#));
    }

    #[test]
    fn test_filtered_ids_span_all_pages() {
        let records = fallback_users();
        let mut query = QueryState::new(size(3));
        query.set_search_text("group");

        let outcome = run(&records, &mut query);
        let mut ids: Vec<_> = outcome.filtered_ids().map(|id| id.0).collect();
        ids.sort_unstable();
        // Johns Group, Abernathy Group
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_sorted_by_city_descending() {
        let records = fallback_users();
        let mut query = QueryState::new(size(3));
        query.set_sort(SortSpec::new(SortKey::City, SortDirection::Desc));

        let outcome = run(&records, &mut query);
        let cities: Vec<_> = outcome.page_items().iter().map(|u| u.city()).collect();
        assert_eq!(cities, vec!["Wisokyburgh", "South Elvis", "South Christy"]);
    }
}
