//! Plain-text rendering of directory state.
//!
//! Renderers are pure: they take owned view data and return a `String`
//! without a trailing newline.

mod detail;
mod grid;
mod table;

pub use detail::render_detail;
pub use grid::render_grid;
pub use table::render_table;

use roster_core::ViewMode;
use roster_query::Facets;
use roster_runtime::LoadState;

use crate::directory::PageView;

/// Header, body and footer for the current page.
pub fn render_page(view: &PageView) -> String {
    let mut sections = vec![render_header(view)];

    match &view.state {
        LoadState::Idle | LoadState::Loading => sections.push("Loading...".to_string()),
        LoadState::Failed { message } => sections.push(format!("Error: {}", message)),
        LoadState::Ready { .. } => {
            if view.is_empty() {
                sections.push("No users found.".to_string());
            } else {
                sections.push(match view.view_mode {
                    ViewMode::Grid => render_grid(view),
                    ViewMode::Table => render_table(view),
                });
            }
            sections.push(render_footer(view));
        }
    }

    sections.join("\n\n")
}

fn render_header(view: &PageView) -> String {
    let mut header = format!(
        "Users Directory ({} view, sorted by {} {})",
        view.view_mode,
        view.sort.key.label(),
        view.sort.dir.indicator()
    );

    let filters: Vec<String> = [
        ("search", view.search.trim()),
        ("company", view.company_filter.as_str()),
        ("city", view.city_filter.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(name, value)| format!("{} {:?}", name, value))
    .collect();

    if !filters.is_empty() {
        header.push_str("\nFilters: ");
        header.push_str(&filters.join(", "));
    }
    header
}

fn render_footer(view: &PageView) -> String {
    let mut footer = format!(
        "{} · Page {} of {} · {} / page",
        view.summary, view.page, view.total_pages, view.page_size
    );
    if view.selected > 0 {
        footer.push_str(&format!(" · {} selected", view.selected));
    }
    footer
}

/// Filter values offered for the company and city filters.
pub fn render_facets(facets: &Facets) -> String {
    fn line(label: &str, values: &[String]) -> String {
        if values.is_empty() {
            format!("{}: -", label)
        } else {
            format!("{} ({}): {}", label, values.len(), values.join(", "))
        }
    }

    format!(
        "{}\n{}",
        line("Companies", &facets.companies),
        line("Cities", &facets.cities)
    )
}

/// Selection marker used by both layouts.
pub(crate) fn marker(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use roster_core::{SortSpec, UserRecord, ViewMode};
    use roster_query::PageSummary;
    use roster_runtime::LoadState;

    use crate::directory::{PageView, RowView};

    pub fn leanne() -> UserRecord {
        UserRecord::new(1u64, "Leanne Graham")
            .with_username("Bret")
            .with_email("Sincere@april.biz")
            .with_phone("1-770-736-8031 x56442")
            .with_website("hildegard.org")
            .with_company("Romaguera-Crona")
            .with_city("Gwenborough")
    }

    pub fn ervin() -> UserRecord {
        UserRecord::new(2u64, "Ervin Howell")
            .with_username("Antonette")
            .with_email("Shanna@melissa.tv")
            .with_company("Deckow-Crist")
            .with_city("Wisokyburgh")
    }

    pub fn page(view_mode: ViewMode) -> PageView {
        PageView {
            state: LoadState::Ready { count: 2 },
            rows: vec![
                RowView {
                    user: ervin(),
                    selected: false,
                },
                RowView {
                    user: leanne(),
                    selected: true,
                },
            ],
            summary: PageSummary {
                first: 1,
                last: 2,
                total: 2,
            },
            page: 1,
            total_pages: 1,
            page_size: 5,
            view_mode,
            sort: SortSpec::default(),
            search: String::new(),
            company_filter: String::new(),
            city_filter: String::new(),
            selected: 1,
        }
    }
}
