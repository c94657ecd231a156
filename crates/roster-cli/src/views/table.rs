use roster_core::{SortKey, UserRecord};

use crate::directory::PageView;
use crate::views::marker;

const SORTABLE: [SortKey; 5] = [
    SortKey::Name,
    SortKey::Username,
    SortKey::Email,
    SortKey::Company,
    SortKey::City,
];

/// Aligned table with the active sort column marked.
pub fn render_table(view: &PageView) -> String {
    let mut header = vec!["Sel".to_string(), "ID".to_string()];
    header.extend(SORTABLE.iter().map(|key| {
        if *key == view.sort.key {
            format!("{} {}", key.label(), view.sort.dir.indicator())
        } else {
            key.label().to_string()
        }
    }));

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![marker(row.selected).to_string(), row.user.id.to_string()];
            cells.extend(SORTABLE.iter().map(|key| cell(key, &row.user)));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

    std::iter::once(&header)
        .chain(std::iter::once(&rule))
        .chain(rows.iter())
        .map(|cells| format_line(cells, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell(key: &SortKey, user: &UserRecord) -> String {
    key.value_of(user).to_string()
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}
