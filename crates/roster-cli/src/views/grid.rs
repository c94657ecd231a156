use crate::directory::PageView;
use crate::views::marker;

/// One card per row: name line, contact line, company/city line.
pub fn render_grid(view: &PageView) -> String {
    view.rows
        .iter()
        .map(|row| {
            let user = &row.user;
            let mut card = format!("{} #{} {}", marker(row.selected), user.id, user.name);
            if !user.username.is_empty() {
                card.push_str(&format!(" (@{})", user.username));
            }

            for parts in [
                [user.email.as_str(), user.phone.as_str()],
                [user.company_name(), user.city()],
            ] {
                let line = join_present(&parts);
                if !line.is_empty() {
                    card.push_str("\n    ");
                    card.push_str(&line);
                }
            }
            card
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .copied()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::RowView;
    use crate::views::fixtures;
    use roster_core::{UserRecord, ViewMode};

    #[test]
    fn test_card_skips_missing_fields() {
        let mut view = fixtures::page(ViewMode::Grid);
        view.rows = vec![RowView {
            user: UserRecord::new(9u64, "Nobody"),
            selected: false,
        }];
        assert_eq!(render_grid(&view), "[ ] #9 Nobody");
    }

    #[test]
    fn test_cards_are_separated() {
        let view = fixtures::page(ViewMode::Grid);
        let text = render_grid(&view);
        assert_eq!(text.matches("\n\n").count(), 1);
        assert!(text.starts_with("[ ] #2 Ervin Howell (@Antonette)"));
    }
}
