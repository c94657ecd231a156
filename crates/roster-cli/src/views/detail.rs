use roster_core::UserRecord;

/// Full record: contact, company, address and a map link.
pub fn render_detail(user: &UserRecord) -> String {
    let catch_phrase = if user.catch_phrase().is_empty() {
        String::new()
    } else {
        format!("\"{}\"", user.catch_phrase())
    };

    let fields = [
        ("Username", user.username.clone()),
        ("Email", user.email.clone()),
        ("Phone", user.phone.clone()),
        ("Website", user.website_url().unwrap_or_default()),
        ("Company", user.company_name().to_string()),
        // Continuation of the company line
        ("", catch_phrase),
        ("Address", user.address_line()),
        ("Map", user.maps_url().unwrap_or_default()),
    ];

    std::iter::once(format!("#{} {}", user.id, user.name))
        .chain(
            fields
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(label, value)| {
                    let label = if label.is_empty() {
                        String::new()
                    } else {
                        format!("{}:", label)
                    };
                    format!("{:<9} {}", label, value)
                }),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::fallback_users;

    #[test]
    fn test_render_detail() {
        let users = fallback_users();
        insta::assert_snapshot!(render_detail(&users[0]), @r#"
        #1 Leanne Graham
        Username: Bret
        Email:    Sincere@april.biz
        Phone:    1-770-736-8031 x56442
        Website:  https://hildegard.org
        Company:  Romaguera-Crona
                  "Multi-layered client-server neural-net"
        Address:  Kulas Light, Apt. 556, Gwenborough, 92998-3874
        Map:      https://www.google.com/maps/search/?api=1&query=-37.3159,81.1496
        "#);
    }

    #[test]
    fn test_render_detail_sparse_record() {
        let user = UserRecord::new(3u64, "Clementine Bauch").with_email("Nathan@yesenia.net");
        assert_eq!(
            render_detail(&user),
            "#3 Clementine Bauch\nEmail:    Nathan@yesenia.net"
        );
    }
}
