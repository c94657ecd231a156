//! Filter stage: free-text search plus exact company/city filters.

use std::collections::BTreeSet;

use roster_core::{QueryState, UserRecord};

/// Compiled filter predicate for one query state.
///
/// The search text is trimmed and lowercased once, up front.
#[derive(Debug, Clone)]
pub struct UserFilter<'q> {
    needle: String,
    company: &'q str,
    city: &'q str,
}

impl<'q> UserFilter<'q> {
    pub fn new(query: &'q QueryState) -> Self {
        Self {
            needle: query.search_text().trim().to_lowercase(),
            company: query.company_filter(),
            city: query.city_filter(),
        }
    }

    /// True if the record passes search text and both column filters.
    pub fn matches(&self, user: &UserRecord) -> bool {
        self.matches_text(user)
            && (self.company.is_empty() || user.company_name() == self.company)
            && (self.city.is_empty() || user.city() == self.city)
    }

    fn matches_text(&self, user: &UserRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        searchable_fields(user)
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

fn searchable_fields(user: &UserRecord) -> [&str; 7] {
    [
        user.name.as_str(),
        user.username.as_str(),
        user.email.as_str(),
        user.phone.as_str(),
        user.website.as_str(),
        user.company_name(),
        user.city(),
    ]
}

/// Records that pass the query's filters, in input order.
pub fn filter_users<'a>(records: &'a [UserRecord], query: &QueryState) -> Vec<&'a UserRecord> {
    let filter = UserFilter::new(query);
    records.iter().filter(|user| filter.matches(user)).collect()
}

/// Distinct, sorted filter values for the loaded records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub companies: Vec<String>,
    pub cities: Vec<String>,
}

impl Facets {
    /// Collect facets, skipping records without the nested field.
    pub fn from_records(records: &[UserRecord]) -> Self {
        let companies: BTreeSet<&str> = records
            .iter()
            .map(UserRecord::company_name)
            .filter(|name| !name.is_empty())
            .collect();
        let cities: BTreeSet<&str> = records
            .iter()
            .map(UserRecord::city)
            .filter(|city| !city.is_empty())
            .collect();

        Self {
            companies: companies.into_iter().map(str::to_string).collect(),
            cities: cities.into_iter().map(str::to_string).collect(),
        }
    }
}
