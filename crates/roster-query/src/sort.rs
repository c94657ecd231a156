//! Sort stage.
//!
//! Stable, case-insensitive, by the value the sort key resolves to.
//! Direction only flips the comparison, so equal keys keep their input
//! order in both directions.

use std::cmp::Ordering;

use roster_core::{SortDirection, SortSpec, UserRecord};

/// Compare two records under `spec`.
pub fn compare(a: &UserRecord, b: &UserRecord, spec: SortSpec) -> Ordering {
    let a_val = spec.key.value_of(a).to_lowercase();
    let b_val = spec.key.value_of(b).to_lowercase();
    match spec.dir {
        SortDirection::Asc => a_val.cmp(&b_val),
        SortDirection::Desc => b_val.cmp(&a_val),
    }
}

/// Stable sort in place.
pub fn sort_users(users: &mut [&UserRecord], spec: SortSpec) {
    users.sort_by(|a, b| compare(a, b, spec));
}
