//! Row selection tracking.

use std::collections::HashSet;

use crate::record::{UserId, UserRecord};

/// Set of selected user ids.
///
/// Holds ids only, never records. Ids that are no longer in the store
/// (after a reload, say) may linger; [`SelectionSet::selected_in`] skips
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<UserId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns true if it is now selected.
    pub fn toggle(&mut self, id: UserId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection with exactly `visible`.
    pub fn select_all_visible(&mut self, visible: impl IntoIterator<Item = UserId>) {
        self.ids = visible.into_iter().collect();
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Records from `records` that are selected, in the order given.
    pub fn selected_in<'a>(
        &'a self,
        records: &'a [UserRecord],
    ) -> impl Iterator<Item = &'a UserRecord> + 'a {
        records.iter().filter(move |user| self.contains(user.id))
    }

    /// Number of selected ids present in `records`.
    pub fn count_in(&self, records: &[UserRecord]) -> usize {
        self.selected_in(records).count()
    }
}
