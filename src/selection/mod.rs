//! Selected document ids for bulk operations.
//!
//! The selection only ever holds ids from the currently loaded page: select-all
//! replaces it with the page's ids, and loading a new page prunes it.

use crate::model::DocumentId;
use indexmap::IndexSet;
use serde::Serialize;

/// State of a "select all" checkbox for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderState {
    None,
    /// Some but not all rows are selected (indeterminate checkbox)
    Some,
    All,
}

/// Set of selected document ids.
///
/// Insertion order is kept so requests list ids in the order the user picked
/// them, but carries no other meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: IndexSet<DocumentId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with exactly `page_ids`.
    pub fn select_all<I>(&mut self, page_ids: I)
    where
        I: IntoIterator<Item = DocumentId>,
    {
        self.ids = page_ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Remove `id` if selected, otherwise append it. Returns the new membership.
    pub fn toggle(&mut self, id: DocumentId) -> bool {
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: DocumentId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Snapshot of the selected ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<DocumentId> {
        self.ids.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.ids.iter().copied()
    }

    /// Drop every id not in `page_ids`. Returns how many were removed.
    pub fn retain_page(&mut self, page_ids: &[DocumentId]) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| page_ids.contains(id));
        before - self.ids.len()
    }

    /// Checkbox state for a page with `page_len` rows.
    #[must_use]
    pub fn header_state(&self, page_len: usize) -> HeaderState {
        match self.ids.len() {
            0 => HeaderState::None,
            n if page_len > 0 && n >= page_len => HeaderState::All,
            _ => HeaderState::Some,
        }
    }
}

impl FromIterator<DocumentId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = DocumentId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_appends_and_removes() {
        let mut sel = SelectionSet::new();
        assert!(sel.toggle(3));
        assert!(sel.toggle(1));
        assert_eq!(sel.ids(), vec![3, 1]);
        assert!(!sel.toggle(3));
        assert_eq!(sel.ids(), vec![1]);
    }

    #[test]
    fn test_select_all_replaces() {
        let mut sel: SelectionSet = [9, 8].into_iter().collect();
        sel.select_all([1, 2, 3]);
        assert_eq!(sel.ids(), vec![1, 2, 3]);
        assert!(!sel.is_selected(9));
    }

    #[test]
    fn test_retain_page() {
        let mut sel: SelectionSet = [1, 2, 3].into_iter().collect();
        assert_eq!(sel.retain_page(&[2, 3, 4]), 1);
        assert_eq!(sel.ids(), vec![2, 3]);
    }

    #[test]
    fn test_header_state() {
        let mut sel = SelectionSet::new();
        assert_eq!(sel.header_state(3), HeaderState::None);
        sel.toggle(1);
        assert_eq!(sel.header_state(3), HeaderState::Some);
        sel.select_all([1, 2, 3]);
        assert_eq!(sel.header_state(3), HeaderState::All);
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.header_state(0), HeaderState::None);
    }
}
