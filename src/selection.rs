//! Row selection state that outlives page navigation.
//!
//! The table only ever holds one page of artworks, but selections are
//! global: they are stored by artwork id and survive paging away and back.
//! Entries are never removed automatically, so the map grows with every id
//! the user touches. `clear` is the only way to shrink it.

use std::collections::{HashMap, HashSet};

use crate::api::types::Artwork;

/// A mapping from artwork id to its selected flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMap {
    flags: HashMap<u64, bool>,
}

impl SelectionMap {
    /// Create an empty selection map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an artwork is selected.
    ///
    /// Ids that were never touched count as unselected.
    pub fn is_selected(&self, id: u64) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    /// The flag recorded for an id, if any.
    #[cfg(test)]
    pub(crate) fn get(&self, id: u64) -> Option<bool> {
        self.flags.get(&id).copied()
    }

    /// Apply a new selection set reported for the visible page.
    ///
    /// Every row on `page` gets its flag set to whether it appears in
    /// `selected_ids`. Ids not on `page` are left as they were, even if they
    /// appear in `selected_ids`.
    pub fn apply_page_selection(&mut self, page: &[Artwork], selected_ids: &HashSet<u64>) {
        for artwork in page {
            self.flags
                .insert(artwork.id, selected_ids.contains(&artwork.id));
        }
    }

    /// Mark the first `count` rows of `page` as selected.
    ///
    /// Never deselects anything. A `count` larger than the page selects the
    /// whole page. Returns how many rows were marked.
    pub fn select_first(&mut self, page: &[Artwork], count: usize) -> usize {
        let mut marked = 0;
        for artwork in page.iter().take(count) {
            self.flags.insert(artwork.id, true);
            marked += 1;
        }
        marked
    }

    /// The rows of `page` that are selected, in page order.
    pub fn selected_rows<'a>(&self, page: &'a [Artwork]) -> Vec<&'a Artwork> {
        page.iter().filter(|a| self.is_selected(a.id)).collect()
    }

    /// The ids of `page` that are selected.
    pub fn selected_ids_on(&self, page: &[Artwork]) -> HashSet<u64> {
        page.iter()
            .filter(|a| self.is_selected(a.id))
            .map(|a| a.id)
            .collect()
    }

    /// Number of artworks selected across all pages.
    pub fn selected_count(&self) -> usize {
        self.flags.values().filter(|&&selected| selected).count()
    }

    /// Number of ids tracked, selected or not.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.flags.len()
    }

    /// Check if no ids are tracked.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Forget every selection.
    pub fn clear(&mut self) {
        self.flags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: std::ops::RangeInclusive<u64>) -> Vec<Artwork> {
        ids.map(|id| Artwork::new(id, format!("Artwork {}", id)))
            .collect()
    }

    fn ids(ids: &[u64]) -> HashSet<u64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_untouched_ids_are_unselected() {
        let map = SelectionMap::new();
        assert!(!map.is_selected(42));
        assert_eq!(map.get(42), None);
    }

    #[test]
    fn test_apply_page_selection_sets_every_visible_row() {
        let rows = page(1..=4);
        let mut map = SelectionMap::new();

        map.apply_page_selection(&rows, &ids(&[2, 4]));

        assert_eq!(map.get(1), Some(false));
        assert_eq!(map.get(2), Some(true));
        assert_eq!(map.get(3), Some(false));
        assert_eq!(map.get(4), Some(true));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_apply_page_selection_leaves_other_pages_alone() {
        let first = page(1..=3);
        let second = page(11..=13);
        let mut map = SelectionMap::new();

        map.apply_page_selection(&first, &ids(&[1]));
        map.apply_page_selection(&second, &ids(&[12]));

        assert!(map.is_selected(1));
        assert!(map.is_selected(12));
        assert_eq!(map.selected_count(), 2);
    }

    #[test]
    fn test_apply_page_selection_ignores_ids_off_page() {
        let rows = page(1..=3);
        let mut map = SelectionMap::new();

        map.apply_page_selection(&rows, &ids(&[99]));

        assert_eq!(map.get(99), None);
        assert_eq!(map.selected_count(), 0);
    }

    #[test]
    fn test_deselect_by_omission() {
        let rows = page(1..=3);
        let mut map = SelectionMap::new();
        map.apply_page_selection(&rows, &ids(&[1, 2]));

        map.apply_page_selection(&rows, &ids(&[2]));

        assert!(!map.is_selected(1));
        assert!(map.is_selected(2));
    }

    #[test]
    fn test_select_first_three_of_ten() {
        let rows = page(1..=10);
        let mut map = SelectionMap::new();

        assert_eq!(map.select_first(&rows, 3), 3);

        assert_eq!(map.selected_ids_on(&rows), ids(&[1, 2, 3]));
        for id in 4..=10 {
            assert_eq!(map.get(id), None, "row {} should be untouched", id);
        }
    }

    #[test]
    fn test_select_first_never_deselects() {
        let rows = page(1..=5);
        let mut map = SelectionMap::new();
        map.apply_page_selection(&rows, &ids(&[5]));

        map.select_first(&rows, 2);

        assert_eq!(map.selected_ids_on(&rows), ids(&[1, 2, 5]));
    }

    #[test]
    fn test_select_first_clamps_to_page() {
        let rows = page(1..=4);
        let mut map = SelectionMap::new();

        assert_eq!(map.select_first(&rows, 50), 4);
        assert_eq!(map.selected_count(), 4);
    }

    #[test]
    fn test_select_first_zero_is_noop() {
        let rows = page(1..=4);
        let mut map = SelectionMap::new();

        assert_eq!(map.select_first(&rows, 0), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_selected_rows_preserves_page_order() {
        let rows = page(1..=5);
        let mut map = SelectionMap::new();
        map.apply_page_selection(&rows, &ids(&[4, 2]));

        let selected: Vec<u64> = map.selected_rows(&rows).iter().map(|a| a.id).collect();
        assert_eq!(selected, vec![2, 4]);
    }

    #[test]
    fn test_clear() {
        let rows = page(1..=3);
        let mut map = SelectionMap::new();
        map.select_first(&rows, 3);

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.selected_count(), 0);
    }
}
