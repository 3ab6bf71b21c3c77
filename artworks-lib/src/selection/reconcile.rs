//! Merging page-local checkbox events into the global selection.

use std::collections::HashSet;

use crate::model::ItemId;

use super::SelectionStore;

/// The changes one reconciliation applied to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Visible identifiers that became selected, in page order.
    pub added: Vec<ItemId>,
    /// Visible identifiers that were unchecked, in page order.
    pub removed: Vec<ItemId>,
    /// Checked identifiers that were not on the visible page and were dropped.
    pub ignored: Vec<ItemId>,
}

impl Reconciliation {
    /// Returns `true` if the store was left untouched.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Brings the store in line with the rows checked on the visible page.
///
/// `visible` is every identifier on the page, `checked` is what the view now
/// reports as checked. Only visible identifiers are ever added or removed:
/// selections on other pages are untouched and checked identifiers outside
/// `visible` are ignored. The new selection is `(S - visible) ∪ checked`.
///
/// # Example
///
/// ```
/// use artworks_lib::model::ItemId;
/// use artworks_lib::selection::{SelectionStore, reconcile};
///
/// let store = SelectionStore::new();
/// store.add_many([ItemId(3), ItemId(7), ItemId(12)]);
///
/// let visible: Vec<ItemId> = (1..=5).map(ItemId).collect();
/// let checked = [ItemId(1), ItemId(3), ItemId(5)];
/// reconcile(&store, &visible, &checked);
///
/// let mut ids = store.ids();
/// ids.sort();
/// assert_eq!(ids, [1, 3, 5, 7, 12].map(ItemId));
/// ```
pub fn reconcile(store: &SelectionStore, visible: &[ItemId], checked: &[ItemId]) -> Reconciliation {
    let on_page: HashSet<ItemId> = visible.iter().copied().collect();

    let mut checked_on_page = HashSet::with_capacity(checked.len());
    let mut ignored = Vec::new();
    for &id in checked {
        if on_page.contains(&id) {
            checked_on_page.insert(id);
        } else {
            ignored.push(id);
        }
    }
    if !ignored.is_empty() {
        log::debug!(
            "Ignoring {} checked id(s) not on the visible page: {:?}",
            ignored.len(),
            ignored
        );
    }

    let mut seen = HashSet::with_capacity(visible.len());
    let mut added = Vec::new();
    let mut removed = Vec::new();
    for &id in visible {
        if !seen.insert(id) {
            continue;
        }
        match (store.contains(id), checked_on_page.contains(&id)) {
            (true, false) => removed.push(id),
            (false, true) => added.push(id),
            _ => {}
        }
    }

    store.remove_many(removed.iter().copied());
    store.add_many(added.iter().copied());

    Reconciliation {
        added,
        removed,
        ignored,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ids(raw: &[u64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId).collect()
    }

    fn sorted(store: &SelectionStore) -> Vec<ItemId> {
        let mut ids = store.ids();
        ids.sort();
        ids
    }

    #[test]
    fn test_keeps_off_page_selection() {
        let store = SelectionStore::new();
        store.add_many(ids(&[3, 7, 12]));

        let result = reconcile(&store, &ids(&[1, 2, 3, 4, 5]), &ids(&[1, 3, 5]));

        assert_eq!(sorted(&store), ids(&[1, 3, 5, 7, 12]));
        assert_eq!(result.added, ids(&[1, 5]));
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_unchecked_rows_are_removed() {
        let store = SelectionStore::new();
        store.add_many(ids(&[1, 2, 40]));

        let result = reconcile(&store, &ids(&[1, 2, 3]), &ids(&[2]));

        assert_eq!(result.removed, ids(&[1]));
        assert_eq!(sorted(&store), ids(&[2, 40]));
    }

    #[test]
    fn test_empty_page_is_noop() {
        let store = SelectionStore::new();
        store.add_many(ids(&[1]));

        let result = reconcile(&store, &[], &ids(&[1, 2]));

        assert!(result.is_noop());
        assert_eq!(result.ignored, ids(&[1, 2]));
        assert_eq!(store.ids(), ids(&[1]));
    }

    #[test]
    fn test_off_page_checks_are_ignored() {
        let store = SelectionStore::new();

        let result = reconcile(&store, &ids(&[1, 2]), &ids(&[2, 99]));

        assert_eq!(result.ignored, ids(&[99]));
        assert!(!store.contains(ItemId(99)));
        assert_eq!(store.ids(), ids(&[2]));
    }

    #[test]
    fn test_unchanged_page_is_noop() {
        let store = SelectionStore::new();
        store.add_many(ids(&[1, 3]));

        let result = reconcile(&store, &ids(&[1, 2, 3]), &ids(&[3, 1]));

        assert!(result.is_noop());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// For any page V, prior selection S and checked set C ⊆ V,
        /// reconciling yields (S - V) ∪ C.
        #[test]
        fn prop_reconcile_matches_set_formula(
            visible in prop::collection::hash_set(0u64..60, 0..15),
            prior in prop::collection::hash_set(0u64..60, 0..30),
            mask in prop::collection::vec(any::<bool>(), 15),
        ) {
            let visible: Vec<ItemId> = visible.into_iter().map(ItemId).collect();
            let checked: Vec<ItemId> = visible
                .iter()
                .zip(mask.iter())
                .filter(|(_, keep)| **keep)
                .map(|(id, _)| *id)
                .collect();

            let store = SelectionStore::new();
            store.add_many(prior.iter().copied().map(ItemId));

            reconcile(&store, &visible, &checked);

            let on_page: HashSet<ItemId> = visible.iter().copied().collect();
            let mut expected: HashSet<ItemId> = prior
                .into_iter()
                .map(ItemId)
                .filter(|id| !on_page.contains(id))
                .collect();
            expected.extend(checked.iter().copied());

            let actual: HashSet<ItemId> = store.ids().into_iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
