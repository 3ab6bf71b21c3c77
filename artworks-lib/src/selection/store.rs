//! Selection store

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::model::ItemId;

/// The authoritative set of selected item identifiers for a session.
///
/// Membership is independent of whether the item is cached or on the visible
/// page. Identifiers are enumerated in the order they were selected.
///
/// The store is cheap to clone: clones share the same selection, so one store
/// can be handed to every consumer of the session. Every operation is
/// synchronous and total, and its effect is visible to all clones as soon as
/// it returns. The current count is also published on a watch channel, see
/// [`SelectionStore::subscribe`].
///
/// # Example
///
/// ```
/// use artworks_lib::model::ItemId;
/// use artworks_lib::selection::SelectionStore;
///
/// let store = SelectionStore::new();
/// store.add_many([ItemId(3), ItemId(7), ItemId(3)]);
/// assert_eq!(store.count(), 2);
///
/// store.toggle(ItemId(7));
/// assert!(!store.contains(ItemId(7)));
/// ```
#[derive(Debug, Clone)]
pub struct SelectionStore {
    inner: Arc<SelectionStoreInner>,
}

#[derive(Debug)]
struct SelectionStoreInner {
    state: RwLock<SelectionState>,
    count_tx: watch::Sender<usize>,
}

/// Members keyed both ways so enumeration follows selection order while
/// membership tests stay O(1).
#[derive(Debug, Default)]
struct SelectionState {
    members: HashMap<ItemId, u64>,
    order: BTreeMap<u64, ItemId>,
    next_seq: u64,
}

impl SelectionState {
    fn insert(&mut self, id: ItemId) -> bool {
        if self.members.contains_key(&id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.members.insert(id, seq);
        self.order.insert(seq, id);
        true
    }

    fn remove(&mut self, id: ItemId) -> bool {
        match self.members.remove(&id) {
            Some(seq) => {
                self.order.remove(&seq);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

impl SelectionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        let (count_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(SelectionStoreInner {
                state: RwLock::new(SelectionState::default()),
                count_tx,
            }),
        }
    }

    /// Flips membership of `id`. Returns `true` if it is now selected.
    pub fn toggle(&self, id: ItemId) -> bool {
        self.mutate(|state| {
            if state.remove(id) {
                false
            } else {
                state.insert(id)
            }
        })
    }

    /// Adds every identifier. Returns how many were not already selected.
    pub fn add_many(&self, ids: impl IntoIterator<Item = ItemId>) -> usize {
        self.mutate(|state| ids.into_iter().filter(|id| state.insert(*id)).count())
    }

    /// Removes every identifier. Returns how many were actually selected.
    pub fn remove_many(&self, ids: impl IntoIterator<Item = ItemId>) -> usize {
        self.mutate(|state| ids.into_iter().filter(|id| state.remove(*id)).count())
    }

    /// Empties the selection.
    pub fn clear(&self) {
        self.mutate(SelectionState::clear);
    }

    /// Sets the selection to exactly `ids`, discarding prior state.
    pub fn replace(&self, ids: impl IntoIterator<Item = ItemId>) {
        self.mutate(|state| {
            state.clear();
            for id in ids {
                state.insert(id);
            }
        });
    }

    /// Returns the number of selected identifiers.
    pub fn count(&self) -> usize {
        self.inner.state.read().len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: ItemId) -> bool {
        self.inner.state.read().members.contains_key(&id)
    }

    /// Returns every selected identifier, in selection order.
    pub fn ids(&self) -> Vec<ItemId> {
        self.inner.state.read().order.values().copied().collect()
    }

    /// Returns up to `n` identifiers from the front of the selection order.
    pub fn first(&self, n: usize) -> Vec<ItemId> {
        self.inner.state.read().order.values().take(n).copied().collect()
    }

    /// Subscribes to the selection count.
    ///
    /// The receiver observes the count after every mutation that changed it.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.inner.count_tx.subscribe()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut SelectionState) -> R) -> R {
        let mut state = self.inner.state.write();
        let result = f(&mut state);
        let len = state.len();
        self.inner.count_tx.send_if_modified(|count| {
            if *count == len {
                return false;
            }
            *count = len;
            true
        });
        result
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}
