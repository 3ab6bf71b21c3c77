//! In-memory page cache using DashMap

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::api::Page;
use crate::model::Identified;
use crate::model::ItemId;

/// Session-scoped store of every fetched item, keyed by identifier.
///
/// Writes are last-write-wins: fetching the same identifier twice keeps the
/// most recent copy, without any staleness check. Nothing is ever evicted; the
/// cache is bounded only by the size of the collection the session walks.
/// It is safe to share across tasks.
///
/// # Example
///
/// ```
/// use artworks_lib::api::Page;
/// use artworks_lib::cache::PageCache;
/// use artworks_lib::model::{Artwork, ItemId};
///
/// let cache = PageCache::new();
/// cache.record_page(&Page::new(1, vec![Artwork::new(7u64)], 95));
///
/// assert!(cache.get(ItemId(7)).is_some());
/// assert_eq!(cache.known_total(), Some(95));
/// ```
#[derive(Debug)]
pub struct PageCache<T> {
    items: DashMap<ItemId, T>,
    known_total: RwLock<Option<usize>>,
}

impl<T: Identified> PageCache<T> {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            known_total: RwLock::new(None),
        }
    }

    /// Inserts or overwrites the given items.
    pub fn record<'a>(&self, items: impl IntoIterator<Item = &'a T>) {
        for item in items {
            self.items.insert(item.id(), item.clone());
        }
    }

    /// Records a page's items and remembers its total as the latest known.
    pub fn record_page(&self, page: &Page<T>) {
        self.record(page.items());
        *self.known_total.write() = Some(page.total_count());
    }

    /// Returns a copy of the cached item, or `None` if it was never fetched.
    pub fn get(&self, id: ItemId) -> Option<T> {
        self.items.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns `true` if the item has been fetched.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the collection size reported by the most recent recorded page.
    pub fn known_total(&self) -> Option<usize> {
        *self.known_total.read()
    }

    /// Returns the number of cached items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every cached item and the known total.
    pub fn clear(&self) {
        self.items.clear();
        *self.known_total.write() = None;
    }
}

impl<T: Identified> Default for PageCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
