//! Page type for paginated results.

use crate::model::Identified;
use crate::model::ItemId;

/// One fixed-size, order-preserving window of the remote collection.
///
/// Pages are 1-based. The total record count is the collection size the
/// source reported when this page was fetched; it is only authoritative as of
/// that fetch.
///
/// # Example
///
/// ```
/// use artworks_lib::api::Page;
/// use artworks_lib::model::{Artwork, ItemId};
///
/// let page = Page::new(2, vec![Artwork::new(11u64), Artwork::new(12u64)], 95);
/// assert_eq!(page.index(), 2);
/// assert_eq!(page.ids(), vec![ItemId(11), ItemId(12)]);
/// assert_eq!(page.total_pages(10), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Page<T> {
    index: u32,
    items: Vec<T>,
    total_count: usize,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(index: u32, items: Vec<T>, total_count: usize) -> Self {
        Self {
            index,
            items,
            total_count,
        }
    }

    /// Returns the 1-based page index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Returns a reference to the items in this page, in collection order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the total record count reported with this page.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of pages in the collection for the given page size.
    pub fn total_pages(&self, page_size: usize) -> u32 {
        page_count(self.total_count, page_size)
    }

    /// Returns `true` if pages after this one exist for the given page size.
    pub fn has_more(&self, page_size: usize) -> bool {
        self.index < self.total_pages(page_size)
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Identified> Page<T> {
    /// Returns the identifiers of the items in this page, in order.
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Identified::id).collect()
    }
}

/// Number of pages needed to hold `total` records at `page_size` per page.
///
/// A page size of zero yields zero pages.
pub fn page_count(total: usize, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(page_size)).unwrap_or(u32::MAX)
}
