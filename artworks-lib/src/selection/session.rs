//! Per-session selection handle

use parking_lot::RwLock;

use crate::api::Page;
use crate::api::PageFetcher;
use crate::api::page_count;
use crate::cache::PageCache;
use crate::error::Error;
use crate::error::ValidationError;
use crate::model::ItemId;

use super::Reconciliation;
use super::SelectionStore;
use super::reconcile;

/// How much of the visible page is selected.
///
/// Drives a tri-state "select page" checkbox: checked for `All`,
/// indeterminate for `Partial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelectionState {
    /// No visible row is selected (or the page is empty).
    None,
    /// Some, but not all, visible rows are selected.
    Partial,
    /// Every visible row is selected.
    All,
}

/// Everything one browsing session needs to select across pages.
///
/// Ties together the page fetcher, the [`SelectionStore`], the [`PageCache`]
/// and the page the user is currently looking at. Create one per session and
/// share it (e.g. behind an `Arc`); every part is safe to use from several
/// tasks at once and no lock is held across a fetch.
///
/// # Example
///
/// ```ignore
/// let session = SelectionSession::new(ArtworksClient::builder().build()?);
///
/// let page = session.load_page(1).await?;
/// session.apply_page_selection(&[page.ids()[0]]);
///
/// let outcome = session.select_range(2, RangeCount::new(25)?).await?;
/// if outcome.is_partial() {
///     println!("only {} of {} selected", outcome.achieved(), outcome.requested);
/// }
/// ```
pub struct SelectionSession<F: PageFetcher> {
    pub(super) fetcher: F,
    pub(super) store: SelectionStore,
    pub(super) cache: PageCache<F::Item>,
    visible: RwLock<Option<Page<F::Item>>>,
}

impl<F: PageFetcher> SelectionSession<F> {
    /// Creates a session with an empty selection.
    pub fn new(fetcher: F) -> Self {
        Self::with_store(fetcher, SelectionStore::new())
    }

    /// Creates a session around an existing selection store.
    pub fn with_store(fetcher: F, store: SelectionStore) -> Self {
        Self {
            fetcher,
            store,
            cache: PageCache::new(),
            visible: RwLock::new(None),
        }
    }

    /// Returns the selection store.
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Returns the cache of every item fetched so far.
    pub fn cache(&self) -> &PageCache<F::Item> {
        &self.cache
    }

    /// Returns the page fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the fixed number of items per page.
    pub fn page_size(&self) -> usize {
        self.fetcher.page_size()
    }

    /// Fetches a page and makes it the visible page.
    ///
    /// On failure the previously visible page stays in place.
    pub async fn load_page(&self, index: u32) -> Result<Page<F::Item>, Error> {
        if index == 0 {
            return Err(ValidationError::InvalidPage(index).into());
        }

        let page = match self.fetcher.fetch(index).await {
            Ok(page) => page,
            Err(e) => {
                log::error!("Failed to load page {}: {}", index, e);
                return Err(e.into());
            }
        };

        log::debug!(
            "Loaded page {} ({} items, {} total)",
            index,
            page.len(),
            page.total_count()
        );
        self.cache.record_page(&page);
        *self.visible.write() = Some(page.clone());
        Ok(page)
    }

    /// Returns a copy of the visible page, if one is loaded.
    pub fn visible_page(&self) -> Option<Page<F::Item>> {
        self.visible.read().clone()
    }

    /// Returns the index of the visible page, if one is loaded.
    pub fn current_page(&self) -> Option<u32> {
        self.visible.read().as_ref().map(Page::index)
    }

    /// Returns the identifiers on the visible page, in order.
    pub fn visible_ids(&self) -> Vec<ItemId> {
        self.visible
            .read()
            .as_ref()
            .map(Page::ids)
            .unwrap_or_default()
    }

    /// Returns the collection size reported by the latest fetch.
    pub fn known_total(&self) -> Option<usize> {
        self.cache.known_total()
    }

    /// Returns the number of pages implied by the latest known total.
    pub fn total_pages(&self) -> Option<u32> {
        self.known_total()
            .map(|total| page_count(total, self.page_size()))
    }

    /// Applies the set of rows the view reports as checked on the visible page.
    ///
    /// Without a visible page this is a no-op.
    pub fn apply_page_selection(&self, checked: &[ItemId]) -> Reconciliation {
        reconcile(&self.store, &self.visible_ids(), checked)
    }

    /// Selects every row on the visible page. Returns how many were added.
    pub fn select_current_page(&self) -> Result<usize, ValidationError> {
        let ids = self.require_visible_ids()?;
        Ok(self.store.add_many(ids))
    }

    /// Deselects every row on the visible page. Returns how many were removed.
    pub fn deselect_current_page(&self) -> Result<usize, ValidationError> {
        let ids = self.require_visible_ids()?;
        Ok(self.store.remove_many(ids))
    }

    /// Returns how much of the visible page is selected.
    pub fn page_selection_state(&self) -> PageSelectionState {
        let ids = self.visible_ids();
        let selected = ids.iter().filter(|id| self.store.contains(**id)).count();
        match selected {
            0 => PageSelectionState::None,
            n if n == ids.len() => PageSelectionState::All,
            _ => PageSelectionState::Partial,
        }
    }

    fn require_visible_ids(&self) -> Result<Vec<ItemId>, ValidationError> {
        self.visible
            .read()
            .as_ref()
            .map(Page::ids)
            .ok_or(ValidationError::NoPageLoaded)
    }
}
