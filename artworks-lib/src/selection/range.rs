//! Selecting and deselecting a count of items across pages.

use std::fmt;
use std::num::IntErrorKind;
use std::num::NonZeroUsize;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::api::PageFetcher;
use crate::api::page_count;
use crate::error::ApiError;
use crate::error::ValidationError;
use crate::model::Identified;
use crate::model::ItemId;

use super::SelectionSession;

/// A validated, strictly positive number of items to select or deselect.
///
/// # Example
///
/// ```
/// use artworks_lib::error::ValidationError;
/// use artworks_lib::selection::RangeCount;
///
/// assert_eq!("25".parse::<RangeCount>().unwrap().get(), 25);
/// assert_eq!("0".parse::<RangeCount>(), Err(ValidationError::Zero));
/// assert_eq!("-3".parse::<RangeCount>(), Err(ValidationError::Negative(-3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCount(NonZeroUsize);

impl RangeCount {
    /// Creates a count, rejecting zero.
    pub fn new(count: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(count)
            .map(Self)
            .ok_or(ValidationError::Zero)
    }

    /// Returns the count.
    pub fn get(self) -> usize {
        self.0.get()
    }

    fn ensure_at_most(self, max: usize) -> Result<Self, ValidationError> {
        if self.get() > max {
            return Err(ValidationError::ExceedsMaximum {
                requested: self.get(),
                max,
            });
        }
        Ok(self)
    }
}

impl FromStr for RangeCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed.parse().map_err(|e: ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow => ValidationError::TooLarge(trimmed.to_string()),
            IntErrorKind::NegOverflow => ValidationError::Negative(i64::MIN),
            _ => ValidationError::NotANumber(trimmed.to_string()),
        })?;
        if value < 0 {
            return Err(ValidationError::Negative(value));
        }
        let count =
            usize::try_from(value).map_err(|_| ValidationError::TooLarge(trimmed.to_string()))?;
        Self::new(count)
    }
}

impl fmt::Display for RangeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Why a range selection stopped walking pages.
#[derive(Debug)]
pub enum StopReason {
    /// The requested number of items was collected.
    Satisfied,
    /// The collection ran out of items first.
    Exhausted,
    /// A page fetch failed; everything collected before it was still selected.
    FetchFailed {
        /// The page that could not be fetched.
        page: u32,
        /// The transport error.
        error: ApiError,
    },
}

/// Result of [`SelectionSession::select_range`].
///
/// A range selection never fails once it has started: a short collection or a
/// failed fetch yields a partial outcome whose items were still selected.
#[derive(Debug)]
pub struct RangeOutcome {
    /// How many items were asked for.
    pub requested: usize,
    /// Identifiers collected, in page order, all submitted to the store.
    pub selected: Vec<ItemId>,
    /// How many of `selected` were not already selected.
    pub newly_added: usize,
    /// Number of pages fetched.
    pub pages_fetched: u32,
    /// Why the walk stopped.
    pub stop: StopReason,
}

impl RangeOutcome {
    /// Number of identifiers collected.
    pub fn achieved(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if fewer items than requested were collected.
    pub fn is_partial(&self) -> bool {
        self.achieved() < self.requested
    }

    /// Returns the fetch error that cut the walk short, if any.
    pub fn failure(&self) -> Option<&ApiError> {
        match &self.stop {
            StopReason::FetchFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl<F: PageFetcher> SelectionSession<F> {
    /// Selects the first `count` items of the collection from page `start` on.
    ///
    /// Walks forward one page at a time, recording every fetched page in the
    /// cache, until `count` items are collected, the last page implied by the
    /// latest known total is passed, or a fetch fails. Whatever was collected
    /// is added to the selection in every case.
    ///
    /// The count is checked against the latest known total before anything
    /// is fetched.
    pub async fn select_range(
        &self,
        start: u32,
        count: RangeCount,
    ) -> Result<RangeOutcome, ValidationError> {
        if start == 0 {
            return Err(ValidationError::InvalidPage(start));
        }
        if let Some(total) = self.cache.known_total() {
            count.ensure_at_most(total)?;
        }

        let page_size = self.fetcher.page_size();
        let mut remaining = count.get();
        let mut current = start;
        let mut selected = Vec::with_capacity(remaining);
        let mut pages_fetched = 0;
        let mut failure = None;

        while remaining > 0 {
            if let Some(total) = self.cache.known_total() {
                if current > page_count(total, page_size) {
                    break;
                }
            }

            let page = match self.fetcher.fetch(current).await {
                Ok(page) => page,
                Err(error) => {
                    log::warn!(
                        "Range selection stopped at page {} after {} of {} items: {}",
                        current,
                        selected.len(),
                        count,
                        error
                    );
                    failure = Some(StopReason::FetchFailed {
                        page: current,
                        error,
                    });
                    break;
                }
            };
            pages_fetched += 1;
            self.cache.record_page(&page);

            if page.is_empty() {
                break;
            }

            let take = remaining.min(page.len());
            selected.extend(page.items()[..take].iter().map(Identified::id));
            remaining -= take;
            current += 1;
        }

        let newly_added = self.store.add_many(selected.iter().copied());

        let stop = match failure {
            Some(stop) => stop,
            None if remaining == 0 => StopReason::Satisfied,
            None => StopReason::Exhausted,
        };
        log::debug!(
            "Range selection from page {}: {} of {} items over {} page(s), {} new",
            start,
            selected.len(),
            count,
            pages_fetched,
            newly_added
        );

        Ok(RangeOutcome {
            requested: count.get(),
            selected,
            newly_added,
            pages_fetched,
            stop,
        })
    }

    /// Selects `count` items starting from the visible page.
    pub async fn select_from_current(
        &self,
        count: RangeCount,
    ) -> Result<RangeOutcome, ValidationError> {
        let start = self.current_page().ok_or(ValidationError::NoPageLoaded)?;
        self.select_range(start, count).await
    }

    /// Deselects `count` currently selected items, oldest selection first.
    ///
    /// Draws only from the current selection and never touches the network.
    /// Returns the identifiers that were deselected.
    pub fn deselect_range(&self, count: RangeCount) -> Result<Vec<ItemId>, ValidationError> {
        count.ensure_at_most(self.store.count())?;

        let ids = self.store.first(count.get());
        self.store.remove_many(ids.iter().copied());
        Ok(ids)
    }
}
