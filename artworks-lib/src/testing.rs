//! In-memory collection for exercising the selection code without a network.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::Page;
use crate::api::PageFetcher;
use crate::error::ApiError;
use crate::model::Artwork;

/// A synthetic collection of `total` artworks with ids `1..=total`.
pub(crate) struct FakeCollection {
    total: usize,
    page_size: usize,
    fail_on: Option<u32>,
    requested: Mutex<Vec<u32>>,
}

impl FakeCollection {
    pub(crate) fn new(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size,
            fail_on: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Makes every fetch of `page` fail with HTTP 503.
    pub(crate) fn failing_on(mut self, page: u32) -> Self {
        self.fail_on = Some(page);
        self
    }

    /// Pages requested so far, in order.
    pub(crate) fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeCollection {
    type Item = Artwork;

    async fn fetch(&self, page: u32) -> Result<Page<Artwork>, ApiError> {
        self.requested.lock().push(page);
        tokio::task::yield_now().await;

        if self.fail_on == Some(page) {
            return Err(ApiError::http(503, "Service Unavailable"));
        }

        let start = (page as usize - 1) * self.page_size + 1;
        let end = (start + self.page_size - 1).min(self.total);
        let items = (start..=end)
            .map(|id| Artwork::new(id as u64).with_title(format!("Artwork {id}")))
            .collect();
        Ok(Page::new(page, items, self.total))
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
