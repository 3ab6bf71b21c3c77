//! PageFetcher trait

use async_trait::async_trait;

use crate::api::Page;
use crate::error::ApiError;
use crate::model::Identified;

/// Retrieves one page of the remote collection.
///
/// Implementations perform the I/O only: they do not cache, retry or record
/// anything. Any timeout policy belongs to the implementation's transport.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use artworks_lib::api::{Page, PageFetcher};
/// use artworks_lib::error::ApiError;
/// use artworks_lib::model::Artwork;
///
/// struct Fixed(Vec<Artwork>);
///
/// #[async_trait]
/// impl PageFetcher for Fixed {
///     type Item = Artwork;
///
///     async fn fetch(&self, page: u32) -> Result<Page<Artwork>, ApiError> {
///         let start = (page as usize - 1) * 10;
///         let items = self.0.iter().skip(start).take(10).cloned().collect();
///         Ok(Page::new(page, items, self.0.len()))
///     }
///
///     fn page_size(&self) -> usize {
///         10
///     }
/// }
/// ```
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// The item type this fetcher yields.
    type Item: Identified;

    /// Fetches the page with the given 1-based index.
    async fn fetch(&self, page: u32) -> Result<Page<Self::Item>, ApiError>;

    /// Number of items per page.
    fn page_size(&self) -> usize;
}
