//! Page fetching

mod fetcher;
mod page;

pub use fetcher::PageFetcher;
pub use page::Page;
pub use page::page_count;
