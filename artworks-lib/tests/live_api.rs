//! Integration tests against the live artworks API.
//!
//! These tests hit the network and are ignored by default. The endpoint can be
//! overridden with a `.env` file in the artworks-lib directory:
//!
//! ```env
//! ARTWORKS_API_URL=https://api.artic.edu/api/v1
//! ```
//!
//! Then run: `cargo test -p artworks-lib -- --ignored`

use std::env;
use std::time::Duration;

use artworks_lib::ArtworksClient;
use artworks_lib::DEFAULT_BASE_URL;
use artworks_lib::api::PageFetcher;
use artworks_lib::selection::RangeCount;
use artworks_lib::selection::SelectionSession;

fn client(page_size: usize) -> ArtworksClient {
    let _ = dotenvy::dotenv();
    let base_url = env::var("ARTWORKS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    ArtworksClient::builder()
        .base_url(base_url)
        .page_size(page_size)
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_fetch_first_page() {
    let client = client(10);

    let page = client.fetch(1).await.expect("Failed to fetch page 1");

    assert_eq!(page.index(), 1);
    assert_eq!(page.len(), 10);
    assert!(page.total_count() > 10);
    assert!(page.items().iter().all(|artwork| !artwork.title.is_empty()));
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_select_range_spans_pages() {
    let session = SelectionSession::new(client(10));
    let first = session.load_page(1).await.expect("Failed to load page 1");

    let outcome = session
        .select_range(1, RangeCount::new(25).unwrap())
        .await
        .expect("Count should be valid");

    assert!(!outcome.is_partial(), "stopped early: {:?}", outcome.stop);
    assert_eq!(outcome.pages_fetched, 3);
    assert_eq!(&outcome.selected[..10], &first.ids()[..]);
    assert_eq!(session.store().count(), 25);
}
