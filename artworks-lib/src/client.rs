//! HTTP page fetcher for the artworks API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::api::Page;
use crate::api::PageFetcher;
use crate::error::ApiError;
use crate::error::Error;
use crate::error::ValidationError;
use crate::model::ARTWORK_FIELDS;
use crate::model::Artwork;

/// Public endpoint of the Art Institute of Chicago API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Number of artworks per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Client for the artworks collection endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks. It never retries; a failed request is reported to the caller
/// as an [`ApiError`].
///
/// # Example
///
/// ```ignore
/// use artworks_lib::ArtworksClient;
/// use artworks_lib::api::PageFetcher;
///
/// let client = ArtworksClient::builder()
///     .page_size(10)
///     .timeout(Duration::from_secs(15))
///     .build()?;
///
/// let page = client.fetch(1).await?;
/// println!("{} artworks in total", page.total_count());
/// ```
#[derive(Clone)]
pub struct ArtworksClient {
    inner: Arc<ArtworksClientInner>,
}

struct ArtworksClientInner {
    base_url: String,
    page_size: usize,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArtworksClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArtworksClientBuilder {
        ArtworksClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Builds the URL for one page of artworks.
    pub fn page_url(&self, page: u32) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!(
            "{}/artworks",
            self.inner.base_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &self.inner.page_size.to_string())
            .append_pair("fields", &ARTWORK_FIELDS.join(","));
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }
}

#[async_trait]
impl PageFetcher for ArtworksClient {
    type Item = Artwork;

    async fn fetch(&self, page: u32) -> Result<Page<Artwork>, ApiError> {
        let url = self.page_url(page)?;
        log::debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        parse_response(page, &body)
    }

    fn page_size(&self) -> usize {
        self.inner.page_size
    }
}

/// Collection response from the artworks endpoint.
#[derive(Debug, Deserialize)]
struct ArtworksResponse {
    data: Vec<Artwork>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: usize,
}

/// Decodes one page of the artworks endpoint.
pub(crate) fn parse_response(page: u32, body: &str) -> Result<Page<Artwork>, ApiError> {
    let response: ArtworksResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;
    Ok(Page::new(page, response.data, response.pagination.total))
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing an [`ArtworksClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use artworks_lib::ArtworksClient;
///
/// let client = ArtworksClient::builder()
///     .base_url("https://api.artic.edu/api/v1")
///     .page_size(25)
///     .connect_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url(), "https://api.artic.edu/api/v1");
/// ```
pub struct ArtworksClientBuilder {
    base_url: String,
    page_size: usize,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArtworksClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the API base URL.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the number of artworks per page.
    ///
    /// Defaults to [`DEFAULT_PAGE_SIZE`].
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ArtworksClient`].
    ///
    /// Fails if the base URL does not parse, the page size is zero, or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<ArtworksClient, Error> {
        Url::parse(&self.base_url).map_err(ApiError::from)?;
        if self.page_size == 0 {
            return Err(ValidationError::InvalidPageSize(self.page_size).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ArtworksClient {
            inner: Arc::new(ArtworksClientInner {
                base_url: self.base_url,
                page_size: self.page_size,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ArtworksClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    #[test]
    fn test_page_url() {
        let client = ArtworksClient::builder()
            .base_url("https://api.artic.edu/api/v1/")
            .page_size(10)
            .build()
            .unwrap();

        let url = client.page_url(3).unwrap();
        assert_eq!(url.path(), "/api/v1/artworks");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "3".to_string()),
                ("limit".to_string(), "10".to_string()),
                (
                    "fields".to_string(),
                    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end"
                        .to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_build_rejects_bad_url() {
        let result = ArtworksClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(Error::Api(ApiError::InvalidUrl(_)))));
    }

    #[test]
    fn test_build_rejects_zero_page_size() {
        let result = ArtworksClient::builder().page_size(0).build();
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidPageSize(0)))
        ));
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "pagination": {
                "total": 129884,
                "limit": 2,
                "offset": 2,
                "total_pages": 64942,
                "current_page": 2
            },
            "data": [
                {"id": 656, "title": "Lion (One of a Pair, South Pedestal)", "date_start": 1893, "date_end": 1894},
                {"id": 657, "title": "", "artist_display": null}
            ]
        }"#;

        let page = parse_response(2, body).unwrap();
        assert_eq!(page.index(), 2);
        assert_eq!(page.total_count(), 129884);
        assert_eq!(page.ids(), vec![ItemId(656), ItemId(657)]);
        assert_eq!(page.items()[1].title, crate::model::DEFAULT_TITLE);
        assert_eq!(
            page.items()[1].artist_display,
            crate::model::DEFAULT_ARTIST_DISPLAY
        );
    }

    #[test]
    fn test_parse_response_error_keeps_body() {
        let err = parse_response(1, "<html>502</html>").unwrap_err();
        match err {
            ApiError::Parse { body, .. } => assert_eq!(body.as_deref(), Some("<html>502</html>")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
