//! Product fetching: the `ProductFetcher` seam and its reqwest-backed
//! default implementation.

use std::future::Future;
use std::pin::Pin;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::FetchError;
use crate::state::{PaginationMeta, Product};

/// One page of products as delivered by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    /// The product records for the requested page.
    pub data: Vec<Product>,
    /// Pagination metadata; older API variants omit it.
    #[serde(default)]
    pub meta: Option<PaginationMeta>,
}

/// Boxed future returned by [`ProductFetcher::fetch_products`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ProductPage, FetchError>> + Send + 'a>>;

/// Abstraction over the HTTP transport so the controller can be tested
/// with a double instead of a live server.
pub trait ProductFetcher: Send + Sync {
    /// Issue a single GET for the given URL and decode the envelope.
    ///
    /// One best-effort attempt per call: no retry, no caching, no timeout.
    fn fetch_products(&self, url: Url) -> FetchFuture<'_>;
}

/// Default fetcher backed by a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to build catalog HTTP client");

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFetcher for HttpFetcher {
    fn fetch_products(&self, url: Url) -> FetchFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| FetchError::Transport {
                    url: url.to_string(),
                    source: e,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

            serde_json::from_slice(&body).map_err(|e| FetchError::Envelope {
                url: url.to_string(),
                source: e,
            })
        })
    }
}
