//! Shared test doubles and fixtures for the integration suite.

#![allow(dead_code)]

pub mod mock_api;

use std::sync::{Mutex, Once};
use std::time::Duration;

use lefty_catalog::{
    FetchError, FetchFuture, PaginationMeta, Product, ProductFetcher, ProductPage,
};
use reqwest::Url;

static TRACING: Once = Once::new();

/// Install a fmt subscriber once per test binary; controlled by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Build `n` product records tagged with `tag`.
pub fn products(tag: &str, n: usize) -> Vec<Product> {
    (0..n)
        .map(|i| {
            Product(serde_json::json!({
                "retailer": "thomann",
                "model": format!("{}-{}", tag, i),
                "price": 100.0 + i as f64,
            }))
        })
        .collect()
}

/// Pagination metadata carrying `tag`, so tests can check which response a
/// snapshot's meta came from.
pub fn meta(tag: &str) -> PaginationMeta {
    PaginationMeta(serde_json::json!({
        "current_page": 1,
        "tag": tag,
    }))
}

/// What the mock fetcher should do for one request.
pub struct MockReply {
    pub delay: Duration,
    pub result: Result<ProductPage, FetchError>,
}

impl MockReply {
    pub fn page(items: Vec<Product>, pagination: Option<PaginationMeta>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(ProductPage {
                data: items,
                meta: pagination,
            }),
        }
    }

    pub fn status(url: &str, status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Scripted [`ProductFetcher`] double. Records every requested URL and
/// answers via a closure keyed by request index.
pub struct MockFetcher {
    requests: Mutex<Vec<Url>>,
    respond: Box<dyn Fn(usize, &Url) -> MockReply + Send + Sync>,
}

impl MockFetcher {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(usize, &Url) -> MockReply + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Answer every request with the same fixed page.
    pub fn fixed(items: Vec<Product>, pagination: Option<PaginationMeta>) -> Self {
        Self::new(move |_, _| MockReply::page(items.clone(), pagination.clone()))
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Query string of request `idx`, for assertions.
    pub fn query_of(&self, idx: usize) -> String {
        self.requests.lock().unwrap()[idx]
            .query()
            .unwrap_or("")
            .to_string()
    }
}

impl ProductFetcher for MockFetcher {
    fn fetch_products(&self, url: Url) -> FetchFuture<'_> {
        let idx = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(url.clone());
            requests.len() - 1
        };
        let reply = (self.respond)(idx, &url);

        Box::pin(async move {
            if reply.delay > Duration::ZERO {
                tokio::time::sleep(reply.delay).await;
            }
            reply.result
        })
    }
}
