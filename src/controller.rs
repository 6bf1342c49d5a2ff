//! The catalog browse controller: explicit construction, injected fetcher,
//! field setters, and the subscription surface for the render layer.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::watch;

use crate::binder::{Binder, RefreshEngine};
use crate::fetch::{HttpFetcher, ProductFetcher};
use crate::state::{CatalogSnapshot, CatalogState, Field};

/// Default quiet window for free-text search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Construction-time settings for a [`CatalogController`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Products endpoint, e.g. `http://localhost:8080/api/products`.
    pub base_url: Url,
    /// Quiet window applied to search-text changes.
    pub debounce: Duration,
    /// Whether the API variant supports the `page` parameter. When false,
    /// the requested page is pinned at 1 and never sent.
    pub paginate: bool,
}

impl ControllerConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            debounce: DEFAULT_DEBOUNCE,
            paginate: true,
        }
    }

    pub fn with_debounce(mut self, wait: Duration) -> Self {
        self.debounce = wait;
        self
    }

    pub fn without_pagination(mut self) -> Self {
        self.paginate = false;
        self
    }
}

/// Owns the catalog state and drives the state → query → fetch → state loop.
///
/// Construction spawns the initial fetch, so a freshly mounted view gets
/// results without any user input. All setters are change-detecting: writing
/// the current value triggers no refresh. The controller must be created
/// inside a Tokio runtime; its background tasks wind down when it is dropped.
pub struct CatalogController {
    state: CatalogState,
    binder: Binder,
    paginate: bool,
}

impl CatalogController {
    /// Build a controller with an injected fetcher.
    pub fn new(config: ControllerConfig, fetcher: Arc<dyn ProductFetcher>) -> Self {
        let state = CatalogState::new();
        let engine = Arc::new(RefreshEngine::new(
            state.clone(),
            fetcher,
            config.base_url,
            config.paginate,
        ));
        let binder = Binder::new(engine, config.debounce);

        let controller = Self {
            state,
            binder,
            paginate: config.paginate,
        };
        controller.binder.refresh_now();
        controller
    }

    /// Build a controller backed by the default HTTP fetcher.
    pub fn connect(config: ControllerConfig) -> Self {
        Self::new(config, Arc::new(HttpFetcher::new()))
    }

    /// Current state. For one-off reads; the render layer should prefer
    /// [`subscribe`](Self::subscribe).
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.snapshot()
    }

    /// Watch the catalog state. Every received snapshot is internally
    /// consistent: items and pagination always stem from one response.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.state.subscribe()
    }

    /// Change the sort criterion. Refreshes immediately.
    pub fn set_sort_order(&self, order: &str) {
        if self.state.set_sort_order(order) {
            self.binder.dispatch(Field::SortOrder);
        }
    }

    /// Change the free-text search. Refreshes after the debounce window.
    pub fn set_search_text(&self, text: &str) {
        if self.state.set_search_text(text) {
            self.binder.dispatch(Field::SearchText);
        }
    }

    /// Change the retailer filter; empty clears it. Refreshes immediately.
    pub fn set_retailer_filter(&self, retailer: &str) {
        if self.state.set_retailer_filter(retailer) {
            self.binder.dispatch(Field::RetailerFilter);
        }
    }

    /// Request a different page. Refreshes immediately. Ignored when the
    /// controller was configured without pagination.
    pub fn set_requested_page(&self, page: u32) {
        if !self.paginate {
            tracing::debug!(page, "ignoring page request; pagination disabled");
            return;
        }
        if self.state.set_requested_page(page) {
            self.binder.dispatch(Field::RequestedPage);
        }
    }

    /// Clear the search text and refresh right away, bypassing the debounce
    /// window. The user's intent here is explicit and should feel instant.
    pub fn reset_search(&self) {
        self.state.set_search_text("");
        self.binder.refresh_now();
    }
}
