//! Catalog state: the single source of truth for filters, sort, page,
//! and the last-fetched results.
//!
//! State is published through a `tokio::sync::watch` channel so the render
//! layer always observes a complete, internally consistent snapshot. Result
//! items and pagination metadata are replaced together in one `send_modify`
//! call; no observer ever sees one without the other.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use tokio::sync::watch;

/// Default sort criterion applied at startup.
pub const DEFAULT_SORT_ORDER: &str = "price";

/// A trimmed search string this short is treated as "no search filter".
pub const SEARCH_FLOOR: usize = 2;

/// A product record as returned by the API.
///
/// The controller never interprets product fields; they pass through to the
/// render layer verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Product(pub serde_json::Value);

/// Server-supplied pagination descriptor, stored verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PaginationMeta(pub serde_json::Value);

/// The reactive fields that participate in query construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SortOrder,
    SearchText,
    RetailerFilter,
    RequestedPage,
}

/// A complete view of the catalog state at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    /// Results of the most recent applied refresh.
    pub items: Vec<Product>,
    /// Sort criterion sent as the `order` query parameter.
    pub sort_order: String,
    /// Raw search input; trimmed at query-build time.
    pub search_text: String,
    /// Retailer identifier; empty means "no filter".
    pub retailer_filter: String,
    /// 1-based page to request.
    pub requested_page: u32,
    /// Metadata from the most recent applied refresh, if the API sent any.
    pub pagination: Option<PaginationMeta>,
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            sort_order: DEFAULT_SORT_ORDER.to_string(),
            search_text: String::new(),
            retailer_filter: String::new(),
            requested_page: 1,
            pagination: None,
        }
    }
}

/// Shared, watchable catalog state.
///
/// Cloning is cheap; all clones point at the same underlying state. Filter
/// setters return `true` only when the value actually changed, so callers
/// can skip dispatching a refresh for no-op writes. Changing any filter
/// resets `requested_page` to 1 within the same mutation: the old page
/// position is meaningless under a new filter.
#[derive(Clone)]
pub struct CatalogState {
    inner: Arc<StateInner>,
}

struct StateInner {
    tx: watch::Sender<CatalogSnapshot>,
    /// Highest refresh sequence number applied so far. Held across the
    /// state write so check-and-apply is a single step.
    applied_seq: Mutex<u64>,
}

impl CatalogState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(CatalogSnapshot::default());
        Self {
            inner: Arc::new(StateInner {
                tx,
                applied_seq: Mutex::new(0),
            }),
        }
    }

    /// Get a clone of the current snapshot.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.inner.tx.borrow().clone()
    }

    /// Subscribe to state changes. Every received value is a consistent
    /// snapshot; `items` and `pagination` always stem from the same response.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.inner.tx.subscribe()
    }

    pub fn set_sort_order(&self, order: &str) -> bool {
        let mut changed = false;
        self.inner.tx.send_modify(|s| {
            if s.sort_order != order {
                s.sort_order = order.to_string();
                s.requested_page = 1;
                changed = true;
            }
        });
        changed
    }

    pub fn set_search_text(&self, text: &str) -> bool {
        let mut changed = false;
        self.inner.tx.send_modify(|s| {
            if s.search_text != text {
                s.search_text = text.to_string();
                s.requested_page = 1;
                changed = true;
            }
        });
        changed
    }

    pub fn set_retailer_filter(&self, retailer: &str) -> bool {
        let mut changed = false;
        self.inner.tx.send_modify(|s| {
            if s.retailer_filter != retailer {
                s.retailer_filter = retailer.to_string();
                s.requested_page = 1;
                changed = true;
            }
        });
        changed
    }

    /// Set the requested page. Pages are 1-based; 0 is clamped to 1.
    pub fn set_requested_page(&self, page: u32) -> bool {
        let page = page.max(1);
        let mut changed = false;
        self.inner.tx.send_modify(|s| {
            if s.requested_page != page {
                s.requested_page = page;
                changed = true;
            }
        });
        changed
    }

    /// Apply a completed refresh, replacing `items` and `pagination` together.
    ///
    /// Returns `false` if a refresh with a higher sequence number already
    /// landed; the stale response is discarded and state is untouched.
    pub fn apply_response(
        &self,
        seq: u64,
        items: Vec<Product>,
        pagination: Option<PaginationMeta>,
    ) -> bool {
        let mut applied = self.inner.applied_seq.lock();
        if seq <= *applied {
            return false;
        }
        *applied = seq;
        self.inner.tx.send_modify(|s| {
            s.items = items;
            s.pagination = pagination;
        });
        true
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}
