//! Wiring between field mutations and catalog refreshes.
//!
//! Each reactive field has one explicit binding that says whether its
//! changes are debounced. Free-text search changes at keystroke frequency
//! and goes through the debounce gate; everything else is a discrete
//! selection and refreshes immediately.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use crate::debounce::DebounceGate;
use crate::error::FetchError;
use crate::fetch::ProductFetcher;
use crate::query::build_query;
use crate::state::{CatalogState, Field};

/// How changes to one reactive field reach the refresh engine.
struct Binding {
    field: Field,
    debounced: bool,
}

/// The full dependency set of the query, one entry per reactive field.
const BINDINGS: [Binding; 4] = [
    Binding { field: Field::SortOrder, debounced: false },
    Binding { field: Field::SearchText, debounced: true },
    Binding { field: Field::RetailerFilter, debounced: false },
    Binding { field: Field::RequestedPage, debounced: false },
];

/// Executes the refresh operation: build query, fetch, apply.
///
/// Every refresh takes a sequence number when it starts. Overlapping
/// refreshes are neither de-duplicated nor cancelled; instead a completion
/// is applied only if no refresh that started later has landed already, so
/// a slow stale response cannot overwrite a newer result.
pub(crate) struct RefreshEngine {
    state: CatalogState,
    fetcher: Arc<dyn ProductFetcher>,
    base_url: Url,
    paginate: bool,
    next_seq: AtomicU64,
}

impl RefreshEngine {
    pub(crate) fn new(
        state: CatalogState,
        fetcher: Arc<dyn ProductFetcher>,
        base_url: Url,
        paginate: bool,
    ) -> Self {
        Self {
            state,
            fetcher,
            base_url,
            paginate,
            next_seq: AtomicU64::new(0),
        }
    }

    /// Run one refresh end to end. State is untouched on error.
    pub(crate) async fn refresh(&self) -> Result<(), FetchError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = self.state.snapshot();
        let url = build_query(&self.base_url, &snapshot, self.paginate);

        tracing::debug!(%url, seq, "refreshing catalog");
        let page = self.fetcher.fetch_products(url).await?;

        if !self.state.apply_response(seq, page.data, page.meta) {
            tracing::debug!(seq, "discarding stale catalog response");
        }
        Ok(())
    }

    /// Run one refresh, logging failure instead of propagating it. The
    /// previous consistent results stay in place.
    pub(crate) async fn refresh_logged(self: Arc<Self>) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "catalog refresh failed; keeping previous results");
        }
    }
}

/// Routes field-change dispatches to the engine, debounced or not per the
/// binding table.
pub(crate) struct Binder {
    engine: Arc<RefreshEngine>,
    gate: DebounceGate,
}

impl Binder {
    /// Wire the gate to the engine. Must be called within a Tokio runtime.
    pub(crate) fn new(engine: Arc<RefreshEngine>, wait: Duration) -> Self {
        let gate_engine = engine.clone();
        let gate = DebounceGate::new(wait, move || gate_engine.clone().refresh_logged());

        Self { engine, gate }
    }

    /// Dispatch a mutation of `field` according to its binding.
    pub(crate) fn dispatch(&self, field: Field) {
        let debounced = BINDINGS
            .iter()
            .find(|b| b.field == field)
            .is_some_and(|b| b.debounced);

        if debounced {
            self.gate.trigger();
        } else {
            self.refresh_now();
        }
    }

    /// Spawn an immediate refresh, bypassing the gate.
    pub(crate) fn refresh_now(&self) {
        tokio::spawn(self.engine.clone().refresh_logged());
    }
}
