//! Client-side controller for browsing a paginated, filterable product
//! catalog served by a JSON API.
//!
//! The crate owns the filter/sort/page state, turns it into query URLs,
//! debounces free-text input, and writes each response back into state so a
//! subscribed render layer can re-display it.
//!
//! # Architecture
//!
//! ```text
//! setter ──→ Binder ──→ (debounce?) ──→ refresh ──→ fetch ──→ CatalogState
//!    ↑                                                            │
//!    └──────────────────── render layer (watch) ◄─────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use lefty_catalog::{CatalogController, ControllerConfig};
//!
//! # async fn demo() {
//! let config = ControllerConfig::new(
//!     "http://localhost:8080/api/products".parse().unwrap(),
//! ).with_debounce(Duration::from_millis(500));
//!
//! let controller = CatalogController::connect(config);
//! let mut view = controller.subscribe();
//!
//! controller.set_search_text("telecaster");
//! view.changed().await.unwrap();
//! println!("{} products", view.borrow().items.len());
//! # }
//! ```

mod binder;
mod controller;
mod debounce;
mod error;
mod fetch;
mod query;
mod state;

pub use controller::{CatalogController, ControllerConfig, DEFAULT_DEBOUNCE};
pub use debounce::DebounceGate;
pub use error::FetchError;
pub use fetch::{FetchFuture, HttpFetcher, ProductFetcher, ProductPage};
pub use query::build_query;
pub use state::{
    CatalogSnapshot, CatalogState, Field, PaginationMeta, Product, DEFAULT_SORT_ORDER,
    SEARCH_FLOOR,
};
