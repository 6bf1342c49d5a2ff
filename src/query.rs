//! Translation of catalog state into a products-API request URL.

use reqwest::Url;

use crate::state::{CatalogSnapshot, SEARCH_FLOOR};

/// Build the request URL for the given state.
///
/// Pure and deterministic: parameter order is always `order`, `search`,
/// `retailer`, `page`. A trimmed search of [`SEARCH_FLOOR`] characters or
/// fewer is treated as "no search filter". `page` is emitted only when
/// pagination is enabled and the requested page is past the first, so the
/// page-1 URL stays canonical. Any query already present on the base URL is
/// dropped.
pub fn build_query(base: &Url, state: &CatalogSnapshot, paginate: bool) -> Url {
    let mut url = base.clone();
    url.set_query(None);

    let mut pairs = url.query_pairs_mut();
    pairs.append_pair("order", &state.sort_order);

    let search = state.search_text.trim();
    if search.chars().count() > SEARCH_FLOOR {
        pairs.append_pair("search", search);
    }

    if !state.retailer_filter.is_empty() {
        pairs.append_pair("retailer", &state.retailer_filter);
    }

    if paginate && state.requested_page > 1 {
        pairs.append_pair("page", &state.requested_page.to_string());
    }

    drop(pairs);
    url
}
