//! Error types for catalog refresh operations.

use thiserror::Error;

/// Errors that can occur while fetching a page of products.
///
/// None of these are retried or recovered from; a failed refresh leaves the
/// previously applied results in place.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("'{url}' returned status {status}")]
    Status { url: String, status: u16 },

    /// The body was not a valid product envelope.
    #[error("invalid product envelope from '{url}': {source}")]
    Envelope {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
