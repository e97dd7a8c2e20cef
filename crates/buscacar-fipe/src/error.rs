use std::time::Duration;

use thiserror::Error;

/// Errors returned by the FIPE price-reference client.
#[derive(Debug, Error)]
pub enum FipeError {
    /// Network or TLS failure, or a non-2xx status from the upstream API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the mirror, with the `Retry-After` delay when it sent one.
    #[error("FIPE rate limit hit (retry after {retry_after:?})")]
    Throttled { retry_after: Option<Duration> },

    #[error("invalid FIPE base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
