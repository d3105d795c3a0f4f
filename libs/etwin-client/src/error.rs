use thiserror::Error;
use url::Url;

/// Errors surfaced by [`crate::EtwinClient`] implementations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API base URL cannot carry path segments (e.g. `data:` or
    /// `mailto:` URLs). Reported at construction time.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(Url),

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: GET {url}")]
    NotFound { url: Url },

    /// Any other non-success response from the API.
    #[error("API error {status}: GET {url}")]
    Api {
        status: reqwest::StatusCode,
        url: Url,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: GET {url}")]
    UnexpectedResponse {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    /// Connection, TLS or timeout failure below the HTTP layer.
    #[error("transport error")]
    Transport(#[from] reqwest::Error),
}
