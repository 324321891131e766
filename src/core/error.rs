use thiserror::Error;

/// Failures while retrieving a quote batch. None of these are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, TLS or deadline failures
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response status outside 2xx
    #[error("request returned status code {code} ({message})")]
    HttpStatus { code: u16, message: String },

    /// Body is not the expected batch JSON
    #[error("failed to decode quote response: {0}")]
    Decode(#[from] serde_json::Error),
}
