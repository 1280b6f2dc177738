/// Errors that can occur while fetching people from the API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The configured endpoint is not a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a `{ "results": [...] }` document.
    #[error("Response parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that can occur while flattening locations into rows.
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    #[error("no locations to flatten")]
    EmptyBatch,

    #[error("could not serialize row: {0}")]
    Serialize(#[from] serde_json::Error),
}
