/// Errors from the table and object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Required connection settings are missing or malformed.
    #[error("Store configuration error: {0}")]
    Config(String),

    /// The HTTP request itself failed (DNS, TLS, malformed response).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The hosted API returned a non-2xx status code.
    #[error("Store API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The store timed out or refused the connection.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True for failures that originate upstream rather than in the request.
    pub fn is_upstream(&self) -> bool {
        match self {
            StoreError::Request(_) | StoreError::Unavailable(_) | StoreError::Decode(_) => true,
            StoreError::Api { status, .. } => *status >= 500,
            StoreError::Config(_) | StoreError::Conflict(_) => false,
        }
    }
}
