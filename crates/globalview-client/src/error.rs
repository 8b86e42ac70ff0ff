use thiserror::Error;

/// Errors returned by the `GlobalView` API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Authentication was required but no token could be resolved. Raised
    /// before any network call is made.
    #[error("Missing token: {0}")]
    MissingToken(String),

    /// The API answered with a non-2xx status; `body` is the raw response text.
    #[error("GlobalView API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL or a request path could not be turned into a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status for [`ClientError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
