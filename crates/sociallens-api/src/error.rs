use thiserror::Error;

/// Errors returned by the dashboard API client.
///
/// Callers treat every variant the same way: show the `Display` text and let
/// the user retry. Nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote configuration (base URL + token) could not be resolved.
    #[error("failed to load configuration from {source_desc}: {reason}")]
    Config { source_desc: String, reason: String },

    /// The API answered with a non-2xx status. `message` is the server's
    /// `detail` text or a generic fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
