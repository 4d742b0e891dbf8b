use thiserror::Error;

/// Errors returned by the Google Places and Census clients.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx status, from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an error status such as `REQUEST_DENIED`.
    #[error("{status}: {message}")]
    Api { status: String, message: String },

    /// The lookup succeeded but matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// The demographic service has no record for the requested area.
    #[error("no population data for ZIP: {0}")]
    NoData(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but carried values we cannot use.
    #[error("invalid data from {context}: {reason}")]
    InvalidData { context: String, reason: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
