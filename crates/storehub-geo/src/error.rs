use thiserror::Error;

/// Errors returned by the geocoding client.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx HTTP status.
    #[error("geocoder returned HTTP {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// The provider answered 2xx but reported a failure in its envelope.
    #[error("geocoder error {status}: {message}")]
    Provider { status: i64, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// No API key is configured, so lookups are refused.
    #[error("geocoding is not configured")]
    NotConfigured,
}
