//! Error types for the BGG client.
//!
//! `BggError` covers every failure a library consumer can see: transport,
//! XML parsing, record construction and cache I/O. Extraction absence is not
//! an error and never shows up here.

use thiserror::Error;

/// Main error type for the client library.
#[derive(Debug, Error)]
pub enum BggError {
    /// Invalid BGG thing ID.
    #[error("Invalid thing ID: '{0}'. Expected a positive integer (e.g., 266192)")]
    InvalidId(String),

    /// Invalid search query or username.
    #[error("Invalid query: '{0}'")]
    InvalidQuery(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("BGG API returned {status} for {url}")]
    Api { status: u16, url: String },

    /// The API answered with 429 Too Many Requests.
    #[error("Rate limit exceeded for {url}")]
    RateLimited { url: String },

    /// The API answered with an error document instead of data.
    #[error("BGG API error: {0}")]
    ApiMessage(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element in a response document.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// A required record field had no value and no default.
    #[error("Missing required field '{field}' for {record}")]
    MissingField { record: String, field: String },

    /// An extracted value could not be converted to the field's type.
    #[error("Cannot convert '{value}' to {expected} for field '{field}' of {record}")]
    Coercion {
        record: String,
        field: String,
        value: String,
        expected: String,
    },

    /// Cache read/write failure.
    #[error("Cache error: {0}")]
    Cache(String),

    /// JSON (de)serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BggError {
    /// Whether a request that failed with this error may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            // 202 means BGG queued the request and wants it repeated later
            Self::Api { status, .. } => *status == 202 || *status >= 500,
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Whether this is a record validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::Coercion { .. })
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, BggError>;
