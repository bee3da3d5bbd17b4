//! Error types for Graph API client operations

use compact_str::CompactString;
use thiserror::Error;

/// Message used when the provider's error envelope carries no `error.message`
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Structured error types for Graph API client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: DNS, connect, timeout or a dropped connection
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Successful response whose body could not be mapped to the expected shape
    #[error("Malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The Graph API answered with a non-success status
    #[error("Facebook API error: {message} (status: {status})")]
    GraphApi {
        status: u16,
        message: CompactString,
        code: Option<i64>,
    },

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request argument failed local validation
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl ClientError {
    /// Create a malformed response error with endpoint context
    pub fn malformed(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedResponse { endpoint: endpoint.into(), source }
    }

    /// Create a Graph API error
    pub fn graph_api(status: u16, message: impl Into<CompactString>, code: Option<i64>) -> Self {
        Self::GraphApi { status, message: message.into(), code }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an input validation error
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput { field: field.into(), message: message.into() }
    }

    /// HTTP status reported by the provider, if the failure came from the provider
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::GraphApi { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a transport-level failure
    pub fn is_network_error(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
