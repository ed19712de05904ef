//! Error types for the journal works API.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors from the Crossref client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Invalid URL built from the base URL and path
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Rate limited by Crossref (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response), e.g. an unknown ISSN
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. })
    }
}

/// Errors raised while building a works query, before any network call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The journal identifier was empty.
    #[error("ISSN must not be empty")]
    EmptyIssn,

    /// Filter name not accepted on the works route.
    #[error("Filter '{0}' specified but there is no such filter for this route")]
    UnknownFilter(String),

    /// Filter value rejected by its validator.
    #[error("Invalid value for filter '{name}': '{value}' is not a date (YYYY, YYYY-MM or YYYY-MM-DD)")]
    InvalidFilterValue {
        /// Filter name
        name: String,
        /// Rejected value
        value: String,
    },

    /// Sort field not accepted on the works route.
    #[error("Sort field '{0}' is not available for this route")]
    UnknownSort(String),

    /// Sort order other than `asc` or `desc`.
    #[error("Sort order '{0}' is not one of 'asc' or 'desc'")]
    UnknownOrder(String),

    /// Anything a custom source rejects while scoping the query.
    #[error("{0}")]
    Rejected(String),
}

/// Errors surfaced by the HTTP API.
///
/// Every upstream kind maps to `502 Bad Gateway` with a `{"detail": ...}` body.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Draining result items failed.
    #[error("CrossRef iteration error: {0}")]
    UpstreamIteration(#[source] ClientError),

    /// Fetching the total match count failed.
    #[error("CrossRef count error: {0}")]
    UpstreamCount(#[source] ClientError),

    /// Query construction or any other unexpected upstream failure.
    #[error("CrossRef error: {0}")]
    Upstream(String),

    /// Query parameters failed to parse.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Wrap any failure not covered by a specific kind.
    #[must_use]
    pub fn upstream(cause: impl std::fmt::Display) -> Self {
        Self::Upstream(cause.to_string())
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamIteration(_) | Self::UpstreamCount(_) | Self::Upstream(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
