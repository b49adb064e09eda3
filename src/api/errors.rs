//! Error types for content API operations

use thiserror::Error;

use super::models::ContentKind;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message shown to visitors for any failed fetch
pub const GENERIC_FETCH_MESSAGE: &str =
    "We couldn't load this content right now. Please try again.";

/// Error types for content API operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configured base URL is not usable
    #[error("Invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Network failure, timeout, or interrupted body
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("HTTP error! status: {status}")]
    Status { status: u16, url: String },

    /// Body is not JSON
    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Slug is malformed, the API answered 404, or no payload was found
    #[error("{kind} not found: {slug}")]
    NotFound { kind: ContentKind, slug: String },

    /// A list endpoint answered with something that is not a list
    #[error("Unexpected response shape for {0}")]
    UnexpectedShape(&'static str),
}

impl ApiError {
    pub(crate) fn not_found(kind: ContentKind, slug: impl Into<String>) -> Self {
        ApiError::NotFound {
            kind,
            slug: slug.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Whether trying again later could succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Text suitable for showing to a visitor
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        GENERIC_FETCH_MESSAGE
    }
}
