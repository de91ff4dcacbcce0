use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the backend on non-2xx responses.
///
/// `detail` is usually a string, but request validation failures carry a list.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A registry lookup that found nothing.
///
/// The registry tables are static, so a miss always points at a
/// configuration or programming error rather than a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Unknown endpoint key: {0}")]
    UnknownEndpoint(String),
    #[error("Unknown risk category: {0}")]
    UnknownRiskCategory(String),
    #[error("Unknown display name: {0}")]
    UnknownDisplayLocation(String),
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
    #[error("Missing path parameter '{param}' for endpoint {endpoint}")]
    MissingPathParam { endpoint: String, param: String },
}

/// Rejected user input. The message is meant to be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Failure to build a lesion ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Counter must be between 1 and 999, got {0}")]
    CounterOutOfRange(u32),
}

/// Error type for backend API calls
///
/// Maps every failure a client call can hit onto a single enum so callers
/// can tell bad input apart from an unreachable or unhappy backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// Registry lookup failed while building the request
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Backend answered with a non-success status
    #[error("API Error ({status}): {detail}")]
    Status { status: u16, detail: String },
    /// Request could not be assembled
    #[error("Failed to build request: {0}")]
    Request(#[source] reqwest::Error),
    /// Request never got a response
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),
    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
