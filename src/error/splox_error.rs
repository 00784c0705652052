//! Unified error type for the SDK.

use std::time::Duration;

use thiserror::Error;

use super::category::ErrorCategory;
use super::status::from_status;
use super::stream::StreamError;
use crate::traits::HttpError;

/// Every fallible SDK operation returns this error.
///
/// HTTP failures carry the raw response body so callers can log it; the
/// `message` is the server's `error` field when it sent one.
#[derive(Debug, Error)]
pub enum SploxError {
    /// 401 or 403.
    #[error("[{status}] {message}")]
    Auth {
        status: u16,
        message: String,
        body: String,
    },

    #[error("[404] {message}")]
    NotFound { message: String, body: String },

    /// 429. `retry_after` comes from the `Retry-After` header (seconds).
    #[error("[429] {message}")]
    RateLimit {
        message: String,
        retry_after: Option<Duration>,
        body: String,
    },

    /// 400 or 422.
    #[error("[{status}] {message}")]
    Validation {
        status: u16,
        message: String,
        body: String,
    },

    /// Any other non-2xx response, 410 and 5xx included.
    #[error("[{status}] {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    #[error("timed out: {operation}")]
    Timeout { operation: String },

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request never produced an HTTP response.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// A 2xx response whose body does not match the expected model.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl SploxError {
    pub(crate) fn timeout(operation: impl Into<String>) -> Self {
        SploxError::Timeout {
            operation: operation.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        SploxError::Config(message.into())
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SploxError::Auth { .. } => ErrorCategory::Auth,
            SploxError::NotFound { .. } | SploxError::Validation { .. } => ErrorCategory::Client,
            SploxError::RateLimit { .. } => ErrorCategory::RateLimit,
            SploxError::Api { status, .. } => {
                if *status >= 500 {
                    ErrorCategory::Server
                } else {
                    ErrorCategory::Client
                }
            }
            SploxError::Timeout { .. } | SploxError::Connection { .. } => ErrorCategory::Network,
            SploxError::Stream(err) => match err {
                StreamError::ConnectionLost { .. } => ErrorCategory::Network,
                StreamError::MalformedFrames { .. } => ErrorCategory::Server,
            },
            SploxError::Config(_) => ErrorCategory::Configuration,
            SploxError::Decode { .. } => ErrorCategory::Client,
        }
    }

    /// Check if the caller may retry. The SDK itself never retries.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// HTTP status for errors that came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SploxError::Auth { status, .. }
            | SploxError::Validation { status, .. }
            | SploxError::Api { status, .. } => Some(*status),
            SploxError::NotFound { .. } => Some(404),
            SploxError::RateLimit { .. } => Some(429),
            _ => None,
        }
    }

    /// Raw response body for errors that came from a response.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            SploxError::Auth { body, .. }
            | SploxError::NotFound { body, .. }
            | SploxError::RateLimit { body, .. }
            | SploxError::Validation { body, .. }
            | SploxError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            SploxError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SploxError::Auth { .. } => "AUTH",
            SploxError::NotFound { .. } => "NOT_FOUND",
            SploxError::RateLimit { .. } => "RATE_LIMIT",
            SploxError::Validation { .. } => "VALIDATION",
            SploxError::Api { .. } => "API",
            SploxError::Timeout { .. } => "TIMEOUT",
            SploxError::Stream(err) => err.error_code(),
            SploxError::Config(_) => "CONFIG",
            SploxError::Connection { .. } => "CONNECTION",
            SploxError::Decode { .. } => "DECODE",
        }
    }
}

// ============================================================================
// From implementations for transport and serialization errors
// ============================================================================

impl From<HttpError> for SploxError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status {
                status,
                headers,
                body,
            } => from_status(status, &headers, &body),
            HttpError::Timeout(message) => SploxError::Timeout { operation: message },
            HttpError::InvalidUrl(message) => SploxError::Config(message),
            HttpError::ConnectionFailed(message) | HttpError::Io(message) | HttpError::Other(message) => {
                SploxError::Connection { message }
            }
        }
    }
}

impl From<serde_json::Error> for SploxError {
    fn from(err: serde_json::Error) -> Self {
        SploxError::Decode {
            message: err.to_string(),
        }
    }
}
