//! Error category classification.
//!
//! Categories give callers a coarse handle for retry and reporting decisions
//! without matching on every `SploxError` variant.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection failures, dropped streams, timeouts.
    /// Generally transient and retryable.
    Network,

    /// Invalid, expired or insufficient credentials (401/403).
    Auth,

    /// The server asked the caller to slow down (429).
    RateLimit,

    /// Backend errors (HTTP 5xx) or a server emitting garbage on a stream.
    Server,

    /// The request was wrong: unknown resource, invalid input, gone webhook,
    /// or a response that does not match the model.
    Client,

    /// Missing API key, unusable base URL, empty signing key.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Network | ErrorCategory::Server | ErrorCategory::RateLimit
        )
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::RateLimit => "rate_limit",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check connectivity to the Splox API and try again",
            ErrorCategory::Auth => "Check that the API key is valid and has access",
            ErrorCategory::RateLimit => "Wait for the Retry-After period before retrying",
            ErrorCategory::Server => "The server may be experiencing issues. Please try again later",
            ErrorCategory::Client => "Check the request parameters",
            ErrorCategory::Configuration => "Check the client configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
