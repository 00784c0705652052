//! Errors raised while consuming an event stream.

use thiserror::Error;

/// Stream-specific error variants.
///
/// Both variants end the stream: the event stream yields the error once and
/// then returns `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The transport failed after the stream was established.
    #[error("stream connection lost: {message}")]
    ConnectionLost { message: String },

    /// Too many consecutive frames could not be decoded.
    #[error("{count} consecutive malformed frames (last: {last_error})")]
    MalformedFrames { count: u32, last_error: String },
}

impl StreamError {
    /// A lost connection may be reopened by the caller; the SDK never does it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::ConnectionLost { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "STREAM_CONNECTION_LOST",
            StreamError::MalformedFrames { .. } => "STREAM_MALFORMED_FRAMES",
        }
    }
}
