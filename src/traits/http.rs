//! HTTP client trait abstraction.
//!
//! The API layer talks to the network only through [`HttpClient`], so tests
//! can swap in [`crate::adapters::MockHttpClient`].

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Incrementally received response body of a streaming request.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Request methods used by the Splox API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// A streaming request was answered with a non-2xx status
    Status {
        status: u16,
        headers: Headers,
        body: String,
    },
    /// IO error while reading a body
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Status { status, body, .. } => {
                write!(f, "Server returned {}: {}", status, body)
            }
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// # Example
///
/// ```ignore
/// use splox::traits::{Headers, HttpClient, HttpMethod};
///
/// async fn ping<C: HttpClient>(client: &C) -> bool {
///     client
///         .request(HttpMethod::Get, "https://app.splox.io/api/v1/billing/balance", &Headers::new(), None)
///         .await
///         .map(|r| r.is_success())
///         .unwrap_or(false)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a request and buffer the whole response.
    ///
    /// Any status is returned as a [`Response`]; interpreting non-2xx codes
    /// is up to the caller.
    ///
    /// # Arguments
    /// * `method` - Request method
    /// * `url` - Absolute URL including the query string
    /// * `headers` - Request headers
    /// * `body` - Optional request body (already serialized JSON)
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<String>,
    ) -> Result<Response, HttpError>;

    /// Open a long-lived `GET` whose body is received incrementally.
    ///
    /// Non-2xx responses fail with [`HttpError::Status`]. No request timeout
    /// applies to the returned stream; dropping it closes the connection.
    async fn open_stream(&self, url: &str, headers: &Headers) -> Result<ByteStream, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_headers() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let response = Response::with_headers(200, headers, Bytes::from("{}"));
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(300, Bytes::new()).is_success());
        assert!(!Response::new(404, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_text_and_body() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct RunResponse {
            workflow_request_id: String,
        }

        let response = Response::new(200, Bytes::from(r#"{"workflow_request_id":"req-1"}"#));
        assert_eq!(response.text(), r#"{"workflow_request_id":"req-1"}"#);
        let data: RunResponse = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(data.workflow_request_id, "req-1");
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::Status {
                status: 401,
                headers: Headers::new(),
                body: "nope".to_string()
            }
            .to_string(),
            "Server returned 401: nope"
        );
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
