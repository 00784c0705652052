//! Mock HTTP client for testing.
//!
//! Returns canned responses per URL, records every request, and counts how
//! many streams were opened and how many were closed (dropped).

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::{HashMap, VecDeque};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, HttpMethod, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Request body parsed as JSON, if any.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response (any status)
    Success(Response),
    /// Fail the request itself
    Error(HttpError),
    /// Stream these chunks, then end
    Stream(Vec<Bytes>),
    /// Stream these chunks, then fail with the error
    StreamThenError(Vec<Bytes>, HttpError),
    /// Stream these chunks, then stay open forever
    StreamPending(Vec<Bytes>),
}

impl MockResponse {
    /// JSON response with the given status.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(value.to_string())))
    }

    /// Stream built from string chunks.
    pub fn sse<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(chunks.into_iter().map(|c| Bytes::from(c.into())).collect())
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up in order: queued responses for the exact URL
/// (consumed one at a time), the fixed response for the exact URL, the first
/// fixed response whose URL is a prefix, then the default. The query string
/// is part of the URL.
///
/// # Example
///
/// ```ignore
/// use splox::adapters::mock::{MockHttpClient, MockResponse};
///
/// let http = MockHttpClient::new();
/// http.set_response(
///     "https://app.splox.io/api/v1/workflow-requests/req-1/listen",
///     MockResponse::sse(["data: keepalive\n\n"]),
/// );
/// // ... drive the client ...
/// assert_eq!(http.streams_opened(), 1);
/// assert_eq!(http.streams_closed(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL (exact or prefix match).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Queue a one-shot response for an exact URL.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        lock(&self.queued)
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Recorded requests whose URL starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Number of streams handed out by `open_stream`.
    pub fn streams_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of those streams that have been dropped.
    pub fn streams_closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    fn record_request(&self, method: HttpMethod, url: &str, headers: &Headers, body: Option<String>) {
        lock(&self.requests).push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(queue) = lock(&self.queued).get_mut(url) {
            if let Some(response) = queue.pop_front() {
                return Some(response);
            }
        }

        let responses = lock(&self.responses);

        // First try exact match
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Then the longest matching prefix
        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        lock(&self.default_response).clone()
    }

    fn track(&self, inner: ByteStream) -> ByteStream {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Box::pin(TrackedStream {
            inner,
            closed: Arc::clone(&self.closed),
        })
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<String>,
    ) -> Result<Response, HttpError> {
        self.record_request(method, url, headers, body);

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(_) => Err(HttpError::Other(
                "Stream response on non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }

    async fn open_stream(&self, url: &str, headers: &Headers) -> Result<ByteStream, HttpError> {
        self.record_request(HttpMethod::Get, url, headers, None);

        let chunks = |chunks: Vec<Bytes>| futures::stream::iter(chunks.into_iter().map(Ok::<Bytes, HttpError>));

        match self.get_response(url) {
            Some(MockResponse::Stream(c)) => Ok(self.track(Box::pin(chunks(c)))),
            Some(MockResponse::StreamThenError(c, err)) => {
                let tail = futures::stream::once(async move { Err(err) });
                Ok(self.track(Box::pin(futures::StreamExt::chain(chunks(c), tail))))
            }
            Some(MockResponse::StreamPending(c)) => {
                let tail = futures::stream::pending::<Result<Bytes, HttpError>>();
                Ok(self.track(Box::pin(futures::StreamExt::chain(chunks(c), tail))))
            }
            Some(MockResponse::Success(response)) if !response.is_success() => {
                Err(HttpError::Status {
                    status: response.status,
                    headers: response.headers.clone(),
                    body: response.text(),
                })
            }
            Some(MockResponse::Success(_)) => Err(HttpError::Other(
                "Non-stream response on stream request".to_string(),
            )),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

/// Counts its own drop so tests can check connections are released.
struct TrackedStream {
    inner: ByteStream,
    closed: Arc<AtomicUsize>,
}

impl Stream for TrackedStream {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
