//! Request plumbing shared by every resource group.
//!
//! Builds URLs from the configured root, attaches auth and content headers,
//! maps non-2xx responses through [`from_status`], and decodes bodies.

use std::borrow::Cow;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{from_status, SploxError, SploxResult};
use crate::traits::{ByteStream, Headers, HttpClient, HttpMethod, Response};

/// Query parameters in send order.
pub(crate) type Query = Vec<(&'static str, String)>;

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

#[derive(Clone)]
pub(crate) struct ApiTransport {
    http: Arc<dyn HttpClient>,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiTransport {
    pub(crate) fn new(http: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{root}{path}?{query}` with query values escaped.
    pub(crate) fn url(&self, path: &str, query: &[(&'static str, String)]) -> String {
        let mut url = format!("{}{}", self.config.api_root(), path);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn headers(&self, accept: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), accept.to_string());
        if let Some(key) = &self.config.api_key {
            headers.insert("Authorization".to_string(), format!("Bearer {}", key));
        }
        headers
    }

    /// Send a request and return the response when it is 2xx.
    pub(crate) async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<String>,
        extra_headers: Headers,
    ) -> SploxResult<Response> {
        let url = self.url(path, query);
        let mut headers = self.headers("application/json");
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers.extend(extra_headers);

        debug!(method = %method, url = %url, "sending request");
        let response = self.http.request(method, &url, &headers, body).await?;
        debug!(method = %method, url = %url, status = response.status, "received response");

        if response.is_success() {
            Ok(response)
        } else {
            Err(from_status(response.status, &response.headers, &response.text()))
        }
    }

    /// Send and decode the JSON body. An empty body decodes as `{}`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<String>,
        extra_headers: Headers,
    ) -> SploxResult<T> {
        let response = self.execute(method, path, query, body, extra_headers).await?;
        decode(path, &response)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> SploxResult<T> {
        self.send(HttpMethod::Get, path, query, None, Headers::new())
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SploxResult<T> {
        let body = serde_json::to_string(body)?;
        self.send(HttpMethod::Post, path, &[], Some(body), Headers::new())
            .await
    }

    /// `POST` without a body, ignoring whatever the server returns.
    pub(crate) async fn post_empty(&self, path: &str) -> SploxResult<()> {
        self.execute(HttpMethod::Post, path, &[], None, Headers::new())
            .await
            .map(|_| ())
    }

    /// `DELETE` with an optional JSON body, ignoring the response body.
    pub(crate) async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> SploxResult<()> {
        let body = body.map(serde_json::to_string).transpose()?;
        self.execute(HttpMethod::Delete, path, &[], body, Headers::new())
            .await
            .map(|_| ())
    }

    /// Open a listen endpoint and return the raw body.
    pub(crate) async fn open_body(&self, path: &str) -> SploxResult<ByteStream> {
        let url = self.url(path, &[]);
        let mut headers = self.headers("text/event-stream");
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());

        debug!(url = %url, "opening event stream");
        Ok(self.http.open_stream(&url, &headers).await?)
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: &Response) -> SploxResult<T> {
    let bytes: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &response.body
    };
    serde_json::from_slice(bytes).map_err(|e| SploxError::Decode {
        message: format!("unexpected response body from {}: {}", path, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use bytes::Bytes;
    use serde_json::{json, Value};

    fn transport(mock: &MockHttpClient, config: ClientConfig) -> ApiTransport {
        ApiTransport::new(Arc::new(mock.clone()), config)
    }

    fn config() -> ClientConfig {
        ClientConfig::new()
            .with_api_key("test-key")
            .with_base_url("https://api.test/v1/")
    }

    #[test]
    fn test_url_building() {
        let api = transport(&MockHttpClient::new(), config());
        assert_eq!(api.url("/workflows", &[]), "https://api.test/v1/workflows");
        assert_eq!(
            api.url(
                "/workflows",
                &[("limit", "20".to_string()), ("search", "a b&c".to_string())]
            ),
            "https://api.test/v1/workflows?limit=20&search=a%20b%26c"
        );
    }

    #[test]
    fn test_segment_escapes_slashes() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("plain-id_1"), "plain-id_1");
    }

    #[tokio::test]
    async fn test_get_sends_auth_and_decodes() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "https://api.test/v1/thing",
            MockResponse::json(200, json!({"ok": true})),
        );
        let api = transport(&mock, config());

        let value: Value = api.get("/thing", &[]).await.unwrap();
        assert_eq!(value, json!({"ok": true}));

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer test-key")
        );
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert!(requests[0].headers.get("Content-Type").is_none());
    }

    #[tokio::test]
    async fn test_no_auth_header_without_key() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));
        let api = transport(&mock, ClientConfig::new().with_base_url("https://api.test"));

        let _: Value = api.get("/x", &[]).await.unwrap();
        assert!(mock.get_requests()[0].headers.get("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_post_sets_content_type() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"id": "1"})));
        let api = transport(&mock, config());

        let _: Value = api.post("/things", &json!({"name": "n"})).await.unwrap();
        let request = &mock.get_requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.json_body(), Some(json!({"name": "n"})));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_object() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));
        let api = transport(&mock, config());

        let value: Value = api.get("/empty", &[]).await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_non_2xx_is_mapped() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(404, json!({"error": "no such thing"})));
        let api = transport(&mock, config());

        let err = api.get::<Value>("/missing", &[]).await.unwrap_err();
        match err {
            SploxError::NotFound { message, .. } => assert_eq!(message, "no such thing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Needs {
            #[allow(dead_code)]
            id: String,
        }

        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"other": 1})));
        let api = transport(&mock, config());

        let err = api.get::<Needs>("/shape", &[]).await.unwrap_err();
        assert!(matches!(err, SploxError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_connection_error() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let api = transport(&mock, config());

        let err = api.post_empty("/x/stop").await.unwrap_err();
        assert!(matches!(err, SploxError::Connection { .. }));
    }

    #[tokio::test]
    async fn test_open_body_headers() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::sse(["data: keepalive\n\n"]));
        let api = transport(&mock, config());

        let body = api.open_body("/chat-internal-messages/c1/listen").await.unwrap();
        drop(body);

        let request = &mock.get_requests()[0];
        assert_eq!(request.url, "https://api.test/v1/chat-internal-messages/c1/listen");
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
        assert_eq!(mock.streams_opened(), 1);
        assert_eq!(mock.streams_closed(), 1);
    }
}
