//! Webhook events.

use serde_json::Value;

use crate::api::{segment, ApiTransport};
use crate::error::SploxResult;
use crate::models::EventResponse;
use crate::traits::{Headers, HttpMethod};

/// Header carrying the webhook secret.
pub const WEBHOOK_SECRET_HEADER: &str = "X-Webhook-Secret";

/// Event operations, borrowed from [`SploxClient::events`](crate::SploxClient::events).
#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    api: &'a ApiTransport,
}

impl<'a> Events<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    /// `POST /events/{webhook_id}` with `payload` (or `{}`) as the body.
    ///
    /// A non-empty `secret` is sent as `X-Webhook-Secret`.
    pub async fn send(
        &self,
        webhook_id: &str,
        payload: Option<&Value>,
        secret: Option<&str>,
    ) -> SploxResult<EventResponse> {
        let body = match payload {
            Some(payload) => serde_json::to_string(payload)?,
            None => "{}".to_string(),
        };
        let mut headers = Headers::new();
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            headers.insert(WEBHOOK_SECRET_HEADER.to_string(), secret.to_string());
        }
        self.api
            .send(
                HttpMethod::Post,
                &format!("/events/{}", segment(webhook_id)),
                &[],
                Some(body),
                headers,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (MockHttpClient, ApiTransport) {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            200,
            json!({"ok": true, "event_id": "evt-1"}),
        ));
        let api = ApiTransport::new(
            Arc::new(mock.clone()),
            ClientConfig::new().with_base_url("https://api.test/v1"),
        );
        (mock, api)
    }

    #[tokio::test]
    async fn test_send_with_secret() {
        let (mock, api) = setup();
        let payload = json!({"order": 42});
        let response = Events::new(&api)
            .send("hook-1", Some(&payload), Some("s3cret"))
            .await
            .unwrap();

        assert!(response.ok);
        assert_eq!(response.event_id, "evt-1");
        let request = &mock.get_requests()[0];
        assert_eq!(request.url, "https://api.test/v1/events/hook-1");
        assert_eq!(
            request.headers.get(WEBHOOK_SECRET_HEADER).map(String::as_str),
            Some("s3cret")
        );
        assert_eq!(request.json_body(), Some(payload));
    }

    #[tokio::test]
    async fn test_send_without_payload_or_secret() {
        let (mock, api) = setup();
        Events::new(&api).send("hook-1", None, Some("")).await.unwrap();

        let request = &mock.get_requests()[0];
        assert!(request.headers.get(WEBHOOK_SECRET_HEADER).is_none());
        assert_eq!(request.json_body(), Some(json!({})));
    }
}
