//! Fire-and-forget JSON webhooks.
//!
//! Unlike [`Events::send`](crate::resources::Events::send), which targets a
//! Splox webhook id, [`notify`] posts to any URL and carries no API key.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::error::{from_status, SploxResult};
use crate::traits::{Headers, HttpClient, HttpMethod};

/// Time allowed for a webhook to answer.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// `POST` `data` as JSON to `webhook_url`. Non-2xx answers are errors.
pub async fn notify<T: Serialize + ?Sized>(webhook_url: &str, data: &T) -> SploxResult<()> {
    let http = ReqwestHttpClient::new().with_timeout(NOTIFY_TIMEOUT);
    notify_with(&http, webhook_url, data).await
}

/// [`notify`] over a caller-supplied transport.
pub async fn notify_with<T: Serialize + ?Sized>(
    http: &dyn HttpClient,
    webhook_url: &str,
    data: &T,
) -> SploxResult<()> {
    let body = serde_json::to_string(data)?;
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    let response = http
        .request(HttpMethod::Post, webhook_url, &headers, Some(body))
        .await?;
    debug!(url = %webhook_url, status = response.status, "webhook notified");
    if response.is_success() {
        Ok(())
    } else {
        Err(from_status(response.status, &response.headers, &response.text()))
    }
}
