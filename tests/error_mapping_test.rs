//! HTTP failures surface as the matching `SploxError` variant.

mod common;

use std::time::Duration;

use common::*;
use serde_json::json;
use splox::{ClientConfig, ErrorCategory, SploxClient, SploxError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn balance_error(template: ResponseTemplate) -> SploxError {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/billing/balance"))
        .respond_with(template)
        .mount(&server)
        .await;
    client_for(&server)
        .billing()
        .get_balance()
        .await
        .expect_err("request should fail")
}

#[tokio::test]
async fn test_401_and_403_are_auth_errors() {
    for status in [401u16, 403] {
        let err = balance_error(
            ResponseTemplate::new(status).set_body_json(json!({"error": "Invalid API key"})),
        )
        .await;
        match &err {
            SploxError::Auth {
                status: got,
                message,
                ..
            } => {
                assert_eq!(*got, status);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("expected auth error, got {:?}", other),
        }
        assert_eq!(err.category(), ErrorCategory::Auth);
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), format!("[{}] Invalid API key", status));
    }
}

#[tokio::test]
async fn test_404_is_not_found_with_body() {
    let err = balance_error(
        ResponseTemplate::new(404).set_body_json(json!({"message": "No such workflow"})),
    )
    .await;
    assert!(matches!(err, SploxError::NotFound { ref message, .. } if message == "No such workflow"));
    assert_eq!(err.status_code(), Some(404));
    assert!(err.response_body().unwrap().contains("No such workflow"));
}

#[tokio::test]
async fn test_429_carries_retry_after() {
    let err = balance_error(
        ResponseTemplate::new(429)
            .insert_header("Retry-After", "7")
            .set_body_json(json!({"error": "Slow down"})),
    )
    .await;
    assert!(matches!(err, SploxError::RateLimit { .. }));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_429_without_retry_after() {
    let err = balance_error(ResponseTemplate::new(429)).await;
    assert!(matches!(err, SploxError::RateLimit { .. }));
    assert_eq!(err.retry_after(), None);
    assert_eq!(err.to_string(), "[429] Rate limit exceeded");
}

#[tokio::test]
async fn test_429_with_huge_retry_after_is_ignored() {
    let err = balance_error(ResponseTemplate::new(429).insert_header("Retry-After", "1e30")).await;
    assert!(matches!(err, SploxError::RateLimit { .. }));
    assert_eq!(err.retry_after(), None);
}

#[tokio::test]
async fn test_400_and_422_are_validation_errors() {
    for status in [400u16, 422] {
        let err = balance_error(
            ResponseTemplate::new(status).set_body_json(json!({"error": "limit must be positive"})),
        )
        .await;
        assert!(
            matches!(err, SploxError::Validation { status: got, .. } if got == status),
            "status {} mapped to {:?}",
            status,
            err
        );
        assert_eq!(err.category(), ErrorCategory::Client);
    }
}

#[tokio::test]
async fn test_5xx_is_retryable_api_error() {
    let err = balance_error(ResponseTemplate::new(502).set_body_string("bad gateway")).await;
    match &err {
        SploxError::Api {
            status, message, ..
        } => {
            assert_eq!(*status, 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("expected api error, got {:?}", other),
    }
    assert_eq!(err.category(), ErrorCategory::Server);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_410_is_api_error() {
    let err = balance_error(ResponseTemplate::new(410)).await;
    assert!(matches!(err, SploxError::Api { status: 410, .. }));
    assert_eq!(err.to_string(), "[410] Resource expired");
}

#[tokio::test]
async fn test_empty_error_body_uses_status_message() {
    let err = balance_error(ResponseTemplate::new(500)).await;
    assert_eq!(err.to_string(), "[500] Server error");
    assert_eq!(err.response_body(), Some(""));
}

#[tokio::test]
async fn test_unexpected_success_body_is_decode_error() {
    let err = balance_error(ResponseTemplate::new(200).set_body_json(json!({"nope": true}))).await;
    assert!(matches!(err, SploxError::Decode { .. }));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Bind then drop so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = SploxClient::new(
        ClientConfig::new()
            .with_api_key(API_KEY)
            .with_base_url(format!("{}/api/v1", uri))
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.billing().get_balance().await.unwrap_err();
    assert!(
        matches!(err, SploxError::Connection { .. } | SploxError::Timeout { .. }),
        "got {:?}",
        err
    );
    assert_eq!(err.category(), ErrorCategory::Network);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/billing/balance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({
                    "balance_microdollars": 1, "balance_usd": 0.000001, "currency": "USD"
                })),
        )
        .mount(&server)
        .await;

    let client =
        SploxClient::new(config_for(&server).with_timeout(Duration::from_millis(200))).unwrap();
    let err = client.billing().get_balance().await.unwrap_err();
    assert!(matches!(err, SploxError::Timeout { .. }), "got {:?}", err);
}
