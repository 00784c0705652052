//! The blocking client from plain (non-async) code.

mod common;

use std::time::Duration;

use common::*;
use serde_json::json;
use splox::blocking::SploxClient;
use splox::{ExecutionStatus, RunWorkflowRequest, SploxError, StreamEvent};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock server living on its own multi-threaded runtime, so the blocking
/// client can run its own runtime on the test thread.
fn start_server() -> (Runtime, MockServer) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

fn mount(runtime: &Runtime, server: &MockServer, mock: Mock) {
    runtime.block_on(mock.mount(server));
}

#[test]
fn test_blocking_request_round_trip() {
    let (runtime, server) = start_server();
    mount(
        &runtime,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/v1/billing/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "balance_microdollars": 1_000_000,
                "balance_usd": 1.0,
                "currency": "USD"
            }))),
    );

    let client = SploxClient::new(config_for(&server)).unwrap();
    let balance = client.billing().get_balance().unwrap();
    assert_eq!(balance.balance_usd, 1.0);
}

#[test]
fn test_blocking_errors_match_async_mapping() {
    let (runtime, server) = start_server();
    mount(
        &runtime,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/v1/chats/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Chat not found"}))),
    );

    let client = SploxClient::new(config_for(&server)).unwrap();
    let err = client.chats().get("missing").unwrap_err();
    assert!(matches!(err, SploxError::NotFound { ref message, .. } if message == "Chat not found"));
}

#[test]
fn test_blocking_listen_iterates_events() {
    let (runtime, server) = start_server();
    let body = [
        typed_frame("text_delta", &json!({"delta": "hi"})),
        frame(&json!({"workflow_request": workflow_request_json("req-1", "completed")})),
    ]
    .concat();
    mount(
        &runtime,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/v1/workflow-requests/req-1/listen"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/event-stream")
                    .set_body_string(body),
            ),
    );

    let client = SploxClient::new(config_for(&server)).unwrap();
    let mut seen = Vec::new();
    for event in client.workflows().listen("req-1").unwrap() {
        let event = event.unwrap();
        let done = event.is_terminal_for("req-1");
        seen.push(event);
        if done {
            break;
        }
    }

    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[0],
        StreamEvent::TextDelta {
            delta: "hi".to_string()
        }
    );
    assert_eq!(
        seen[1].workflow_request().unwrap().status,
        ExecutionStatus::Completed
    );
}

#[test]
fn test_blocking_run_and_wait() {
    let (runtime, server) = start_server();
    mount(
        &runtime,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/v1/workflow-requests/run"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"workflow_request_id": "req-2"})),
            ),
    );
    mount(
        &runtime,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/v1/workflow-requests/req-2/listen"))
            .respond_with(ResponseTemplate::new(200).set_body_string(frame(
                &json!({"workflow_request": workflow_request_json("req-2", "failed")}),
            ))),
    );
    mount(
        &runtime,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/v1/workflow-requests/req-2/execution-tree"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(execution_tree_json("req-2", "failed")),
            ),
    );

    let client = SploxClient::new(config_for(&server)).unwrap();
    let tree = client
        .workflows()
        .run_and_wait(
            &RunWorkflowRequest::new("ver-1", "chat-1", "start-1", "go"),
            Duration::from_secs(10),
        )
        .unwrap();
    assert_eq!(tree.execution_tree.status, ExecutionStatus::Failed);
}

#[test]
fn test_blocking_secrets_and_llm() {
    let (runtime, server) = start_server();
    mount(
        &runtime,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/v1/workflows/wf-1/secrets"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"key": "TOKEN", "type": "env"}])),
            ),
    );
    mount(
        &runtime,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "model": "openai/gpt-4o",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}}]
            }))),
    );

    let client = SploxClient::new(config_for(&server)).unwrap();
    let secrets = client.secrets().list("wf-1", None).unwrap();
    assert_eq!(secrets[0].key, "TOKEN");

    let request = splox::ChatCompletionRequest::new("openai/gpt-4o").with_message("user", "Hi");
    let completion = client.llm().chat(&request).unwrap();
    assert_eq!(completion.content(), Some("Hi"));
}

#[test]
fn test_blocking_notify() {
    let (runtime, server) = start_server();
    mount(
        &runtime,
        &server,
        Mock::given(method("POST"))
            .and(path("/hooks/done"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1),
    );

    splox::blocking::notify(&format!("{}/hooks/done", server.uri()), &json!({"ok": true})).unwrap();
    runtime.block_on(server.verify());
}
