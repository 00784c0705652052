//! Shared helpers for integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use splox::{ClientConfig, SploxClient};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

/// API root of the mock server, with a path prefix like the real service.
pub fn api_root(server: &MockServer) -> String {
    format!("{}/api/v1", server.uri())
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_api_key(API_KEY)
        .with_base_url(api_root(server))
}

pub fn client_for(server: &MockServer) -> SploxClient {
    SploxClient::new(config_for(server)).expect("valid test config")
}

/// Route library logs to the test output; `RUST_LOG=splox=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn workflow_request_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "workflow_version_id": "ver-1",
        "start_node_id": "start-1",
        "status": status,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

pub fn execution_tree_json(id: &str, status: &str) -> Value {
    json!({
        "execution_tree": {
            "workflow_request_id": id,
            "status": status,
            "created_at": "2025-01-01T00:00:00Z",
            "completed_at": "2025-01-01T00:00:05Z",
            "nodes": [{
                "id": "ne-1",
                "node_id": "agent-1",
                "node_label": "Agent",
                "node_type": "agent",
                "status": status,
                "output_data": {"text": "All done"},
                "child_executions": [{
                    "index": 0,
                    "workflow_request_id": "child-1",
                    "status": "completed",
                    "label": "Sub-task",
                    "nodes": [{
                        "id": "ne-2",
                        "node_id": "tool-1",
                        "node_label": "Search",
                        "status": "completed"
                    }]
                }]
            }]
        }
    })
}

/// One SSE frame with a JSON body.
pub fn frame(data: &Value) -> String {
    format!("data: {}\n\n", data)
}

/// One SSE frame with an explicit event type.
pub fn typed_frame(event: &str, data: &Value) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}
