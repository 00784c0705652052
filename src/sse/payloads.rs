//! SSE payload deserialization structs
//!
//! Internal structs for the JSON carried by `data:` lines. A payload whose
//! fields have the wrong type fails here and the frame counts as malformed.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{NodeExecution, WorkflowRequest};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextDeltaPayload {
    pub delta: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReasoningDeltaPayload {
    pub reasoning_delta: String,
    #[serde(default)]
    pub reasoning_type: Option<String>,
}

/// Shared by the tool lifecycle events; ids default to empty.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ToolPayload {
    #[serde(default)]
    pub tool_call_id: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_args_delta: Option<String>,
    #[serde(default)]
    pub args: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub approved: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserMessagePayload {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct DonePayload {
    #[serde(default)]
    pub iteration: Option<u32>,
    #[serde(default)]
    pub run_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WorkflowStatusPayload {
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WorkflowUpdatePayload {
    #[serde(default)]
    pub workflow_request: Option<WorkflowRequest>,
    #[serde(default)]
    pub node_execution: Option<NodeExecution>,
}
