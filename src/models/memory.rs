use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{deserialize_nullable_vec, JsonObject};

/// A single message held in an agent node's context memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryMessage {
    pub id: String,
    pub role: String,
    /// Free-form content; a string for plain turns, structured for tool turns.
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub context_memory_id: Option<String>,
    #[serde(default)]
    pub agent_node_id: Option<String>,
    #[serde(default)]
    pub workflow_version_id: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<JsonObject>>,
    #[serde(default)]
    pub tool_call_id: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<JsonObject>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A memory instance, identified by its `context_memory_id` and agent node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryInstance {
    pub id: String,
    pub name: String,
    pub workflow_version_id: String,
    pub chat_id: String,
    pub memory_node_id: String,
    pub memory_node_label: String,
    #[serde(default)]
    pub context_size: u64,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryListResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub chats: Vec<MemoryInstance>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

fn default_memory_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryGetResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub messages: Vec<MemoryMessage>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default = "default_memory_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryActionResponse {
    pub action: String,
    pub message: String,
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub summary: Option<String>,
    /// Only populated by `export`.
    #[serde(default)]
    pub messages: Option<Vec<MemoryMessage>>,
    #[serde(default)]
    pub remaining_count: u64,
}

/// Memory operations accepted by `POST /chat-memory/{agent_node_id}/actions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryAction {
    Summarize,
    Trim,
    Clear,
    Export,
}

/// Body of a memory action request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryActionRequest {
    pub action: MemoryAction,
    pub context_memory_id: String,
    pub workflow_version_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_last_n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarize_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_messages: Option<u32>,
}

impl MemoryActionRequest {
    pub fn new(
        action: MemoryAction,
        context_memory_id: impl Into<String>,
        workflow_version_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            context_memory_id: context_memory_id.into(),
            workflow_version_id: workflow_version_id.into(),
            keep_last_n: None,
            summarize_prompt: None,
            max_messages: None,
        }
    }
}

/// Body of `DELETE /chat-memories/{context_memory_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteMemoryRequest {
    pub memory_node_id: String,
    pub workflow_version_id: String,
}
