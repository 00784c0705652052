use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{deserialize_nullable_string, deserialize_nullable_vec, JsonObject};

/// A chat session attached to a resource (usually a workflow).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub public_share_token: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonObject>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One content block of a chat message.
///
/// The server uses camelCase for the tool identifiers inside content blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessageContent {
    /// Block kind: `text`, `tool-call`, `reasoning`, ...
    #[serde(rename = "type", default, deserialize_with = "deserialize_nullable_string")]
    pub content_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "toolCallId", default)]
    pub tool_call_id: Option<String>,
    #[serde(rename = "toolName", default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub args: Option<JsonObject>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub chat_id: String,
    pub role: String,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub content: Vec<ChatMessageContent>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub status: Option<JsonObject>,
    #[serde(default)]
    pub metadata: Option<JsonObject>,
    #[serde(default)]
    pub files: Option<Vec<JsonObject>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// Concatenated text of all `text` content blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatListResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub chats: Vec<Chat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatHistoryResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub has_more: bool,
}

/// Body of `POST /chats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateChatRequest {
    pub name: String,
    pub resource_type: String,
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}

impl CreateChatRequest {
    /// Chat for a workflow, with `resource_type` set to `"api"`.
    pub fn new(name: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: "api".to_string(),
            resource_id: resource_id.into(),
            metadata: None,
        }
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn with_metadata(mut self, metadata: JsonObject) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
