//! Typed request and response models for the Splox API.

mod billing;
mod chat;
mod llm;
mod mcp;
mod memory;
mod secrets;
mod status;
mod webhook;
mod workflow;

pub use billing::*;
pub use chat::*;
pub use llm::*;
pub use mcp::{McpCatalogItem, McpCatalogListResponse, McpConnection, McpConnectionListResponse};
pub(crate) use mcp::McpCatalogItemEnvelope;
pub use memory::*;
pub use secrets::{
    EndUserSecretsSummary, GenerateSecretsLinkResponse, SecretActionResponse,
    WorkflowSecretMetadata,
};
pub(crate) use secrets::{EnvSecretRequest, FileSecretRequest};
pub use status::ExecutionStatus;
pub use webhook::EventResponse;
pub use workflow::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Cursor-based pagination info.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Helper to deserialize nullable strings as empty string
/// Handles both missing fields and explicit null values
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Same as [`deserialize_nullable_string`] for lists: `null` becomes `[]`.
pub(crate) fn deserialize_nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_nullable_string")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_nullable_vec")]
        items: Vec<u32>,
    }

    #[test]
    fn test_nullable_helpers_handle_missing_and_null() {
        let h: Holder = serde_json::from_value(json!({"name": null, "items": null})).unwrap();
        assert_eq!(h.name, "");
        assert!(h.items.is_empty());

        let h: Holder = serde_json::from_value(json!({})).unwrap();
        assert_eq!(h.name, "");
        assert!(h.items.is_empty());

        let h: Holder = serde_json::from_value(json!({"name": "x", "items": [1, 2]})).unwrap();
        assert_eq!(h.name, "x");
        assert_eq!(h.items, vec![1, 2]);
    }

    #[test]
    fn test_pagination_defaults() {
        let p: Pagination = serde_json::from_value(json!({"limit": 10})).unwrap();
        assert_eq!(p.limit, 10);
        assert!(p.next_cursor.is_none());
        assert!(!p.has_more);
    }
}
