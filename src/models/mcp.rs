use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_nullable_vec, JsonObject};

/// An MCP server listed in the public catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpCatalogItem {
    pub id: String,
    pub name: String,
    pub url: String,
    pub transport_type: String,
    pub auth_type: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub auth_config: Option<JsonObject>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub display_order: Option<i64>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpCatalogListResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub mcp_servers: Vec<McpCatalogItem>,
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// `GET /mcp-catalog/{id}` answers either with the item itself or with
/// `{"mcp_server": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum McpCatalogItemEnvelope {
    Wrapped { mcp_server: McpCatalogItem },
    Bare(McpCatalogItem),
}

impl From<McpCatalogItemEnvelope> for McpCatalogItem {
    fn from(envelope: McpCatalogItemEnvelope) -> Self {
        match envelope {
            McpCatalogItemEnvelope::Wrapped { mcp_server } => mcp_server,
            McpCatalogItemEnvelope::Bare(item) => item,
        }
    }
}

/// An end-user connection to an MCP server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpConnection {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub url: String,
    pub transport_type: String,
    pub auth_type: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub auth_config: Option<JsonObject>,
    #[serde(default)]
    pub end_user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McpConnectionListResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub connections: Vec<McpConnection>,
    #[serde(default)]
    pub total: u64,
}
