//! MCP catalog and connections.

use crate::api::{segment, ApiTransport};
use crate::connect;
use crate::error::SploxResult;
use crate::models::{
    McpCatalogItem, McpCatalogItemEnvelope, McpCatalogListResponse, McpConnectionListResponse,
};

/// MCP operations, borrowed from [`SploxClient::mcp`](crate::SploxClient::mcp).
#[derive(Debug, Clone, Copy)]
pub struct Mcp<'a> {
    api: &'a ApiTransport,
}

impl<'a> Mcp<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    /// Browse the catalog. `featured` restricts the page to featured servers.
    pub async fn list_catalog(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
        featured: bool,
    ) -> SploxResult<McpCatalogListResponse> {
        let mut query = vec![("page", page.to_string()), ("per_page", per_page.to_string())];
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        if featured {
            query.push(("featured", "true".to_string()));
        }
        self.api.get("/mcp-catalog", &query).await
    }

    /// One catalog entry; the body may be bare or wrapped in `mcp_server`.
    pub async fn get_catalog_item(&self, item_id: &str) -> SploxResult<McpCatalogItem> {
        let envelope: McpCatalogItemEnvelope = self
            .api
            .get(&format!("/mcp-catalog/{}", segment(item_id)), &[])
            .await?;
        Ok(envelope.into())
    }

    /// Connections of the caller, optionally narrowed to a server or end user.
    pub async fn list_connections(
        &self,
        mcp_server_id: Option<&str>,
        end_user_id: Option<&str>,
    ) -> SploxResult<McpConnectionListResponse> {
        let mut query = Vec::new();
        if let Some(id) = mcp_server_id {
            query.push(("mcp_server_id", id.to_string()));
        }
        if let Some(id) = end_user_id {
            query.push(("end_user_id", id.to_string()));
        }
        self.api.get("/mcp-connections", &query).await
    }

    pub async fn delete_connection(&self, connection_id: &str) -> SploxResult<()> {
        self.api
            .delete(
                &format!("/mcp-connections/{}", segment(connection_id)),
                None::<&()>,
            )
            .await
    }

    /// See [`connect::generate_connection_token`].
    pub fn generate_connection_token(
        &self,
        mcp_server_id: &str,
        owner_user_id: &str,
        end_user_id: &str,
        credentials_encryption_key: &str,
    ) -> SploxResult<String> {
        connect::generate_connection_token(
            mcp_server_id,
            owner_user_id,
            end_user_id,
            credentials_encryption_key,
        )
    }

    /// See [`connect::generate_connection_link`].
    pub fn generate_connection_link(
        &self,
        base_url: &str,
        mcp_server_id: &str,
        owner_user_id: &str,
        end_user_id: &str,
        credentials_encryption_key: &str,
    ) -> SploxResult<String> {
        connect::generate_connection_link(
            base_url,
            mcp_server_id,
            owner_user_id,
            end_user_id,
            credentials_encryption_key,
        )
    }
}
