//! Async Splox client.

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::api::ApiTransport;
use crate::config::ClientConfig;
use crate::error::SploxResult;
use crate::resources::{Billing, Chats, Events, Llm, Mcp, Memory, Secrets, Workflows};
use crate::traits::HttpClient;

/// Async client for the Splox API.
///
/// Cheap to clone; clones share the connection pool. Each resource group is
/// borrowed from the client:
///
/// ```ignore
/// use splox::{ClientConfig, CreateChatRequest, RunWorkflowRequest, SploxClient};
///
/// let client = SploxClient::new(ClientConfig::new().with_api_key("sk-..."))?;
/// let chat = client
///     .chats()
///     .create(&CreateChatRequest::new("Session", "workflow-id"))
///     .await?;
/// let run = client
///     .workflows()
///     .run(&RunWorkflowRequest::new("version-id", chat.id, "start-node-id", "Hello"))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct SploxClient {
    api: ApiTransport,
}

impl SploxClient {
    /// Client over reqwest with the config's request timeout.
    pub fn new(config: ClientConfig) -> SploxResult<Self> {
        let http = ReqwestHttpClient::new().with_timeout(config.timeout);
        Self::with_http_client(config, Arc::new(http))
    }

    /// Client over any transport (a test double, a tuned reqwest client, ...).
    pub fn with_http_client(config: ClientConfig, http: Arc<dyn HttpClient>) -> SploxResult<Self> {
        config.validate()?;
        Ok(Self {
            api: ApiTransport::new(http, config),
        })
    }

    /// Client configured from `SPLOX_API_KEY` and `SPLOX_BASE_URL`.
    pub fn from_env() -> SploxResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    pub fn workflows(&self) -> Workflows<'_> {
        Workflows::new(&self.api)
    }

    pub fn chats(&self) -> Chats<'_> {
        Chats::new(&self.api)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(&self.api)
    }

    pub fn memory(&self) -> Memory<'_> {
        Memory::new(&self.api)
    }

    pub fn mcp(&self) -> Mcp<'_> {
        Mcp::new(&self.api)
    }

    pub fn billing(&self) -> Billing<'_> {
        Billing::new(&self.api)
    }

    pub fn secrets(&self) -> Secrets<'_> {
        Secrets::new(&self.api)
    }

    pub fn llm(&self) -> Llm<'_> {
        Llm::new(&self.api)
    }
}
