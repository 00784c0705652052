//! Blocking client.
//!
//! Mirrors the async client operation for operation. Each client owns a
//! private current-thread tokio runtime and drives the async implementation
//! on it, so it must not be used from inside an async runtime.
//!
//! ```ignore
//! use splox::blocking::SploxClient;
//! use splox::{ClientConfig, StreamEvent};
//!
//! let client = SploxClient::new(ClientConfig::from_env())?;
//! for event in client.chats().listen("chat-1")? {
//!     if let StreamEvent::TextDelta { delta } = event? {
//!         print!("{delta}");
//!     }
//! }
//! ```

use std::future::Future;
use std::io::{self, ErrorKind, Read};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::config::ClientConfig;
use crate::error::{SploxError, SploxResult};
use crate::models::{
    ActivityStats, Chat, ChatCompletion, ChatCompletionRequest, ChatHistoryResponse,
    ChatListResponse, CreateChatRequest, DailyActivityResponse, EndUserSecretsSummary,
    EventResponse, ExecutionTreeResponse, GenerateSecretsLinkResponse, HistoryResponse,
    McpCatalogItem, McpCatalogListResponse, McpConnectionListResponse, MemoryActionRequest,
    MemoryActionResponse, MemoryGetResponse, MemoryListResponse, RunResponse, RunWorkflowRequest,
    SecretActionResponse, StartNodesResponse, TransactionHistoryResponse, TransactionQuery,
    UserBalance, WorkflowFull, WorkflowListResponse, WorkflowSecretMetadata, WorkflowVersion,
    WorkflowVersionListResponse,
};
use crate::sse::EventIter;
use crate::traits::{ByteStream, HttpClient};

/// Event iterator returned by the blocking `listen` operations.
pub type BlockingEvents = EventIter<BodyReader>;

/// Blocking client for the Splox API.
#[derive(Debug, Clone)]
pub struct SploxClient {
    inner: crate::SploxClient,
    runtime: Arc<Runtime>,
}

impl SploxClient {
    pub fn new(config: ClientConfig) -> SploxResult<Self> {
        Self::from_async(crate::SploxClient::new(config)?)
    }

    pub fn with_http_client(config: ClientConfig, http: Arc<dyn HttpClient>) -> SploxResult<Self> {
        Self::from_async(crate::SploxClient::with_http_client(config, http)?)
    }

    /// Client configured from `SPLOX_API_KEY` and `SPLOX_BASE_URL`.
    pub fn from_env() -> SploxResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    fn from_async(inner: crate::SploxClient) -> SploxResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SploxError::config(format!("failed to start runtime: {}", e)))?;
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn event_iter(&self, body: ByteStream) -> BlockingEvents {
        EventIter::new(BodyReader {
            body: Some(body),
            pending: Bytes::new(),
            runtime: Arc::clone(&self.runtime),
        })
    }

    pub fn workflows(&self) -> Workflows<'_> {
        Workflows { client: self }
    }

    pub fn chats(&self) -> Chats<'_> {
        Chats { client: self }
    }

    pub fn events(&self) -> Events<'_> {
        Events { client: self }
    }

    pub fn memory(&self) -> Memory<'_> {
        Memory { client: self }
    }

    pub fn mcp(&self) -> Mcp<'_> {
        Mcp { client: self }
    }

    pub fn billing(&self) -> Billing<'_> {
        Billing { client: self }
    }

    pub fn secrets(&self) -> Secrets<'_> {
        Secrets { client: self }
    }

    pub fn llm(&self) -> Llm<'_> {
        Llm { client: self }
    }
}

/// Blocking [`notify`](crate::notify()): `POST` `data` as JSON to `webhook_url`.
///
/// Runs on a throwaway current-thread runtime, so it must not be called from
/// inside an async runtime.
pub fn notify<T: Serialize + ?Sized>(webhook_url: &str, data: &T) -> SploxResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| SploxError::config(format!("failed to start runtime: {}", e)))?;
    runtime.block_on(crate::notify::notify(webhook_url, data))
}

/// `std::io::Read` over a transport body, pulling chunks on the client's runtime.
///
/// Dropping the reader drops the body, which closes the connection.
pub struct BodyReader {
    // Declared before `runtime` so the body is dropped first.
    body: Option<ByteStream>,
    pending: Bytes,
    runtime: Arc<Runtime>,
}

impl std::fmt::Debug for BodyReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyReader")
            .field("open", &self.body.is_some())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Read for BodyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_empty() {
            let Some(body) = self.body.as_mut() else {
                return Ok(0);
            };
            match self.runtime.block_on(body.next()) {
                Some(Ok(chunk)) => self.pending = chunk,
                Some(Err(err)) => {
                    self.body = None;
                    return Err(io::Error::new(ErrorKind::Other, err.to_string()));
                }
                None => {
                    self.body = None;
                    return Ok(0);
                }
            }
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending = self.pending.slice(n..);
        Ok(n)
    }
}

/// Blocking workflow operations.
#[derive(Debug, Clone, Copy)]
pub struct Workflows<'a> {
    client: &'a SploxClient,
}

impl Workflows<'_> {
    pub fn list(
        &self,
        limit: u32,
        cursor: Option<&str>,
        search: Option<&str>,
    ) -> SploxResult<WorkflowListResponse> {
        let c = self.client;
        c.block_on(c.inner.workflows().list(limit, cursor, search))
    }

    pub fn get(&self, workflow_id: &str) -> SploxResult<WorkflowFull> {
        let c = self.client;
        c.block_on(c.inner.workflows().get(workflow_id))
    }

    pub fn get_latest_version(&self, workflow_id: &str) -> SploxResult<WorkflowVersion> {
        let c = self.client;
        c.block_on(c.inner.workflows().get_latest_version(workflow_id))
    }

    pub fn list_versions(&self, workflow_id: &str) -> SploxResult<WorkflowVersionListResponse> {
        let c = self.client;
        c.block_on(c.inner.workflows().list_versions(workflow_id))
    }

    pub fn get_start_nodes(&self, workflow_version_id: &str) -> SploxResult<StartNodesResponse> {
        let c = self.client;
        c.block_on(c.inner.workflows().get_start_nodes(workflow_version_id))
    }

    pub fn run(&self, request: &RunWorkflowRequest) -> SploxResult<RunResponse> {
        let c = self.client;
        c.block_on(c.inner.workflows().run(request))
    }

    pub fn listen(&self, workflow_request_id: &str) -> SploxResult<BlockingEvents> {
        let c = self.client;
        let body = c.block_on(c.inner.workflows().listen_body(workflow_request_id))?;
        Ok(c.event_iter(body))
    }

    pub fn get_execution_tree(&self, workflow_request_id: &str) -> SploxResult<ExecutionTreeResponse> {
        let c = self.client;
        c.block_on(c.inner.workflows().get_execution_tree(workflow_request_id))
    }

    pub fn get_history(
        &self,
        workflow_request_id: &str,
        limit: u32,
        cursor: Option<&str>,
        search: Option<&str>,
    ) -> SploxResult<HistoryResponse> {
        let c = self.client;
        c.block_on(
            c.inner
                .workflows()
                .get_history(workflow_request_id, limit, cursor, search),
        )
    }

    pub fn stop(&self, workflow_request_id: &str) -> SploxResult<()> {
        let c = self.client;
        c.block_on(c.inner.workflows().stop(workflow_request_id))
    }

    pub fn run_and_wait(
        &self,
        request: &RunWorkflowRequest,
        timeout: Duration,
    ) -> SploxResult<ExecutionTreeResponse> {
        let c = self.client;
        c.block_on(c.inner.workflows().run_and_wait(request, timeout))
    }

    pub fn wait_for_completion(
        &self,
        workflow_request_id: &str,
        timeout: Duration,
    ) -> SploxResult<ExecutionTreeResponse> {
        let c = self.client;
        c.block_on(
            c.inner
                .workflows()
                .wait_for_completion(workflow_request_id, timeout),
        )
    }
}

/// Blocking chat operations.
#[derive(Debug, Clone, Copy)]
pub struct Chats<'a> {
    client: &'a SploxClient,
}

impl Chats<'_> {
    pub fn create(&self, request: &CreateChatRequest) -> SploxResult<Chat> {
        let c = self.client;
        c.block_on(c.inner.chats().create(request))
    }

    pub fn get(&self, chat_id: &str) -> SploxResult<Chat> {
        let c = self.client;
        c.block_on(c.inner.chats().get(chat_id))
    }

    pub fn listen(&self, chat_id: &str) -> SploxResult<BlockingEvents> {
        let c = self.client;
        let body = c.block_on(c.inner.chats().listen_body(chat_id))?;
        Ok(c.event_iter(body))
    }

    pub fn list_for_resource(
        &self,
        resource_type: &str,
        resource_id: &str,
    ) -> SploxResult<ChatListResponse> {
        let c = self.client;
        c.block_on(c.inner.chats().list_for_resource(resource_type, resource_id))
    }

    pub fn delete(&self, chat_id: &str) -> SploxResult<()> {
        let c = self.client;
        c.block_on(c.inner.chats().delete(chat_id))
    }

    pub fn get_history(
        &self,
        chat_id: &str,
        limit: u32,
        before: Option<&str>,
    ) -> SploxResult<ChatHistoryResponse> {
        let c = self.client;
        c.block_on(c.inner.chats().get_history(chat_id, limit, before))
    }

    pub fn delete_history(&self, chat_id: &str) -> SploxResult<()> {
        let c = self.client;
        c.block_on(c.inner.chats().delete_history(chat_id))
    }
}

/// Blocking webhook events.
#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    client: &'a SploxClient,
}

impl Events<'_> {
    pub fn send(
        &self,
        webhook_id: &str,
        payload: Option<&Value>,
        secret: Option<&str>,
    ) -> SploxResult<EventResponse> {
        let c = self.client;
        c.block_on(c.inner.events().send(webhook_id, payload, secret))
    }
}

/// Blocking memory operations.
#[derive(Debug, Clone, Copy)]
pub struct Memory<'a> {
    client: &'a SploxClient,
}

impl Memory<'_> {
    pub fn list(
        &self,
        workflow_version_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> SploxResult<MemoryListResponse> {
        let c = self.client;
        c.block_on(c.inner.memory().list(workflow_version_id, limit, cursor))
    }

    pub fn get(
        &self,
        agent_node_id: &str,
        chat_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> SploxResult<MemoryGetResponse> {
        let c = self.client;
        c.block_on(c.inner.memory().get(agent_node_id, chat_id, limit, cursor))
    }

    pub fn action(
        &self,
        agent_node_id: &str,
        request: &MemoryActionRequest,
    ) -> SploxResult<MemoryActionResponse> {
        let c = self.client;
        c.block_on(c.inner.memory().action(agent_node_id, request))
    }

    pub fn summarize(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
        keep_last_n: Option<u32>,
        summarize_prompt: Option<&str>,
    ) -> SploxResult<MemoryActionResponse> {
        let c = self.client;
        c.block_on(c.inner.memory().summarize(
            agent_node_id,
            context_memory_id,
            workflow_version_id,
            keep_last_n,
            summarize_prompt,
        ))
    }

    pub fn trim(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
        max_messages: Option<u32>,
    ) -> SploxResult<MemoryActionResponse> {
        let c = self.client;
        c.block_on(c.inner.memory().trim(
            agent_node_id,
            context_memory_id,
            workflow_version_id,
            max_messages,
        ))
    }

    pub fn clear(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
    ) -> SploxResult<MemoryActionResponse> {
        let c = self.client;
        c.block_on(
            c.inner
                .memory()
                .clear(agent_node_id, context_memory_id, workflow_version_id),
        )
    }

    pub fn export(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
    ) -> SploxResult<MemoryActionResponse> {
        let c = self.client;
        c.block_on(
            c.inner
                .memory()
                .export(agent_node_id, context_memory_id, workflow_version_id),
        )
    }

    pub fn delete(
        &self,
        context_memory_id: &str,
        memory_node_id: &str,
        workflow_version_id: &str,
    ) -> SploxResult<()> {
        let c = self.client;
        c.block_on(
            c.inner
                .memory()
                .delete(context_memory_id, memory_node_id, workflow_version_id),
        )
    }
}

/// Blocking MCP operations.
#[derive(Debug, Clone, Copy)]
pub struct Mcp<'a> {
    client: &'a SploxClient,
}

impl Mcp<'_> {
    pub fn list_catalog(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
        featured: bool,
    ) -> SploxResult<McpCatalogListResponse> {
        let c = self.client;
        c.block_on(c.inner.mcp().list_catalog(page, per_page, search, featured))
    }

    pub fn get_catalog_item(&self, item_id: &str) -> SploxResult<McpCatalogItem> {
        let c = self.client;
        c.block_on(c.inner.mcp().get_catalog_item(item_id))
    }

    pub fn list_connections(
        &self,
        mcp_server_id: Option<&str>,
        end_user_id: Option<&str>,
    ) -> SploxResult<McpConnectionListResponse> {
        let c = self.client;
        c.block_on(c.inner.mcp().list_connections(mcp_server_id, end_user_id))
    }

    pub fn delete_connection(&self, connection_id: &str) -> SploxResult<()> {
        let c = self.client;
        c.block_on(c.inner.mcp().delete_connection(connection_id))
    }

    pub fn generate_connection_token(
        &self,
        mcp_server_id: &str,
        owner_user_id: &str,
        end_user_id: &str,
        credentials_encryption_key: &str,
    ) -> SploxResult<String> {
        self.client.inner.mcp().generate_connection_token(
            mcp_server_id,
            owner_user_id,
            end_user_id,
            credentials_encryption_key,
        )
    }

    pub fn generate_connection_link(
        &self,
        base_url: &str,
        mcp_server_id: &str,
        owner_user_id: &str,
        end_user_id: &str,
        credentials_encryption_key: &str,
    ) -> SploxResult<String> {
        self.client.inner.mcp().generate_connection_link(
            base_url,
            mcp_server_id,
            owner_user_id,
            end_user_id,
            credentials_encryption_key,
        )
    }
}

/// Blocking billing operations.
#[derive(Debug, Clone, Copy)]
pub struct Billing<'a> {
    client: &'a SploxClient,
}

impl Billing<'_> {
    pub fn get_balance(&self) -> SploxResult<UserBalance> {
        let c = self.client;
        c.block_on(c.inner.billing().get_balance())
    }

    pub fn get_transaction_history(
        &self,
        query: &TransactionQuery,
    ) -> SploxResult<TransactionHistoryResponse> {
        let c = self.client;
        c.block_on(c.inner.billing().get_transaction_history(query))
    }

    pub fn get_activity_stats(&self) -> SploxResult<ActivityStats> {
        let c = self.client;
        c.block_on(c.inner.billing().get_activity_stats())
    }

    pub fn get_daily_activity(&self, days: u32) -> SploxResult<DailyActivityResponse> {
        let c = self.client;
        c.block_on(c.inner.billing().get_daily_activity(days))
    }
}

/// Blocking secret operations.
#[derive(Debug, Clone, Copy)]
pub struct Secrets<'a> {
    client: &'a SploxClient,
}

impl Secrets<'_> {
    pub fn list(
        &self,
        workflow_id: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<Vec<WorkflowSecretMetadata>> {
        let c = self.client;
        c.block_on(c.inner.secrets().list(workflow_id, end_user_id))
    }

    pub fn set_env(
        &self,
        workflow_id: &str,
        key: &str,
        value: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<SecretActionResponse> {
        let c = self.client;
        c.block_on(c.inner.secrets().set_env(workflow_id, key, value, end_user_id))
    }

    pub fn set_file(
        &self,
        workflow_id: &str,
        key: &str,
        s3_url: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<SecretActionResponse> {
        let c = self.client;
        c.block_on(c.inner.secrets().set_file(workflow_id, key, s3_url, end_user_id))
    }

    pub fn delete(
        &self,
        workflow_id: &str,
        key: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<SecretActionResponse> {
        let c = self.client;
        c.block_on(c.inner.secrets().delete(workflow_id, key, end_user_id))
    }

    pub fn list_end_users(&self, workflow_id: &str) -> SploxResult<Vec<EndUserSecretsSummary>> {
        let c = self.client;
        c.block_on(c.inner.secrets().list_end_users(workflow_id))
    }

    pub fn generate_link(
        &self,
        workflow_id: &str,
        end_user_id: &str,
    ) -> SploxResult<GenerateSecretsLinkResponse> {
        let c = self.client;
        c.block_on(c.inner.secrets().generate_link(workflow_id, end_user_id))
    }
}

/// Blocking chat completions.
#[derive(Debug, Clone, Copy)]
pub struct Llm<'a> {
    client: &'a SploxClient,
}

impl Llm<'_> {
    pub fn chat(&self, request: &ChatCompletionRequest) -> SploxResult<ChatCompletion> {
        let c = self.client;
        c.block_on(c.inner.llm().chat(request))
    }
}
