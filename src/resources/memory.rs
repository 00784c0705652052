//! Agent context memory.

use crate::api::{segment, ApiTransport};
use crate::error::SploxResult;
use crate::models::{
    DeleteMemoryRequest, MemoryAction, MemoryActionRequest, MemoryActionResponse,
    MemoryGetResponse, MemoryListResponse,
};

/// Memory operations, borrowed from [`SploxClient::memory`](crate::SploxClient::memory).
#[derive(Debug, Clone, Copy)]
pub struct Memory<'a> {
    api: &'a ApiTransport,
}

impl<'a> Memory<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    /// Memory instances of a workflow version.
    pub async fn list(
        &self,
        workflow_version_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> SploxResult<MemoryListResponse> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        self.api
            .get(
                &format!("/chat-memories/{}", segment(workflow_version_id)),
                &query,
            )
            .await
    }

    /// Messages stored by an agent node for one chat.
    pub async fn get(
        &self,
        agent_node_id: &str,
        chat_id: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> SploxResult<MemoryGetResponse> {
        let mut query = vec![("chat_id", chat_id.to_string()), ("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        self.api
            .get(&format!("/chat-memory/{}", segment(agent_node_id)), &query)
            .await
    }

    /// Run any memory action.
    pub async fn action(
        &self,
        agent_node_id: &str,
        request: &MemoryActionRequest,
    ) -> SploxResult<MemoryActionResponse> {
        self.api
            .post(
                &format!("/chat-memory/{}/actions", segment(agent_node_id)),
                request,
            )
            .await
    }

    /// Replace older messages with a summary, keeping the last `keep_last_n`.
    pub async fn summarize(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
        keep_last_n: Option<u32>,
        summarize_prompt: Option<&str>,
    ) -> SploxResult<MemoryActionResponse> {
        let mut request =
            MemoryActionRequest::new(MemoryAction::Summarize, context_memory_id, workflow_version_id);
        request.keep_last_n = keep_last_n;
        request.summarize_prompt = summarize_prompt.map(str::to_string);
        self.action(agent_node_id, &request).await
    }

    /// Drop the oldest messages beyond `max_messages`.
    pub async fn trim(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
        max_messages: Option<u32>,
    ) -> SploxResult<MemoryActionResponse> {
        let mut request =
            MemoryActionRequest::new(MemoryAction::Trim, context_memory_id, workflow_version_id);
        request.max_messages = max_messages;
        self.action(agent_node_id, &request).await
    }

    pub async fn clear(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
    ) -> SploxResult<MemoryActionResponse> {
        let request =
            MemoryActionRequest::new(MemoryAction::Clear, context_memory_id, workflow_version_id);
        self.action(agent_node_id, &request).await
    }

    pub async fn export(
        &self,
        agent_node_id: &str,
        context_memory_id: &str,
        workflow_version_id: &str,
    ) -> SploxResult<MemoryActionResponse> {
        let request =
            MemoryActionRequest::new(MemoryAction::Export, context_memory_id, workflow_version_id);
        self.action(agent_node_id, &request).await
    }

    /// `DELETE /chat-memories/{context_memory_id}` with the node and version in the body.
    pub async fn delete(
        &self,
        context_memory_id: &str,
        memory_node_id: &str,
        workflow_version_id: &str,
    ) -> SploxResult<()> {
        let body = DeleteMemoryRequest {
            memory_node_id: memory_node_id.to_string(),
            workflow_version_id: workflow_version_id.to_string(),
        };
        self.api
            .delete(
                &format!("/chat-memories/{}", segment(context_memory_id)),
                Some(&body),
            )
            .await
    }
}
