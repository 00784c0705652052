//! Chat session operations.

use crate::api::{segment, ApiTransport};
use crate::error::SploxResult;
use crate::models::{Chat, ChatHistoryResponse, ChatListResponse, CreateChatRequest};
use crate::sse::EventStream;
use crate::traits::ByteStream;

/// Chat operations, borrowed from [`SploxClient::chats`](crate::SploxClient::chats).
#[derive(Debug, Clone, Copy)]
pub struct Chats<'a> {
    api: &'a ApiTransport,
}

impl<'a> Chats<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    /// `POST /chats`
    pub async fn create(&self, request: &CreateChatRequest) -> SploxResult<Chat> {
        self.api.post("/chats", request).await
    }

    pub async fn get(&self, chat_id: &str) -> SploxResult<Chat> {
        self.api
            .get(&format!("/chats/{}", segment(chat_id)), &[])
            .await
    }

    /// Live events of a chat, including agent and tool traffic.
    pub async fn listen(&self, chat_id: &str) -> SploxResult<EventStream> {
        self.listen_body(chat_id).await.map(EventStream::new)
    }

    pub(crate) async fn listen_body(&self, chat_id: &str) -> SploxResult<ByteStream> {
        self.api
            .open_body(&format!("/chat-internal-messages/{}/listen", segment(chat_id)))
            .await
    }

    /// Chats attached to a resource, e.g. `("api", workflow_id)`.
    pub async fn list_for_resource(
        &self,
        resource_type: &str,
        resource_id: &str,
    ) -> SploxResult<ChatListResponse> {
        self.api
            .get(
                &format!("/chats/{}/{}", segment(resource_type), segment(resource_id)),
                &[],
            )
            .await
    }

    pub async fn delete(&self, chat_id: &str) -> SploxResult<()> {
        self.api
            .delete(&format!("/chats/{}", segment(chat_id)), None::<&()>)
            .await
    }

    /// Messages newest-first; pass `before` (an RFC 3339 timestamp) to page back.
    pub async fn get_history(
        &self,
        chat_id: &str,
        limit: u32,
        before: Option<&str>,
    ) -> SploxResult<ChatHistoryResponse> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(before) = before {
            query.push(("before", before.to_string()));
        }
        self.api
            .get(&format!("/chat-history/{}/paginated", segment(chat_id)), &query)
            .await
    }

    pub async fn delete_history(&self, chat_id: &str) -> SploxResult<()> {
        self.api
            .delete(&format!("/chat-history/{}", segment(chat_id)), None::<&()>)
            .await
    }
}
