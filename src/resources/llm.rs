//! OpenAI-compatible chat completions.

use crate::api::ApiTransport;
use crate::error::SploxResult;
use crate::models::{ChatCompletion, ChatCompletionRequest};

/// LLM inference, borrowed from [`SploxClient::llm`](crate::SploxClient::llm).
#[derive(Debug, Clone, Copy)]
pub struct Llm<'a> {
    api: &'a ApiTransport,
}

impl<'a> Llm<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    /// `POST /chat/completions`
    ///
    /// ```ignore
    /// let completion = client
    ///     .llm()
    ///     .chat(&ChatCompletionRequest::new("openai/gpt-4o").with_message("user", "Hi"))
    ///     .await?;
    /// println!("{}", completion.content().unwrap_or_default());
    /// ```
    pub async fn chat(&self, request: &ChatCompletionRequest) -> SploxResult<ChatCompletion> {
        self.api.post("/chat/completions", request).await
    }
}
