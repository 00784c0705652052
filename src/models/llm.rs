use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{deserialize_nullable_vec, JsonObject};

/// OpenAI-compatible body for `POST /chat/completions`.
///
/// Parameters beyond `model` and `messages` (`temperature`, `max_tokens`, ...)
/// go through [`with_param`](Self::with_param) and are sent at the top level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Value>,
    #[serde(flatten)]
    pub params: JsonObject,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            params: JsonObject::new(),
        }
    }

    /// Append a `{role, content}` message.
    pub fn with_message(mut self, role: &str, content: impl Into<String>) -> Self {
        self.messages
            .push(json!({"role": role, "content": content.into()}));
        self
    }

    /// Append a message given as raw JSON (tool calls, multi-part content).
    pub fn with_raw_message(mut self, message: Value) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<JsonObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatCompletionMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CompletionUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Response of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    pub id: String,
    pub model: String,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<CompletionUsage>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
}

impl ChatCompletion {
    /// Content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_flattens_params() {
        let request = ChatCompletionRequest::new("openai/gpt-4o")
            .with_message("user", "Hi")
            .with_param("temperature", 0.2)
            .with_param("max_tokens", 64);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "openai/gpt-4o",
                "messages": [{"role": "user", "content": "Hi"}],
                "temperature": 0.2,
                "max_tokens": 64
            })
        );
    }

    #[test]
    fn test_completion_content() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "id": "cmpl-1",
            "model": "openai/gpt-4o",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
        }))
        .unwrap();
        assert_eq!(completion.content(), Some("Hello"));
        assert_eq!(completion.usage.unwrap().total_tokens, 4);

        let empty: ChatCompletion =
            serde_json::from_value(json!({"id": "c", "model": "m", "choices": null})).unwrap();
        assert_eq!(empty.content(), None);
    }
}
