//! SSE stream parsing logic
//!
//! Contains the stateful SseParser for accumulating lines into frames and
//! emitting events, as well as the core parsing functions.

mod content;
mod tools;
mod workflow;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::sse::events::{SseLine, SseParseError, StreamEvent};

use content::{parse_reasoning_delta_event, parse_text_delta_event, parse_user_message_event};
use tools::parse_tool_event;
use workflow::{
    parse_done_event, parse_error_event, parse_workflow_status_event, parse_workflow_update_event,
};

/// Data payload of a heartbeat frame.
const KEEPALIVE: &str = "keepalive";

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    // Only the single space after the colon is framing; the rest is payload.
    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.strip_prefix(' ').unwrap_or(rest).to_string());
    }

    // Unknown line format (id:, retry:, garbage) - treat as comment
    SseLine::Comment(line.to_string())
}

pub(super) fn decode_payload<T: DeserializeOwned>(
    event_type: &str,
    data: Value,
) -> Result<T, SseParseError> {
    serde_json::from_value(data).map_err(|e| SseParseError::InvalidPayload {
        event_type: event_type.to_string(),
        source: e.to_string(),
    })
}

/// Decode one frame into a typed event.
///
/// The type is the explicit `event:` value when present, else the JSON
/// `type` field, else the JSON `event_type` field. An untyped frame is a
/// workflow update if it carries `workflow_request` or `node_execution`.
pub fn parse_stream_event(event_type: Option<&str>, data: &str) -> Result<StreamEvent, SseParseError> {
    if data.trim() == KEEPALIVE {
        return Ok(StreamEvent::Keepalive);
    }

    // Events like `stopped` may come without data
    let value = if data.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str::<Value>(data).map_err(|e| SseParseError::InvalidJson {
            source: e.to_string(),
        })?
    };

    let resolved = event_type
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| field_str(&value, "type"))
        .or_else(|| field_str(&value, "event_type"));

    match resolved.as_deref() {
        Some("text_delta") => parse_text_delta_event("text_delta", value),
        Some("reasoning_delta") => parse_reasoning_delta_event("reasoning_delta", value),
        Some(
            t @ ("tool_call_start"
            | "tool_call_delta"
            | "tool_start"
            | "tool_complete"
            | "tool_error"
            | "tool_approval_request"
            | "tool_approval_response"),
        ) => parse_tool_event(t, value),
        Some("user_message") => parse_user_message_event("user_message", value),
        Some("done") => parse_done_event("done", value),
        Some("stopped") => Ok(StreamEvent::Stopped),
        Some("error") => parse_error_event("error", value),
        Some("workflow_status") => parse_workflow_status_event("workflow_status", value),
        Some(KEEPALIVE) => Ok(StreamEvent::Keepalive),
        Some(other) => Ok(StreamEvent::Unrecognized {
            event_type: other.to_string(),
            payload: value,
        }),
        None if has_workflow_fields(&value) => parse_workflow_update_event(value),
        None => Ok(StreamEvent::Unrecognized {
            event_type: String::new(),
            payload: value,
        }),
    }
}

fn field_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn has_workflow_fields(value: &Value) -> bool {
    value.get("workflow_request").is_some() || value.get("node_execution").is_some()
}

/// Stateful SSE parser that accumulates lines and emits complete events
#[derive(Debug, Default)]
pub struct SseParser {
    /// Current event type being accumulated
    current_event_type: Option<String>,
    /// Accumulated data lines (SSE allows multiple data: lines)
    data_buffer: Vec<String>,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line (without its terminator) to the parser
    ///
    /// Returns:
    /// - `Ok(Some(event))` - A complete event was parsed
    /// - `Ok(None)` - Line was consumed but event is incomplete
    /// - `Err(error)` - The frame just ended could not be decoded
    pub fn feed_line(&mut self, line: &str) -> Result<Option<StreamEvent>, SseParseError> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.current_event_type = Some(event_type);
                Ok(None)
            }
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                Ok(None)
            }
            SseLine::Empty => self.try_emit_event(),
            SseLine::Comment(_) => Ok(None),
        }
    }

    /// Emit whatever frame is pending when the transport ends
    pub fn flush(&mut self) -> Result<Option<StreamEvent>, SseParseError> {
        self.try_emit_event()
    }

    /// True if lines of an unfinished frame are buffered
    pub fn has_pending(&self) -> bool {
        self.current_event_type.is_some() || !self.data_buffer.is_empty()
    }

    /// Try to emit a complete event from accumulated state
    fn try_emit_event(&mut self) -> Result<Option<StreamEvent>, SseParseError> {
        // If we have no event type or data, nothing to emit
        if !self.has_pending() {
            return Ok(None);
        }

        let event_type = self.current_event_type.take();
        let data = self.data_buffer.join("\n");
        self.data_buffer.clear();

        parse_stream_event(event_type.as_deref(), &data).map(Some)
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.current_event_type = None;
        self.data_buffer.clear();
    }
}
