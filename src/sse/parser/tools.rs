//! Tool-related event parsers

use serde_json::Value;

use super::decode_payload;
use crate::sse::events::{SseParseError, StreamEvent};
use crate::sse::payloads::ToolPayload;

/// Parse any `tool_*` event. Identifiers default to empty strings.
pub(super) fn parse_tool_event(event_type: &str, data: Value) -> Result<StreamEvent, SseParseError> {
    let payload: ToolPayload = decode_payload(event_type, data)?;
    let tool_call_id = payload.tool_call_id.unwrap_or_default();
    let tool_name = payload.tool_name.unwrap_or_default();

    let event = match event_type {
        "tool_call_start" => StreamEvent::ToolCallStart {
            tool_call_id,
            tool_name,
        },
        "tool_call_delta" => StreamEvent::ToolCallDelta {
            tool_call_id,
            args_delta: payload.tool_args_delta.unwrap_or_default(),
        },
        "tool_start" => StreamEvent::ToolStart {
            tool_call_id,
            tool_name,
        },
        "tool_complete" => StreamEvent::ToolComplete {
            tool_call_id,
            tool_name,
            result: payload.result,
        },
        "tool_error" => StreamEvent::ToolError {
            tool_call_id,
            tool_name,
            error: payload.error.unwrap_or_default(),
        },
        "tool_approval_request" => StreamEvent::ToolApprovalRequest {
            tool_call_id,
            tool_name,
            args: payload.args,
        },
        "tool_approval_response" => StreamEvent::ToolApprovalResponse {
            tool_call_id,
            tool_name,
            approved: payload.approved.ok_or_else(|| SseParseError::InvalidPayload {
                event_type: event_type.to_string(),
                source: "missing field `approved`".to_string(),
            })?,
        },
        other => {
            return Err(SseParseError::InvalidPayload {
                event_type: other.to_string(),
                source: "not a tool event".to_string(),
            })
        }
    };
    Ok(event)
}
