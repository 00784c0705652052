//! Text, reasoning and transcript event parsers

use serde_json::Value;

use super::decode_payload;
use crate::sse::events::{SseParseError, StreamEvent};
use crate::sse::payloads::{ReasoningDeltaPayload, TextDeltaPayload, UserMessagePayload};

pub(super) fn parse_text_delta_event(event_type: &str, data: Value) -> Result<StreamEvent, SseParseError> {
    let payload: TextDeltaPayload = decode_payload(event_type, data)?;
    Ok(StreamEvent::TextDelta {
        delta: payload.delta,
    })
}

pub(super) fn parse_reasoning_delta_event(
    event_type: &str,
    data: Value,
) -> Result<StreamEvent, SseParseError> {
    let payload: ReasoningDeltaPayload = decode_payload(event_type, data)?;
    Ok(StreamEvent::ReasoningDelta {
        delta: payload.reasoning_delta,
        reasoning_type: payload.reasoning_type,
    })
}

pub(super) fn parse_user_message_event(
    event_type: &str,
    data: Value,
) -> Result<StreamEvent, SseParseError> {
    let payload: UserMessagePayload = decode_payload(event_type, data)?;
    Ok(StreamEvent::UserMessage { text: payload.text })
}
