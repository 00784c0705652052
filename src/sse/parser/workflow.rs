//! Lifecycle and workflow status event parsers

use serde_json::Value;

use super::decode_payload;
use crate::sse::events::{SseParseError, StreamEvent};
use crate::sse::payloads::{DonePayload, ErrorPayload, WorkflowStatusPayload, WorkflowUpdatePayload};

pub(super) fn parse_done_event(event_type: &str, data: Value) -> Result<StreamEvent, SseParseError> {
    let payload: DonePayload = decode_payload(event_type, data)?;
    Ok(StreamEvent::Done {
        iteration: payload.iteration,
        run_id: payload.run_id,
    })
}

pub(super) fn parse_error_event(event_type: &str, data: Value) -> Result<StreamEvent, SseParseError> {
    let payload: ErrorPayload = decode_payload(event_type, data)?;
    Ok(StreamEvent::Error {
        error: payload.error,
        message: payload.message,
    })
}

pub(super) fn parse_workflow_status_event(
    event_type: &str,
    data: Value,
) -> Result<StreamEvent, SseParseError> {
    let payload: WorkflowStatusPayload = decode_payload(event_type, data)?;
    Ok(StreamEvent::WorkflowStatus {
        is_active: payload.is_active,
    })
}

/// Untyped frame carrying `workflow_request` and/or `node_execution`.
pub(super) fn parse_workflow_update_event(data: Value) -> Result<StreamEvent, SseParseError> {
    let payload: WorkflowUpdatePayload = decode_payload("workflow_update", data)?;
    Ok(StreamEvent::WorkflowUpdate {
        workflow_request: payload.workflow_request,
        node_execution: payload.node_execution,
    })
}
