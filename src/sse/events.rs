//! SSE event types and definitions
//!
//! Contains the [`StreamEvent`] enum with every event the workflow and chat
//! listen endpoints emit, plus the line classification used by the parser.

use serde_json::Value;

use crate::models::{NodeExecution, WorkflowRequest};

/// A typed event from a listen stream.
///
/// Exactly one variant per received frame. Types the SDK does not know are
/// kept in [`StreamEvent::Unrecognized`] rather than dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Streamed assistant text chunk
    TextDelta { delta: String },
    /// Streamed model reasoning
    ReasoningDelta {
        delta: String,
        reasoning_type: Option<String>,
    },
    /// The model started emitting a tool call
    ToolCallStart {
        tool_call_id: String,
        tool_name: String,
    },
    /// Partial tool call arguments
    ToolCallDelta {
        tool_call_id: String,
        args_delta: String,
    },
    /// Tool execution started
    ToolStart {
        tool_call_id: String,
        tool_name: String,
    },
    ToolComplete {
        tool_call_id: String,
        tool_name: String,
        result: Option<Value>,
    },
    ToolError {
        tool_call_id: String,
        tool_name: String,
        error: String,
    },
    /// A tool call waits for a human decision
    ToolApprovalRequest {
        tool_call_id: String,
        tool_name: String,
        args: Option<Value>,
    },
    ToolApprovalResponse {
        tool_call_id: String,
        tool_name: String,
        approved: bool,
    },
    /// Transcript of a user turn (voice input)
    UserMessage { text: String },
    /// An agent iteration finished
    Done {
        iteration: Option<u32>,
        run_id: Option<String>,
    },
    /// The user stopped the run
    Stopped,
    Error {
        error: Option<String>,
        message: Option<String>,
    },
    WorkflowStatus { is_active: bool },
    /// Status update for the workflow request and/or one node execution
    WorkflowUpdate {
        workflow_request: Option<WorkflowRequest>,
        node_execution: Option<NodeExecution>,
    },
    /// `data: keepalive` heartbeat
    Keepalive,
    /// Any other event type, with its raw JSON payload
    Unrecognized { event_type: String, payload: Value },
}

impl StreamEvent {
    /// The wire type string of this event.
    ///
    /// `WorkflowUpdate` has no type on the wire and reports `""`.
    pub fn event_type(&self) -> &str {
        match self {
            StreamEvent::TextDelta { .. } => "text_delta",
            StreamEvent::ReasoningDelta { .. } => "reasoning_delta",
            StreamEvent::ToolCallStart { .. } => "tool_call_start",
            StreamEvent::ToolCallDelta { .. } => "tool_call_delta",
            StreamEvent::ToolStart { .. } => "tool_start",
            StreamEvent::ToolComplete { .. } => "tool_complete",
            StreamEvent::ToolError { .. } => "tool_error",
            StreamEvent::ToolApprovalRequest { .. } => "tool_approval_request",
            StreamEvent::ToolApprovalResponse { .. } => "tool_approval_response",
            StreamEvent::UserMessage { .. } => "user_message",
            StreamEvent::Done { .. } => "done",
            StreamEvent::Stopped => "stopped",
            StreamEvent::Error { .. } => "error",
            StreamEvent::WorkflowStatus { .. } => "workflow_status",
            StreamEvent::WorkflowUpdate { .. } => "",
            StreamEvent::Keepalive => "keepalive",
            StreamEvent::Unrecognized { event_type, .. } => event_type,
        }
    }

    /// The workflow request carried by a status update, if any.
    pub fn workflow_request(&self) -> Option<&WorkflowRequest> {
        match self {
            StreamEvent::WorkflowUpdate {
                workflow_request, ..
            } => workflow_request.as_ref(),
            _ => None,
        }
    }

    pub fn node_execution(&self) -> Option<&NodeExecution> {
        match self {
            StreamEvent::WorkflowUpdate { node_execution, .. } => node_execution.as_ref(),
            _ => None,
        }
    }

    /// `done`, `stopped`, or a workflow update whose request reached a
    /// terminal status.
    ///
    /// The stream itself keeps going after such an event; ending consumption
    /// is up to the caller.
    pub fn is_terminal(&self) -> bool {
        match self {
            StreamEvent::Done { .. } | StreamEvent::Stopped => true,
            _ => self
                .workflow_request()
                .is_some_and(|wr| wr.status.is_terminal()),
        }
    }

    /// Like [`is_terminal`](Self::is_terminal) but only counts status updates
    /// for the given workflow request, not for child requests sharing the
    /// stream.
    pub fn is_terminal_for(&self, workflow_request_id: &str) -> bool {
        match self {
            StreamEvent::Stopped => true,
            _ => self
                .workflow_request()
                .is_some_and(|wr| wr.id == workflow_request_id && wr.status.is_terminal()),
        }
    }

    pub fn is_keepalive(&self) -> bool {
        matches!(self, StreamEvent::Keepalive)
    }
}

/// Represents a single parsed SSE line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// `event: <type>`
    Event(String),
    /// `data: <payload>`
    Data(String),
    /// Empty line, ends the current frame
    Empty,
    /// `:` comment or an unknown field
    Comment(String),
}

/// Why a frame could not be turned into an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseParseError {
    /// Data is neither `keepalive` nor valid JSON
    InvalidJson { source: String },
    /// JSON is valid but does not fit the event type
    InvalidPayload { event_type: String, source: String },
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { source } => write!(f, "Invalid JSON: {}", source),
            SseParseError::InvalidPayload { event_type, source } => {
                write!(f, "Invalid payload for event '{}': {}", event_type, source)
            }
        }
    }
}

impl std::error::Error for SseParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionStatus;
    use chrono::Utc;

    fn update(id: &str, status: ExecutionStatus) -> StreamEvent {
        StreamEvent::WorkflowUpdate {
            workflow_request: Some(WorkflowRequest {
                id: id.to_string(),
                workflow_version_id: "ver-1".to_string(),
                start_node_id: "node-1".to_string(),
                status,
                created_at: Utc::now(),
                user_id: None,
                billing_user_id: None,
                parent_node_execution_id: None,
                parent_workflow_request_id: None,
                chat_id: None,
                payload: None,
                metadata: None,
                started_at: None,
                completed_at: None,
            }),
            node_execution: None,
        }
    }

    #[test]
    fn test_event_type_strings() {
        assert_eq!(
            StreamEvent::TextDelta {
                delta: "x".to_string()
            }
            .event_type(),
            "text_delta"
        );
        assert_eq!(StreamEvent::Keepalive.event_type(), "keepalive");
        assert_eq!(
            StreamEvent::Unrecognized {
                event_type: "future_event".to_string(),
                payload: Value::Null
            }
            .event_type(),
            "future_event"
        );
    }

    #[test]
    fn test_is_terminal() {
        assert!(StreamEvent::Stopped.is_terminal());
        assert!(StreamEvent::Done {
            iteration: Some(1),
            run_id: None
        }
        .is_terminal());
        assert!(update("req-1", ExecutionStatus::Completed).is_terminal());
        assert!(update("req-1", ExecutionStatus::Failed).is_terminal());
        assert!(!update("req-1", ExecutionStatus::Running).is_terminal());
        assert!(!StreamEvent::Keepalive.is_terminal());
    }

    #[test]
    fn test_is_terminal_for_ignores_child_requests() {
        let child = update("req-child", ExecutionStatus::Completed);
        assert!(child.is_terminal());
        assert!(!child.is_terminal_for("req-1"));
        assert!(update("req-1", ExecutionStatus::Stopped).is_terminal_for("req-1"));
    }
}
