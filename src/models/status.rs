//! Execution status shared by workflow requests, node executions and the
//! execution tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a workflow request or one of its node executions.
///
/// The server occasionally introduces new status strings; those are kept in
/// [`ExecutionStatus::Other`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExecutionStatus {
    Pending,
    Running,
    InProgress,
    Completed,
    Failed,
    Stopped,
    Other(String),
}

impl ExecutionStatus {
    /// Returns true once no further transitions can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Completed | ExecutionStatus::Failed | ExecutionStatus::Stopped
        )
    }

    /// Wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Running => "running",
            ExecutionStatus::InProgress => "in_progress",
            ExecutionStatus::Completed => "completed",
            ExecutionStatus::Failed => "failed",
            ExecutionStatus::Stopped => "stopped",
            ExecutionStatus::Other(s) => s,
        }
    }
}

impl From<String> for ExecutionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => ExecutionStatus::Pending,
            "running" => ExecutionStatus::Running,
            "in_progress" => ExecutionStatus::InProgress,
            "completed" => ExecutionStatus::Completed,
            "failed" => ExecutionStatus::Failed,
            "stopped" => ExecutionStatus::Stopped,
            _ => ExecutionStatus::Other(value),
        }
    }
}

impl From<&str> for ExecutionStatus {
    fn from(value: &str) -> Self {
        ExecutionStatus::from(value.to_string())
    }
}

impl From<ExecutionStatus> for String {
    fn from(status: ExecutionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(ExecutionStatus::Completed.is_terminal());
        assert!(ExecutionStatus::Failed.is_terminal());
        assert!(ExecutionStatus::Stopped.is_terminal());
        assert!(!ExecutionStatus::Pending.is_terminal());
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(!ExecutionStatus::InProgress.is_terminal());
        assert!(!ExecutionStatus::Other("queued".to_string()).is_terminal());
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: ExecutionStatus = serde_json::from_str(r#""waiting_for_approval""#).unwrap();
        assert_eq!(
            status,
            ExecutionStatus::Other("waiting_for_approval".to_string())
        );
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#""waiting_for_approval""#
        );
    }

    #[test]
    fn test_known_status_serializes_snake_case() {
        let status: ExecutionStatus = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(status, ExecutionStatus::InProgress);
        assert_eq!(status.to_string(), "in_progress");
    }
}
