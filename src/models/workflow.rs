use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{deserialize_nullable_vec, ExecutionStatus, Pagination};

/// JSON object payload as sent by the API (`input_data`, `metadata`, ...).
pub type JsonObject = Map<String, Value>;

/// A workflow execution request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowRequest {
    pub id: String,
    pub workflow_version_id: String,
    pub start_node_id: String,
    pub status: ExecutionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub billing_user_id: Option<String>,
    #[serde(default)]
    pub parent_node_execution_id: Option<String>,
    #[serde(default)]
    pub parent_workflow_request_id: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub payload: Option<JsonObject>,
    #[serde(default)]
    pub metadata: Option<JsonObject>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Execution record of a single node, as streamed by the listen endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeExecution {
    pub id: String,
    pub workflow_request_id: String,
    pub node_id: String,
    pub workflow_version_id: String,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub input_data: Option<JsonObject>,
    #[serde(default)]
    pub output_data: Option<JsonObject>,
    #[serde(default)]
    pub attempt_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
}

/// A child agent execution spawned from a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildExecution {
    pub index: u32,
    pub workflow_request_id: String,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub target_node_label: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub nodes: Vec<ExecutionNode>,
}

/// A node in the execution tree. Children hang off `child_executions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionNode {
    pub id: String,
    pub node_id: String,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub node_label: Option<String>,
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub input_data: Option<JsonObject>,
    #[serde(default)]
    pub output_data: Option<JsonObject>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attempt_count: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub child_executions: Vec<ChildExecution>,
    #[serde(default)]
    pub total_children: Option<u32>,
    #[serde(default)]
    pub has_more_children: Option<bool>,
}

impl ExecutionNode {
    /// Depth-first walk over this node and every node nested below it.
    pub fn descendants(&self) -> Vec<&ExecutionNode> {
        let mut out = vec![self];
        for child in &self.child_executions {
            for node in &child.nodes {
                out.extend(node.descendants());
            }
        }
        out
    }
}

/// Complete execution hierarchy of one workflow run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionTree {
    pub workflow_request_id: String,
    pub status: ExecutionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub nodes: Vec<ExecutionNode>,
}

impl ExecutionTree {
    /// Find the first node (at any depth) with the given label.
    pub fn find_by_label(&self, label: &str) -> Option<&ExecutionNode> {
        self.nodes
            .iter()
            .flat_map(ExecutionNode::descendants)
            .find(|n| n.node_label.as_deref() == Some(label))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionTreeResponse {
    pub execution_tree: ExecutionTree,
}

/// A specific version of a workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowVersion {
    pub id: String,
    pub workflow_id: String,
    pub version_number: u32,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workflow {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub latest_version: Option<WorkflowVersion>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// A node in a workflow graph (design-time, not execution).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: String,
    pub workflow_version_id: String,
    pub node_type: String,
    pub label: String,
    #[serde(default)]
    pub pos_x: Option<f64>,
    #[serde(default)]
    pub pos_y: Option<f64>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub extent: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub id: String,
    pub workflow_version_id: String,
    pub source: String,
    pub target: String,
    pub edge_type: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Workflow with its draft version, nodes and edges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowFull {
    pub workflow: Workflow,
    pub workflow_version: WorkflowVersion,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub nodes: Vec<Node>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowListResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub workflows: Vec<Workflow>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowVersionListResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub versions: Vec<WorkflowVersion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartNodesResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub nodes: Vec<Node>,
}

/// Paginated execution history of a workflow request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryResponse {
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub data: Vec<WorkflowRequest>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResponse {
    pub workflow_request_id: String,
}

/// File attached to a workflow run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkflowRequestFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}

impl WorkflowRequestFile {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Body of `POST /workflow-requests/run`.
///
/// # Example
///
/// ```ignore
/// let request = RunWorkflowRequest::new("ver-1", "chat-1", "node-start", "Hello")
///     .with_end_user_id("customer-42");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunWorkflowRequest {
    pub workflow_version_id: String,
    pub chat_id: String,
    pub start_node_id: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<WorkflowRequestFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_params: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_user_id: Option<String>,
}

impl RunWorkflowRequest {
    pub fn new(
        workflow_version_id: impl Into<String>,
        chat_id: impl Into<String>,
        start_node_id: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            workflow_version_id: workflow_version_id.into(),
            chat_id: chat_id.into(),
            start_node_id: start_node_id.into(),
            query: query.into(),
            files: Vec::new(),
            additional_params: None,
            end_user_id: None,
        }
    }

    pub fn with_file(mut self, file: WorkflowRequestFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_additional_params(mut self, params: JsonObject) -> Self {
        self.additional_params = Some(params);
        self
    }

    /// Run on behalf of an end user (selects per-user MCP credentials).
    pub fn with_end_user_id(mut self, end_user_id: impl Into<String>) -> Self {
        self.end_user_id = Some(end_user_id.into());
        self
    }
}
