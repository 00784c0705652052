//! Workflow operations and the run-and-wait helper.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::api::{segment, ApiTransport, Query};
use crate::error::{SploxError, SploxResult};
use crate::models::{
    ExecutionTreeResponse, HistoryResponse, RunResponse, RunWorkflowRequest, StartNodesResponse,
    WorkflowFull, WorkflowListResponse, WorkflowVersion, WorkflowVersionListResponse,
};
use crate::sse::EventStream;
use crate::traits::ByteStream;

/// Workflow operations, borrowed from [`SploxClient::workflows`](crate::SploxClient::workflows).
#[derive(Debug, Clone, Copy)]
pub struct Workflows<'a> {
    api: &'a ApiTransport,
}

impl<'a> Workflows<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    /// `GET /workflows`
    pub async fn list(
        &self,
        limit: u32,
        cursor: Option<&str>,
        search: Option<&str>,
    ) -> SploxResult<WorkflowListResponse> {
        self.api
            .get("/workflows", &page_query(limit, cursor, search))
            .await
    }

    /// `GET /workflows/{id}`: workflow with its latest version, nodes and edges.
    pub async fn get(&self, workflow_id: &str) -> SploxResult<WorkflowFull> {
        self.api
            .get(&format!("/workflows/{}", segment(workflow_id)), &[])
            .await
    }

    pub async fn get_latest_version(&self, workflow_id: &str) -> SploxResult<WorkflowVersion> {
        self.api
            .get(
                &format!("/workflows/{}/versions/latest", segment(workflow_id)),
                &[],
            )
            .await
    }

    pub async fn list_versions(&self, workflow_id: &str) -> SploxResult<WorkflowVersionListResponse> {
        self.api
            .get(&format!("/workflows/{}/versions", segment(workflow_id)), &[])
            .await
    }

    /// Start nodes of a workflow version.
    pub async fn get_start_nodes(&self, workflow_version_id: &str) -> SploxResult<StartNodesResponse> {
        self.api
            .get(
                &format!("/workflows/{}/start-nodes", segment(workflow_version_id)),
                &[],
            )
            .await
    }

    /// `POST /workflow-requests/run`
    pub async fn run(&self, request: &RunWorkflowRequest) -> SploxResult<RunResponse> {
        self.api.post("/workflow-requests/run", request).await
    }

    /// Live events of a workflow request.
    pub async fn listen(&self, workflow_request_id: &str) -> SploxResult<EventStream> {
        self.listen_body(workflow_request_id)
            .await
            .map(EventStream::new)
    }

    pub(crate) async fn listen_body(&self, workflow_request_id: &str) -> SploxResult<ByteStream> {
        self.api
            .open_body(&format!(
                "/workflow-requests/{}/listen",
                segment(workflow_request_id)
            ))
            .await
    }

    pub async fn get_execution_tree(
        &self,
        workflow_request_id: &str,
    ) -> SploxResult<ExecutionTreeResponse> {
        self.api
            .get(
                &format!(
                    "/workflow-requests/{}/execution-tree",
                    segment(workflow_request_id)
                ),
                &[],
            )
            .await
    }

    pub async fn get_history(
        &self,
        workflow_request_id: &str,
        limit: u32,
        cursor: Option<&str>,
        search: Option<&str>,
    ) -> SploxResult<HistoryResponse> {
        self.api
            .get(
                &format!("/workflow-requests/{}/history", segment(workflow_request_id)),
                &page_query(limit, cursor, search),
            )
            .await
    }

    /// Ask the server to stop a running request.
    pub async fn stop(&self, workflow_request_id: &str) -> SploxResult<()> {
        self.api
            .post_empty(&format!(
                "/workflow-requests/{}/stop",
                segment(workflow_request_id)
            ))
            .await
    }

    /// Run a workflow and wait for its execution tree.
    ///
    /// The whole wait (listening, any polling, the final tree fetch) shares one
    /// deadline of `timeout`. Hitting it yields [`SploxError::Timeout`]; the
    /// remote execution keeps running.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = RunWorkflowRequest::new("ver-1", chat.id, "start-1", "Hello");
    /// let tree = client
    ///     .workflows()
    ///     .run_and_wait(&request, Duration::from_secs(300))
    ///     .await?;
    /// println!("{}", tree.execution_tree.status);
    /// ```
    pub async fn run_and_wait(
        &self,
        request: &RunWorkflowRequest,
        timeout: Duration,
    ) -> SploxResult<ExecutionTreeResponse> {
        let deadline = Instant::now() + timeout;
        let run = self.run(request).await?;
        debug!(workflow_request_id = %run.workflow_request_id, "workflow started");
        self.wait_until(&run.workflow_request_id, deadline, timeout)
            .await
    }

    /// Wait for an existing request to reach a terminal status.
    pub async fn wait_for_completion(
        &self,
        workflow_request_id: &str,
        timeout: Duration,
    ) -> SploxResult<ExecutionTreeResponse> {
        self.wait_until(workflow_request_id, Instant::now() + timeout, timeout)
            .await
    }

    async fn wait_until(
        &self,
        workflow_request_id: &str,
        deadline: Instant,
        timeout: Duration,
    ) -> SploxResult<ExecutionTreeResponse> {
        match tokio::time::timeout_at(deadline, self.wait_for_terminal(workflow_request_id)).await
        {
            Ok(result) => result,
            Err(_) => Err(SploxError::timeout(format!(
                "workflow request {} did not complete within {:?}",
                workflow_request_id, timeout
            ))),
        }
    }

    async fn wait_for_terminal(&self, workflow_request_id: &str) -> SploxResult<ExecutionTreeResponse> {
        let mut events = self.listen(workflow_request_id).await?;
        while let Some(event) = events.next().await {
            if event?.is_terminal_for(workflow_request_id) {
                events.close();
                return self.get_execution_tree(workflow_request_id).await;
            }
        }

        warn!(
            workflow_request_id,
            "event stream ended before a terminal status, polling the execution tree"
        );
        let poll_interval = self.api.config().poll_interval;
        loop {
            let tree = self.get_execution_tree(workflow_request_id).await?;
            if tree.execution_tree.status.is_terminal() {
                return Ok(tree);
            }
            debug!(
                workflow_request_id,
                status = %tree.execution_tree.status,
                "execution tree not terminal yet"
            );
            tokio::time::sleep(poll_interval).await;
        }
    }
}

fn page_query(limit: u32, cursor: Option<&str>, search: Option<&str>) -> Query {
    let mut query: Query = vec![("limit", limit.to_string())];
    if let Some(cursor) = cursor {
        query.push(("cursor", cursor.to_string()));
    }
    if let Some(search) = search {
        query.push(("search", search.to_string()));
    }
    query
}
