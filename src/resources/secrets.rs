//! Workflow secrets, for the builder and for end-users.

use serde::Serialize;

use crate::api::{segment, ApiTransport, Query};
use crate::error::SploxResult;
use crate::models::{
    EndUserSecretsSummary, EnvSecretRequest, FileSecretRequest, GenerateSecretsLinkResponse,
    SecretActionResponse, WorkflowSecretMetadata,
};
use crate::traits::{Headers, HttpMethod};

/// Secret operations, borrowed from [`SploxClient::secrets`](crate::SploxClient::secrets).
///
/// Every call that takes `end_user_id` acts on that end-user's secrets when
/// it is set, and on the builder's own secrets otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Secrets<'a> {
    api: &'a ApiTransport,
}

#[derive(Serialize)]
struct SecretsLinkRequest<'a> {
    end_user_id: &'a str,
}

impl<'a> Secrets<'a> {
    pub(crate) fn new(api: &'a ApiTransport) -> Self {
        Self { api }
    }

    /// Keys stored for a workflow. Values are never returned.
    pub async fn list(
        &self,
        workflow_id: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<Vec<WorkflowSecretMetadata>> {
        self.api
            .get(&secrets_path(workflow_id, ""), &end_user_query(end_user_id))
            .await
    }

    /// Create or update an environment-variable secret.
    pub async fn set_env(
        &self,
        workflow_id: &str,
        key: &str,
        value: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<SecretActionResponse> {
        let body = EnvSecretRequest {
            key,
            value,
            end_user_id,
        };
        self.api
            .post(&secrets_path(workflow_id, "/env"), &body)
            .await
    }

    /// Create or update a file secret stored at `s3_url`.
    pub async fn set_file(
        &self,
        workflow_id: &str,
        key: &str,
        s3_url: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<SecretActionResponse> {
        let body = FileSecretRequest {
            key,
            s3_url,
            end_user_id,
        };
        self.api
            .post(&secrets_path(workflow_id, "/file"), &body)
            .await
    }

    pub async fn delete(
        &self,
        workflow_id: &str,
        key: &str,
        end_user_id: Option<&str>,
    ) -> SploxResult<SecretActionResponse> {
        let path = secrets_path(workflow_id, &format!("/{}", segment(key)));
        self.api
            .send(
                HttpMethod::Delete,
                &path,
                &end_user_query(end_user_id),
                None,
                Headers::new(),
            )
            .await
    }

    /// End-user secrets of a workflow, grouped by end-user.
    pub async fn list_end_users(&self, workflow_id: &str) -> SploxResult<Vec<EndUserSecretsSummary>> {
        self.api
            .get(&secrets_path(workflow_id, "/end-users"), &[])
            .await
    }

    /// Public link where `end_user_id` can submit their secrets.
    pub async fn generate_link(
        &self,
        workflow_id: &str,
        end_user_id: &str,
    ) -> SploxResult<GenerateSecretsLinkResponse> {
        self.api
            .post(
                &secrets_path(workflow_id, "/generate-link"),
                &SecretsLinkRequest { end_user_id },
            )
            .await
    }
}

fn secrets_path(workflow_id: &str, suffix: &str) -> String {
    format!("/workflows/{}/secrets{}", segment(workflow_id), suffix)
}

fn end_user_query(end_user_id: Option<&str>) -> Query {
    end_user_id
        .map(|id| vec![("end_user_id", id.to_string())])
        .unwrap_or_default()
}
