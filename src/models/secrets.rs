use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_nullable_vec;

/// Metadata of a stored workflow secret. Values are never returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowSecretMetadata {
    pub key: String,
    /// `env` or `file`.
    #[serde(rename = "type", default)]
    pub secret_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub end_user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Acknowledgement for a secret write or delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// Secrets one end-user has submitted for a workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndUserSecretsSummary {
    pub end_user_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub secrets: Vec<WorkflowSecretMetadata>,
}

/// Public link an end-user opens to submit their secrets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateSecretsLinkResponse {
    pub link: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Body of `POST /workflows/{id}/secrets/env`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct EnvSecretRequest<'a> {
    pub key: &'a str,
    pub value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_user_id: Option<&'a str>,
}

/// Body of `POST /workflows/{id}/secrets/file`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct FileSecretRequest<'a> {
    pub key: &'a str,
    pub s3_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_user_id: Option<&'a str>,
}
