//! Result type alias for SDK operations.

use super::splox_error::SploxError;

/// Type alias for Results using SploxError.
///
/// # Example
///
/// ```ignore
/// use splox::error::SploxResult;
///
/// async fn latest_version(client: &SploxClient, id: &str) -> SploxResult<WorkflowVersion> {
///     client.workflows().get_latest_version(id).await
/// }
/// ```
pub type SploxResult<T> = Result<T, SploxError>;
