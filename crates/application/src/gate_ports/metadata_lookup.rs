use async_trait::async_trait;
use maintgate_core::AppResult;
use maintgate_domain::{WorkflowDescriptor, WorkflowId};

/// Port resolving workflow identifiers to their name and tags.
#[async_trait]
pub trait WorkflowMetadataLookup: Send + Sync {
    /// Returns the workflow name merged with its full tag set.
    ///
    /// Fails with `AppError::MetadataLookup` when the workflow cannot be resolved.
    async fn describe_workflow(&self, workflow_id: &WorkflowId) -> AppResult<WorkflowDescriptor>;
}
