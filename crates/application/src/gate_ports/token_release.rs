use async_trait::async_trait;
use maintgate_core::AppResult;
use maintgate_domain::{ContinuationToken, ReleasePayload};

/// Port signalling the workflow engine that a suspended step may resume.
#[async_trait]
pub trait TokenReleasePort: Send + Sync {
    /// Marks the continuation identified by `token` as succeeded.
    ///
    /// Fails with `AppError::Release` when the engine rejects the token or is
    /// unreachable.
    async fn release_token(
        &self,
        token: &ContinuationToken,
        payload: ReleasePayload,
    ) -> AppResult<()>;
}
