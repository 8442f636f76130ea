use async_trait::async_trait;
use maintgate_application::TokenReleasePort;
use maintgate_core::{AppError, AppResult};
use maintgate_domain::{ContinuationToken, ReleasePayload};
use serde::Serialize;
use tracing::debug;

use crate::orchestrator_api::{OrchestratorApi, error_body};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendTaskSuccessRequest<'a> {
    task_token: &'a str,
    output: String,
}

/// Token release port backed by the orchestrator HTTP API.
///
/// Each release is a single `POST task-tokens/success` call without retry.
pub struct HttpTokenReleasePort {
    api: OrchestratorApi,
}

impl HttpTokenReleasePort {
    /// Creates a release adapter.
    #[must_use]
    pub fn new(api: OrchestratorApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TokenReleasePort for HttpTokenReleasePort {
    async fn release_token(
        &self,
        token: &ContinuationToken,
        payload: ReleasePayload,
    ) -> AppResult<()> {
        let request = SendTaskSuccessRequest {
            task_token: token.as_str(),
            output: payload.to_json_string()?,
        };
        let url = self.api.endpoint(&["task-tokens", "success"]);

        let response = self
            .api
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|error| {
                AppError::Release(format!("failed to call orchestrator release endpoint: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(AppError::Release(format!(
                "orchestrator release endpoint returned status {}: {body}",
                status.as_u16()
            )));
        }

        debug!(output = %request.output, "released task token");
        Ok(())
    }
}
