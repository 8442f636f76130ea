use std::collections::BTreeMap;

use async_trait::async_trait;
use maintgate_application::WorkflowMetadataLookup;
use maintgate_core::{AppError, AppResult};
use maintgate_domain::{WorkflowDescriptor, WorkflowId};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::orchestrator_api::{OrchestratorApi, error_body};

#[derive(Debug, Deserialize)]
struct DescribeWorkflowResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ListWorkflowTagsResponse {
    #[serde(default)]
    tags: Vec<WorkflowTagResponse>,
}

#[derive(Debug, Deserialize)]
struct WorkflowTagResponse {
    key: String,
    value: String,
}

/// Workflow metadata lookup backed by the orchestrator HTTP API.
///
/// Issues `GET workflows/{id}` for the name and `GET workflows/{id}/tags`
/// for the tag list, then merges both into one descriptor.
pub struct HttpWorkflowMetadataLookup {
    api: OrchestratorApi,
}

impl HttpWorkflowMetadataLookup {
    /// Creates a lookup adapter.
    #[must_use]
    pub fn new(api: OrchestratorApi) -> Self {
        Self { api }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        workflow_id: &WorkflowId,
        segments: &[&str],
    ) -> AppResult<T> {
        let url = self.api.endpoint(segments);
        let response = self.api.get(url).send().await.map_err(|error| {
            AppError::MetadataLookup(format!(
                "failed to call orchestrator for workflow '{workflow_id}': {error}"
            ))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::MetadataLookup(format!(
                "workflow '{workflow_id}' does not exist"
            )));
        }

        if !status.is_success() {
            let body = error_body(response).await;
            return Err(AppError::MetadataLookup(format!(
                "orchestrator returned status {} for workflow '{workflow_id}': {body}",
                status.as_u16()
            )));
        }

        response.json::<T>().await.map_err(|error| {
            AppError::MetadataLookup(format!(
                "failed to parse orchestrator response for workflow '{workflow_id}': {error}"
            ))
        })
    }
}

#[async_trait]
impl WorkflowMetadataLookup for HttpWorkflowMetadataLookup {
    async fn describe_workflow(&self, workflow_id: &WorkflowId) -> AppResult<WorkflowDescriptor> {
        let described: DescribeWorkflowResponse = self
            .fetch(workflow_id, &["workflows", workflow_id.as_str()])
            .await?;
        let tagged: ListWorkflowTagsResponse = self
            .fetch(workflow_id, &["workflows", workflow_id.as_str(), "tags"])
            .await?;

        let tags: BTreeMap<String, String> = tagged
            .tags
            .into_iter()
            .map(|tag| (tag.key, tag.value))
            .collect();

        WorkflowDescriptor::new(described.name, tags).map_err(|error| {
            AppError::MetadataLookup(format!(
                "orchestrator returned an unusable name for workflow '{workflow_id}': {error}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use maintgate_application::WorkflowMetadataLookup;
    use maintgate_core::AppError;
    use maintgate_domain::WorkflowId;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::HttpWorkflowMetadataLookup;
    use crate::OrchestratorApi;

    fn lookup(server: &MockServer) -> HttpWorkflowMetadataLookup {
        let api = OrchestratorApi::new(
            reqwest::Client::new(),
            format!("{}/api/internal", server.uri()).as_str(),
            Some("gate-secret".to_owned()),
        )
        .unwrap_or_else(|_| unreachable!());
        HttpWorkflowMetadataLookup::new(api)
    }

    fn workflow_id() -> WorkflowId {
        WorkflowId::new("wf-id").unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn describe_merges_name_and_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/internal/workflows/wf-id"))
            .and(header("authorization", "Bearer gate-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "wf1",
                "status": "ACTIVE"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/internal/workflows/wf-id/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tags": [
                    {"key": "Maintenance", "value": "True"},
                    {"key": "Owner", "value": "payments"}
                ]
            })))
            .mount(&server)
            .await;

        let descriptor = lookup(&server).describe_workflow(&workflow_id()).await;

        assert!(descriptor.is_ok());
        let descriptor = descriptor.unwrap_or_else(|_| unreachable!());
        assert_eq!(descriptor.name(), "wf1");
        assert_eq!(descriptor.tag("Owner"), Some("payments"));
        assert!(descriptor.maintenance_flag());
    }

    #[tokio::test]
    async fn missing_tag_list_means_no_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/internal/workflows/wf-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "wf1"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/internal/workflows/wf-id/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let descriptor = lookup(&server).describe_workflow(&workflow_id()).await;

        assert!(descriptor.is_ok_and(|descriptor| {
            descriptor.tags().is_empty() && !descriptor.maintenance_flag()
        }));
    }

    #[tokio::test]
    async fn unknown_workflow_is_a_lookup_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/internal/workflows/wf-id"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let descriptor = lookup(&server).describe_workflow(&workflow_id()).await;

        assert!(matches!(descriptor, Err(AppError::MetadataLookup(_))));
    }

    #[tokio::test]
    async fn server_error_is_a_lookup_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/internal/workflows/wf-id"))
            .respond_with(ResponseTemplate::new(503).set_body_string("throttled"))
            .mount(&server)
            .await;

        let descriptor = lookup(&server).describe_workflow(&workflow_id()).await;

        let Err(AppError::MetadataLookup(message)) = descriptor else {
            panic!("expected metadata lookup error");
        };
        assert!(message.contains("503"));
        assert!(message.contains("throttled"));
    }
}
