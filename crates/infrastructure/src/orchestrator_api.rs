use maintgate_core::{AppError, AppResult};
use reqwest::{RequestBuilder, Url, header};

/// Connection settings for the orchestrator's internal HTTP API.
#[derive(Debug, Clone)]
pub struct OrchestratorApi {
    http_client: reqwest::Client,
    base_url: Url,
    shared_secret: Option<String>,
}

impl OrchestratorApi {
    /// Creates API settings from a base URL and an optional bearer secret.
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        shared_secret: Option<String>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid orchestrator API base url '{base_url}': {error}"))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "orchestrator API base url '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            shared_secret: shared_secret.filter(|secret| !secret.trim().is_empty()),
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.authorize(self.http_client.get(url))
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.authorize(self.http_client.post(url))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.shared_secret {
            Some(secret) => builder.header(header::AUTHORIZATION, format!("Bearer {secret}")),
            None => builder,
        }
    }
}

/// Reads a response body for error messages without failing.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_owned())
}
