use std::sync::Arc;

use maintgate_core::AppResult;
use maintgate_domain::{GateInvocation, GateOutcome, TokenNamespace};
use serde_json::Value;
use tracing::debug;

use crate::gate_ports::{TokenReleasePort, TokenStore, WorkflowMetadataLookup};

mod config;
mod park;
mod sweep;


pub use config::MaintenanceGateConfig;

/// Decides whether an incoming continuation token is parked or released.
///
/// Each invocation is independent. The only state lives in the token store,
/// so concurrent invocations for the same workflow may both sweep the same
/// record; the engine is expected to reject the second release.
#[derive(Clone)]
pub struct MaintenanceGateService {
    config: Arc<MaintenanceGateConfig>,
    token_store: Arc<dyn TokenStore>,
    metadata_lookup: Arc<dyn WorkflowMetadataLookup>,
    release_port: Arc<dyn TokenReleasePort>,
}

impl MaintenanceGateService {
    /// Creates a maintenance gate service.
    #[must_use]
    pub fn new(
        config: Arc<MaintenanceGateConfig>,
        token_store: Arc<dyn TokenStore>,
        metadata_lookup: Arc<dyn WorkflowMetadataLookup>,
        release_port: Arc<dyn TokenReleasePort>,
    ) -> Self {
        Self {
            config,
            token_store,
            metadata_lookup,
            release_port,
        }
    }

    /// Decodes a raw host event and handles it.
    ///
    /// Malformed events fail with `AppError::Validation` before any
    /// collaborator is called.
    pub async fn handle_event(&self, event: Value) -> AppResult<GateOutcome> {
        let invocation = GateInvocation::from_event(event)?;
        self.handle(invocation).await
    }

    /// Parks the incoming token while the workflow is under maintenance,
    /// otherwise releases every parked token of the workflow and then the
    /// incoming one.
    pub async fn handle(&self, invocation: GateInvocation) -> AppResult<GateOutcome> {
        let descriptor = self
            .metadata_lookup
            .describe_workflow(invocation.workflow_id())
            .await?;
        let namespace = TokenNamespace::new(self.config.prefix(), descriptor.name())?;
        let maintenance = descriptor.maintenance_flag();

        debug!(
            workflow_id = %invocation.workflow_id(),
            workflow_name = %descriptor.name(),
            maintenance,
            "resolved workflow maintenance flag"
        );

        if maintenance {
            self.park_token(&namespace, invocation.task_token()).await
        } else {
            self.sweep_and_proceed(&namespace, invocation.task_token()).await
        }
    }
}
