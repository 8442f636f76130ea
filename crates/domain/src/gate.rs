use maintgate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::task_token::ContinuationToken;
use crate::workflow_descriptor::WorkflowId;

/// One validated gate invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateInvocation {
    task_token: ContinuationToken,
    workflow_id: WorkflowId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GateInvocationPayload {
    task_token: Option<String>,
    workflow_id: Option<String>,
    state_machine_arn: Option<String>,
}

impl GateInvocation {
    /// Creates an invocation from already extracted fields.
    pub fn new(task_token: impl Into<String>, workflow_id: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            task_token: ContinuationToken::new(task_token)?,
            workflow_id: WorkflowId::new(workflow_id).map_err(|_| {
                AppError::Validation("workflowId must not be empty".to_owned())
            })?,
        })
    }

    /// Decodes a raw host event.
    ///
    /// The workflow identifier is read from `workflowId`, falling back to
    /// `stateMachineArn`.
    pub fn from_event(event: Value) -> AppResult<Self> {
        let payload = serde_json::from_value::<GateInvocationPayload>(event).map_err(|error| {
            AppError::Validation(format!("invalid gate invocation payload: {error}"))
        })?;

        let task_token = payload.task_token.ok_or_else(|| {
            AppError::Validation("taskToken is missing from the input payload".to_owned())
        })?;
        // A blank workflowId counts as absent so a usable ARN still applies.
        let workflow_id = payload
            .workflow_id
            .filter(|value| !value.trim().is_empty())
            .or(payload.state_machine_arn)
            .ok_or_else(|| {
                AppError::Validation(
                    "workflowId (or stateMachineArn) is missing from the input payload".to_owned(),
                )
            })?;

        Self::new(task_token, workflow_id)
    }

    /// Returns the incoming continuation token.
    #[must_use]
    pub fn task_token(&self) -> &ContinuationToken {
        &self.task_token
    }

    /// Returns the workflow the token belongs to.
    #[must_use]
    pub fn workflow_id(&self) -> &WorkflowId {
        &self.workflow_id
    }
}

/// Result returned to the invoking host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GateOutcome {
    /// The incoming token was parked.
    Maintenance {
        /// Storage key of the parked record.
        saved_token_key: String,
    },
    /// Parked tokens were swept and the incoming token was released.
    Proceeding {
        /// Number of parked tokens resumed during this invocation.
        resumed_tokens: u32,
    },
}

impl GateOutcome {
    /// Returns the stable status value.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Maintenance { .. } => "maintenance",
            Self::Proceeding { .. } => "proceeding",
        }
    }
}

/// Result payload handed to the workflow engine when a token is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReleasePayload {
    /// A previously parked token is being resumed.
    Resumed,
    /// The invocation's own token continues immediately.
    Proceeding,
}

impl ReleasePayload {
    /// Renders the payload as the JSON document sent to the engine.
    pub fn to_json_string(self) -> AppResult<String> {
        serde_json::to_string(&self).map_err(|error| {
            AppError::Internal(format!("failed to encode release payload: {error}"))
        })
    }
}
