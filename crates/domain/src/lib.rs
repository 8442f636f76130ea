//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod gate;
mod task_token;
mod token_namespace;
mod workflow_descriptor;

pub use gate::{GateInvocation, GateOutcome, ReleasePayload};
pub use task_token::{ContinuationToken, ParkedTokenRecord};
pub use token_namespace::TokenNamespace;
pub use workflow_descriptor::{MAINTENANCE_TAG_KEY, WorkflowDescriptor, WorkflowId};
