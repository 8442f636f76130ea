use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use maintgate_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Tag key that carries the maintenance flag on a workflow definition.
pub const MAINTENANCE_TAG_KEY: &str = "Maintenance";

/// Opaque identifier naming one workflow in the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(NonEmptyString);

impl WorkflowId {
    /// Creates a validated workflow identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for WorkflowId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Read-only workflow metadata resolved from the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDescriptor {
    name: NonEmptyString,
    tags: BTreeMap<String, String>,
}

impl WorkflowDescriptor {
    /// Creates a descriptor from a workflow name and its tags.
    pub fn new(name: impl Into<String>, tags: BTreeMap<String, String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            tags,
        })
    }

    /// Returns the human-readable workflow name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns all workflow tags.
    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Returns one tag value by exact key.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// True when the `Maintenance` tag is set to `true`, ignoring case.
    ///
    /// An absent tag and every other value, including `" true"`, mean the
    /// workflow is not under maintenance.
    #[must_use]
    pub fn maintenance_flag(&self) -> bool {
        self.tag(MAINTENANCE_TAG_KEY)
            .unwrap_or("false")
            .to_lowercase()
            == "true"
    }
}
