use maintgate_core::{AppResult, NonEmptyString};
use uuid::Uuid;

const PARKED_TOKEN_KEY_SUFFIX: &str = ".json";

/// Key space holding the parked tokens of one workflow.
///
/// Keys follow `{prefix}/{workflow_name}/{id}.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNamespace {
    root: String,
}

impl TokenNamespace {
    /// Creates the namespace for one workflow under the configured prefix.
    ///
    /// A single trailing `/` on the prefix is dropped so `maint` and `maint/`
    /// address the same keys.
    pub fn new(prefix: &str, workflow_name: &str) -> AppResult<Self> {
        let workflow_name = NonEmptyString::new(workflow_name)?;
        let prefix = prefix.strip_suffix('/').unwrap_or(prefix);

        Ok(Self {
            root: format!("{prefix}/{}", workflow_name.as_str()),
        })
    }

    /// Returns `{prefix}/{workflow_name}` without a trailing separator.
    #[must_use]
    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    /// Returns the listing prefix, terminated by `/` so that `wf1` never
    /// matches keys of `wf10`.
    #[must_use]
    pub fn list_prefix(&self) -> String {
        format!("{}/", self.root)
    }

    /// Composes the storage key for one parked token.
    #[must_use]
    pub fn key_for(&self, record_id: Uuid) -> String {
        format!("{}/{record_id}{PARKED_TOKEN_KEY_SUFFIX}", self.root)
    }

    /// Generates a fresh storage key for a newly parked token.
    #[must_use]
    pub fn new_key(&self) -> String {
        self.key_for(Uuid::new_v4())
    }
}
