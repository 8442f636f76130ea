//! Shared primitives for all Rust crates in the maintenance gate.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across maintenance gate crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
///
/// Storage failures are split per operation because the gate treats each of
/// them differently: a failed write aborts parking, a failed listing degrades
/// to an empty sweep, and failed reads or deletes only skip one record.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input, missing configuration, or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Workflow name or tags could not be resolved.
    #[error("metadata lookup error: {0}")]
    MetadataLookup(String),

    /// Durable token store rejected a write.
    #[error("storage write error: {0}")]
    StorageWrite(String),

    /// Durable token store could not enumerate a prefix.
    #[error("storage list error: {0}")]
    StorageList(String),

    /// Durable token store could not return a record.
    #[error("storage read error: {0}")]
    StorageRead(String),

    /// Durable token store could not remove a record.
    #[error("storage delete error: {0}")]
    StorageDelete(String),

    /// Workflow engine refused to resume a continuation token.
    #[error("release error: {0}")]
    Release(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
