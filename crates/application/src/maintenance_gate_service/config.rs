use maintgate_core::{AppError, AppResult};

/// Storage location of parked tokens, fixed at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceGateConfig {
    bucket: String,
    prefix: String,
}

impl MaintenanceGateConfig {
    /// Creates a validated configuration.
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> AppResult<Self> {
        let bucket = bucket.into();
        let prefix = prefix.into();

        if bucket.trim().is_empty() {
            return Err(AppError::Validation(
                "maintenance gate bucket must not be empty".to_owned(),
            ));
        }

        if prefix.trim().is_empty() {
            return Err(AppError::Validation(
                "maintenance gate prefix must not be empty".to_owned(),
            ));
        }

        Ok(Self { bucket, prefix })
    }

    /// Returns the storage root holding parked tokens.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.bucket.as_str()
    }

    /// Returns the key prefix under which workflow namespaces are created.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }
}
