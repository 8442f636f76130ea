use chrono::{DateTime, NaiveDateTime, Utc};
use maintgate_core::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque continuation handle issued by the workflow engine.
///
/// The value is never trimmed or normalized so it can be handed back to the
/// engine exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Creates a continuation token, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::Validation("taskToken must not be empty".to_owned()));
        }

        Ok(Self(value))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ContinuationToken {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContinuationToken> for String {
    fn from(value: ContinuationToken) -> Self {
        value.0
    }
}

/// Durable body of one parked continuation token.
///
/// Only `taskToken` is required when decoding. A missing or unparsable
/// `timestamp` decodes as `None` so the token can still be released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkedTokenRecord {
    task_token: ContinuationToken,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    timestamp: Option<DateTime<Utc>>,
}

/// Accepts RFC 3339 stamps and offset-less ISO-8601 stamps, read as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|timestamp| timestamp.and_utc())
        })
}

fn deserialize_lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_timestamp))
}

impl ParkedTokenRecord {
    /// Creates a record for a token parked at the given instant.
    #[must_use]
    pub fn new(task_token: ContinuationToken, parked_at: DateTime<Utc>) -> Self {
        Self {
            task_token,
            timestamp: Some(parked_at),
        }
    }

    /// Decodes a stored record body.
    pub fn from_slice(bytes: &[u8]) -> AppResult<Self> {
        serde_json::from_slice(bytes).map_err(|error| {
            AppError::StorageRead(format!("invalid parked token record body: {error}"))
        })
    }

    /// Encodes the record body for storage.
    pub fn to_vec(&self) -> AppResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|error| {
            AppError::Internal(format!("failed to encode parked token record: {error}"))
        })
    }

    /// Returns the parked continuation token.
    #[must_use]
    pub fn task_token(&self) -> &ContinuationToken {
        &self.task_token
    }

    /// Returns when the token was parked, if the stored stamp was readable.
    #[must_use]
    pub fn parked_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}
