//! Redis-backed durable token store.

use std::collections::BTreeSet;

use async_trait::async_trait;
use maintgate_application::TokenStore;
use maintgate_core::{AppError, AppResult};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

const SCAN_BATCH_SIZE: usize = 250;

/// Redis implementation of the token store port.
///
/// Objects live under `{key_prefix}:{bucket}:{key}`.
#[derive(Clone)]
pub struct RedisTokenStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisTokenStore {
    /// Creates a store adapter with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn key_for(&self, bucket: &str, key: &str) -> String {
        format!("{}:{bucket}:{key}", self.key_prefix)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }
}

/// Escapes Redis glob metacharacters so the value matches literally.
fn escape_glob(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        if matches!(character, '*' | '?' | '[' | ']' | '\\' | '^') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn put_record(&self, bucket: &str, key: &str, body: Vec<u8>) -> AppResult<()> {
        let mut connection = self.connection().await.map_err(|error| {
            AppError::StorageWrite(format!("failed to connect to redis: {error}"))
        })?;

        connection
            .set::<_, _, ()>(self.key_for(bucket, key), body)
            .await
            .map_err(|error| {
                AppError::StorageWrite(format!("failed to store parked token '{key}': {error}"))
            })
    }

    async fn list_keys(&self, bucket: &str, prefix: &str) -> AppResult<Vec<String>> {
        let mut connection = self.connection().await.map_err(|error| {
            AppError::StorageList(format!("failed to connect to redis: {error}"))
        })?;

        let bucket_root = self.key_for(bucket, "");
        let pattern = format!("{}*", escape_glob(self.key_for(bucket, prefix).as_str()));
        let mut cursor = 0_u64;
        // SCAN may return one key more than once.
        let mut keys = BTreeSet::new();

        loop {
            let (next_cursor, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern.as_str())
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut connection)
                .await
                .map_err(|error| {
                    AppError::StorageList(format!(
                        "failed to list parked tokens under '{prefix}': {error}"
                    ))
                })?;

            keys.extend(
                batch
                    .iter()
                    .filter_map(|redis_key| redis_key.strip_prefix(bucket_root.as_str()))
                    .map(str::to_owned),
            );

            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }

        Ok(keys.into_iter().collect())
    }

    async fn get_record(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>> {
        let mut connection = self.connection().await.map_err(|error| {
            AppError::StorageRead(format!("failed to connect to redis: {error}"))
        })?;

        let body: Option<Vec<u8>> = connection
            .get(self.key_for(bucket, key))
            .await
            .map_err(|error| {
                AppError::StorageRead(format!("failed to read parked token '{key}': {error}"))
            })?;

        body.ok_or_else(|| AppError::StorageRead(format!("parked token '{key}' does not exist")))
    }

    async fn delete_record(&self, bucket: &str, key: &str) -> AppResult<()> {
        let mut connection = self.connection().await.map_err(|error| {
            AppError::StorageDelete(format!("failed to connect to redis: {error}"))
        })?;

        connection
            .del::<_, i64>(self.key_for(bucket, key))
            .await
            .map_err(|error| {
                AppError::StorageDelete(format!("failed to delete parked token '{key}': {error}"))
            })?;

        Ok(())
    }
}
