//! PostgreSQL-backed token store using the `parked_task_tokens` table.

use async_trait::async_trait;
use maintgate_application::TokenStore;
use maintgate_core::{AppError, AppResult};
use sqlx::PgPool;


/// PostgreSQL implementation of the token store port.
#[derive(Clone)]
pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PostgresTokenStore {
    async fn put_record(&self, bucket: &str, key: &str, body: Vec<u8>) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO parked_task_tokens (bucket, object_key, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (bucket, object_key) DO UPDATE
            SET body = EXCLUDED.body, created_at = now()
            "#,
        )
        .bind(bucket)
        .bind(key)
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::StorageWrite(format!("failed to store parked token '{key}': {error}"))
        })?;

        Ok(())
    }

    async fn list_keys(&self, bucket: &str, prefix: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT object_key
            FROM parked_task_tokens
            WHERE bucket = $1 AND starts_with(object_key, $2)
            "#,
        )
        .bind(bucket)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::StorageList(format!(
                "failed to list parked tokens under '{prefix}': {error}"
            ))
        })
    }

    async fn get_record(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>> {
        sqlx::query_scalar::<_, Vec<u8>>(
            r#"
            SELECT body
            FROM parked_task_tokens
            WHERE bucket = $1 AND object_key = $2
            "#,
        )
        .bind(bucket)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::StorageRead(format!("failed to read parked token '{key}': {error}"))
        })?
        .ok_or_else(|| AppError::StorageRead(format!("parked token '{key}' does not exist")))
    }

    async fn delete_record(&self, bucket: &str, key: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM parked_task_tokens
            WHERE bucket = $1 AND object_key = $2
            "#,
        )
        .bind(bucket)
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::StorageDelete(format!("failed to delete parked token '{key}': {error}"))
        })?;

        Ok(())
    }
}
