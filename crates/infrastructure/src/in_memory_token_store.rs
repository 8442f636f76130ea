use std::collections::BTreeMap;

use async_trait::async_trait;
use maintgate_application::TokenStore;
use maintgate_core::{AppError, AppResult};
use tokio::sync::RwLock;

/// In-memory token store for tests and single-process runs.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    objects: RwLock<BTreeMap<(String, String), Vec<u8>>>,
}

impl InMemoryTokenStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn put_record(&self, bucket: &str, key: &str, body: Vec<u8>) -> AppResult<()> {
        self.objects
            .write()
            .await
            .insert((bucket.to_owned(), key.to_owned()), body);
        Ok(())
    }

    async fn list_keys(&self, bucket: &str, prefix: &str) -> AppResult<Vec<String>> {
        let objects = self.objects.read().await;
        let start = (bucket.to_owned(), prefix.to_owned());

        Ok(objects
            .range(start..)
            .take_while(|((stored_bucket, key), _)| {
                stored_bucket == bucket && key.starts_with(prefix)
            })
            .map(|((_, key), _)| key.clone())
            .collect())
    }

    async fn get_record(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
            .ok_or_else(|| {
                AppError::StorageRead(format!("key '{key}' does not exist in bucket '{bucket}'"))
            })
    }

    async fn delete_record(&self, bucket: &str, key: &str) -> AppResult<()> {
        self.objects
            .write()
            .await
            .remove(&(bucket.to_owned(), key.to_owned()));
        Ok(())
    }
}
