use async_trait::async_trait;
use maintgate_core::AppResult;

/// Durable, prefix-listable store for parked token records.
///
/// `bucket` names the storage root and `key` the object inside it, matching
/// object-storage semantics.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Writes one record body, overwriting an existing key.
    ///
    /// Fails with `AppError::StorageWrite`.
    async fn put_record(&self, bucket: &str, key: &str, body: Vec<u8>) -> AppResult<()>;

    /// Returns every key currently stored under `prefix`, in no particular order.
    ///
    /// Fails with `AppError::StorageList`.
    async fn list_keys(&self, bucket: &str, prefix: &str) -> AppResult<Vec<String>>;

    /// Returns one record body.
    ///
    /// Fails with `AppError::StorageRead`, including when the key is absent.
    async fn get_record(&self, bucket: &str, key: &str) -> AppResult<Vec<u8>>;

    /// Removes one key. Removing an absent key succeeds.
    ///
    /// Fails with `AppError::StorageDelete`.
    async fn delete_record(&self, bucket: &str, key: &str) -> AppResult<()>;
}
