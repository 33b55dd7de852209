//! Key/value object storage.

use async_trait::async_trait;

use crate::error::Result;

/// Flat, key-addressed blob storage (S3-like).
///
/// Keys use `/` as a logical separator; there are no real directories.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List keys starting with `prefix`, in lexicographic order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Read an object. Missing keys yield `EtlError::NotFound`.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Create or overwrite an object.
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.list(key).await?.iter().any(|k| k == key))
    }
}
