//! In-memory object store for testing and development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{EtlError, Result};
use crate::traits::store::ObjectStore;

/// In-memory object store.
///
/// Keys are kept sorted so listings are deterministic. Writes to keys under
/// a registered failure prefix return a storage error, which lets tests
/// simulate a crash between two handoff steps. Deletes can be failed the
/// same way.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
    failing_puts: RwLock<Vec<String>>,
    failing_deletes: RwLock<Vec<String>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `put` under `prefix` fail.
    pub async fn fail_puts_under(&self, prefix: impl Into<String>) {
        self.failing_puts.write().await.push(prefix.into());
    }

    /// Make every `delete` under `prefix` fail.
    pub async fn fail_deletes_under(&self, prefix: impl Into<String>) {
        self.failing_deletes.write().await.push(prefix.into());
    }

    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .objects
            .read()
            .await
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| EtlError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()> {
        check_injected(&self.failing_puts, "write", key).await?;
        self.objects.write().await.insert(key.to_string(), body);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        check_injected(&self.failing_deletes, "delete", key).await?;
        self.objects.write().await.remove(key);
        Ok(())
    }
}

async fn check_injected(prefixes: &RwLock<Vec<String>>, op: &str, key: &str) -> Result<()> {
    if prefixes
        .read()
        .await
        .iter()
        .any(|p| key.starts_with(p.as_str()))
    {
        return Err(EtlError::storage(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("injected {} failure for {}", op, key),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_object_crud() {
        let store = MemoryObjectStore::new();

        store.put("raw_data/to_process/a.csv", b"x".to_vec()).await.unwrap();
        store.put("raw_data/archive/b.csv", b"y".to_vec()).await.unwrap();
        assert_eq!(store.object_count().await, 2);

        assert_eq!(
            store.list("raw_data/to_process/").await.unwrap(),
            vec!["raw_data/to_process/a.csv".to_string()]
        );
        assert_eq!(store.get("raw_data/archive/b.csv").await.unwrap(), b"y");

        store.delete("raw_data/to_process/a.csv").await.unwrap();
        assert!(matches!(
            store.get("raw_data/to_process/a.csv").await,
            Err(EtlError::NotFound { .. })
        ));
        // deleting twice is fine
        store.delete("raw_data/to_process/a.csv").await.unwrap();
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryObjectStore::new();
        store.fail_puts_under("raw_data/archive/").await;

        assert!(store.put("raw_data/archive/x.csv", vec![]).await.is_err());
        assert!(store.put("raw_data/to_process/x.csv", vec![]).await.is_ok());
        assert!(store.exists("raw_data/to_process/x.csv").await.unwrap());
    }

    #[tokio::test]
    async fn test_injected_delete_failure() {
        let store = MemoryObjectStore::new();
        store.put("raw_data/to_process/x.csv", vec![]).await.unwrap();
        store.fail_deletes_under("raw_data/to_process/").await;

        assert!(store.delete("raw_data/to_process/x.csv").await.is_err());
        assert!(store.exists("raw_data/to_process/x.csv").await.unwrap());
    }
}
