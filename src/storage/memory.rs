use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StorageError;
use super::traits::{ContentStore, PutMode};
use super::validate_key;

/// In-process content store.
///
/// Used for local development (`CONTENT_STORE_BACKEND=memory`) and tests;
/// contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryContentStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn put(&self, key: &str, body: &str, mode: PutMode) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().await;

        match (entries.entry(key.to_string()), mode) {
            (Entry::Occupied(_), PutMode::CreateOnly) => {
                Err(StorageError::AlreadyExists(key.to_string()))
            }
            (Entry::Occupied(mut slot), PutMode::Overwrite) => {
                slot.insert(body.to_string());
                Ok(())
            }
            (Entry::Vacant(slot), _) => {
                slot.insert(body.to_string());
                Ok(())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}
