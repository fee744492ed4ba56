use async_trait::async_trait;

use super::error::StorageError;

/// Write semantics for [`ContentStore::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutMode {
    /// Fail with [`StorageError::AlreadyExists`] if the key already holds content.
    CreateOnly,
    /// Replace whatever the key holds.
    Overwrite,
}

/// Key-addressed text storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store `body` under `key`.
    async fn put(&self, key: &str, body: &str, mode: PutMode) -> Result<(), StorageError>;

    /// Retrieve the full body stored under `key`.
    async fn get(&self, key: &str) -> Result<String, StorageError>;

    /// Remove `key`.
    ///
    /// Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
