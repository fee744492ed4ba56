use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::traits::{ContentStore, PutMode};
use super::validate_key;

/// Filesystem-backed content store.
///
/// A key maps to `{base_path}/{key}`, so `problems/{contest}/{problem}.json`
/// becomes a nested file. Every write lands in `{base_path}/.tmp` first and is
/// then published atomically: create-only writes hard-link the temp file into
/// place (which fails if the target exists), overwrites rename over it.
pub struct FilesystemContentStore {
    base_path: PathBuf,
}

impl FilesystemContentStore {
    /// Create a new filesystem content store rooted at `base_path`.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    fn content_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_path.join(key))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    async fn stage(&self, body: &str) -> Result<PathBuf, StorageError> {
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, body.as_bytes()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(temp_path)
    }

    async fn ensure_parent(path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FilesystemContentStore {
    async fn put(&self, key: &str, body: &str, mode: PutMode) -> Result<(), StorageError> {
        let target = self.content_path(key)?;
        Self::ensure_parent(&target).await?;

        let temp_path = self.stage(body).await?;

        let published = match mode {
            PutMode::CreateOnly => {
                let linked = fs::hard_link(&temp_path, &target).await;
                let _ = fs::remove_file(&temp_path).await;
                linked
            }
            PutMode::Overwrite => {
                let renamed = fs::rename(&temp_path, &target).await;
                if renamed.is_err() {
                    let _ = fs::remove_file(&temp_path).await;
                }
                renamed
            }
        };

        match published {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StorageError::AlreadyExists(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, key: &str) -> Result<String, StorageError> {
        let path = self.content_path(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        String::from_utf8(bytes).map_err(|_| StorageError::Encoding(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.content_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
