//! Content blob store
//!
//! Large text payloads (problem descriptions, submitted code) live outside the
//! relational store and are addressed by a logical key.

mod error;
mod traits;

pub mod filesystem;
pub mod memory;
pub mod s3_store;

use std::sync::Arc;

pub use error::StorageError;
pub use filesystem::FilesystemContentStore;
pub use memory::MemoryContentStore;
pub use s3_store::S3ContentStore;
pub use traits::{ContentStore, PutMode};

#[cfg(test)]
pub use traits::MockContentStore;

use crate::config::{ContentBackend, ContentStoreConfig};

/// Build the configured content store backend
pub async fn create_content_store(
    config: &ContentStoreConfig,
) -> Result<Arc<dyn ContentStore>, StorageError> {
    match config.backend {
        ContentBackend::Filesystem => Ok(Arc::new(
            FilesystemContentStore::new(config.root_path.clone()).await?,
        )),
        ContentBackend::Memory => Ok(Arc::new(MemoryContentStore::new())),
        ContentBackend::S3 => {
            let bucket = config.s3.as_ref().ok_or_else(|| {
                StorageError::Backend("S3 backend selected without bucket settings".to_string())
            })?;
            Ok(Arc::new(S3ContentStore::new(bucket)?))
        }
    }
}

/// Reject keys that could escape the store root
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
