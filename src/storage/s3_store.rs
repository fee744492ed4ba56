use async_trait::async_trait;
use s3::{Bucket, Region, creds::Credentials};

use super::error::StorageError;
use super::traits::{ContentStore, PutMode};
use super::validate_key;
use crate::config::S3Config;

/// S3-backed content store.
///
/// Keys are used verbatim as object keys. Create-only writes send
/// `If-None-Match: *`, so the service itself refuses to replace an existing
/// object and answers `412 Precondition Failed`.
pub struct S3ContentStore {
    bucket: Box<Bucket>,
    create_only: Box<Bucket>,
}

impl S3ContentStore {
    /// Build a client for the configured bucket. No request is made here.
    pub fn new(config: &S3Config) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse().map_err(|e| {
                StorageError::Backend(format!("invalid region {}: {e}", config.region))
            })?,
        };

        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access), Some(secret)) => {
                Credentials::new(Some(access.as_str()), Some(secret.as_str()), None, None, None)
            }
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::Backend(format!("credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        let mut create_only = bucket.clone();
        create_only.add_header("If-None-Match", "*");

        Ok(Self {
            bucket,
            create_only,
        })
    }
}

#[async_trait]
impl ContentStore for S3ContentStore {
    async fn put(&self, key: &str, body: &str, mode: PutMode) -> Result<(), StorageError> {
        validate_key(key)?;

        let bucket = match mode {
            PutMode::CreateOnly => &self.create_only,
            PutMode::Overwrite => &self.bucket,
        };
        let response = bucket
            .put_object(key, body.as_bytes())
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        put_outcome(key, response.status_code())
    }

    async fn get(&self, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;

        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        get_outcome(key, response.status_code())?;

        String::from_utf8(response.bytes().to_vec())
            .map_err(|_| StorageError::Encoding(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        delete_outcome(key, response.status_code())
    }
}

fn put_outcome(key: &str, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        // 409: a concurrent conditional write to the same key won the race
        412 | 409 => Err(StorageError::AlreadyExists(key.to_string())),
        other => Err(unexpected("put", key, other)),
    }
}

fn get_outcome(key: &str, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(key.to_string())),
        other => Err(unexpected("get", key, other)),
    }
}

fn delete_outcome(key: &str, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 | 404 => Ok(()),
        other => Err(unexpected("delete", key, other)),
    }
}

fn unexpected(op: &str, key: &str, status: u16) -> StorageError {
    tracing::error!(key = %key, status, "Object storage {} failed", op);
    StorageError::Backend(format!("{op} {key} returned HTTP {status}"))
}
