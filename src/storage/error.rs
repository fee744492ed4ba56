/// Errors that can occur during content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested key holds no content.
    #[error("content not found: {0}")]
    NotFound(String),

    /// A create-only write hit an existing key.
    #[error("content key already exists: {0}")]
    AlreadyExists(String),

    /// The key is malformed or escapes the store root.
    #[error("invalid content key: {0}")]
    InvalidKey(String),

    /// The stored bytes are not valid UTF-8.
    #[error("content under {0} is not valid UTF-8")]
    Encoding(String),

    /// The object storage service rejected or failed a request.
    #[error("object storage error: {0}")]
    Backend(String),

    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
