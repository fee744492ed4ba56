//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CONTENT_STORE_BACKEND, DEFAULT_CONTENT_STORE_PATH, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_S3_REGION, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub content_store: ContentStoreConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    /// Deadline applied to every request; the handler future is dropped when it fires
    pub request_timeout: Duration,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Content store configuration
#[derive(Debug, Clone)]
pub struct ContentStoreConfig {
    pub backend: ContentBackend,
    pub root_path: PathBuf,
    /// Present only when `backend` is [`ContentBackend::S3`]
    pub s3: Option<S3Config>,
}

/// Object storage bucket settings
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services such as MinIO
    pub endpoint: Option<String>,
    pub path_style: bool,
    /// Explicit credentials; the AWS environment and profile chain is used otherwise
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// Content store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentBackend {
    Filesystem,
    Memory,
    S3,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            content_store: ContentStoreConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?;

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: LogFormat::parse(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            )?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl ContentStoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = ContentBackend::parse(
            &env::var("CONTENT_STORE_BACKEND")
                .unwrap_or_else(|_| DEFAULT_CONTENT_STORE_BACKEND.to_string()),
        )?;
        let s3 = match backend {
            ContentBackend::S3 => Some(S3Config::from_env()?),
            _ => None,
        };

        Ok(Self {
            backend,
            root_path: PathBuf::from(
                env::var("CONTENT_STORE_PATH")
                    .unwrap_or_else(|_| DEFAULT_CONTENT_STORE_PATH.to_string()),
            ),
            s3,
        })
    }
}

impl S3Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bucket: env::var("S3_BUCKET")
                .map_err(|_| ConfigError::Missing("S3_BUCKET".to_string()))?,
            region: env::var("S3_REGION").unwrap_or_else(|_| DEFAULT_S3_REGION.to_string()),
            endpoint: env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty()),
            path_style: parse_flag(
                "S3_PATH_STYLE",
                &env::var("S3_PATH_STYLE").unwrap_or_else(|_| "false".to_string()),
            )?,
            access_key: env::var("S3_ACCESS_KEY").ok(),
            secret_key: env::var("S3_SECRET_KEY").ok(),
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

impl ContentBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "filesystem" | "fs" => Ok(Self::Filesystem),
            "memory" => Ok(Self::Memory),
            "s3" => Ok(Self::S3),
            _ => Err(ConfigError::InvalidValue("CONTENT_STORE_BACKEND".to_string())),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
            log_format: LogFormat::Pretty,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
        assert_eq!(server.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!(ContentBackend::parse("filesystem").unwrap(), ContentBackend::Filesystem);
        assert_eq!(ContentBackend::parse("MEMORY").unwrap(), ContentBackend::Memory);
        assert_eq!(ContentBackend::parse("s3").unwrap(), ContentBackend::S3);
        assert!(matches!(
            ContentBackend::parse("gcs"),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("S3_PATH_STYLE", "TRUE").unwrap());
        assert!(!parse_flag("S3_PATH_STYLE", "0").unwrap());
        assert!(matches!(
            parse_flag("S3_PATH_STYLE", "maybe"),
            Err(ConfigError::InvalidValue(name)) if name == "S3_PATH_STYLE"
        ));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::parse("yaml").is_err());
    }
}
